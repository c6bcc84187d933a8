//! Battle order computation.
//!
//! The battle order decides which units fight first when several fights
//! take place at one location. Host and `PHost` compute it differently:
//!
//! - Host orders ships by armament and mission only. Planets have no battle
//!   order.
//! - `PHost` lets a numeric friendly code set the battle order directly,
//!   for ships and planets alike. Planets with friendly code `ATT` or `NUK`
//!   go first.
//!
//! Lower values fight first.

use crate::config::{HostKind, HostVersion};
use crate::map::{MapObject, MapPlanet, MapShip, MISSION_KILL};
use crate::object::{ObjectRef, SimObject};
use crate::planet::Planet;
use crate::ship::Ship;

/// Battle order computation for one host version.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BattleOrderRule {
    host: HostVersion,
}

/// Reference Host version used by [`host_battle_order`].
pub const HOST_REFERENCE: BattleOrderRule =
    BattleOrderRule::new(HostVersion::new(HostKind::Host, HostVersion::mkversion(3, 22, 48)));

/// Reference `PHost` version used by [`phost_battle_order`].
pub const PHOST_REFERENCE: BattleOrderRule =
    BattleOrderRule::new(HostVersion::new(HostKind::PHost, HostVersion::mkversion(4, 0, 0)));

fn parse_numeric_code(friendly_code: &str) -> Option<i32> {
    friendly_code.trim().parse().ok()
}

impl BattleOrderRule {
    /// Value for units without a battle order.
    pub const UNKNOWN: i32 = i32::MAX;

    /// Create a rule for a host version.
    #[must_use]
    pub const fn new(host: HostVersion) -> Self {
        Self { host }
    }

    /// Host version this rule follows.
    #[must_use]
    pub const fn host(&self) -> HostVersion {
        self.host
    }

    /// Battle order of a simulated ship.
    #[must_use]
    pub fn get_sim_ship(&self, ship: &Ship) -> i32 {
        self.get_ship_battle_order(
            ship.friendly_code(),
            ship.has_weapons(),
            ship.has_enemy(),
            ship.has_kill_mission(),
        )
    }

    /// Battle order of a simulated planet.
    #[must_use]
    pub fn get_sim_planet(&self, planet: &Planet) -> i32 {
        self.get_planet_battle_order(planet.friendly_code(), planet.has_defense())
    }

    /// Battle order of any simulated unit.
    #[must_use]
    pub fn get_sim_object(&self, object: ObjectRef<'_>) -> i32 {
        match object {
            ObjectRef::Ship(ship) => self.get_sim_ship(ship),
            ObjectRef::Planet(planet) => self.get_sim_planet(planet),
        }
    }

    /// Battle order of a live ship.
    ///
    /// Returns [`Self::UNKNOWN`] if the friendly code or armament is unknown.
    #[must_use]
    pub fn get_map_ship(&self, ship: &MapShip) -> i32 {
        let (Some(code), Some(has_weapons)) = (&ship.friendly_code, ship.has_weapons()) else {
            return Self::UNKNOWN;
        };
        let has_kill = ship.mission == Some(MISSION_KILL);
        let has_enemy = has_kill || ship.primary_enemy.unwrap_or(0) != 0;
        self.get_ship_battle_order(code, has_weapons, has_enemy, has_kill)
    }

    /// Battle order of a live planet.
    ///
    /// Returns [`Self::UNKNOWN`] if the friendly code is unknown.
    #[must_use]
    pub fn get_map_planet(&self, planet: &MapPlanet) -> i32 {
        planet.friendly_code.as_deref().map_or(Self::UNKNOWN, |code| {
            self.get_planet_battle_order(code, planet.has_defense())
        })
    }

    /// Battle order of any live object. Objects other than ships and
    /// planets have none.
    #[must_use]
    pub fn get_map_object(&self, object: &MapObject) -> i32 {
        match object {
            MapObject::Ship(ship) => self.get_map_ship(ship),
            MapObject::Planet(planet) => self.get_map_planet(planet),
            MapObject::Minefield(_) | MapObject::Ufo(_) => Self::UNKNOWN,
        }
    }

    /// Battle order of a ship from its raw attributes.
    #[must_use]
    pub fn get_ship_battle_order(
        &self,
        friendly_code: &str,
        has_weapons: bool,
        has_enemy: bool,
        has_kill: bool,
    ) -> i32 {
        if self.host.is_phost() {
            if let Some(value) = parse_numeric_code(friendly_code) {
                return value;
            }
            match (has_weapons, has_kill) {
                (true, true) => 1000,
                (true, false) => 1002,
                (false, _) => 1004,
            }
        } else {
            match (has_weapons, has_enemy, has_kill) {
                (true, _, true) => 1000,
                (true, true, false) => 1005,
                (true, false, false) => 1010,
                (false, _, _) => 1015,
            }
        }
    }

    /// Battle order of a planet from its raw attributes.
    #[must_use]
    pub fn get_planet_battle_order(&self, friendly_code: &str, has_defense: bool) -> i32 {
        if !self.host.is_phost() {
            return Self::UNKNOWN;
        }
        if let Some(value) = parse_numeric_code(friendly_code) {
            value
        } else if friendly_code == "ATT" || friendly_code == "NUK" {
            0
        } else if has_defense {
            1001
        } else {
            1003
        }
    }
}

/// Battle order of a simulated unit under the reference Host version.
#[must_use]
pub fn host_battle_order(object: ObjectRef<'_>) -> i32 {
    HOST_REFERENCE.get_sim_object(object)
}

/// Battle order of a simulated unit under the reference `PHost` version.
#[must_use]
pub fn phost_battle_order(object: ObjectRef<'_>) -> i32 {
    PHOST_REFERENCE.get_sim_object(object)
}
