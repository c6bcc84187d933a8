//! Test fixtures and helpers.
//!
//! A small ship list, host configurations, and pre-built battle setups
//! for consistent testing.

use std::sync::Arc;

use ccsim_core::config::HostConfiguration;
use ccsim_core::cost::Cost;
use ccsim_core::data::{BeamData, EngineData, HullData, ShipList, TorpedoData};
use ccsim_core::object::SimObject;
use ccsim_core::result::{BattleDatabase, BattleHandle};
use ccsim_core::setup::Setup;
use ccsim_core::ship::AGG_KILL;

// ============================================================================
// Ship list
// ============================================================================

/// Hull number of the scout in [`ship_list`].
pub const HULL_SCOUT: i32 = 1;
/// Hull number of the torpedo destroyer in [`ship_list`].
pub const HULL_DESTROYER: i32 = 2;
/// Hull number of the carrier in [`ship_list`].
pub const HULL_CARRIER: i32 = 3;

fn hull(name: &str, mass: i32, tech_level: i32, weapons: (i32, i32, i32), cost: Cost) -> HullData {
    let (max_beams, max_launchers, num_bays) = weapons;
    HullData {
        name: name.to_string(),
        mass,
        tech_level,
        max_crew: mass * 2,
        max_cargo: mass / 2,
        num_engines: 1 + mass / 200,
        max_beams,
        max_launchers,
        num_bays,
        cost,
    }
}

fn beam(name: &str, tech_level: i32, money: i32, kill_power: i32, damage_power: i32) -> BeamData {
    BeamData {
        name: name.to_string(),
        tech_level,
        cost: Cost::new(1, 0, tech_level, money, 0),
        kill_power,
        damage_power,
    }
}

fn launcher(name: &str, tech_level: i32, torpedo_money: i32) -> TorpedoData {
    TorpedoData {
        name: name.to_string(),
        tech_level,
        cost: Cost::new(1, tech_level, 0, torpedo_money, 0),
        torpedo_cost: Cost::new(1, 1, 1, torpedo_money, 0),
        kill_power: tech_level * 3,
        damage_power: tech_level * 5,
    }
}

/// Three hulls, three engines, three beams, and three launchers.
///
/// Hulls are [`HULL_SCOUT`] (one beam), [`HULL_DESTROYER`] (beams and
/// two launchers) and [`HULL_CARRIER`] (beams and ten bays).
#[must_use]
pub fn ship_list() -> ShipList {
    ShipList {
        hulls: vec![
            hull("OUTRIDER CLASS SCOUT", 75, 1, (1, 0, 0), Cost::new(40, 20, 5, 50, 0)),
            hull("NOCTURNE CLASS DESTROYER", 90, 2, (4, 2, 0), Cost::new(50, 25, 7, 70, 0)),
            hull("GORBIE CLASS BATTLECARRIER", 980, 10, (10, 0, 10), Cost::new(471, 290, 315, 870, 0)),
        ],
        engines: vec![
            EngineData {
                name: "StarDrive 1".to_string(),
                tech_level: 1,
                cost: Cost::new(5, 1, 0, 1, 0),
            },
            EngineData {
                name: "Nova Drive 5".to_string(),
                tech_level: 5,
                cost: Cost::new(3, 3, 7, 25, 0),
            },
            EngineData {
                name: "Transwarp Drive".to_string(),
                tech_level: 10,
                cost: Cost::new(3, 16, 35, 300, 0),
            },
        ],
        beams: vec![
            beam("Laser", 1, 1, 10, 3),
            beam("Disruptor", 5, 20, 35, 20),
            beam("Heavy Phaser", 10, 54, 35, 45),
        ],
        launchers: vec![
            launcher("Mark 1 Photon", 1, 1),
            launcher("Mark 4 Photon", 5, 20),
            launcher("Mark 8 Photon", 10, 54),
        ],
    }
}

// ============================================================================
// Host configuration
// ============================================================================

/// Default host configuration.
#[must_use]
pub fn host_config() -> HostConfiguration {
    HostConfiguration::default()
}

/// Host configuration where planets fight with torpedoes.
#[must_use]
pub fn host_config_with_tubes() -> HostConfiguration {
    HostConfiguration {
        planets_have_tubes: true,
        ..HostConfiguration::default()
    }
}

// ============================================================================
// Setups
// ============================================================================

/// Two armed ships of players 1 and 2, no planet.
///
/// Slot 0 is destroyer "Ares" (#10), slot 1 is carrier "Bellona" (#20).
#[must_use]
pub fn duel_setup() -> Setup {
    let list = ship_list();
    let mut setup = Setup::new();

    let ares = setup.add_ship();
    ares.set_id(10);
    ares.set_name("Ares");
    ares.set_owner(1);
    ares.set_friendly_code("abc");
    ares.set_hull_type(HULL_DESTROYER, &list);
    ares.set_aggressiveness(AGG_KILL);

    let bellona = setup.add_ship();
    bellona.set_id(20);
    bellona.set_name("Bellona");
    bellona.set_owner(2);
    bellona.set_friendly_code("xyz");
    bellona.set_hull_type(HULL_CARRIER, &list);
    bellona.set_aggressiveness(AGG_KILL);

    setup
}

/// [`duel_setup`] plus a starbase planet of player 2.
///
/// The planet (#100) has 50 defense posts, tech 5 beams, tech 2
/// torpedoes with 10 rounds stocked, and 20 fighters.
#[must_use]
pub fn planet_setup() -> Setup {
    let mut setup = duel_setup();
    let planet = setup.add_planet();
    planet.set_id(100);
    planet.set_owner(2);
    planet.set_friendly_code("NUK");
    planet.set_defense(50);
    planet.set_base_defense(100);
    planet.set_base_beam_tech(5);
    planet.set_base_torpedo_tech(2);
    planet.set_num_base_torpedoes(2, 10);
    planet.set_base_fighters(20);
    setup
}

// ============================================================================
// Recorded battles
// ============================================================================

/// Stand-in for recorded fights; only knows how many there are.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordedBattles {
    /// Number of fights.
    pub fights: usize,
}

impl BattleDatabase for RecordedBattles {
    fn num_battles(&self) -> usize {
        self.fights
    }
}

/// Shared handle to `fights` recorded fights.
#[must_use]
pub fn recorded_battles(fights: usize) -> BattleHandle {
    Arc::new(RecordedBattles { fights })
}
