//! Simulated ship.

use serde::{Deserialize, Serialize};

use crate::data::ShipList;
use crate::object::{update, Object, SimObject};

/// Aggressiveness value for a ship on a kill mission.
pub const AGG_KILL: i32 = -1;
/// Aggressiveness value for a passive ship.
pub const AGG_PASSIVE: i32 = 0;
/// Aggressiveness value for a ship without fuel.
pub const AGG_NO_FUEL: i32 = 13;

/// A simulated ship.
///
/// Hull type 0 denotes a custom ship whose component counts are not bound
/// by any hull. Aggressiveness is [`AGG_KILL`], [`AGG_PASSIVE`],
/// [`AGG_NO_FUEL`], or the primary enemy player number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ship {
    object: Object,
    crew: i32,
    hull_type: i32,
    mass: i32,
    beam_type: i32,
    num_beams: i32,
    torpedo_type: i32,
    num_launchers: i32,
    num_bays: i32,
    ammo: i32,
    engine_type: i32,
    aggressiveness: i32,
    intercept_id: i32,
}

impl Default for Ship {
    fn default() -> Self {
        Self {
            object: Object::default(),
            crew: 10,
            hull_type: 0,
            mass: 100,
            beam_type: 0,
            num_beams: 0,
            torpedo_type: 0,
            num_launchers: 0,
            num_bays: 0,
            ammo: 0,
            engine_type: 1,
            aggressiveness: AGG_PASSIVE,
            intercept_id: 0,
        }
    }
}

impl SimObject for Ship {
    fn common(&self) -> &Object {
        &self.object
    }

    fn common_mut(&mut self) -> &mut Object {
        &mut self.object
    }
}

impl Ship {
    /// Create a ship with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn set(&mut self, field: fn(&mut Self) -> &mut i32, value: i32) {
        let mut dirty = self.object.dirty;
        update(field(self), value, &mut dirty);
        self.object.dirty = dirty;
    }

    /// Crew size.
    #[must_use]
    pub const fn crew(&self) -> i32 {
        self.crew
    }

    /// Set crew size.
    pub fn set_crew(&mut self, crew: i32) {
        self.set(|s| &mut s.crew, crew);
    }

    /// Hull type, 0 for a custom ship.
    #[must_use]
    pub const fn hull_type(&self) -> i32 {
        self.hull_type
    }

    /// Set hull type without touching other attributes.
    pub fn set_hull_type_only(&mut self, hull_type: i32) {
        self.set(|s| &mut s.hull_type, hull_type);
    }

    /// Set hull type and take the hull's standard equipment.
    ///
    /// Crew, mass and weapon counts are set to the hull's maxima, ammo to
    /// its cargo capacity if the ship carries torpedoes or fighters. Ships
    /// without a weapon type get the best one in the list. A custom hull
    /// type (0) or an unknown hull only changes the hull type.
    pub fn set_hull_type(&mut self, hull_type: i32, ship_list: &ShipList) {
        self.set_hull_type_only(hull_type);
        let Some(hull) = ship_list.hull(hull_type) else {
            return;
        };
        self.set_crew(hull.max_crew);
        self.set_mass(hull.mass);
        self.set_num_beams(hull.max_beams);
        self.set_num_launchers(hull.max_launchers);
        self.set_num_bays(hull.num_bays);
        if hull.max_beams > 0 && self.beam_type == 0 {
            self.set_beam_type(i32::try_from(ship_list.beams.len()).unwrap_or(0));
        }
        if hull.max_launchers > 0 && self.torpedo_type == 0 {
            self.set_torpedo_type(ship_list.num_launchers());
        }
        self.set_ammo(if hull.max_launchers > 0 || hull.num_bays > 0 {
            hull.max_cargo
        } else {
            0
        });
    }

    /// Check for a custom ship.
    #[must_use]
    pub const fn is_custom_ship(&self) -> bool {
        self.hull_type == 0
    }

    /// Ship mass in kt.
    #[must_use]
    pub const fn mass(&self) -> i32 {
        self.mass
    }

    /// Set ship mass.
    pub fn set_mass(&mut self, mass: i32) {
        self.set(|s| &mut s.mass, mass);
    }

    /// Beam type.
    #[must_use]
    pub const fn beam_type(&self) -> i32 {
        self.beam_type
    }

    /// Set beam type.
    pub fn set_beam_type(&mut self, beam_type: i32) {
        self.set(|s| &mut s.beam_type, beam_type);
    }

    /// Number of beams.
    #[must_use]
    pub const fn num_beams(&self) -> i32 {
        self.num_beams
    }

    /// Set number of beams.
    pub fn set_num_beams(&mut self, count: i32) {
        self.set(|s| &mut s.num_beams, count);
    }

    /// Torpedo type.
    #[must_use]
    pub const fn torpedo_type(&self) -> i32 {
        self.torpedo_type
    }

    /// Set torpedo type.
    pub fn set_torpedo_type(&mut self, torpedo_type: i32) {
        self.set(|s| &mut s.torpedo_type, torpedo_type);
    }

    /// Number of torpedo launchers.
    #[must_use]
    pub const fn num_launchers(&self) -> i32 {
        self.num_launchers
    }

    /// Set number of torpedo launchers.
    pub fn set_num_launchers(&mut self, count: i32) {
        self.set(|s| &mut s.num_launchers, count);
    }

    /// Number of fighter bays.
    #[must_use]
    pub const fn num_bays(&self) -> i32 {
        self.num_bays
    }

    /// Set number of fighter bays.
    pub fn set_num_bays(&mut self, count: i32) {
        self.set(|s| &mut s.num_bays, count);
    }

    /// Torpedoes or fighters aboard.
    #[must_use]
    pub const fn ammo(&self) -> i32 {
        self.ammo
    }

    /// Set ammo.
    pub fn set_ammo(&mut self, ammo: i32) {
        self.set(|s| &mut s.ammo, ammo);
    }

    /// Engine type.
    #[must_use]
    pub const fn engine_type(&self) -> i32 {
        self.engine_type
    }

    /// Set engine type.
    pub fn set_engine_type(&mut self, engine_type: i32) {
        self.set(|s| &mut s.engine_type, engine_type);
    }

    /// Aggressiveness.
    #[must_use]
    pub const fn aggressiveness(&self) -> i32 {
        self.aggressiveness
    }

    /// Set aggressiveness.
    pub fn set_aggressiveness(&mut self, aggressiveness: i32) {
        self.set(|s| &mut s.aggressiveness, aggressiveness);
    }

    /// Id of the ship being intercepted, 0 for none.
    #[must_use]
    pub const fn intercept_id(&self) -> i32 {
        self.intercept_id
    }

    /// Set intercept target.
    pub fn set_intercept_id(&mut self, id: i32) {
        self.set(|s| &mut s.intercept_id, id);
    }

    /// Check whether the ship carries any weapon.
    #[must_use]
    pub const fn has_weapons(&self) -> bool {
        self.num_beams > 0 || self.num_launchers > 0 || self.num_bays > 0
    }

    /// Check whether the ship attacks anything.
    #[must_use]
    pub const fn has_enemy(&self) -> bool {
        self.aggressiveness != AGG_PASSIVE && self.aggressiveness != AGG_NO_FUEL
    }

    /// Check whether the ship is on a kill mission.
    #[must_use]
    pub const fn has_kill_mission(&self) -> bool {
        self.aggressiveness == AGG_KILL
    }

    /// Check whether the ship is consistent with a ship list.
    ///
    /// Component types in use must exist. For non-custom ships the hull
    /// must exist, weapon counts must stay within its maxima, the bay
    /// count must match, and ammo must fit into the cargo room.
    #[must_use]
    pub fn is_matching_ship_list(&self, ship_list: &ShipList) -> bool {
        if ship_list.engine(self.engine_type).is_none() {
            return false;
        }
        if self.num_beams > 0 && ship_list.beam(self.beam_type).is_none() {
            return false;
        }
        if self.num_launchers > 0 && ship_list.launcher(self.torpedo_type).is_none() {
            return false;
        }
        if self.is_custom_ship() {
            return true;
        }
        let Some(hull) = ship_list.hull(self.hull_type) else {
            return false;
        };
        self.num_beams <= hull.max_beams
            && self.num_launchers <= hull.max_launchers
            && self.num_bays == hull.num_bays
            && self.ammo <= hull.max_cargo
    }
}
