//! Simulated planet, optionally with a starbase.

use serde::{Deserialize, Serialize};

use crate::data::{ShipList, NUM_TORPEDO_TYPES};
use crate::object::{update, Object, SimObject};

/// A simulated planet.
///
/// The planet has a starbase if its base beam tech is nonzero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Planet {
    object: Object,
    defense: i32,
    base_defense: i32,
    base_beam_tech: i32,
    base_torpedo_tech: i32,
    base_fighters: i32,
    base_torpedoes: [i32; NUM_TORPEDO_TYPES],
}

impl Default for Planet {
    fn default() -> Self {
        Self {
            object: Object::default(),
            defense: 10,
            base_defense: 0,
            base_beam_tech: 0,
            base_torpedo_tech: 0,
            base_fighters: 0,
            base_torpedoes: [0; NUM_TORPEDO_TYPES],
        }
    }
}

impl SimObject for Planet {
    fn common(&self) -> &Object {
        &self.object
    }

    fn common_mut(&mut self) -> &mut Object {
        &mut self.object
    }
}

impl Planet {
    /// Create a planet with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn set(&mut self, field: fn(&mut Self) -> &mut i32, value: i32) {
        let mut dirty = self.object.dirty;
        update(field(self), value, &mut dirty);
        self.object.dirty = dirty;
    }

    /// Planetary defense posts.
    #[must_use]
    pub const fn defense(&self) -> i32 {
        self.defense
    }

    /// Set planetary defense posts.
    pub fn set_defense(&mut self, defense: i32) {
        self.set(|p| &mut p.defense, defense);
    }

    /// Starbase defense posts.
    #[must_use]
    pub const fn base_defense(&self) -> i32 {
        self.base_defense
    }

    /// Set starbase defense posts.
    pub fn set_base_defense(&mut self, defense: i32) {
        self.set(|p| &mut p.base_defense, defense);
    }

    /// Starbase beam tech level, 0 for no starbase.
    #[must_use]
    pub const fn base_beam_tech(&self) -> i32 {
        self.base_beam_tech
    }

    /// Set starbase beam tech level.
    pub fn set_base_beam_tech(&mut self, level: i32) {
        self.set(|p| &mut p.base_beam_tech, level);
    }

    /// Starbase torpedo tech level.
    #[must_use]
    pub const fn base_torpedo_tech(&self) -> i32 {
        self.base_torpedo_tech
    }

    /// Set starbase torpedo tech level.
    pub fn set_base_torpedo_tech(&mut self, level: i32) {
        self.set(|p| &mut p.base_torpedo_tech, level);
    }

    /// Fighters stored on the starbase.
    #[must_use]
    pub const fn base_fighters(&self) -> i32 {
        self.base_fighters
    }

    /// Set starbase fighters.
    pub fn set_base_fighters(&mut self, count: i32) {
        self.set(|p| &mut p.base_fighters, count);
    }

    /// Torpedoes of one type stored on the starbase.
    ///
    /// Types are numbered from 1; others yield 0.
    #[must_use]
    pub fn num_base_torpedoes(&self, torpedo_type: i32) -> i32 {
        torpedo_index(torpedo_type).map_or(0, |i| self.base_torpedoes[i])
    }

    /// Set torpedoes of one type. Invalid types are ignored.
    pub fn set_num_base_torpedoes(&mut self, torpedo_type: i32, count: i32) {
        if let Some(i) = torpedo_index(torpedo_type) {
            update(&mut self.base_torpedoes[i], count, &mut self.object.dirty);
        }
    }

    /// Total torpedoes of all types stored on the starbase.
    #[must_use]
    pub fn total_base_torpedoes(&self) -> i32 {
        self.base_torpedoes.iter().sum()
    }

    /// Express the whole torpedo stock as a count of one torpedo type.
    ///
    /// Each type is valued at its per-round money cost; the total value is
    /// divided by the value of one `torpedo_type` round and rounded down.
    /// Returns 0 if the type is unknown or free.
    #[must_use]
    pub fn num_base_torpedoes_as_type(&self, torpedo_type: i32, ship_list: &ShipList) -> i32 {
        let Some(target) = ship_list.launcher(torpedo_type) else {
            return 0;
        };
        let unit_cost = target.torpedo_cost.money;
        if unit_cost <= 0 {
            return 0;
        }
        let total: i64 = (1..=NUM_TORPEDO_TYPES as i32)
            .filter_map(|t| {
                ship_list
                    .launcher(t)
                    .map(|l| i64::from(l.torpedo_cost.money) * i64::from(self.num_base_torpedoes(t)))
            })
            .sum();
        i32::try_from(total / i64::from(unit_cost)).unwrap_or(i32::MAX)
    }

    /// Check for a starbase.
    #[must_use]
    pub const fn has_base(&self) -> bool {
        self.base_beam_tech > 0
    }

    /// Check whether the planet can defend itself in combat.
    #[must_use]
    pub const fn has_defense(&self) -> bool {
        self.defense > 0 || self.base_fighters > 0 || (self.has_base() && self.base_defense > 0)
    }
}

fn torpedo_index(torpedo_type: i32) -> Option<usize> {
    let index = usize::try_from(torpedo_type).ok()?.checked_sub(1)?;
    (index < NUM_TORPEDO_TYPES).then_some(index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cost::Cost;
    use crate::data::TorpedoData;

    fn torpedo(name: &str, money: i32) -> TorpedoData {
        TorpedoData {
            name: name.to_string(),
            tech_level: 1,
            cost: Cost::money(money),
            torpedo_cost: Cost::money(money),
            kill_power: 0,
            damage_power: 0,
        }
    }

    #[test]
    fn test_planet_defaults() {
        let planet = Planet::new();
        assert_eq!(planet.id(), 1);
        assert_eq!(planet.defense(), 10);
        assert_eq!(planet.base_fighters(), 0);
        assert!(!planet.has_base());
        assert!(planet.has_defense());
    }

    #[test]
    fn test_has_base() {
        let mut planet = Planet::new();
        planet.set_base_defense(50);
        assert!(!planet.has_base());
        planet.set_base_beam_tech(1);
        assert!(planet.has_base());
    }

    #[test]
    fn test_torpedo_stock_bounds() {
        let mut planet = Planet::new();
        planet.set_num_base_torpedoes(3, 17);
        planet.set_num_base_torpedoes(0, 5);
        planet.set_num_base_torpedoes(11, 5);
        assert!(planet.is_dirty());
        assert_eq!(planet.num_base_torpedoes(3), 17);
        assert_eq!(planet.num_base_torpedoes(0), 0);
        assert_eq!(planet.num_base_torpedoes(11), 0);
        assert_eq!(planet.total_base_torpedoes(), 17);
    }

    #[test]
    fn test_torpedoes_as_type() {
        let list = ShipList {
            launchers: vec![torpedo("Cheap", 1), torpedo("Mid", 5), torpedo("Free", 0)],
            ..ShipList::default()
        };
        let mut planet = Planet::new();
        planet.set_num_base_torpedoes(1, 12);
        planet.set_num_base_torpedoes(2, 3);
        assert_eq!(planet.num_base_torpedoes_as_type(1, &list), 27);
        assert_eq!(planet.num_base_torpedoes_as_type(2, &list), 5);
        assert_eq!(planet.num_base_torpedoes_as_type(3, &list), 0);
        assert_eq!(planet.num_base_torpedoes_as_type(4, &list), 0);
    }
}
