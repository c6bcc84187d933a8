//! Outcome classes.
//!
//! Battles are grouped by outcome: two battles belong to the same class if
//! every player ends up owning the same number of units.

use std::sync::Arc;

use crate::math::rescale;
use crate::players::{PlayerArray, MAX_PLAYERS};
use crate::result::{BattleHandle, SimulationResult};
use crate::setup::Setup;

/// One outcome class with its accumulated weight.
#[derive(Debug, Clone)]
pub struct ClassResult {
    owned_units: PlayerArray<i32>,
    weight: i32,
    sample_battle: Option<BattleHandle>,
}

impl ClassResult {
    /// Classify the outcome of one battle.
    ///
    /// Units of unowned or out-of-range players are not counted.
    #[must_use]
    pub fn new(after: &Setup, result: &SimulationResult) -> Self {
        let mut owned_units = PlayerArray::new();
        for owner in after.objects().map(|o| o.owner()) {
            if (1..=MAX_PLAYERS).contains(&owner) {
                owned_units.set(owner, owned_units.get(owner) + 1);
            }
        }
        Self {
            owned_units,
            weight: result.this_battle_weight,
            sample_battle: result.battles.as_ref().map(Arc::clone),
        }
    }

    /// Check whether two results describe the same outcome.
    #[must_use]
    pub fn is_same_class(&self, other: &Self) -> bool {
        self.owned_units == other.owned_units
    }

    /// Merge another result of the same class.
    ///
    /// The other result's sample battle replaces this one's.
    ///
    /// # Panics
    ///
    /// Panics if `other` is of a different class.
    pub fn add_same_class_result(&mut self, other: &Self) {
        assert!(self.is_same_class(other), "merging results of different classes");
        self.weight += other.weight;
        self.sample_battle.clone_from(&other.sample_battle);
    }

    /// Move the weight to a new total weight.
    pub fn change_weight(&mut self, old_weight: i32, new_weight: i32) {
        let scaled = rescale(i64::from(self.weight), i64::from(old_weight), i64::from(new_weight));
        self.weight = i32::try_from(scaled).unwrap_or(i32::MAX);
    }

    /// Units owned per player.
    #[must_use]
    pub const fn owned_units(&self) -> &PlayerArray<i32> {
        &self.owned_units
    }

    /// Accumulated weight.
    #[must_use]
    pub const fn weight(&self) -> i32 {
        self.weight
    }

    /// Most recent battle of this class.
    #[must_use]
    pub fn sample_battle(&self) -> Option<BattleHandle> {
        self.sample_battle.as_ref().map(Arc::clone)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::SimObject;

    fn setup(owners: &[i32], planet_owner: Option<i32>) -> Setup {
        let mut setup = Setup::new();
        for &owner in owners {
            setup.add_ship().set_owner(owner);
        }
        if let Some(owner) = planet_owner {
            setup.add_planet().set_owner(owner);
        }
        setup
    }

    #[test]
    fn test_owned_units() {
        let class = ClassResult::new(&setup(&[7, 2, 0, 40], Some(7)), &SimulationResult::new(3, 4, 0));
        assert_eq!(class.owned_units().get(7), 2);
        assert_eq!(class.owned_units().get(2), 1);
        assert_eq!(class.owned_units().get(0), 0);
        assert_eq!(class.weight(), 3);
        assert!(class.sample_battle().is_none());
    }

    #[test]
    fn test_same_class() {
        let r = SimulationResult::new(1, 1, 0);
        let a = ClassResult::new(&setup(&[1, 2], None), &r);
        let b = ClassResult::new(&setup(&[2], Some(1)), &r);
        let c = ClassResult::new(&setup(&[2, 2], None), &r);
        assert!(a.is_same_class(&b));
        assert!(!a.is_same_class(&c));
    }

    #[test]
    fn test_merge_and_scale() {
        let mut a = ClassResult::new(&setup(&[1], None), &SimulationResult::new(2, 8, 0));
        let b = ClassResult::new(&setup(&[1], None), &SimulationResult::new(3, 8, 1));
        a.add_same_class_result(&b);
        assert_eq!(a.weight(), 5);
        a.change_weight(8, 16);
        assert_eq!(a.weight(), 10);
    }

    #[test]
    #[should_panic(expected = "different classes")]
    fn test_merge_mismatch_panics() {
        let r = SimulationResult::new(1, 1, 0);
        let mut a = ClassResult::new(&setup(&[1], None), &r);
        let b = ClassResult::new(&setup(&[2], None), &r);
        a.add_same_class_result(&b);
    }
}
