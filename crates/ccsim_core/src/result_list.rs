//! Aggregation of many simulated battles.
//!
//! A [`ResultList`] folds the outcome of each simulated battle into one
//! [`UnitResult`] per unit slot and a list of [`ClassResult`]s.
//!
//! All weights in the list share one denominator, the total weight. A
//! battle with a larger total weight rescales everything already stored;
//! a battle with a smaller one is scaled up before it is added. Afterwards
//! the class weights always add up to the cumulative weight.
//!
//! Class results are kept sorted by descending weight.

use crate::class_result::ClassResult;
use crate::math::{percent, rescale, Ratio};
use crate::object::ObjectRef;
use crate::players::PlayerArray;
use crate::result::{BattleHandle, SimulationResult, Statistic};
use crate::setup::Setup;
use crate::translator::Translator;
use crate::unit_result::{Item, UnitResult};

// ============================================================================
// Descriptions
// ============================================================================

/// Kind of value shown for a unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnitInfoType {
    /// Damage after the battle.
    Damage,
    /// Shield level after the battle.
    Shield,
    /// Crew left.
    Crew,
    /// Defense posts lost.
    DefenseLost,
    /// Fighters lost.
    NumFightersLost,
    /// Torpedoes fired.
    NumTorpedoesFired,
    /// Torpedo hits.
    NumTorpedoHits,
    /// Fewest fighters aboard.
    MinFightersAboard,
}

impl UnitInfoType {
    /// Human-readable label.
    #[must_use]
    pub fn to_string(self, tx: &dyn Translator) -> String {
        tx.translate(match self {
            Self::Damage => "Damage",
            Self::Shield => "Shield",
            Self::Crew => "Crew left",
            Self::DefenseLost => "Defense lost",
            Self::NumFightersLost => "Fighters lost",
            Self::NumTorpedoesFired => "Torpedoes fired",
            Self::NumTorpedoHits => "Torpedo hits",
            Self::MinFightersAboard => "Min. fighters aboard",
        })
    }

    fn item(self, unit: &UnitResult) -> &Item {
        match self {
            Self::Damage => unit.damage(),
            Self::Shield => unit.shield(),
            Self::Crew | Self::DefenseLost => unit.crew_left_or_defense_lost(),
            Self::NumFightersLost => unit.num_fighters_lost(),
            Self::NumTorpedoesFired => unit.num_torpedoes_fired(),
            Self::NumTorpedoHits => unit.num_torpedo_hits(),
            Self::MinFightersAboard => unit.min_fighters_aboard(),
        }
    }
}

/// One value shown for a unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitInfo {
    /// What the value is.
    pub kind: UnitInfoType,
    /// Smallest value seen.
    pub min: i32,
    /// Largest value seen.
    pub max: i32,
    /// Weighted mean.
    pub average: Ratio,
    /// A battle showing the minimum is available.
    pub has_min_specimen: bool,
    /// A battle showing the maximum is available.
    pub has_max_specimen: bool,
}

/// Description of one unit's statistics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitResultInfo {
    /// Fights the unit took part in.
    pub num_fights: i32,
    /// Battles the unit kept its owner.
    pub num_fights_won: i32,
    /// Battles the unit changed owner.
    pub num_captures: i32,
    /// Values relevant for the unit's equipment.
    pub items: Vec<UnitInfo>,
}

/// Description of one outcome class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassInfo {
    /// Share of the cumulative weight, e.g. `"37.5%"`.
    pub label: String,
    /// Weight of the class.
    pub weight: i32,
    /// Units owned per player.
    pub owned_units: PlayerArray<i32>,
    /// A sample battle is available.
    pub has_sample: bool,
}

// ============================================================================
// Result list
// ============================================================================

/// Aggregated results of a simulation run.
#[derive(Debug, Clone, Default)]
pub struct ResultList {
    unit_results: Vec<UnitResult>,
    class_results: Vec<ClassResult>,
    total_weight: i32,
    cumulative_weight: i32,
    num_battles: i32,
    last_class_result_index: usize,
}

impl ResultList {
    /// Create an empty list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold in one battle.
    ///
    /// `before` is the setup the battle started from, `after` its outcome,
    /// `stats` has one entry per unit slot.
    ///
    /// # Panics
    ///
    /// Panics if the setups, statistics and earlier battles disagree on the
    /// number of units, or if a slot changed between ship and planet.
    pub fn add_result(
        &mut self,
        before: &Setup,
        after: &Setup,
        stats: &[Statistic],
        result: &SimulationResult,
    ) {
        let num_objects = before.num_objects();
        assert_eq!(num_objects, after.num_objects(), "unit count changed during battle");
        assert_eq!(num_objects, stats.len(), "one statistic per unit required");

        if self.unit_results.is_empty() {
            self.unit_results = vec![UnitResult::new(); num_objects];
            self.total_weight = result.total_battle_weight;
        } else {
            assert_eq!(num_objects, self.unit_results.len(), "unit count differs from earlier battles");
        }

        let result = self.reconcile_weight(result);

        for (slot, stat) in stats.iter().enumerate() {
            let unit = &mut self.unit_results[slot];
            match (before.object(slot), after.object(slot)) {
                (Some(ObjectRef::Ship(old)), Some(ObjectRef::Ship(new))) => {
                    unit.add_ship_result(old, new, stat, &result);
                }
                (Some(ObjectRef::Planet(old)), Some(ObjectRef::Planet(new))) => {
                    unit.add_planet_result(old, new, stat, &result);
                }
                _ => panic!("unit kind changed in slot {slot}"),
            }
        }

        self.add_class_result(ClassResult::new(after, &result));
        self.cumulative_weight += result.this_battle_weight;
        self.num_battles += 1;
    }

    /// Bring the list and `result` to a common total weight.
    fn reconcile_weight(&mut self, result: &SimulationResult) -> SimulationResult {
        let mut result = result.clone();
        let (old, new) = (self.total_weight, result.total_battle_weight);
        if new > old {
            tracing::debug!(old_total = old, new_total = new, "Rescaling result list");
            for unit in &mut self.unit_results {
                unit.change_weight(old, new);
            }
            for class in &mut self.class_results {
                class.change_weight(old, new);
            }
            // Summed, so rounding never separates it from the class weights.
            self.cumulative_weight = self.class_results.iter().map(ClassResult::weight).sum();
            self.total_weight = new;
        } else if new < old {
            let scaled = rescale(i64::from(result.this_battle_weight), i64::from(new), i64::from(old));
            result.this_battle_weight = i32::try_from(scaled).unwrap_or(i32::MAX);
            result.total_battle_weight = old;
        }
        result
    }

    fn add_class_result(&mut self, class: ClassResult) {
        let mut index = match self.class_results.iter().position(|c| c.is_same_class(&class)) {
            Some(index) => {
                self.class_results[index].add_same_class_result(&class);
                index
            }
            None => {
                tracing::debug!(classes = self.class_results.len() + 1, weight = class.weight(), "New result class");
                self.class_results.push(class);
                self.class_results.len() - 1
            }
        };
        while index > 0 && self.class_results[index - 1].weight() < self.class_results[index].weight() {
            self.class_results.swap(index - 1, index);
            index -= 1;
        }
        self.last_class_result_index = index;
    }

    // ------------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------------

    /// Common denominator of all weights.
    #[must_use]
    pub const fn total_weight(&self) -> i32 {
        self.total_weight
    }

    /// Sum of the weights of all battles folded in.
    #[must_use]
    pub const fn cumulative_weight(&self) -> i32 {
        self.cumulative_weight
    }

    /// Number of battles folded in.
    #[must_use]
    pub const fn num_battles(&self) -> i32 {
        self.num_battles
    }

    /// Index of the class touched by the latest battle.
    #[must_use]
    pub const fn last_class_result_index(&self) -> usize {
        self.last_class_result_index
    }

    /// Number of unit slots.
    #[must_use]
    pub fn num_unit_results(&self) -> usize {
        self.unit_results.len()
    }

    /// Number of outcome classes.
    #[must_use]
    pub fn num_class_results(&self) -> usize {
        self.class_results.len()
    }

    /// Statistics of a unit slot.
    #[must_use]
    pub fn unit_result(&self, slot: usize) -> Option<&UnitResult> {
        self.unit_results.get(slot)
    }

    /// Outcome class by rank.
    #[must_use]
    pub fn class_result(&self, index: usize) -> Option<&ClassResult> {
        self.class_results.get(index)
    }

    /// Describe an outcome class.
    #[must_use]
    pub fn describe_class_result(&self, index: usize) -> Option<ClassInfo> {
        let class = self.class_results.get(index)?;
        let share = percent(i64::from(class.weight()), i64::from(self.cumulative_weight));
        Some(ClassInfo {
            label: format!("{share:.1}%"),
            weight: class.weight(),
            owned_units: class.owned_units().clone(),
            has_sample: class.sample_battle().is_some(),
        })
    }

    /// Describe the statistics of a unit slot.
    ///
    /// `setup` provides the unit's equipment, which decides the values
    /// shown: torpedo values for units with torpedoes, fighter values for
    /// units with fighters.
    #[must_use]
    pub fn describe_unit_result(&self, slot: usize, setup: &Setup) -> Option<UnitResultInfo> {
        let unit = self.unit_results.get(slot)?;
        let kinds = visible_items(setup.object(slot)?);
        let items = kinds
            .into_iter()
            .map(|kind| {
                let item = kind.item(unit);
                UnitInfo {
                    kind,
                    min: item.min(),
                    max: item.max(),
                    average: item.average(self.cumulative_weight),
                    has_min_specimen: item.min_specimen().is_some(),
                    has_max_specimen: item.max_specimen().is_some(),
                }
            })
            .collect();
        Some(UnitResultInfo {
            num_fights: unit.num_fights(),
            num_fights_won: unit.num_fights_won(),
            num_captures: unit.num_captures(),
            items,
        })
    }

    /// Battle showing the minimum or maximum of a unit value.
    #[must_use]
    pub fn unit_sample_battle(&self, slot: usize, kind: UnitInfoType, max: bool) -> Option<BattleHandle> {
        let item = kind.item(self.unit_results.get(slot)?);
        if max {
            item.max_specimen()
        } else {
            item.min_specimen()
        }
    }
}

fn visible_items(object: ObjectRef<'_>) -> Vec<UnitInfoType> {
    let mut kinds = vec![UnitInfoType::Damage, UnitInfoType::Shield];
    let (torpedoes, fighters) = match object {
        ObjectRef::Ship(ship) => {
            kinds.push(UnitInfoType::Crew);
            (ship.num_launchers() > 0, ship.num_bays() > 0)
        }
        ObjectRef::Planet(planet) => {
            kinds.push(UnitInfoType::DefenseLost);
            (
                planet.total_base_torpedoes() > 0,
                planet.has_base() || planet.base_fighters() > 0,
            )
        }
    };
    if torpedoes {
        kinds.push(UnitInfoType::NumTorpedoesFired);
        kinds.push(UnitInfoType::NumTorpedoHits);
    }
    if fighters {
        kinds.push(UnitInfoType::NumFightersLost);
        kinds.push(UnitInfoType::MinFightersAboard);
    }
    kinds
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use proptest::prelude::*;

    use super::*;
    use crate::object::SimObject;
    use crate::result::BattleDatabase;

    #[derive(Debug)]
    struct Replay;

    impl BattleDatabase for Replay {
        fn num_battles(&self) -> usize {
            1
        }
    }

    fn two_ships(owners: [i32; 2]) -> Setup {
        let mut setup = Setup::new();
        for owner in owners {
            setup.add_ship().set_owner(owner);
        }
        setup
    }

    fn add(list: &mut ResultList, after_owners: [i32; 2], weight: i32, total: i32, index: i32) {
        let before = two_ships([1, 2]);
        let after = two_ships(after_owners);
        let result = SimulationResult::new(weight, total, index).with_battles(Arc::new(Replay));
        list.add_result(&before, &after, &[Statistic::default(); 2], &result);
    }

    fn class_weight_sum(list: &ResultList) -> i32 {
        (0..list.num_class_results())
            .map(|i| list.class_result(i).unwrap().weight())
            .sum()
    }

    #[test]
    fn test_first_result_adopts_total() {
        let mut list = ResultList::new();
        add(&mut list, [1, 2], 1, 4, 0);
        assert_eq!(list.total_weight(), 4);
        assert_eq!(list.cumulative_weight(), 1);
        assert_eq!(list.num_battles(), 1);
        assert_eq!(list.num_unit_results(), 2);
        assert_eq!(list.num_class_results(), 1);
    }

    #[test]
    fn test_same_class_merges_and_new_class_sorts() {
        let mut list = ResultList::new();
        add(&mut list, [1, 0], 1, 1, 0);
        add(&mut list, [0, 2], 1, 1, 1);
        assert_eq!(list.num_class_results(), 2);
        assert_eq!(list.last_class_result_index(), 1);

        add(&mut list, [0, 2], 1, 1, 2);
        assert_eq!(list.num_class_results(), 2);
        assert_eq!(list.last_class_result_index(), 0);
        assert_eq!(list.class_result(0).unwrap().weight(), 2);
        assert_eq!(list.class_result(0).unwrap().owned_units().get(2), 1);
        assert_eq!(list.cumulative_weight(), 3);
    }

    #[test]
    fn test_larger_total_rescales_existing() {
        let mut list = ResultList::new();
        add(&mut list, [1, 2], 1, 2, 0);
        add(&mut list, [1, 0], 1, 2, 1);
        add(&mut list, [1, 0], 1, 4, 2);
        assert_eq!(list.total_weight(), 4);
        assert_eq!(list.class_result(0).unwrap().weight(), 3);
        assert_eq!(list.class_result(1).unwrap().weight(), 2);
        assert_eq!(list.cumulative_weight(), 5);
        assert_eq!(list.unit_result(0).unwrap().num_fights_won(), 5);
    }

    #[test]
    fn test_smaller_total_scales_incoming() {
        let mut list = ResultList::new();
        add(&mut list, [1, 2], 1, 4, 0);
        add(&mut list, [1, 2], 1, 2, 1);
        assert_eq!(list.total_weight(), 4);
        assert_eq!(list.cumulative_weight(), 3);
        assert_eq!(list.class_result(0).unwrap().weight(), 3);
    }

    #[test]
    fn test_describe_class_result() {
        let mut list = ResultList::new();
        add(&mut list, [1, 2], 1, 1, 0);
        add(&mut list, [1, 2], 1, 1, 1);
        add(&mut list, [1, 0], 1, 1, 2);
        let info = list.describe_class_result(0).unwrap();
        assert_eq!(info.label, "66.7%");
        assert_eq!(info.weight, 2);
        assert!(info.has_sample);
        assert_eq!(list.describe_class_result(1).unwrap().label, "33.3%");
        assert!(list.describe_class_result(2).is_none());
    }

    #[test]
    fn test_describe_unit_result_items() {
        let mut before = Setup::new();
        let ship = before.add_ship();
        ship.set_num_launchers(2);
        ship.set_ammo(10);
        before.add_ship().set_num_bays(1);
        before.add_planet();
        let mut after = before.clone();
        after.ship_mut(0).unwrap().set_ammo(4);

        let mut list = ResultList::new();
        let result = SimulationResult::new(2, 2, 0);
        list.add_result(&before, &after, &[Statistic::default(); 3], &result);

        let info = list.describe_unit_result(0, &before).unwrap();
        let kinds: Vec<_> = info.items.iter().map(|i| i.kind).collect();
        assert_eq!(
            kinds,
            [
                UnitInfoType::Damage,
                UnitInfoType::Shield,
                UnitInfoType::Crew,
                UnitInfoType::NumTorpedoesFired,
                UnitInfoType::NumTorpedoHits,
            ]
        );
        assert_eq!(info.items[3].max, 6);
        assert_eq!(info.items[3].average, Ratio::from_num(6));
        assert!(!info.items[3].has_max_specimen);

        let info = list.describe_unit_result(1, &before).unwrap();
        assert!(info.items.iter().any(|i| i.kind == UnitInfoType::MinFightersAboard));

        let info = list.describe_unit_result(2, &before).unwrap();
        assert_eq!(info.items[2].kind, UnitInfoType::DefenseLost);
        assert_eq!(info.items.len(), 3);
        assert!(list.describe_unit_result(3, &before).is_none());
    }

    #[test]
    fn test_unit_sample_battle() {
        let mut list = ResultList::new();
        add(&mut list, [1, 2], 1, 1, 0);
        assert!(list.unit_sample_battle(0, UnitInfoType::Damage, true).is_some());
        assert!(list.unit_sample_battle(5, UnitInfoType::Damage, true).is_none());
    }

    #[test]
    fn test_info_labels() {
        use crate::translator::NullTranslator;
        assert_eq!(UnitInfoType::Crew.to_string(&NullTranslator), "Crew left");
        assert_eq!(UnitInfoType::MinFightersAboard.to_string(&NullTranslator), "Min. fighters aboard");
    }

    #[test]
    #[should_panic(expected = "unit count changed")]
    fn test_mismatched_setups_panic() {
        let mut list = ResultList::new();
        let before = two_ships([1, 2]);
        let mut after = before.clone();
        after.remove_ship(0);
        list.add_result(&before, &after, &[Statistic::default(); 2], &SimulationResult::new(1, 1, 0));
    }

    #[test]
    #[should_panic(expected = "unit kind changed")]
    fn test_kind_change_panics() {
        let mut list = ResultList::new();
        let mut before = two_ships([1, 2]);
        before.remove_ship(1);
        before.add_planet();
        let after = two_ships([1, 2]);
        list.add_result(&before, &after, &[Statistic::default(); 2], &SimulationResult::new(1, 1, 0));
    }

    proptest! {
        #[test]
        fn prop_class_weights_sum_to_cumulative(
            battles in prop::collection::vec((0i32..3, 0i32..3, 1i32..5, 0u32..4), 1..40)
        ) {
            let mut list = ResultList::new();
            let mut max_total = 0;
            for (index, (a, b, weight, shift)) in battles.into_iter().enumerate() {
                let total = 4 << shift;
                max_total = max_total.max(total);
                add(&mut list, [a, b], weight, total, index as i32);
                prop_assert_eq!(class_weight_sum(&list), list.cumulative_weight());
                prop_assert_eq!(list.total_weight(), max_total);
            }
        }

        #[test]
        fn prop_item_tracks_extremes(values in prop::collection::vec(-50i32..150, 1..30)) {
            let mut list = ResultList::new();
            for (index, &damage) in values.iter().enumerate() {
                let before = two_ships([1, 2]);
                let mut after = before.clone();
                after.ship_mut(0).unwrap().set_damage(damage);
                let result = SimulationResult::new(1, 1, index as i32);
                list.add_result(&before, &after, &[Statistic::default(); 2], &result);
            }
            let damage = list.unit_result(0).unwrap().damage();
            prop_assert_eq!(damage.min(), *values.iter().min().unwrap());
            prop_assert_eq!(damage.max(), *values.iter().max().unwrap());
            prop_assert_eq!(damage.total_scaled(), values.iter().map(|&v| i64::from(v)).sum::<i64>());
        }
    }
}
