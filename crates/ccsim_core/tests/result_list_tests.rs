//! Result aggregation tests.
//!
//! These feed hand-made before/after setups into a result list, standing
//! in for the combat engine.

use ccsim_core::object::SimObject;
use ccsim_core::result::{SimulationResult, Statistic};
use ccsim_core::result_list::{ResultList, UnitInfoType};
use ccsim_core::setup::Setup;
use ccsim_test_utils::fixtures::recorded_battles;
use proptest::prelude::*;

// =============================================================================
// Four-unit battle
// =============================================================================

fn before_battle() -> Setup {
    let mut setup = Setup::new();
    for (owner, damage, bays, ammo) in [(7, 0, 3, 10), (2, 0, 3, 70), (2, 50, 0, 10)] {
        let ship = setup.add_ship();
        ship.set_owner(owner);
        ship.set_damage(damage);
        ship.set_num_bays(bays);
        ship.set_ammo(ammo);
    }
    let planet = setup.add_planet();
    planet.set_owner(2);
    planet.set_base_fighters(30);
    setup
}

fn after_battle() -> Setup {
    let mut setup = before_battle();
    for (slot, (owner, damage, ammo)) in [(7, 20, 10), (2, 0, 20), (0, 100, 0)].into_iter().enumerate() {
        let ship = setup.ship_mut(slot).unwrap();
        ship.set_owner(owner);
        ship.set_damage(damage);
        ship.set_ammo(ammo);
    }
    let planet = setup.planet_mut().unwrap();
    planet.set_owner(7);
    planet.set_base_fighters(20);
    setup
}

fn one_fight_each(n: usize) -> Vec<Statistic> {
    let mut stat = Statistic::new(0);
    stat.add_fight();
    vec![stat; n]
}

#[test]
fn test_single_battle_scenario() {
    ccsim_test_utils::init_tracing();
    let before = before_battle();
    let after = after_battle();
    let result = SimulationResult::new(1, 1, 0).with_battles(recorded_battles(1));

    let mut list = ResultList::new();
    list.add_result(&before, &after, &one_fight_each(4), &result);

    assert_eq!(list.cumulative_weight(), 1);
    assert_eq!(list.num_battles(), 1);
    assert_eq!(list.num_class_results(), 1);
    let class = list.class_result(0).unwrap();
    assert_eq!(class.owned_units().get(2), 1);
    assert_eq!(class.owned_units().get(7), 2);
    assert_eq!(class.owned_units().get(0), 0);

    let unit = list.unit_result(0).unwrap();
    assert_eq!(unit.num_fights(), 1);
    assert_eq!(unit.num_fights_won(), 1);
    assert_eq!(unit.num_captures(), 0);
    assert_eq!(unit.damage().min(), 20);
    assert_eq!(unit.damage().max(), 20);

    let ship2 = list.unit_result(1).unwrap();
    assert_eq!(ship2.num_fighters_lost().max(), 50);

    let planet = list.unit_result(3).unwrap();
    assert_eq!(planet.num_captures(), 1);
    assert_eq!(planet.num_fights_won(), 0);
    assert_eq!(planet.num_fighters_lost().max(), 10);
}

#[test]
fn test_scenario_descriptions() {
    let before = before_battle();
    let mut list = ResultList::new();
    list.add_result(
        &before,
        &after_battle(),
        &one_fight_each(4),
        &SimulationResult::new(1, 1, 0).with_battles(recorded_battles(1)),
    );

    let class = list.describe_class_result(0).unwrap();
    assert_eq!(class.label, "100.0%");
    assert!(class.has_sample);

    let info = list.describe_unit_result(0, &before).unwrap();
    assert_eq!(info.num_fights_won, 1);
    assert!(info.items.iter().any(|i| i.kind == UnitInfoType::NumFightersLost));
    assert!(!info.items.iter().any(|i| i.kind == UnitInfoType::NumTorpedoesFired));

    let battle = list.unit_sample_battle(0, UnitInfoType::Damage, false).unwrap();
    assert_eq!(battle.num_battles(), 1);
}

// =============================================================================
// Grouping and weights
// =============================================================================

fn duel(winner: i32) -> (Setup, Setup) {
    let mut before = Setup::new();
    before.add_ship().set_owner(1);
    before.add_ship().set_owner(2);
    let mut after = before.clone();
    let loser = if winner == 1 { 1 } else { 0 };
    after.ship_mut(loser).unwrap().set_owner(0);
    (before, after)
}

#[test]
fn test_identical_outcomes_share_class() {
    let mut list = ResultList::new();
    for index in 0..3 {
        let (before, after) = duel(1);
        list.add_result(&before, &after, &one_fight_each(2), &SimulationResult::new(1, 1, index));
    }
    let (before, after) = duel(2);
    list.add_result(&before, &after, &one_fight_each(2), &SimulationResult::new(1, 1, 3));

    assert_eq!(list.num_class_results(), 2);
    assert_eq!(list.class_result(0).unwrap().weight(), 3);
    assert_eq!(list.class_result(0).unwrap().owned_units().get(1), 1);
    assert_eq!(list.class_result(1).unwrap().weight(), 1);
    assert_eq!(list.last_class_result_index(), 1);
}

#[test]
fn test_late_class_overtakes_early_class() {
    let mut list = ResultList::new();
    let (before, after) = duel(1);
    list.add_result(&before, &after, &one_fight_each(2), &SimulationResult::new(1, 1, 0));
    for index in 1..3 {
        let (before, after) = duel(2);
        list.add_result(&before, &after, &one_fight_each(2), &SimulationResult::new(1, 1, index));
    }
    assert_eq!(list.last_class_result_index(), 0);
    assert_eq!(list.class_result(0).unwrap().owned_units().get(2), 1);
    assert_eq!(list.class_result(0).unwrap().weight(), 2);
}

proptest! {
    #[test]
    fn prop_weights_stay_normalized(
        battles in prop::collection::vec((any::<bool>(), 1i32..4, 0u32..5), 1..30)
    ) {
        let mut list = ResultList::new();
        let mut max_total = 0;
        for (index, (first_wins, weight, shift)) in battles.into_iter().enumerate() {
            let total = 3 << shift;
            max_total = max_total.max(total);
            let (before, after) = duel(if first_wins { 1 } else { 2 });
            let result = SimulationResult::new(weight, total, index as i32);
            list.add_result(&before, &after, &one_fight_each(2), &result);

            let class_sum: i32 = (0..list.num_class_results())
                .map(|i| list.class_result(i).unwrap().weight())
                .sum();
            prop_assert_eq!(class_sum, list.cumulative_weight());
            prop_assert_eq!(list.total_weight(), max_total);
        }
    }

    #[test]
    fn prop_shield_extremes(values in prop::collection::vec((0i32..=100, 1i32..5), 1..25)) {
        let mut list = ResultList::new();
        for (index, &(shield, weight)) in values.iter().enumerate() {
            let (before, mut after) = duel(1);
            after.ship_mut(0).unwrap().set_shield(shield);
            let result = SimulationResult::new(weight, 10, index as i32);
            list.add_result(&before, &after, &one_fight_each(2), &result);
        }
        let shield = list.unit_result(0).unwrap().shield();
        prop_assert_eq!(shield.min(), values.iter().map(|v| v.0).min().unwrap());
        prop_assert_eq!(shield.max(), values.iter().map(|v| v.0).max().unwrap());
        prop_assert_eq!(
            shield.total_scaled(),
            values.iter().map(|&(s, w)| i64::from(s) * i64::from(w)).sum::<i64>()
        );
    }
}
