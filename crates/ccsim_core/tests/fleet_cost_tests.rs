//! Fleet cost tests against the shared fixture ship list.

use ccsim_core::config::SimConfiguration;
use ccsim_core::cost::Cost;
use ccsim_core::fleet_cost::{
    compute_fleet_costs, get_involved_players, get_involved_teams, total_cost, FighterMode,
    FleetCostItem, FleetCostOptions, TechMode,
};
use ccsim_core::object::SimObject;
use ccsim_core::players::{PlayerSet, TeamSettings};
use ccsim_core::setup::Setup;
use ccsim_core::translator::NullTranslator;
use ccsim_test_utils::fixtures::{
    duel_setup, host_config, host_config_with_tubes, planet_setup, ship_list, HULL_DESTROYER,
};

fn costs(setup: &Setup, options: &FleetCostOptions, players: PlayerSet) -> Vec<FleetCostItem> {
    compute_fleet_costs(
        setup,
        &SimConfiguration::default(),
        options,
        &ship_list(),
        &host_config(),
        players,
        &NullTranslator,
    )
}

fn both_players() -> PlayerSet {
    [1, 2].into_iter().collect()
}

// =============================================================================
// Additivity
// =============================================================================

#[test]
fn test_costs_add_up_across_owners() {
    for tech in [TechMode::NoTech, TechMode::ShipTech, TechMode::PlayerTech] {
        for fighters in [FighterMode::FreeFighters, FighterMode::ShipFighters, FighterMode::BaseFighters] {
            let options = FleetCostOptions {
                ship_tech_mode: tech,
                fighter_mode: fighters,
                use_torpedoes: true,
                ..FleetCostOptions::default()
            };
            let setup = duel_setup();
            let both = total_cost(&costs(&setup, &options, both_players()));
            let one = total_cost(&costs(&setup, &options, PlayerSet::single(1)));
            let two = total_cost(&costs(&setup, &options, PlayerSet::single(2)));
            assert_eq!(both, one + two, "{tech:?} {fighters:?}");
        }
    }
}

#[test]
fn test_player_tech_is_shared_within_owner() {
    let mut setup = duel_setup();
    setup.ship_mut(1).unwrap().set_owner(1);
    setup
        .ship_mut(1)
        .unwrap()
        .set_hull_type(HULL_DESTROYER, &ship_list());

    let shared = FleetCostOptions {
        ship_tech_mode: TechMode::PlayerTech,
        ..FleetCostOptions::default()
    };
    let items = costs(&setup, &shared, PlayerSet::single(1));
    assert!(items[1].cost.money < items[0].cost.money);

    let per_ship = FleetCostOptions {
        ship_tech_mode: TechMode::ShipTech,
        ..shared
    };
    let items = costs(&setup, &per_ship, PlayerSet::single(1));
    assert_eq!(items[0].cost, items[1].cost);
}

// =============================================================================
// Items
// =============================================================================

#[test]
fn test_item_names_and_order() {
    ccsim_test_utils::init_tracing();
    let items = costs(&planet_setup(), &FleetCostOptions::default(), both_players());
    let names: Vec<_> = items.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names, ["Ares (#10)", "Bellona (#20)", "Planet", "Starbase"]);
    assert_eq!(items[2].owner, 2);
    assert_eq!(items[2].cost, Cost::new(0, 0, 0, 500, 50));
}

#[test]
fn test_foreign_planet_excluded() {
    let items = costs(&planet_setup(), &FleetCostOptions::default(), PlayerSet::single(1));
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].name, "Ares (#10)");
}

#[test]
fn test_base_torpedoes_need_tubes_and_alternative_combat() {
    let setup = planet_setup();
    let options = FleetCostOptions {
        use_planet_defense: false,
        use_base_cost: false,
        ..FleetCostOptions::default()
    };
    let run = |sim: SimConfiguration, tubes: bool| {
        let host = if tubes { host_config_with_tubes() } else { host_config() };
        compute_fleet_costs(&setup, &sim, &options, &ship_list(), &host, PlayerSet::single(2), &NullTranslator)
            .last()
            .map(|i| i.cost)
            .unwrap()
    };
    let alternative = SimConfiguration {
        alternative_combat: true,
        ..SimConfiguration::default()
    };

    let beams_only = run(SimConfiguration::default(), true);
    assert_eq!(beams_only, run(alternative.clone(), false));
    let with_torpedoes = run(alternative, true);
    // Torpedo tech 1 -> 2 plus ten type 2 rounds.
    assert_eq!(with_torpedoes, beams_only + Cost::money(100) + Cost::new(10, 10, 10, 200, 0));
}

// =============================================================================
// Involved players
// =============================================================================

#[test]
fn test_involved_players_and_teams() {
    let setup = planet_setup();
    let players = get_involved_players(&setup);
    assert_eq!(players.iter().collect::<Vec<_>>(), [1, 2]);

    let mut teams = TeamSettings::new();
    teams.set_player_team(2, 1);
    assert_eq!(get_involved_teams(&setup, &teams).iter().collect::<Vec<_>>(), [1]);
}
