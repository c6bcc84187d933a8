//! Plain-text reports.

use std::fmt::Write;

use ccsim_core::battle_order::BattleOrderRule;
use ccsim_core::fleet_cost::{total_cost, FleetCostItem};
use ccsim_core::object::{ObjectRef, SimObject};
use ccsim_core::setup::Setup;

/// One line per unit.
#[must_use]
pub fn setup_summary(setup: &Setup, version: u8) -> String {
    let mut out = format!(
        "Version {version}: {} ship(s), {}\n",
        setup.num_ships(),
        if setup.has_planet() { "planet" } else { "no planet" }
    );
    for (slot, object) in setup.objects().enumerate() {
        let _ = match object {
            ObjectRef::Ship(ship) => writeln!(
                out,
                "{slot:>3}  ship   #{:<4} {:<20} owner {:>2}  hull {:>3}  beams {}x{}  tubes {}x{}  bays {}  ammo {}",
                ship.id(),
                ship.name(),
                ship.owner(),
                ship.hull_type(),
                ship.num_beams(),
                ship.beam_type(),
                ship.num_launchers(),
                ship.torpedo_type(),
                ship.num_bays(),
                ship.ammo(),
            ),
            ObjectRef::Planet(planet) => writeln!(
                out,
                "{slot:>3}  planet #{:<4} owner {:>2}  defense {}  base {}  fighters {}  torpedoes {}",
                planet.id(),
                planet.owner(),
                planet.defense(),
                if planet.has_base() { "yes" } else { "no" },
                planet.base_fighters(),
                planet.total_base_torpedoes(),
            ),
        };
    }
    out
}

/// Cost table with a total line.
#[must_use]
pub fn cost_table(items: &[FleetCostItem]) -> String {
    let mut out = format!(
        "{:<28} {:>6} {:>6} {:>6} {:>6} {:>6} {:>6}\n",
        "Unit", "Owner", "T", "D", "M", "MC", "Sup"
    );
    let mut line = |name: &str, owner: String, cost: ccsim_core::cost::Cost| {
        let _ = writeln!(
            out,
            "{name:<28} {owner:>6} {:>6} {:>6} {:>6} {:>6} {:>6}",
            cost.tritanium, cost.duranium, cost.molybdenum, cost.money, cost.supplies
        );
    };
    for item in items {
        line(&item.name, item.owner.to_string(), item.cost);
    }
    line("Total", String::new(), total_cost(items));
    out
}

/// Battle order of every unit, lowest (fights first) first.
#[must_use]
pub fn battle_order_table(setup: &Setup, rule: &BattleOrderRule) -> String {
    let mut rows: Vec<(i32, usize, String)> = setup
        .objects()
        .enumerate()
        .map(|(slot, object)| (rule.get_sim_object(object), slot, object.name().to_string()))
        .collect();
    rows.sort();

    let mut out = String::new();
    for (order, slot, name) in rows {
        let order = if order == BattleOrderRule::UNKNOWN {
            "-".to_string()
        } else {
            order.to_string()
        };
        let _ = writeln!(out, "{order:>6}  {slot:>3}  {name}");
    }
    out
}
