//! Fleet cost computation.
//!
//! Computes what it costs to build the units of a setup. Options decide
//! which parts are charged: ammo, engines, planetary and starbase
//! equipment, and how tech level upgrades are attributed.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::config::{HostConfiguration, SimConfiguration};
use crate::cost::Cost;
use crate::data::{ShipList, NUM_TORPEDO_TYPES};
use crate::object::SimObject;
use crate::planet::Planet;
use crate::players::{PlayerSet, TeamSettings};
use crate::setup::Setup;
use crate::ship::Ship;
use crate::translator::{format_translated, Translator};

// ============================================================================
// Options
// ============================================================================

/// How fighters are priced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum FighterMode {
    /// Fighters cost nothing.
    FreeFighters,
    /// Fighters are built by ships.
    #[default]
    ShipFighters,
    /// Fighters are bought on a starbase.
    BaseFighters,
}

impl FighterMode {
    /// Get the following mode, wrapping around.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::FreeFighters => Self::ShipFighters,
            Self::ShipFighters => Self::BaseFighters,
            Self::BaseFighters => Self::FreeFighters,
        }
    }

    /// Human-readable name.
    #[must_use]
    pub fn to_string(self, tx: &dyn Translator) -> String {
        tx.translate(match self {
            Self::FreeFighters => "Free fighters",
            Self::ShipFighters => "Build on ship",
            Self::BaseFighters => "Buy on starbase",
        })
    }

    fn unit_cost(self, host: &HostConfiguration) -> Cost {
        match self {
            Self::FreeFighters => Cost::ZERO,
            Self::ShipFighters => host.ship_fighter_cost,
            Self::BaseFighters => host.base_fighter_cost,
        }
    }
}

/// How tech level upgrades are charged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TechMode {
    /// Tech is not charged.
    #[default]
    NoTech,
    /// Each player pays each tech level once.
    PlayerTech,
    /// Each ship pays its tech levels in full.
    ShipTech,
}

impl TechMode {
    /// Get the following mode, wrapping around.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::NoTech => Self::PlayerTech,
            Self::PlayerTech => Self::ShipTech,
            Self::ShipTech => Self::NoTech,
        }
    }

    /// Human-readable name.
    #[must_use]
    pub fn to_string(self, tx: &dyn Translator) -> String {
        tx.translate(match self {
            Self::NoTech => "Ignore tech",
            Self::PlayerTech => "Tech per player",
            Self::ShipTech => "Tech per ship",
        })
    }
}

/// Fleet cost options.
///
/// # Example RON
///
/// ```ron
/// FleetCostOptions(
///     fighter_mode: BaseFighters,
///     ship_tech_mode: PlayerTech,
///     use_torpedoes: true,
/// )
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FleetCostOptions {
    /// Fighter pricing.
    pub fighter_mode: FighterMode,
    /// Tech pricing for ships.
    pub ship_tech_mode: TechMode,
    /// Charge torpedoes aboard ships.
    pub use_torpedoes: bool,
    /// Charge engines.
    pub use_engines: bool,
    /// Charge planetary defense posts.
    pub use_planet_defense: bool,
    /// Charge the starbase with its defense and fighters.
    pub use_base_cost: bool,
    /// Charge starbase tech levels.
    pub use_base_tech: bool,
}

impl Default for FleetCostOptions {
    fn default() -> Self {
        Self {
            fighter_mode: FighterMode::ShipFighters,
            ship_tech_mode: TechMode::NoTech,
            use_torpedoes: false,
            use_engines: true,
            use_planet_defense: true,
            use_base_cost: true,
            use_base_tech: true,
        }
    }
}

// ============================================================================
// Computation
// ============================================================================

/// One line of a fleet cost report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FleetCostItem {
    /// Display name.
    pub name: String,
    /// Owner of the unit.
    pub owner: i32,
    /// Cost.
    pub cost: Cost,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum TechArea {
    Hull,
    Engine,
    Beam,
    Torpedo,
}

/// Tracks tech levels already paid for during one computation.
struct TechLedger {
    mode: TechMode,
    paid: HashMap<(i32, TechArea), i32>,
}

impl TechLedger {
    fn new(mode: TechMode) -> Self {
        Self {
            mode,
            paid: HashMap::new(),
        }
    }

    /// Cost of bringing `owner` to `level` in `area` under this ledger's mode.
    fn charge(&mut self, host: &HostConfiguration, owner: i32, area: TechArea, level: i32) -> Cost {
        match self.mode {
            TechMode::NoTech => Cost::ZERO,
            TechMode::ShipTech => host.tech_upgrade_cost(1, level),
            TechMode::PlayerTech => {
                let paid = self.paid.entry((owner, area)).or_insert(1);
                let cost = host.tech_upgrade_cost(*paid, level);
                *paid = (*paid).max(level);
                cost
            }
        }
    }
}

struct Context<'a> {
    sim_config: &'a SimConfiguration,
    options: &'a FleetCostOptions,
    ship_list: &'a ShipList,
    host: &'a HostConfiguration,
}

/// Compute the cost of all units owned by `players`.
///
/// Produces one item per ship in slot order, then `Planet` and `Starbase`
/// for the planet. Units with unknown components are charged for the
/// components that exist.
#[must_use]
pub fn compute_fleet_costs(
    setup: &Setup,
    sim_config: &SimConfiguration,
    options: &FleetCostOptions,
    ship_list: &ShipList,
    host: &HostConfiguration,
    players: PlayerSet,
    tx: &dyn Translator,
) -> Vec<FleetCostItem> {
    let ctx = Context {
        sim_config,
        options,
        ship_list,
        host,
    };
    let mut ledger = TechLedger::new(options.ship_tech_mode);
    let mut items = Vec::new();

    for ship in setup.ships().iter().filter(|s| players.contains(s.owner())) {
        let id = ship.id().to_string();
        let name = format_translated(tx, "{name} (#{id})", &[("name", ship.name()), ("id", &id)]);
        let cost = ship_cost(&ctx, &mut ledger, ship);
        tracing::trace!(%name, %cost, "Ship cost");
        items.push(FleetCostItem {
            name,
            owner: ship.owner(),
            cost,
        });
    }

    if let Some(planet) = setup.planet().filter(|p| players.contains(p.owner())) {
        if options.use_planet_defense {
            let cost = host.planet_defense_cost * planet.defense();
            tracing::trace!(%cost, "Planet cost");
            items.push(FleetCostItem {
                name: tx.translate("Planet"),
                owner: planet.owner(),
                cost,
            });
        }
        if planet.has_base() && (options.use_base_cost || options.use_base_tech) {
            let cost = starbase_cost(&ctx, &mut ledger, planet);
            tracing::trace!(%cost, "Starbase cost");
            items.push(FleetCostItem {
                name: tx.translate("Starbase"),
                owner: planet.owner(),
                cost,
            });
        }
    }
    items
}

fn ship_cost(ctx: &Context<'_>, ledger: &mut TechLedger, ship: &Ship) -> Cost {
    let mut cost = Cost::ZERO;
    let owner = ship.owner();

    let hull = ctx.ship_list.hull(ship.hull_type());
    match hull {
        Some(hull) => {
            cost += hull.cost;
            cost += ledger.charge(ctx.host, owner, TechArea::Hull, hull.tech_level);
            if ctx.options.use_engines {
                if let Some(engine) = ctx.ship_list.engine(ship.engine_type()) {
                    cost += engine.cost * hull.num_engines;
                    cost += ledger.charge(ctx.host, owner, TechArea::Engine, engine.tech_level);
                }
            }
        }
        None if !ship.is_custom_ship() => {
            tracing::warn!(hull = ship.hull_type(), id = ship.id(), "Unknown hull; charging components only");
        }
        None => {}
    }

    if ship.num_beams() > 0 {
        if let Some(beam) = ctx.ship_list.beam(ship.beam_type()) {
            cost += beam.cost * ship.num_beams();
            cost += ledger.charge(ctx.host, owner, TechArea::Beam, beam.tech_level);
        } else {
            tracing::warn!(beam = ship.beam_type(), id = ship.id(), "Unknown beam type; not charged");
        }
    }

    if ship.num_launchers() > 0 {
        if let Some(launcher) = ctx.ship_list.launcher(ship.torpedo_type()) {
            cost += launcher.cost * ship.num_launchers();
            cost += ledger.charge(ctx.host, owner, TechArea::Torpedo, launcher.tech_level);
            if ctx.options.use_torpedoes {
                cost += launcher.torpedo_cost * ship.ammo();
            }
        } else {
            tracing::warn!(torpedo = ship.torpedo_type(), id = ship.id(), "Unknown torpedo type; not charged");
        }
    } else if ship.num_bays() > 0 {
        cost += ctx.options.fighter_mode.unit_cost(ctx.host) * ship.ammo();
    }
    cost
}

fn starbase_cost(ctx: &Context<'_>, ledger: &mut TechLedger, planet: &Planet) -> Cost {
    let host = ctx.host;
    let owner = planet.owner();
    let mut cost = Cost::ZERO;

    if ctx.options.use_base_cost {
        cost += host.starbase_cost;
        cost += host.base_defense_cost * planet.base_defense();
        cost += ctx.options.fighter_mode.unit_cost(host) * planet.base_fighters();
    }

    if ctx.options.use_base_tech {
        cost += base_tech_cost(ctx, ledger, owner, TechArea::Beam, planet.base_beam_tech());
        if ctx.sim_config.planets_fire_torpedoes(host) {
            cost += base_tech_cost(ctx, ledger, owner, TechArea::Torpedo, planet.base_torpedo_tech());
            for torpedo_type in 1..=NUM_TORPEDO_TYPES as i32 {
                if let Some(launcher) = ctx.ship_list.launcher(torpedo_type) {
                    cost += launcher.torpedo_cost * planet.num_base_torpedoes(torpedo_type);
                }
            }
        }
    }
    cost
}

/// Starbase tech shares the ship ledger when tech is paid per player;
/// otherwise the starbase pays its full tech.
fn base_tech_cost(ctx: &Context<'_>, ledger: &mut TechLedger, owner: i32, area: TechArea, level: i32) -> Cost {
    if ledger.mode == TechMode::PlayerTech {
        ledger.charge(ctx.host, owner, area, level)
    } else {
        ctx.host.tech_upgrade_cost(1, level)
    }
}

/// Sum of all items.
#[must_use]
pub fn total_cost(items: &[FleetCostItem]) -> Cost {
    items.iter().map(|i| i.cost).sum()
}

/// Players owning at least one unit.
#[must_use]
pub fn get_involved_players(setup: &Setup) -> PlayerSet {
    setup.objects().map(|o| o.owner()).collect()
}

/// Teams of players owning at least one unit.
#[must_use]
pub fn get_involved_teams(setup: &Setup, teams: &TeamSettings) -> PlayerSet {
    setup
        .objects()
        .map(|o| teams.player_team(o.owner()))
        .collect()
}
