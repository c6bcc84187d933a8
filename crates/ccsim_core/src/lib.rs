//! # ccsim Core
//!
//! Battle simulation core for a VGA Planets style game client.
//!
//! This crate holds everything around the combat engine, but not the
//! engine itself:
//! - Battle setups (ships and an optional planet)
//! - The binary setup file format, versions 0 to 5
//! - Fleet cost estimates
//! - Battle order rules and ship sort predicates
//! - Aggregation of many simulated battles into per-unit and per-outcome
//!   statistics
//!
//! ## Crate Structure
//!
//! - [`setup`] - The battle setup container
//! - [`ship`], [`planet`], [`object`] - Battle participants
//! - [`loader`] - Setup file reader and writer
//! - [`fleet_cost`] - Fleet cost estimates
//! - [`battle_order`], [`sort`] - Battle order and sort predicates
//! - [`result_list`] - Result aggregation
//! - [`data`] - Ship list definitions loaded from RON

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]

pub mod battle_order;
pub mod charset;
pub mod class_result;
pub mod config;
pub mod cost;
pub mod data;
pub mod error;
pub mod fleet_cost;
pub mod loader;
pub mod map;
pub mod math;
pub mod object;
pub mod planet;
pub mod players;
pub mod result;
pub mod result_list;
pub mod setup;
pub mod ship;
pub mod sort;
pub mod translator;
pub mod unit_result;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::battle_order::BattleOrderRule;
    pub use crate::charset::{Charset, Latin1Charset, Utf8Charset};
    pub use crate::config::{EngineMode, HostConfiguration, HostKind, HostVersion, SimConfiguration};
    pub use crate::cost::{Cost, Resource};
    pub use crate::data::ShipList;
    pub use crate::error::{Result, SimError};
    pub use crate::fleet_cost::{compute_fleet_costs, FighterMode, FleetCostItem, FleetCostOptions, TechMode};
    pub use crate::loader::Loader;
    pub use crate::math::Ratio;
    pub use crate::object::{ObjectFlags, ObjectMut, ObjectRef, SimObject};
    pub use crate::planet::Planet;
    pub use crate::players::{PlayerArray, PlayerSet, TeamSettings, MAX_PLAYERS};
    pub use crate::result::{BattleDatabase, BattleHandle, SimulationResult, Statistic};
    pub use crate::result_list::ResultList;
    pub use crate::setup::{Setup, SetupEvent};
    pub use crate::ship::Ship;
    pub use crate::translator::{NullTranslator, Translator};
}
