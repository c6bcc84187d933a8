//! Ship component definitions: engines, beams, and torpedo launchers.

use serde::{Deserialize, Serialize};

use crate::cost::Cost;

/// Engine definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineData {
    /// Display name.
    pub name: String,
    /// Tech level required to build the engine.
    #[serde(default = "default_tech_level")]
    pub tech_level: i32,
    /// Cost of one engine.
    pub cost: Cost,
}

/// Beam weapon definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BeamData {
    /// Display name.
    pub name: String,
    /// Tech level required to build the beam.
    #[serde(default = "default_tech_level")]
    pub tech_level: i32,
    /// Cost of one beam.
    pub cost: Cost,
    /// Kill power.
    #[serde(default)]
    pub kill_power: i32,
    /// Damage power.
    #[serde(default)]
    pub damage_power: i32,
}

/// Torpedo launcher definition.
///
/// # Example RON
///
/// ```ron
/// TorpedoData(
///     name: "Mark 4 Photon",
///     tech_level: 5,
///     cost: (tritanium: 1, duranium: 4, molybdenum: 0, money: 20),
///     torpedo_cost: (tritanium: 1, duranium: 1, molybdenum: 1, money: 20),
///     damage_power: 30,
/// )
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TorpedoData {
    /// Display name.
    pub name: String,
    /// Tech level required to build the launcher.
    #[serde(default = "default_tech_level")]
    pub tech_level: i32,
    /// Cost of one launcher.
    pub cost: Cost,
    /// Cost of one torpedo round.
    pub torpedo_cost: Cost,
    /// Kill power.
    #[serde(default)]
    pub kill_power: i32,
    /// Damage power.
    #[serde(default)]
    pub damage_power: i32,
}

const fn default_tech_level() -> i32 {
    1
}
