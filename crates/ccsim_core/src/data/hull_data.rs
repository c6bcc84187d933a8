//! Hull data structures for data-driven hull definitions.

use serde::{Deserialize, Serialize};

use crate::cost::Cost;

/// Data-driven hull definition.
///
/// # Example RON
///
/// ```ron
/// HullData(
///     name: "LARGE DEEP SPACE FREIGHTER",
///     mass: 160,
///     tech_level: 6,
///     max_crew: 122,
///     max_cargo: 1200,
///     num_engines: 4,
///     max_beams: 2,
///     max_launchers: 0,
///     num_bays: 0,
///     cost: (tritanium: 35, duranium: 50, molybdenum: 175, money: 400),
/// )
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HullData {
    /// Display name.
    pub name: String,

    /// Hull mass in kt.
    pub mass: i32,

    /// Tech level required to build the hull.
    #[serde(default = "default_tech_level")]
    pub tech_level: i32,

    /// Maximum crew.
    pub max_crew: i32,

    /// Cargo capacity, which bounds torpedo and fighter ammo.
    pub max_cargo: i32,

    /// Number of engines.
    #[serde(default = "default_num_engines")]
    pub num_engines: i32,

    /// Maximum number of beams.
    #[serde(default)]
    pub max_beams: i32,

    /// Maximum number of torpedo launchers.
    #[serde(default)]
    pub max_launchers: i32,

    /// Number of fighter bays.
    #[serde(default)]
    pub num_bays: i32,

    /// Cost of the bare hull.
    pub cost: Cost,
}

const fn default_tech_level() -> i32 {
    1
}

const fn default_num_engines() -> i32 {
    1
}

impl HullData {
    /// Check whether ships of this hull carry fighters.
    #[must_use]
    pub const fn is_carrier(&self) -> bool {
        self.num_bays > 0
    }

    /// Check whether ships of this hull can carry any weapon.
    #[must_use]
    pub const fn is_armed(&self) -> bool {
        self.max_beams > 0 || self.max_launchers > 0 || self.num_bays > 0
    }
}
