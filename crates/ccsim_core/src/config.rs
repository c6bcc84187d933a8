//! Host and simulation configuration.
//!
//! All structs deserialize from RON. Fields missing from a file take the
//! classic host defaults.
//!
//! # Example RON
//!
//! ```ron
//! HostConfiguration(
//!     base_fighter_cost: (tritanium: 3, molybdenum: 2, money: 100),
//!     planets_have_tubes: true,
//! )
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cost::Cost;
use crate::error::{Result, SimError};
use crate::players::PlayerArray;

/// Host program family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HostKind {
    /// Unknown host; treated like classic Host.
    Unknown,
    /// Classic Tim-Host.
    Host,
    /// SRace variant of Tim-Host.
    SRace,
    /// NuHost.
    NuHost,
    /// PHost.
    PHost,
}

/// Host program identity and version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HostVersion {
    /// Host program family.
    pub kind: HostKind,
    /// Encoded version, see [`HostVersion::mkversion`].
    pub version: u32,
}

impl HostVersion {
    /// Create a host version.
    #[must_use]
    pub const fn new(kind: HostKind, version: u32) -> Self {
        Self { kind, version }
    }

    /// Encode a version number as `major.minor.patch`.
    ///
    /// Minor and patch must be below 1000.
    #[must_use]
    pub const fn mkversion(major: u32, minor: u32, patch: u32) -> u32 {
        major * 1_000_000 + minor * 1000 + patch
    }

    /// Check whether this is a PHost.
    ///
    /// Battle ordering and several combat rules follow PHost semantics
    /// exactly when this returns true.
    #[must_use]
    pub const fn is_phost(&self) -> bool {
        matches!(self.kind, HostKind::PHost)
    }
}

impl Default for HostVersion {
    fn default() -> Self {
        Self::new(HostKind::Unknown, 0)
    }
}

impl fmt::Display for HostVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self.kind {
            HostKind::Unknown => "unknown",
            HostKind::Host => "Host",
            HostKind::SRace => "SRace",
            HostKind::NuHost => "NuHost",
            HostKind::PHost => "PHost",
        };
        let major = self.version / 1_000_000;
        let minor = (self.version / 1000) % 1000;
        let patch = self.version % 1000;
        write!(f, "{name} {major}.{minor}.{patch}")
    }
}

/// Host configuration values used by the simulation core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HostConfiguration {
    /// Cost of one fighter built on a starbase.
    pub base_fighter_cost: Cost,
    /// Cost of one fighter built by a ship.
    pub ship_fighter_cost: Cost,
    /// Cost of a starbase.
    pub starbase_cost: Cost,
    /// Money cost of one tech level step, multiplied by the starting level.
    pub base_tech_cost: i32,
    /// Cost of one planetary defense post.
    pub planet_defense_cost: Cost,
    /// Cost of one starbase defense post.
    pub base_defense_cost: Cost,
    /// Whether planets fight with torpedo tubes.
    pub planets_have_tubes: bool,
    /// Maximum damage per player. Classic rules give player 2 a limit of 150.
    pub max_damage_per_player: PlayerArray<i32>,
}

impl HostConfiguration {
    /// Parse a configuration from RON text.
    ///
    /// `path` is only used for error messages.
    pub fn from_ron_str(text: &str, path: &str) -> Result<Self> {
        ron::from_str(text).map_err(|e| SimError::DataParse {
            path: path.to_string(),
            message: e.to_string(),
        })
    }

    /// Money cost of going from tech level `from` to `to`.
    ///
    /// Each step from level `n` to `n + 1` costs `n * base_tech_cost`.
    #[must_use]
    pub fn tech_upgrade_cost(&self, from: i32, to: i32) -> Cost {
        let from = from.max(1);
        if to <= from {
            return Cost::ZERO;
        }
        let steps: i32 = (from..to).sum();
        Cost::money(steps * self.base_tech_cost)
    }
}

impl Default for HostConfiguration {
    fn default() -> Self {
        Self {
            base_fighter_cost: Cost::new(3, 0, 2, 100, 0),
            ship_fighter_cost: Cost::new(3, 0, 2, 0, 5),
            starbase_cost: Cost::new(402, 120, 340, 900, 0),
            base_tech_cost: 100,
            planet_defense_cost: Cost::new(0, 0, 0, 10, 1),
            base_defense_cost: Cost::new(0, 1, 0, 10, 0),
            planets_have_tubes: false,
            max_damage_per_player: PlayerArray::filled(99),
        }
    }
}

/// Combat engine a simulation setup is run through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum EngineMode {
    /// Classic Host combat.
    #[default]
    Host,
    /// PHost combat.
    PHost,
}

/// Simulation options that affect cost and ordering decisions.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfiguration {
    /// Combat engine.
    pub engine: EngineMode,
    /// PHost alternative combat.
    pub alternative_combat: bool,
    /// Whether allied units refrain from fighting each other.
    pub honor_alliances: bool,
}

impl SimConfiguration {
    /// Parse a configuration from RON text.
    pub fn from_ron_str(text: &str, path: &str) -> Result<Self> {
        ron::from_str(text).map_err(|e| SimError::DataParse {
            path: path.to_string(),
            message: e.to_string(),
        })
    }

    /// Check whether planets fire torpedoes under this configuration.
    #[must_use]
    pub fn planets_fire_torpedoes(&self, host: &HostConfiguration) -> bool {
        host.planets_have_tubes && self.alternative_combat
    }
}
