//! Ship list: the read-only component reference dataset.

use serde::{Deserialize, Serialize};

use super::component_data::{BeamData, EngineData, TorpedoData};
use super::hull_data::HullData;
use crate::error::{Result, SimError};

/// Number of torpedo types a starbase can stock.
pub const NUM_TORPEDO_TYPES: usize = 10;

/// Complete component reference dataset.
///
/// All lookups take 1-based type numbers, matching the numbers stored in
/// setup files. Type 0 and out-of-range numbers return `None`.
///
/// # Example RON
///
/// ```ron
/// ShipList(
///     hulls: [HullData(name: "OUTRIDER CLASS SCOUT", mass: 75, ...)],
///     engines: [EngineData(name: "StarDrive 1", cost: (money: 1))],
///     beams: [BeamData(name: "Laser", cost: (tritanium: 1, money: 1))],
///     launchers: [...],
/// )
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShipList {
    /// Hull definitions, type 1 first.
    #[serde(default)]
    pub hulls: Vec<HullData>,

    /// Engine definitions.
    #[serde(default)]
    pub engines: Vec<EngineData>,

    /// Beam definitions.
    #[serde(default)]
    pub beams: Vec<BeamData>,

    /// Torpedo launcher definitions.
    #[serde(default)]
    pub launchers: Vec<TorpedoData>,
}

fn lookup<T>(items: &[T], number: i32) -> Option<&T> {
    let index = usize::try_from(number).ok()?.checked_sub(1)?;
    items.get(index)
}

impl ShipList {
    /// Parse a ship list from RON text.
    ///
    /// `path` is only used for error messages.
    pub fn from_ron_str(text: &str, path: &str) -> Result<Self> {
        let list: Self = ron::from_str(text).map_err(|e| SimError::DataParse {
            path: path.to_string(),
            message: e.to_string(),
        })?;
        tracing::debug!(
            path,
            hulls = list.hulls.len(),
            engines = list.engines.len(),
            beams = list.beams.len(),
            launchers = list.launchers.len(),
            "Loaded ship list"
        );
        Ok(list)
    }

    /// Look up a hull by type number.
    #[must_use]
    pub fn hull(&self, number: i32) -> Option<&HullData> {
        lookup(&self.hulls, number)
    }

    /// Look up an engine by type number.
    #[must_use]
    pub fn engine(&self, number: i32) -> Option<&EngineData> {
        lookup(&self.engines, number)
    }

    /// Look up a beam by type number.
    #[must_use]
    pub fn beam(&self, number: i32) -> Option<&BeamData> {
        lookup(&self.beams, number)
    }

    /// Look up a torpedo launcher by type number.
    #[must_use]
    pub fn launcher(&self, number: i32) -> Option<&TorpedoData> {
        lookup(&self.launchers, number)
    }

    /// Number of defined torpedo types.
    #[must_use]
    pub fn num_launchers(&self) -> i32 {
        i32::try_from(self.launchers.len()).unwrap_or(i32::MAX)
    }

    /// Validate internal consistency.
    ///
    /// Returns a list of validation errors.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        for (i, hull) in self.hulls.iter().enumerate() {
            let number = i + 1;
            if hull.mass <= 0 {
                errors.push(format!("Hull {number} '{}' has non-positive mass", hull.name));
            }
            if hull.num_engines <= 0 {
                errors.push(format!("Hull {number} '{}' has no engines", hull.name));
            }
            if hull.max_beams < 0 || hull.max_launchers < 0 || hull.num_bays < 0 {
                errors.push(format!("Hull {number} '{}' has negative weapon counts", hull.name));
            }
        }

        if self.launchers.len() > NUM_TORPEDO_TYPES {
            errors.push(format!(
                "{} torpedo types defined, starbases stock at most {NUM_TORPEDO_TYPES}",
                self.launchers.len()
            ));
        }

        let tech_levels = self
            .engines
            .iter()
            .map(|e| (&e.name, e.tech_level))
            .chain(self.beams.iter().map(|b| (&b.name, b.tech_level)))
            .chain(self.launchers.iter().map(|l| (&l.name, l.tech_level)));
        for (name, level) in tech_levels {
            if !(1..=10).contains(&level) {
                errors.push(format!("Component '{name}' has tech level {level} outside 1..=10"));
            }
        }

        errors
    }
}
