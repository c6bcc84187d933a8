//! Read-only views of units in the live game.
//!
//! The live game knows units only partially: attributes of foreign units
//! are often unknown, which these views express with `Option`.

use serde::{Deserialize, Serialize};

/// Ship mission number of the kill mission.
pub const MISSION_KILL: i32 = 4;

/// A ship as seen in the live game.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapShip {
    /// Ship id.
    pub id: i32,
    /// Owner, if known.
    pub owner: Option<i32>,
    /// Friendly code, if known.
    pub friendly_code: Option<String>,
    /// Number of beams, if known.
    pub num_beams: Option<i32>,
    /// Number of torpedo launchers, if known.
    pub num_launchers: Option<i32>,
    /// Number of fighter bays, if known.
    pub num_bays: Option<i32>,
    /// Mission number, if known.
    pub mission: Option<i32>,
    /// Primary enemy player, 0 for none, if known.
    pub primary_enemy: Option<i32>,
}

impl MapShip {
    /// Check whether the ship is known to be armed.
    ///
    /// Returns `None` if no weapon count is known.
    #[must_use]
    pub fn has_weapons(&self) -> Option<bool> {
        let counts = [self.num_beams, self.num_launchers, self.num_bays];
        if counts.iter().all(Option::is_none) {
            return None;
        }
        Some(counts.iter().flatten().any(|&n| n > 0))
    }
}

/// A planet as seen in the live game.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapPlanet {
    /// Planet id.
    pub id: i32,
    /// Owner, if known.
    pub owner: Option<i32>,
    /// Friendly code, if known.
    pub friendly_code: Option<String>,
    /// Defense posts, if known.
    pub defense: Option<i32>,
    /// Starbase fighters, if known.
    pub base_fighters: Option<i32>,
}

impl MapPlanet {
    /// Check whether the planet is known to have any defense.
    #[must_use]
    pub fn has_defense(&self) -> bool {
        self.defense.unwrap_or(0) > 0 || self.base_fighters.unwrap_or(0) > 0
    }
}

/// Any object in the live game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MapObject {
    /// A ship.
    Ship(MapShip),
    /// A planet.
    Planet(MapPlanet),
    /// A minefield, identified by id.
    Minefield(i32),
    /// An unidentified object, identified by id.
    Ufo(i32),
}
