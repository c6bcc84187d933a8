//! Output of one simulated battle, as handed over by the combat engine.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Recorded fights of one simulated battle, kept for replay.
///
/// The aggregation code only holds on to these and never looks inside.
pub trait BattleDatabase: fmt::Debug + Send + Sync {
    /// Number of fights recorded.
    fn num_battles(&self) -> usize;
}

/// Shared handle to recorded fights.
pub type BattleHandle = Arc<dyn BattleDatabase>;

/// Summary of one simulated battle.
///
/// A simulation run may enumerate possible outcomes with different
/// likelihoods. `this_battle_weight / total_battle_weight` is the
/// likelihood of this outcome.
#[derive(Debug, Clone, Default)]
pub struct SimulationResult {
    /// Weight of this battle.
    pub this_battle_weight: i32,
    /// Weight of all outcomes of the series this battle belongs to.
    pub total_battle_weight: i32,
    /// Index of this battle within the whole run, starting at 0.
    pub this_battle_index: i32,
    /// Recorded fights, if kept.
    pub battles: Option<BattleHandle>,
}

impl SimulationResult {
    /// Create a result.
    #[must_use]
    pub fn new(this_battle_weight: i32, total_battle_weight: i32, this_battle_index: i32) -> Self {
        Self {
            this_battle_weight,
            total_battle_weight,
            this_battle_index,
            battles: None,
        }
    }

    /// Attach recorded fights.
    #[must_use]
    pub fn with_battles(mut self, battles: BattleHandle) -> Self {
        self.battles = Some(battles);
        self
    }
}

/// Per-unit fight counters of one simulated battle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Statistic {
    /// Number of fights the unit took part in.
    pub num_fights: i32,
    /// Number of torpedoes that hit.
    pub num_torpedo_hits: i32,
    /// Lowest number of fighters aboard during the battle.
    pub min_fighters_aboard: i32,
}

impl Statistic {
    /// Start counting for a unit with `fighters` aboard.
    #[must_use]
    pub const fn new(fighters: i32) -> Self {
        Self {
            num_fights: 0,
            num_torpedo_hits: 0,
            min_fighters_aboard: fighters,
        }
    }

    /// Record one fight.
    pub fn add_fight(&mut self) {
        self.num_fights += 1;
    }

    /// Record torpedo hits.
    pub fn add_torpedo_hits(&mut self, hits: i32) {
        self.num_torpedo_hits += hits;
    }

    /// Record the current number of fighters aboard.
    pub fn handle_fighters_aboard(&mut self, fighters: i32) {
        self.min_fighters_aboard = self.min_fighters_aboard.min(fighters);
    }

    /// Combine with the counters of a later fight of the same battle.
    pub fn merge(&mut self, other: &Self) {
        self.num_fights += other.num_fights;
        self.num_torpedo_hits += other.num_torpedo_hits;
        self.min_fighters_aboard = self.min_fighters_aboard.min(other.min_fighters_aboard);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct TwoFights;

    impl BattleDatabase for TwoFights {
        fn num_battles(&self) -> usize {
            2
        }
    }

    #[test]
    fn test_statistic_counters() {
        let mut stat = Statistic::new(20);
        stat.add_fight();
        stat.handle_fighters_aboard(12);
        stat.handle_fighters_aboard(15);
        stat.add_torpedo_hits(3);

        let mut later = Statistic::new(12);
        later.add_fight();
        later.handle_fighters_aboard(4);
        stat.merge(&later);

        assert_eq!(stat.num_fights, 2);
        assert_eq!(stat.num_torpedo_hits, 3);
        assert_eq!(stat.min_fighters_aboard, 4);
    }

    #[test]
    fn test_result_shares_battles() {
        let battles: BattleHandle = Arc::new(TwoFights);
        let result = SimulationResult::new(1, 4, 0).with_battles(Arc::clone(&battles));
        let copy = result.clone();
        assert_eq!(Arc::strong_count(&battles), 3);
        assert_eq!(copy.battles.unwrap().num_battles(), 2);
    }
}
