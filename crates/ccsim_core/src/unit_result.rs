//! Per-unit statistics over many simulated battles.

use std::sync::Arc;

use crate::math::{ratio, rescale, Ratio};
use crate::object::SimObject;
use crate::planet::Planet;
use crate::result::{BattleHandle, SimulationResult, Statistic};
use crate::ship::Ship;

/// Running aggregate of one value.
///
/// Tracks the extremes together with the battle that produced them, and
/// the weighted sum of all values.
#[derive(Debug, Clone, Default)]
pub struct Item {
    min: i32,
    max: i32,
    total_scaled: i64,
    min_specimen: Option<BattleHandle>,
    max_specimen: Option<BattleHandle>,
}

impl Item {
    /// Fold in one observation.
    ///
    /// The first battle of a run (index 0) initializes both extremes.
    pub fn add(&mut self, value: i32, result: &SimulationResult) {
        if result.this_battle_index == 0 {
            self.min = value;
            self.max = value;
            self.min_specimen.clone_from(&result.battles);
            self.max_specimen.clone_from(&result.battles);
        } else {
            if value < self.min {
                self.min = value;
                self.min_specimen.clone_from(&result.battles);
            }
            if value > self.max {
                self.max = value;
                self.max_specimen.clone_from(&result.battles);
            }
        }
        self.total_scaled += i64::from(value) * i64::from(result.this_battle_weight);
    }

    /// Move the weighted sum to a new total weight.
    pub fn change_weight(&mut self, old_weight: i32, new_weight: i32) {
        self.total_scaled = rescale(self.total_scaled, i64::from(old_weight), i64::from(new_weight));
    }

    /// Smallest value seen.
    #[must_use]
    pub const fn min(&self) -> i32 {
        self.min
    }

    /// Largest value seen.
    #[must_use]
    pub const fn max(&self) -> i32 {
        self.max
    }

    /// Sum of all values times their battle weight.
    #[must_use]
    pub const fn total_scaled(&self) -> i64 {
        self.total_scaled
    }

    /// Weighted mean given the cumulative weight of all battles.
    #[must_use]
    pub fn average(&self, cumulative_weight: i32) -> Ratio {
        ratio(self.total_scaled, i64::from(cumulative_weight))
    }

    /// Battle that produced the minimum.
    #[must_use]
    pub fn min_specimen(&self) -> Option<BattleHandle> {
        self.min_specimen.as_ref().map(Arc::clone)
    }

    /// Battle that produced the maximum.
    #[must_use]
    pub fn max_specimen(&self) -> Option<BattleHandle> {
        self.max_specimen.as_ref().map(Arc::clone)
    }
}

/// Statistics of one unit slot.
///
/// For ships, fight counters grow by the battle weight. For planets they
/// grow by one per battle regardless of weight, so they are only
/// comparable to the number of battles, not to the cumulative weight.
#[derive(Debug, Clone, Default)]
pub struct UnitResult {
    num_fights: i32,
    num_fights_won: i32,
    num_captures: i32,
    num_torpedoes_fired: Item,
    num_fighters_lost: Item,
    damage: Item,
    shield: Item,
    crew_left_or_defense_lost: Item,
    num_torpedo_hits: Item,
    min_fighters_aboard: Item,
}

impl UnitResult {
    /// Create an empty result.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn count_outcome(&mut self, old_owner: i32, new_owner: i32, stat: &Statistic, increment: i32) {
        if stat.num_fights != 0 {
            self.num_fights += increment;
        }
        if new_owner != 0 {
            if new_owner == old_owner {
                self.num_fights_won += increment;
            } else {
                self.num_captures += increment;
            }
        }
    }

    /// Fold in the fate of a ship.
    pub fn add_ship_result(&mut self, old: &Ship, new: &Ship, stat: &Statistic, result: &SimulationResult) {
        self.count_outcome(old.owner(), new.owner(), stat, result.this_battle_weight);

        let ammo_used = old.ammo() - new.ammo();
        let torpedoes = if old.num_launchers() > 0 { ammo_used } else { 0 };
        let fighters = if old.num_bays() > 0 { ammo_used } else { 0 };
        self.num_torpedoes_fired.add(torpedoes, result);
        self.num_fighters_lost.add(fighters, result);
        self.damage.add(new.damage(), result);
        self.shield.add(new.shield(), result);
        self.crew_left_or_defense_lost.add(new.crew(), result);
        self.num_torpedo_hits.add(stat.num_torpedo_hits, result);
        self.min_fighters_aboard.add(stat.min_fighters_aboard, result);
    }

    /// Fold in the fate of a planet.
    ///
    /// Fight, win and capture counters grow by one here, not by the battle
    /// weight as they do for ships.
    pub fn add_planet_result(
        &mut self,
        old: &Planet,
        new: &Planet,
        stat: &Statistic,
        result: &SimulationResult,
    ) {
        self.count_outcome(old.owner(), new.owner(), stat, 1);

        self.num_torpedoes_fired
            .add(old.total_base_torpedoes() - new.total_base_torpedoes(), result);
        self.num_fighters_lost
            .add(old.base_fighters() - new.base_fighters(), result);
        self.damage.add(new.damage(), result);
        self.shield.add(new.shield(), result);
        self.crew_left_or_defense_lost
            .add(old.defense() - new.defense(), result);
        self.num_torpedo_hits.add(stat.num_torpedo_hits, result);
        self.min_fighters_aboard.add(stat.min_fighters_aboard, result);
    }

    /// Move all weighted values to a new total weight.
    pub fn change_weight(&mut self, old_weight: i32, new_weight: i32) {
        let (old, new) = (i64::from(old_weight), i64::from(new_weight));
        for counter in [&mut self.num_fights, &mut self.num_fights_won, &mut self.num_captures] {
            *counter = i32::try_from(rescale(i64::from(*counter), old, new)).unwrap_or(i32::MAX);
        }
        for item in self.items_mut() {
            item.change_weight(old_weight, new_weight);
        }
    }

    fn items_mut(&mut self) -> [&mut Item; 7] {
        [
            &mut self.num_torpedoes_fired,
            &mut self.num_fighters_lost,
            &mut self.damage,
            &mut self.shield,
            &mut self.crew_left_or_defense_lost,
            &mut self.num_torpedo_hits,
            &mut self.min_fighters_aboard,
        ]
    }

    /// Fights the unit took part in.
    #[must_use]
    pub const fn num_fights(&self) -> i32 {
        self.num_fights
    }

    /// Battles after which the unit still had its owner.
    ///
    /// For ships this is a sum of battle weights, not a count.
    #[must_use]
    pub const fn num_fights_won(&self) -> i32 {
        self.num_fights_won
    }

    /// Battles after which the unit had a new owner.
    #[must_use]
    pub const fn num_captures(&self) -> i32 {
        self.num_captures
    }

    /// Torpedoes fired.
    #[must_use]
    pub const fn num_torpedoes_fired(&self) -> &Item {
        &self.num_torpedoes_fired
    }

    /// Fighters lost.
    #[must_use]
    pub const fn num_fighters_lost(&self) -> &Item {
        &self.num_fighters_lost
    }

    /// Damage after the battle.
    #[must_use]
    pub const fn damage(&self) -> &Item {
        &self.damage
    }

    /// Shield level after the battle.
    #[must_use]
    pub const fn shield(&self) -> &Item {
        &self.shield
    }

    /// Crew left (ships) or defense posts lost (planets).
    #[must_use]
    pub const fn crew_left_or_defense_lost(&self) -> &Item {
        &self.crew_left_or_defense_lost
    }

    /// Torpedo hits.
    #[must_use]
    pub const fn num_torpedo_hits(&self) -> &Item {
        &self.num_torpedo_hits
    }

    /// Fewest fighters aboard during the battle.
    #[must_use]
    pub const fn min_fighters_aboard(&self) -> &Item {
        &self.min_fighters_aboard
    }
}
