//! Player numbers, player sets, and per-player arrays.
//!
//! Player 0 means "unowned". Real players are numbered `1..=MAX_PLAYERS`.

use serde::{Deserialize, Serialize};

/// Highest valid player number.
pub const MAX_PLAYERS: i32 = 31;

/// Set of player numbers `0..=MAX_PLAYERS`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct PlayerSet(u32);

impl PlayerSet {
    /// The empty set.
    pub const EMPTY: Self = Self(0);

    /// Create an empty set.
    #[must_use]
    pub const fn new() -> Self {
        Self(0)
    }

    /// Create a set containing a single player.
    ///
    /// Out-of-range numbers produce an empty set.
    #[must_use]
    pub const fn single(player: i32) -> Self {
        if player >= 0 && player <= MAX_PLAYERS {
            Self(1 << player)
        } else {
            Self(0)
        }
    }

    /// Set containing all real players (`1..=MAX_PLAYERS`).
    #[must_use]
    pub const fn all_players() -> Self {
        Self(!1)
    }

    /// Create a set from raw bits.
    #[must_use]
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    /// Get raw bits.
    #[must_use]
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Add a player. Out-of-range numbers are ignored.
    pub fn insert(&mut self, player: i32) {
        self.0 |= Self::single(player).0;
    }

    /// Remove a player.
    pub fn remove(&mut self, player: i32) {
        self.0 &= !Self::single(player).0;
    }

    /// Check membership.
    #[must_use]
    pub const fn contains(self, player: i32) -> bool {
        player >= 0 && player <= MAX_PLAYERS && (self.0 & (1 << player)) != 0
    }

    /// Check for the empty set.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Union of two sets.
    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Iterate over contained players in ascending order.
    pub fn iter(self) -> impl Iterator<Item = i32> {
        (0..=MAX_PLAYERS).filter(move |&p| self.contains(p))
    }
}

impl FromIterator<i32> for PlayerSet {
    fn from_iter<I: IntoIterator<Item = i32>>(iter: I) -> Self {
        let mut set = Self::new();
        for p in iter {
            set.insert(p);
        }
        set
    }
}

/// Fixed-size array with one slot per player number `0..=MAX_PLAYERS`.
///
/// Reads of out-of-range indexes return the default value, writes are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerArray<T> {
    values: Vec<T>,
}

impl<T: Clone + Default> PlayerArray<T> {
    /// Create an array with all slots set to the default value.
    #[must_use]
    pub fn new() -> Self {
        Self::filled(T::default())
    }

    /// Create an array with all slots set to `value`.
    #[must_use]
    pub fn filled(value: T) -> Self {
        Self {
            values: vec![value; (MAX_PLAYERS + 1) as usize],
        }
    }

    /// Get the value for a player.
    #[must_use]
    pub fn get(&self, player: i32) -> T {
        Self::index_of(player)
            .and_then(|i| self.values.get(i))
            .cloned()
            .unwrap_or_default()
    }

    /// Set the value for a player.
    pub fn set(&mut self, player: i32, value: T) {
        if let Some(slot) = Self::index_of(player).and_then(|i| self.values.get_mut(i)) {
            *slot = value;
        }
    }

    /// Mutable access to a player's slot.
    pub fn get_mut(&mut self, player: i32) -> Option<&mut T> {
        Self::index_of(player).and_then(|i| self.values.get_mut(i))
    }

    /// Iterate over `(player, value)` for all slots.
    pub fn iter(&self) -> impl Iterator<Item = (i32, &T)> {
        self.values.iter().enumerate().map(|(i, v)| (i as i32, v))
    }

    fn index_of(player: i32) -> Option<usize> {
        if player >= 0 && player <= MAX_PLAYERS {
            Some(player as usize)
        } else {
            None
        }
    }
}

impl<T: Clone + Default> Default for PlayerArray<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Player to team assignment.
///
/// By default every player is alone in a team numbered like the player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamSettings {
    teams: PlayerArray<i32>,
}

impl TeamSettings {
    /// Create default team settings.
    #[must_use]
    pub fn new() -> Self {
        let mut teams = PlayerArray::new();
        for player in 0..=MAX_PLAYERS {
            teams.set(player, player);
        }
        Self { teams }
    }

    /// Get the team of a player.
    #[must_use]
    pub fn player_team(&self, player: i32) -> i32 {
        self.teams.get(player)
    }

    /// Assign a player to a team.
    pub fn set_player_team(&mut self, player: i32, team: i32) {
        self.teams.set(player, team);
    }
}

impl Default for TeamSettings {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_set_membership() {
        let mut set = PlayerSet::new();
        assert!(set.is_empty());
        set.insert(3);
        set.insert(MAX_PLAYERS);
        set.insert(MAX_PLAYERS + 1);
        set.insert(-1);
        assert!(set.contains(3));
        assert!(set.contains(MAX_PLAYERS));
        assert!(!set.contains(4));
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![3, MAX_PLAYERS]);

        set.remove(3);
        assert!(!set.contains(3));
    }

    #[test]
    fn test_all_players_excludes_unowned() {
        let all = PlayerSet::all_players();
        assert!(!all.contains(0));
        assert!(all.contains(1));
        assert!(all.contains(MAX_PLAYERS));
    }

    #[test]
    fn test_player_array_ignores_out_of_range() {
        let mut arr = PlayerArray::<i32>::new();
        arr.set(5, 7);
        arr.set(99, 1);
        arr.set(-3, 1);
        assert_eq!(arr.get(5), 7);
        assert_eq!(arr.get(99), 0);
        assert_eq!(arr.get(-3), 0);
    }

    #[test]
    fn test_team_settings_default_identity() {
        let mut teams = TeamSettings::new();
        assert_eq!(teams.player_team(4), 4);
        teams.set_player_team(4, 2);
        assert_eq!(teams.player_team(4), 2);
    }
}
