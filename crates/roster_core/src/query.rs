//! # Stock Aggregations
//!
//! Ready-made filter, mapper and reducer for
//! [`PlayerRegistry::filter_map_reduce`](crate::PlayerRegistry::filter_map_reduce):
//! counting players per level while leaving out a display name.
//!
//! Each piece locks the player it inspects through the `Player` API.

use std::collections::BTreeMap;

use crate::player::Player;

/// Player count per level, ordered by level.
pub type LevelCounts = BTreeMap<i32, usize>;

/// Filter that keeps players whose display name differs from `display_name`.
pub fn excluding_display_name(display_name: &str) -> impl Fn(&Player) -> bool + '_ {
    move |player: &Player| player.read(|state| state.display_name != display_name)
}

/// Mapper producing `(level, 1)` for a player.
#[must_use]
pub fn level_tally(player: &Player) -> (i32, usize) {
    (player.level(), 1)
}

/// Reducer summing tallies per level. No tallies gives an empty map.
#[must_use]
pub fn count_by_level(tallies: Vec<(i32, usize)>) -> LevelCounts {
    let mut counts = LevelCounts::new();
    for (level, count) in tallies {
        *counts.entry(level).or_default() += count;
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_excluding_display_name() {
        let keep = excluding_display_name("John");
        assert!(keep(&Player::new("uid_001", "king", 1, 100)));
        assert!(!keep(&Player::new("uid_004", "John", 1, 120)));
        assert!(keep(&Player::new("uid_005", "john", 1, 120)));
    }

    #[test]
    fn test_count_by_level() {
        let counts = count_by_level(vec![(1, 1), (2, 1), (1, 1), (1, 2)]);
        assert_eq!(counts, LevelCounts::from([(1, 4), (2, 1)]));
    }

    #[test]
    fn test_count_by_level_empty() {
        assert!(count_by_level(Vec::new()).is_empty());
    }
}
