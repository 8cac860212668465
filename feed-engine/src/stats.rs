//! Aggregate activity counters.
//!
//! Each board refreshes its own counters on its own schedule, so global
//! totals are always rebuilt from the full current board set. Keeping a
//! running total across snapshots would double-count every refresh.

use plebhome_core::{BoardStats, GlobalStats};
use std::collections::{HashMap, HashSet};
use tracing::debug;

#[derive(Debug, Default)]
pub struct StatsAccumulator {
    per_board: HashMap<String, BoardStats>,
    totals: GlobalStats,
}

impl StatsAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the latest counters for one board, replacing any prior value.
    pub fn update_board(&mut self, board_address: &str, stats: BoardStats) {
        self.per_board.insert(board_address.to_string(), stats);
    }

    /// Drop counters for boards no longer in the current set.
    pub fn retain_boards(&mut self, current: &HashSet<String>) {
        self.per_board
            .retain(|address, _| current.contains(address));
    }

    /// Latest counters for one board, when they have arrived.
    pub fn board_stats(&self, board_address: &str) -> Option<&BoardStats> {
        self.per_board.get(board_address)
    }

    /// Rebuild the global totals from scratch over every board whose
    /// counters are currently known. `board_count` is the size of the full
    /// current board set, counters arrived or not.
    pub fn rebuild(&mut self, board_count: u64) -> GlobalStats {
        let mut totals = GlobalStats {
            board_count,
            ..Default::default()
        };
        for stats in self.per_board.values() {
            totals.user_count += stats.all_active_user_count;
            totals.post_count += stats.all_post_count;
        }
        debug!(
            "rebuilt global stats: {} boards, {} posts, {} users",
            totals.board_count, totals.post_count, totals.user_count
        );
        self.totals = totals;
        totals
    }

    pub fn totals(&self) -> GlobalStats {
        self.totals
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(all_posts: u64, all_users: u64) -> BoardStats {
        BoardStats {
            all_post_count: all_posts,
            all_active_user_count: all_users,
            ..Default::default()
        }
    }

    #[test]
    fn test_rebuild_sums_current_board_set() {
        let mut acc = StatsAccumulator::new();
        acc.update_board("a.eth", stats(10, 4));
        let totals = acc.rebuild(1);
        assert_eq!(totals.post_count, 10);
        assert_eq!(totals.user_count, 4);
        assert_eq!(totals.board_count, 1);

        // A second board arrives: totals are the sum over the new set, not
        // the old total plus a delta.
        acc.update_board("b.eth", stats(5, 2));
        let totals = acc.rebuild(2);
        assert_eq!(totals.post_count, 15);
        assert_eq!(totals.user_count, 6);
        assert_eq!(totals.board_count, 2);
    }

    #[test]
    fn test_refreshed_counters_do_not_compound() {
        let mut acc = StatsAccumulator::new();
        acc.update_board("a.eth", stats(10, 4));
        acc.rebuild(1);

        // The board refreshes its own counters; the new value replaces the
        // old one instead of stacking on top of it.
        acc.update_board("a.eth", stats(12, 5));
        let totals = acc.rebuild(1);
        assert_eq!(totals.post_count, 12);
        assert_eq!(totals.user_count, 5);
    }

    #[test]
    fn test_rebuild_is_idempotent() {
        let mut acc = StatsAccumulator::new();
        acc.update_board("a.eth", stats(10, 4));
        acc.update_board("b.eth", stats(5, 2));

        let first = acc.rebuild(2);
        let second = acc.rebuild(2);
        assert_eq!(first, second);
        assert_eq!(acc.totals(), second);
    }

    #[test]
    fn test_departed_boards_leave_the_totals() {
        let mut acc = StatsAccumulator::new();
        acc.update_board("a.eth", stats(10, 4));
        acc.update_board("b.eth", stats(5, 2));
        acc.rebuild(2);

        let current: HashSet<String> = ["a.eth".to_string()].into_iter().collect();
        acc.retain_boards(&current);
        let totals = acc.rebuild(1);
        assert_eq!(totals.post_count, 10);
        assert_eq!(totals.board_count, 1);
        assert!(acc.board_stats("b.eth").is_none());
    }

    #[test]
    fn test_boards_without_counters_still_count_as_boards() {
        let mut acc = StatsAccumulator::new();
        acc.update_board("a.eth", stats(10, 4));
        // Three boards known, one has reported counters so far.
        let totals = acc.rebuild(3);
        assert_eq!(totals.board_count, 3);
        assert_eq!(totals.post_count, 10);
    }
}
