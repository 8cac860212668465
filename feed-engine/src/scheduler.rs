//! Coalescing refresh scheduler.
//!
//! Source events arrive in bursts: one network round often touches many
//! boards within milliseconds. Recomputing the digests per event would make
//! the work proportional to the event count, so refresh requests are parked
//! in a dirty set and flushed at most once per debounce window, so the flush
//! cost is bounded by the number of boards, not the number of events. The
//! deadline is pinned by the first mark and not pushed back by later ones;
//! a steady event stream still flushes every window.

use std::collections::HashSet;
use std::time::{Duration, Instant};

/// One pending reason to recompute.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RefreshRequest {
    /// The board set itself changed (board added, replaced or failed).
    Boards,
    /// One board's post collection changed.
    Posts(String),
    /// One board's activity counters changed.
    Stats(String),
}

/// Everything that became dirty since the last flush.
#[derive(Debug, Default)]
pub struct RefreshBatch {
    pub boards_changed: bool,
    pub post_boards: HashSet<String>,
    pub stats_boards: HashSet<String>,
}

impl RefreshBatch {
    pub fn is_empty(&self) -> bool {
        !self.boards_changed && self.post_boards.is_empty() && self.stats_boards.is_empty()
    }
}

#[derive(Debug)]
pub struct RefreshScheduler {
    pending: HashSet<RefreshRequest>,
    debounce: Duration,
    deadline: Option<Instant>,
}

impl RefreshScheduler {
    pub fn new(debounce: Duration) -> Self {
        Self {
            pending: HashSet::new(),
            debounce,
            deadline: None,
        }
    }

    /// Park one refresh request. The first mark after a flush arms the
    /// deadline; repeated marks coalesce into the same flush.
    pub fn mark(&mut self, request: RefreshRequest) {
        self.pending.insert(request);
        if self.deadline.is_none() {
            self.deadline = Some(Instant::now() + self.debounce);
        }
    }

    pub fn is_idle(&self) -> bool {
        self.pending.is_empty()
    }

    /// When the pending batch should flush, if anything is pending.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Drain everything pending and disarm the deadline. The caller
    /// recomputes from full current state, so a batch drained late
    /// automatically reflects every request that superseded an earlier one.
    pub fn take_batch(&mut self) -> RefreshBatch {
        self.deadline = None;
        let mut batch = RefreshBatch::default();
        for request in self.pending.drain() {
            match request {
                RefreshRequest::Boards => batch.boards_changed = true,
                RefreshRequest::Posts(address) => {
                    batch.post_boards.insert(address);
                }
                RefreshRequest::Stats(address) => {
                    batch.stats_boards.insert(address);
                }
            }
        }
        batch
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marks_coalesce_into_one_batch() {
        let mut scheduler = RefreshScheduler::new(Duration::from_millis(100));
        scheduler.mark(RefreshRequest::Posts("a.eth".to_string()));
        scheduler.mark(RefreshRequest::Posts("a.eth".to_string()));
        scheduler.mark(RefreshRequest::Posts("b.eth".to_string()));
        scheduler.mark(RefreshRequest::Stats("a.eth".to_string()));
        scheduler.mark(RefreshRequest::Boards);

        let batch = scheduler.take_batch();
        assert!(batch.boards_changed);
        assert_eq!(batch.post_boards.len(), 2);
        assert_eq!(batch.stats_boards.len(), 1);
        assert!(scheduler.is_idle());
        assert!(scheduler.next_deadline().is_none());
    }

    #[test]
    fn test_first_mark_arms_the_deadline() {
        let mut scheduler = RefreshScheduler::new(Duration::from_millis(50));
        assert!(scheduler.next_deadline().is_none());

        let before = Instant::now();
        scheduler.mark(RefreshRequest::Boards);
        let deadline = scheduler.next_deadline().expect("armed");
        assert!(deadline >= before + Duration::from_millis(50));

        // Later marks do not push the deadline back.
        scheduler.mark(RefreshRequest::Posts("a.eth".to_string()));
        assert_eq!(scheduler.next_deadline(), Some(deadline));
    }

    #[test]
    fn test_empty_batch_after_drain() {
        let mut scheduler = RefreshScheduler::new(Duration::from_millis(10));
        scheduler.mark(RefreshRequest::Boards);
        let _ = scheduler.take_batch();
        let batch = scheduler.take_batch();
        assert!(batch.is_empty());
    }
}
