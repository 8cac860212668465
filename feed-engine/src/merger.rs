//! The newest-posts stream.
//!
//! An accumulating, de-duplicated list fed by every board's updates. A newly
//! observed post goes to the front when it is newer than the current front
//! item, otherwise to the back. The result is approximately recency-ordered
//! but NOT sorted: a burst of out-of-order arrivals lands in arrival order
//! at the back. That is long-standing observable behavior of the home page;
//! replacing it with a true sort would change which posts make the digest,
//! so it stays.

use crate::filter::is_unmoderated;
use plebhome_core::{Post, PostKey};
use std::collections::{HashSet, VecDeque};

#[derive(Debug, Default)]
pub struct NewPostMerger {
    accepted: VecDeque<Post>,
    seen: HashSet<PostKey>,
}

impl NewPostMerger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Offer one post snapshot. Returns whether it was accepted.
    ///
    /// Eligibility is evaluated against this snapshot; a post that fails now
    /// (say, locked) is NOT remembered and may be accepted from a later
    /// snapshot once its flags change. An accepted post keeps the snapshot
    /// it was accepted with.
    pub fn observe(&mut self, post: &Post) -> bool {
        if self.seen.contains(&post.key()) {
            return false;
        }
        if !is_unmoderated(post) {
            return false;
        }

        self.seen.insert(post.key());
        let front_is_older = self
            .accepted
            .front()
            .is_some_and(|front| post.timestamp > front.timestamp);
        if front_is_older {
            self.accepted.push_front(post.clone());
        } else {
            self.accepted.push_back(post.clone());
        }
        true
    }

    /// The first `n` accepted posts, front first.
    pub fn digest(&self, n: usize) -> Vec<Post> {
        self.accepted.iter().take(n).cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.accepted.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accepted.is_empty()
    }
}
