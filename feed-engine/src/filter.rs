//! Eligibility predicates for the home digests.
//!
//! All three predicates are stateless and are re-evaluated on every update
//! cycle; moderation flags change between snapshots, so nothing here may be
//! cached across them.

use crate::config::FeedConfig;
use plebhome_core::Post;

/// A post that can render in a catalog cell and has not been moderated away.
pub fn is_displayable(post: &Post) -> bool {
    post.has_displayable_media && !post.removed && !post.deleted
}

/// Displayable, and neither locked nor pinned. This is the gate for the
/// newest-posts stream; the merger additionally skips posts it has already
/// accepted.
pub fn is_unmoderated(post: &Post) -> bool {
    is_displayable(post) && !post.locked && !post.pinned
}

/// Windowed popularity gate.
#[derive(Debug, Clone, Copy)]
pub struct PostFilter {
    min_reply_count: u32,
    popular_window_secs: i64,
}

impl PostFilter {
    pub fn new(config: &FeedConfig) -> Self {
        Self {
            min_reply_count: config.min_reply_count,
            popular_window_secs: config.popular_window_secs,
        }
    }

    /// Whether a post may compete for the popular digest at time `now`.
    /// The window comparison is strict: a post exactly at the cutoff is out.
    pub fn popular_eligible(&self, post: &Post, now: i64) -> bool {
        is_unmoderated(post)
            && post.reply_count >= self.min_reply_count
            && post.timestamp > now - self.popular_window_secs
    }
}
