use serde::{Deserialize, Serialize};

/// A single post belonging to a board.
///
/// Posts are immutable snapshots delivered by the feed source; a later
/// snapshot carrying the same id replaces the earlier one wholesale, the
/// engine never mutates a post in place.
#[derive(Debug, Clone, PartialEq)]
pub struct Post {
    /// Unique within (board, post).
    pub id: String,
    pub board_address: String,
    pub title: Option<String>,
    pub content: Option<String>,
    pub link: Option<String>,
    pub thumbnail: Option<String>,
    /// Seconds since epoch.
    pub timestamp: i64,
    pub removed: bool,
    pub deleted: bool,
    pub locked: bool,
    pub pinned: bool,
    pub reply_count: u32,
    /// Derived at the adapter boundary from content + link; not a wire field.
    pub has_displayable_media: bool,
}

impl Post {
    pub fn key(&self) -> PostKey {
        PostKey {
            board_address: self.board_address.clone(),
            id: self.id.clone(),
        }
    }
}

/// Identity of a post across the whole board set.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PostKey {
    pub board_address: String,
    pub id: String,
}

/// A board (subplebbit) as known to the client. Boards are supplied by the
/// feed source and treated as read-only; entries may be partially populated
/// and fill in over time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Board {
    pub address: String,
    pub short_address: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub rules: Vec<String>,
    pub created_at: Option<i64>,
}

/// Per-board activity counters, updated asynchronously by the feed source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardStats {
    pub hour_active_user_count: u64,
    pub hour_post_count: u64,
    pub day_active_user_count: u64,
    pub day_post_count: u64,
    pub all_active_user_count: u64,
    pub all_post_count: u64,
}

/// Totals across the whole board set. Always rebuilt from the current board
/// set, never incremented, so refreshed per-board counters cannot compound.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalStats {
    pub user_count: u64,
    pub post_count: u64,
    pub board_count: u64,
}

/// A (board, post) pair selected for one of the home digests.
#[derive(Debug, Clone, PartialEq)]
pub struct DigestItem {
    pub board_address: String,
    pub board_title: Option<String>,
    pub board_short_address: String,
    pub post: Post,
}

impl DigestItem {
    pub fn new(board: &Board, post: Post) -> Self {
        Self {
            board_address: board.address.clone(),
            board_title: board.title.clone(),
            board_short_address: board.short_address.clone(),
            post,
        }
    }

    /// Board label for display: title when known, short address otherwise.
    pub fn board_label(&self) -> &str {
        self.board_title
            .as_deref()
            .unwrap_or(&self.board_short_address)
    }
}
