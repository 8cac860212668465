//! The feed source boundary.
//!
//! The decentralized network layer that actually fetches and verifies
//! content lives outside this workspace. This module defines the shape it
//! must present: an ordered board listing, plus an asynchronous stream of
//! per-board events. Events for different boards arrive in no particular
//! order and with no cross-board atomicity; within one board's stream a
//! later snapshot of a post supersedes the earlier one.

use crate::records::{RawBoard, RawBoardStats, RawPost};
use plebhome_core::AdapterError;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

/// Feed ordering requested from the source. The source applies the sort;
/// the client only consumes whatever window is currently exposed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKind {
    Active,
    Hot,
    New,
}

/// One window of a board's feed.
#[derive(Debug, Clone)]
pub struct FeedPage {
    pub posts: Vec<RawPost>,
    pub has_more: bool,
}

/// A single asynchronous update from the feed source.
#[derive(Debug, Clone)]
pub enum SourceEvent {
    /// A board record arrived or was re-resolved with more fields filled in.
    BoardUpdated { board: RawBoard },
    /// A window of posts for one board. Posts already delivered may appear
    /// again with updated fields.
    PostsPage {
        board_address: String,
        page: FeedPage,
    },
    /// Fresh activity counters for one board.
    StatsUpdated {
        board_address: String,
        stats: RawBoardStats,
    },
    /// The source gave up on one board. Previously delivered state for that
    /// board remains valid.
    SourceFailed {
        board_address: String,
        error: AdapterError,
    },
}

impl SourceEvent {
    /// The board an event belongs to, when it names one.
    pub fn board_address(&self) -> Option<&str> {
        match self {
            SourceEvent::BoardUpdated { board } => board.address.as_deref(),
            SourceEvent::PostsPage { board_address, .. }
            | SourceEvent::StatsUpdated { board_address, .. }
            | SourceEvent::SourceFailed { board_address, .. } => Some(board_address),
        }
    }
}

/// A live feed source.
///
/// `subscribe` hands back the receiving end of an event channel; the source
/// pushes events into it until dropped. `load_more` asks the source to widen
/// one board's feed window; the wider window arrives as another
/// `PostsPage` event with `has_more` set accordingly.
pub trait FeedSource: Send {
    /// Ordered listing of the boards this source knows about. Entries may be
    /// partially populated and fill in over time via `BoardUpdated`.
    fn list_boards(&self) -> Result<Vec<RawBoard>, AdapterError>;

    /// Subscribe to updates for the given boards.
    fn subscribe(
        &mut self,
        board_addresses: &[String],
        sort: SortKind,
        page_size: usize,
    ) -> mpsc::UnboundedReceiver<SourceEvent>;

    /// Request the next feed window for one board.
    fn load_more(&mut self, board_address: &str) -> Result<(), AdapterError>;
}
