//! In-memory feed source for tests and the demo binary.
//!
//! Behaves like a well-formed network source: boards and posts are handed
//! out in pages, live mutations are broadcast to every subscriber, and a
//! board can be made to fail on demand.

use crate::records::{RawBoard, RawBoardStats, RawPost};
use crate::source::{FeedPage, FeedSource, SortKind, SourceEvent};
use plebhome_core::AdapterError;
use std::collections::{HashMap, HashSet};
use tokio::sync::mpsc;
use tracing::debug;

#[derive(Default)]
pub struct MemorySource {
    boards: Vec<RawBoard>,
    posts: HashMap<String, Vec<RawPost>>,
    stats: HashMap<String, RawBoardStats>,
    subscribed: HashSet<String>,
    /// Number of posts currently exposed per board.
    window: HashMap<String, usize>,
    page_size: usize,
    senders: Vec<mpsc::UnboundedSender<SourceEvent>>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_board(mut self, board: RawBoard) -> Self {
        self.boards.push(board);
        self
    }

    pub fn with_post(mut self, post: RawPost) -> Self {
        if let Some(address) = post.subplebbit_address.clone() {
            self.posts.entry(address).or_default().push(post);
        }
        self
    }

    pub fn with_stats(mut self, board_address: &str, stats: RawBoardStats) -> Self {
        self.stats.insert(board_address.to_string(), stats);
        self
    }

    /// Deliver a new or updated post to all subscribers.
    pub fn push_post(&mut self, post: RawPost) {
        let Some(address) = post.subplebbit_address.clone() else {
            return;
        };
        let posts = self.posts.entry(address.clone()).or_default();
        match posts
            .iter_mut()
            .find(|p| p.cid.is_some() && p.cid == post.cid)
        {
            Some(existing) => *existing = post,
            None => posts.push(post),
        }
        // Widen the window so a freshly pushed post is always visible.
        let exposed = self.window.entry(address.clone()).or_insert(0);
        *exposed = self.posts[&address].len().min(*exposed + 1).max(1);
        self.emit_page(&address);
    }

    /// Deliver fresh counters to all subscribers.
    pub fn push_stats(&mut self, board_address: &str, stats: RawBoardStats) {
        self.stats.insert(board_address.to_string(), stats);
        if self.subscribed.contains(board_address) {
            self.broadcast(SourceEvent::StatsUpdated {
                board_address: board_address.to_string(),
                stats,
            });
        }
    }

    /// Re-announce a board record, e.g. after more fields resolved.
    pub fn push_board(&mut self, board: RawBoard) {
        if let Some(address) = board.address.clone() {
            match self
                .boards
                .iter_mut()
                .find(|b| b.address.as_deref() == Some(address.as_str()))
            {
                Some(existing) => *existing = board.clone(),
                None => self.boards.push(board.clone()),
            }
            if self.subscribed.contains(&address) {
                self.broadcast(SourceEvent::BoardUpdated { board });
            }
        }
    }

    /// Make one board fail from now on.
    pub fn fail_board(&mut self, board_address: &str) {
        self.broadcast(SourceEvent::SourceFailed {
            board_address: board_address.to_string(),
            error: AdapterError::SourceUnavailable {
                address: board_address.to_string(),
            },
        });
    }

    fn emit_page(&mut self, board_address: &str) {
        if !self.subscribed.contains(board_address) {
            return;
        }
        let all = self.posts.get(board_address).cloned().unwrap_or_default();
        let exposed = *self.window.get(board_address).unwrap_or(&0);
        let exposed = exposed.min(all.len());
        self.broadcast(SourceEvent::PostsPage {
            board_address: board_address.to_string(),
            page: FeedPage {
                posts: all[..exposed].to_vec(),
                has_more: exposed < all.len(),
            },
        });
    }

    fn broadcast(&mut self, event: SourceEvent) {
        self.senders
            .retain(|sender| sender.send(event.clone()).is_ok());
    }
}

impl FeedSource for MemorySource {
    fn list_boards(&self) -> Result<Vec<RawBoard>, AdapterError> {
        Ok(self.boards.clone())
    }

    fn subscribe(
        &mut self,
        board_addresses: &[String],
        sort: SortKind,
        page_size: usize,
    ) -> mpsc::UnboundedReceiver<SourceEvent> {
        debug!(
            "memory source: subscribing to {} boards, sort {:?}, page size {}",
            board_addresses.len(),
            sort,
            page_size
        );
        let (tx, rx) = mpsc::unbounded_channel();
        self.senders.push(tx);
        self.page_size = page_size.max(1);

        for address in board_addresses {
            self.subscribed.insert(address.clone());
            self.window
                .entry(address.clone())
                .or_insert(self.page_size);

            if let Some(board) = self
                .boards
                .iter()
                .find(|b| b.address.as_deref() == Some(address.as_str()))
                .cloned()
            {
                self.broadcast(SourceEvent::BoardUpdated { board });
            }
            if self.posts.contains_key(address) {
                self.emit_page(address);
            }
            if let Some(stats) = self.stats.get(address).copied() {
                self.broadcast(SourceEvent::StatsUpdated {
                    board_address: address.clone(),
                    stats,
                });
            }
        }
        rx
    }

    fn load_more(&mut self, board_address: &str) -> Result<(), AdapterError> {
        if !self.posts.contains_key(board_address) {
            return Err(AdapterError::BoardNotFound {
                address: board_address.to_string(),
            });
        }
        let exposed = self
            .window
            .entry(board_address.to_string())
            .or_insert(self.page_size);
        *exposed += self.page_size;
        self.emit_page(board_address);
        Ok(())
    }
}
