//! The home feed engine.
//!
//! Owns every piece of mutable feed state: per-board post collections, the
//! newest-posts stream, activity counters and the published snapshot. The
//! engine is single-threaded and cooperative: it suspends only while
//! waiting for the next source event or the debounce deadline, and every
//! recomputation runs to completion before the next event is looked at.
//! Events for different boards arrive in any order; correctness does not
//! depend on it because each flush recomputes from the full current state
//! rather than applying per-event deltas, so a newer request trivially
//! supersedes a stale pending one and no partial results are published.

use crate::config::FeedConfig;
use crate::directory::{bucket_boards, CategoryBucket};
use crate::filter::PostFilter;
use crate::merger::NewPostMerger;
use crate::paginator::{chunk_rows, RowLayout};
use crate::ranker::rank_popular;
use crate::scheduler::{RefreshRequest, RefreshScheduler};
use crate::stats::StatsAccumulator;
use board_client::{short_address, SourceEvent};
use chrono::Utc;
use plebhome_core::{Board, BoardStats, DigestItem, GlobalStats, Post};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{mpsc, watch};
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Everything the engine currently knows about one board.
#[derive(Debug, Default)]
struct BoardState {
    /// Latest board record; `None` until the source resolves one.
    board: Option<Board>,
    /// Posts keyed by id. A later snapshot with the same id replaces the
    /// earlier one wholesale.
    posts: HashMap<String, Post>,
    /// Arrival order of post ids, for stable catalog display.
    post_order: Vec<String>,
    /// Bumped whenever the post collection changes; row layouts key on it.
    items_version: u64,
    has_more: bool,
    /// The source gave up on this board. Prior state is retained.
    failed: bool,
    /// Posts arrived at least once, or the source failed. Either way the
    /// catalog may render instead of showing a loading state.
    loaded: bool,
}

impl BoardState {
    fn resolved_board(&self, address: &str) -> Board {
        self.board.clone().unwrap_or_else(|| Board {
            address: address.to_string(),
            short_address: short_address(address),
            ..Default::default()
        })
    }
}

/// Catalog data for one board as published to the view layer.
#[derive(Debug, Clone)]
pub struct BoardCatalog {
    pub board: Board,
    /// Feed items in arrival order, moderated posts excluded.
    pub items: Vec<Post>,
    pub stats: Option<BoardStats>,
    pub items_version: u64,
    pub loaded: bool,
    pub has_more: bool,
}

/// One consistent, immutable view of the whole home page.
#[derive(Debug, Clone, Default)]
pub struct HomeSnapshot {
    pub version: u64,
    /// Up to `digest_size` newest posts, approximately recency-ordered.
    pub new_posts: Vec<Post>,
    /// Up to `digest_size` popular posts, strictly timestamp-descending.
    pub popular_posts: Vec<DigestItem>,
    pub global_stats: GlobalStats,
    pub directory: Vec<CategoryBucket>,
    pub catalogs: HashMap<String, BoardCatalog>,
}

pub struct HomeFeed {
    config: FeedConfig,
    filter: PostFilter,
    boards: HashMap<String, BoardState>,
    /// Addresses in first-seen order; ranking and directory building scan
    /// in this order so output is deterministic for a fixed delivery.
    board_order: Vec<String>,
    merger: NewPostMerger,
    stats: StatsAccumulator,
    scheduler: RefreshScheduler,
    version: u64,
    snapshot_tx: watch::Sender<Arc<HomeSnapshot>>,
}

impl HomeFeed {
    pub fn new(config: FeedConfig) -> Self {
        let filter = PostFilter::new(&config);
        let scheduler = RefreshScheduler::new(Duration::from_millis(config.refresh_debounce_ms));
        let (snapshot_tx, _) = watch::channel(Arc::new(HomeSnapshot::default()));
        Self {
            config,
            filter,
            boards: HashMap::new(),
            board_order: Vec::new(),
            merger: NewPostMerger::new(),
            stats: StatsAccumulator::new(),
            scheduler,
            version: 0,
            snapshot_tx,
        }
    }

    /// Read-only handle for the view layer. Cloneable; there is no mutation
    /// path back into the engine.
    pub fn handle(&self) -> HomeFeedHandle {
        HomeFeedHandle {
            rx: self.snapshot_tx.subscribe(),
        }
    }

    fn is_blocklisted(&self, address: &str) -> bool {
        self.config.blocklist.iter().any(|b| b == address)
    }

    fn state_mut(&mut self, address: &str) -> &mut BoardState {
        if !self.boards.contains_key(address) {
            self.board_order.push(address.to_string());
            self.boards.insert(address.to_string(), BoardState::default());
        }
        self.boards.get_mut(address).expect("state just ensured")
    }

    /// Fold one source event into board state and park the matching refresh
    /// request. No recomputation happens here; that is the flush's job.
    pub fn apply_event(&mut self, event: SourceEvent) {
        match event {
            SourceEvent::BoardUpdated { board } => {
                let board = match Board::try_from(board) {
                    Ok(board) => board,
                    Err(e) => {
                        debug!("dropping malformed board record: {e}");
                        return;
                    }
                };
                if self.is_blocklisted(&board.address) {
                    debug!("ignoring blocklisted board {}", board.address);
                    return;
                }
                let address = board.address.clone();
                let state = self.state_mut(&address);
                state.board = Some(board);
                state.failed = false;
                self.scheduler.mark(RefreshRequest::Boards);
            }
            SourceEvent::PostsPage { board_address, page } => {
                if self.is_blocklisted(&board_address) {
                    return;
                }
                let mut malformed = 0usize;
                let mut valid = Vec::with_capacity(page.posts.len());
                for raw in page.posts {
                    match Post::try_from(raw) {
                        Ok(post) => valid.push(post),
                        Err(e) => {
                            malformed += 1;
                            debug!("dropping malformed post from {board_address}: {e}");
                        }
                    }
                }
                if malformed > 0 {
                    debug!("{malformed} malformed posts dropped from {board_address}");
                }

                let state = self.state_mut(&board_address);
                let mut changed = !state.loaded;
                for post in valid {
                    match state.posts.get(&post.id) {
                        Some(existing) if *existing == post => {}
                        Some(_) => {
                            state.posts.insert(post.id.clone(), post);
                            changed = true;
                        }
                        None => {
                            state.post_order.push(post.id.clone());
                            state.posts.insert(post.id.clone(), post);
                            changed = true;
                        }
                    }
                }
                state.has_more = page.has_more;
                state.loaded = true;
                state.failed = false;
                if changed {
                    state.items_version += 1;
                    self.scheduler
                        .mark(RefreshRequest::Posts(board_address));
                }
            }
            SourceEvent::StatsUpdated {
                board_address,
                stats,
            } => {
                if self.is_blocklisted(&board_address) {
                    return;
                }
                self.state_mut(&board_address);
                self.stats.update_board(&board_address, stats.into());
                self.scheduler.mark(RefreshRequest::Stats(board_address));
            }
            SourceEvent::SourceFailed {
                board_address,
                error,
            } => {
                warn!("feed source failed for {board_address}: {error}");
                let state = self.state_mut(&board_address);
                state.failed = true;
                state.loaded = true;
                // Prior posts and counters are retained; only the loading
                // state of the catalog changes.
                self.scheduler.mark(RefreshRequest::Posts(board_address));
            }
        }
    }

    /// Recompute and publish if anything is pending. Returns whether a new
    /// snapshot went out.
    pub fn flush(&mut self, now: i64) -> bool {
        let batch = self.scheduler.take_batch();
        if batch.is_empty() {
            return false;
        }

        // Newest-posts stream: offer every post of each board whose
        // collection changed. Eligibility is evaluated fresh against the
        // current snapshots; the merger skips what it already accepted.
        let changed_boards: Vec<String> = self
            .board_order
            .iter()
            .filter(|address| batch.post_boards.contains(*address))
            .cloned()
            .collect();
        for address in changed_boards {
            if let Some(state) = self.boards.get(&address) {
                let mut accepted = 0usize;
                for id in &state.post_order {
                    if let Some(post) = state.posts.get(id) {
                        if self.merger.observe(post) {
                            accepted += 1;
                        }
                    }
                }
                if accepted > 0 {
                    debug!("{accepted} new posts accepted from {address}");
                }
            }
        }

        // Everything else is rebuilt from the full current state. The work
        // is bounded by the number of boards, which is the point of the
        // coalescing above.
        let resolved: Vec<Board> = self
            .board_order
            .iter()
            .map(|address| self.boards[address].resolved_board(address))
            .collect();

        let pairs = self.board_order.iter().zip(resolved.iter()).map(|(address, board)| {
            let state = &self.boards[address];
            let posts: Vec<&Post> = state
                .post_order
                .iter()
                .filter_map(|id| state.posts.get(id))
                .collect();
            (board, posts)
        });
        let popular_posts = rank_popular(pairs, &self.filter, now, self.config.digest_size);

        let current: HashSet<String> = self.boards.keys().cloned().collect();
        self.stats.retain_boards(&current);
        let global_stats = self.stats.rebuild(self.boards.len() as u64);

        let directory = bucket_boards(resolved.iter());

        let catalogs: HashMap<String, BoardCatalog> = self
            .board_order
            .iter()
            .zip(resolved.iter())
            .map(|(address, board)| {
                let state = &self.boards[address];
                let items: Vec<Post> = state
                    .post_order
                    .iter()
                    .filter_map(|id| state.posts.get(id))
                    .filter(|post| !post.removed && !post.deleted)
                    .cloned()
                    .collect();
                (
                    address.clone(),
                    BoardCatalog {
                        board: board.clone(),
                        items,
                        stats: self.stats.board_stats(address).copied(),
                        items_version: state.items_version,
                        loaded: state.loaded,
                        has_more: state.has_more,
                    },
                )
            })
            .collect();

        self.version += 1;
        let snapshot = HomeSnapshot {
            version: self.version,
            new_posts: self.merger.digest(self.config.digest_size),
            popular_posts,
            global_stats,
            directory,
            catalogs,
        };
        debug!(
            "published snapshot v{}: {} new, {} popular, {} boards",
            snapshot.version,
            snapshot.new_posts.len(),
            snapshot.popular_posts.len(),
            snapshot.global_stats.board_count
        );
        self.snapshot_tx.send_replace(Arc::new(snapshot));
        true
    }

    /// Drive the engine from a source event channel until it closes.
    pub async fn run(mut self, mut events: mpsc::UnboundedReceiver<SourceEvent>) {
        info!("home feed engine running");
        loop {
            let deadline = self.scheduler.next_deadline();
            tokio::select! {
                maybe_event = events.recv() => {
                    match maybe_event {
                        Some(event) => self.apply_event(event),
                        None => {
                            // Source is gone; publish whatever is pending
                            // and stop.
                            self.flush(Utc::now().timestamp());
                            info!("feed source closed, engine stopping");
                            break;
                        }
                    }
                }
                _ = sleep_until(deadline), if deadline.is_some() => {
                    self.flush(Utc::now().timestamp());
                }
            }
        }
    }
}

async fn sleep_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => {
            tokio::time::sleep_until(tokio::time::Instant::from_std(deadline)).await
        }
        None => std::future::pending().await,
    }
}

/// Read-only view of the engine's published state.
#[derive(Debug, Clone)]
pub struct HomeFeedHandle {
    rx: watch::Receiver<Arc<HomeSnapshot>>,
}

impl HomeFeedHandle {
    pub fn snapshot(&self) -> Arc<HomeSnapshot> {
        self.rx.borrow().clone()
    }

    pub fn new_posts_digest(&self) -> Vec<Post> {
        self.snapshot().new_posts.clone()
    }

    pub fn popular_posts_digest(&self) -> Vec<DigestItem> {
        self.snapshot().popular_posts.clone()
    }

    pub fn global_stats(&self) -> GlobalStats {
        self.snapshot().global_stats
    }

    /// Rows for one board's catalog at the given column count. Unmemoized;
    /// views that re-render should go through a `HomeSubscription`.
    pub fn board_rows(&self, board_address: &str, column_count: usize) -> Vec<Vec<Post>> {
        let snapshot = self.snapshot();
        snapshot
            .catalogs
            .get(board_address)
            .map(|catalog| chunk_rows(&catalog.items, column_count))
            .unwrap_or_default()
    }

    /// An owned, lifecycle-scoped observer. Created at view mount, dropped
    /// at unmount; dropping deregisters it, nothing global is left behind.
    pub fn subscribe(&self) -> HomeSubscription {
        let id = Uuid::new_v4();
        debug!("home subscription {id} created");
        HomeSubscription {
            id,
            rx: self.rx.clone(),
            layouts: HashMap::new(),
        }
    }
}

/// One view's subscription to snapshot updates, with per-board memoized row
/// layouts. Each subscription owns its layouts, so two views at different
/// widths never fight over a shared cache.
pub struct HomeSubscription {
    id: Uuid,
    rx: watch::Receiver<Arc<HomeSnapshot>>,
    layouts: HashMap<String, RowLayout<Post>>,
}

impl HomeSubscription {
    /// Wait for the next published snapshot. Returns `false` once the
    /// engine is gone.
    pub async fn changed(&mut self) -> bool {
        self.rx.changed().await.is_ok()
    }

    pub fn current(&self) -> Arc<HomeSnapshot> {
        self.rx.borrow().clone()
    }

    /// Rows for one board, re-chunked only when the board's items or the
    /// column count changed since this subscription last asked.
    pub fn board_rows(&mut self, board_address: &str, column_count: usize) -> &[Vec<Post>] {
        let snapshot = self.rx.borrow().clone();
        let layout = self
            .layouts
            .entry(board_address.to_string())
            .or_insert_with(RowLayout::new);
        match snapshot.catalogs.get(board_address) {
            Some(catalog) => layout.rows(catalog.items_version, &catalog.items, column_count),
            None => layout.rows(0, &[], column_count),
        }
    }
}

impl Drop for HomeSubscription {
    fn drop(&mut self) {
        debug!("home subscription {} dropped", self.id);
    }
}
