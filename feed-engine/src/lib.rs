pub mod config;
pub mod directory;
pub mod engine;
pub mod filter;
pub mod merger;
pub mod paginator;
pub mod ranker;
pub mod scheduler;
pub mod stats;

pub use config::FeedConfig;
pub use directory::{bucket_boards, categorize, Category, CategoryBucket};
pub use engine::{BoardCatalog, HomeFeed, HomeFeedHandle, HomeSnapshot, HomeSubscription};
pub use filter::{is_displayable, is_unmoderated, PostFilter};
pub use merger::NewPostMerger;
pub use paginator::{chunk_rows, column_count, RowLayout};
pub use ranker::{best_candidate, rank_popular};
pub use scheduler::{RefreshBatch, RefreshRequest, RefreshScheduler};
pub use stats::StatsAccumulator;
