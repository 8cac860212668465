pub mod address;
pub mod media;
pub mod memory;
pub mod records;
pub mod source;


pub use address::{short_address, validate_address};
pub use media::{has_displayable_media, media_kind, MediaKind};
pub use memory::MemorySource;
pub use records::{RawBoard, RawBoardStats, RawPost};
pub use source::{FeedPage, FeedSource, SortKind, SourceEvent};
