//! Media-link classification.
//!
//! The home digests only show posts that can render a thumbnail, so the
//! displayable-media bit is derived once here when a raw post is validated.

use url::Url;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Video,
    Audio,
}

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp", "avif"];
const VIDEO_EXTENSIONS: &[&str] = &["mp4", "webm", "mov", "m4v"];
const AUDIO_EXTENSIONS: &[&str] = &["mp3", "wav", "ogg", "flac"];

/// Classify a post link by the extension of its URL path. Links that do not
/// parse as http(s) URLs, or that point at plain web pages, are not media.
pub fn media_kind(link: &str) -> Option<MediaKind> {
    let url = Url::parse(link).ok()?;
    if url.scheme() != "http" && url.scheme() != "https" {
        return None;
    }

    let path = url.path().to_ascii_lowercase();
    let extension = path.rsplit('.').next()?;

    if IMAGE_EXTENSIONS.contains(&extension) {
        Some(MediaKind::Image)
    } else if VIDEO_EXTENSIONS.contains(&extension) {
        Some(MediaKind::Video)
    } else if AUDIO_EXTENSIONS.contains(&extension) {
        Some(MediaKind::Audio)
    } else {
        None
    }
}

/// Whether a post can show a thumbnail in a catalog cell: either the source
/// already provided one, or the link itself is an image or video.
pub fn has_displayable_media(link: Option<&str>, thumbnail: Option<&str>) -> bool {
    if thumbnail.is_some_and(|t| !t.is_empty()) {
        return true;
    }
    link.and_then(media_kind)
        .is_some_and(|kind| matches!(kind, MediaKind::Image | MediaKind::Video))
}
