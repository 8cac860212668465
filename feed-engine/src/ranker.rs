//! Popular-digest ranking.
//!
//! Each board contributes at most one candidate per pass: its most recent
//! popular-eligible post. Candidates are then ordered newest-first across
//! boards and cut to the digest size. Every pass is a full re-scan; the
//! recency window moves with the wall clock, so cached candidates would go
//! stale on their own.

use crate::filter::PostFilter;
use plebhome_core::{Board, DigestItem, Post};

/// The most recent popular-eligible post of one board, if any.
///
/// Strictly-greater comparison, so on an exact timestamp tie the
/// first-encountered post wins. Scan order follows the order posts were
/// delivered in, which makes the tie-break reproducible for a fixed
/// delivery but not specified beyond that.
pub fn best_candidate<'a, I>(posts: I, filter: &PostFilter, now: i64) -> Option<&'a Post>
where
    I: IntoIterator<Item = &'a Post>,
{
    let mut best: Option<&Post> = None;
    for post in posts {
        if !filter.popular_eligible(post, now) {
            continue;
        }
        match best {
            Some(current) if post.timestamp <= current.timestamp => {}
            _ => best = Some(post),
        }
    }
    best
}

/// Rank one candidate per board into the popular digest.
///
/// `boards` must be in a stable order (the engine passes directory order);
/// combined with the stable sort this makes the output deterministic up to
/// the per-board tie-break above.
pub fn rank_popular<'a, I>(boards: I, filter: &PostFilter, now: i64, digest_size: usize) -> Vec<DigestItem>
where
    I: IntoIterator<Item = (&'a Board, Vec<&'a Post>)>,
{
    let mut candidates: Vec<DigestItem> = Vec::new();
    for (board, posts) in boards {
        if let Some(post) = best_candidate(posts, filter, now) {
            candidates.push(DigestItem::new(board, post.clone()));
        }
    }

    candidates.sort_by(|a, b| b.post.timestamp.cmp(&a.post.timestamp));
    candidates.truncate(digest_size);
    candidates
}
