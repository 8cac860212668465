//! Static board categorization for the home-page directory.
//!
//! A board's address is tested against the category keyword sets in a fixed
//! priority order; the first match wins. Boards matching nothing land in
//! "Others" unless their address carries a moderation keyword, which bars
//! them from "Others" only: a board matching both "finance" and "moderator"
//! still files under Finance. That asymmetry is deliberate, long-standing
//! directory policy, not an accident to clean up.

use plebhome_core::Board;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    Finance,
    Politics,
    Entertainment,
    Health,
    Social,
    Others,
}

impl Category {
    pub fn label(&self) -> &'static str {
        match self {
            Category::Finance => "Business And Finance",
            Category::Politics => "Politics and Global News",
            Category::Entertainment => "Entertainment",
            Category::Health => "Health and Science",
            Category::Social => "Pleb Community & Social",
            Category::Others => "Others",
        }
    }

    /// Display order of the directory columns.
    pub const ALL: [Category; 6] = [
        Category::Finance,
        Category::Politics,
        Category::Entertainment,
        Category::Health,
        Category::Social,
        Category::Others,
    ];
}

const FINANCE_KEYWORDS: &[&str] = &["business", "finance", "whales", "bitcoin", "comfy", "token"];
const POLITICS_KEYWORDS: &[&str] = &["politically", "incorrect", "politics", "news"];
const ENTERTAINMENT_KEYWORDS: &[&str] = &[
    "music",
    "videos",
    "podcast",
    "💩posting",
    "cringe",
    "movies",
    "anime",
];
const HEALTH_KEYWORDS: &[&str] = &["health", "science", "weather"];
const SOCIAL_KEYWORDS: &[&str] = &["pleb", "reddit", "social", "twitter"];

/// Boards carrying these in their address are kept out of "Others".
const MODERATION_KEYWORDS: &[&str] = &["rules", "moderate", "moderator", "censorship"];

const CATEGORY_KEYWORDS: [(Category, &[&str]); 5] = [
    (Category::Finance, FINANCE_KEYWORDS),
    (Category::Politics, POLITICS_KEYWORDS),
    (Category::Entertainment, ENTERTAINMENT_KEYWORDS),
    (Category::Health, HEALTH_KEYWORDS),
    (Category::Social, SOCIAL_KEYWORDS),
];

fn matches_any(address: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|keyword| address.contains(keyword))
}

/// Category for one board address; `None` means the board is shown nowhere
/// in the directory.
pub fn categorize(address: &str) -> Option<Category> {
    for (category, keywords) in CATEGORY_KEYWORDS {
        if matches_any(address, keywords) {
            return Some(category);
        }
    }
    if matches_any(address, MODERATION_KEYWORDS) {
        return None;
    }
    Some(Category::Others)
}

/// One directory column.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryBucket {
    pub category: Category,
    pub boards: Vec<Board>,
}

/// Bucket boards into directory columns, preserving board order inside each
/// bucket. Every column appears, empty or not, so the layout is stable while
/// boards are still resolving.
pub fn bucket_boards<'a, I>(boards: I) -> Vec<CategoryBucket>
where
    I: IntoIterator<Item = &'a Board>,
{
    let mut buckets: Vec<CategoryBucket> = Category::ALL
        .iter()
        .map(|&category| CategoryBucket {
            category,
            boards: Vec::new(),
        })
        .collect();

    for board in boards {
        if let Some(category) = categorize(&board.address) {
            let index = Category::ALL
                .iter()
                .position(|&c| c == category)
                .expect("category present in display order");
            buckets[index].boards.push(board.clone());
        }
    }
    buckets
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(address: &str) -> Board {
        Board {
            address: address.to_string(),
            short_address: address.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_keyword_category_matches() {
        assert_eq!(categorize("business-and-finance.eth"), Some(Category::Finance));
        assert_eq!(categorize("politically-incorrect.eth"), Some(Category::Politics));
        assert_eq!(categorize("animebrothers.eth"), Some(Category::Entertainment));
        assert_eq!(categorize("weatherwatch.eth"), Some(Category::Health));
        assert_eq!(categorize("plebtoken-whales.eth"), Some(Category::Finance));
        assert_eq!(categorize("twitterscreenshots.eth"), Some(Category::Social));
    }

    #[test]
    fn test_unmatched_boards_fall_into_others() {
        assert_eq!(categorize("random-topic.eth"), Some(Category::Others));
        assert_eq!(categorize("12D3KooWAbCd"), Some(Category::Others));
    }

    #[test]
    fn test_priority_order_first_match_wins() {
        // "news" (politics) and "music" (entertainment) both match; finance
        // set is checked before either, politics before entertainment.
        assert_eq!(categorize("music-news.eth"), Some(Category::Politics));
        assert_eq!(categorize("bitcoin-news.eth"), Some(Category::Finance));
    }

    #[test]
    fn test_moderation_keywords_bar_others_only() {
        // No category match + moderation keyword: hidden entirely.
        assert_eq!(categorize("board-rules.eth"), None);
        assert_eq!(categorize("censorshipwatch.eth"), None);
        // Category match + moderation keyword: asymmetric policy keeps it.
        assert_eq!(
            categorize("finance-moderators.eth"),
            Some(Category::Finance)
        );
    }

    #[test]
    fn test_bucket_layout_is_stable_and_ordered() {
        let boards = vec![
            board("business-and-finance.eth"),
            board("random-topic.eth"),
            board("politics-talk.eth"),
            board("board-rules.eth"),
        ];
        let buckets = bucket_boards(boards.iter());

        assert_eq!(buckets.len(), Category::ALL.len());
        assert_eq!(buckets[0].category, Category::Finance);
        assert_eq!(buckets[0].boards.len(), 1);
        assert_eq!(buckets[1].boards[0].address, "politics-talk.eth");
        // The rules board is nowhere.
        let total: usize = buckets.iter().map(|b| b.boards.len()).sum();
        assert_eq!(total, 3);
        // Empty columns still present.
        assert!(buckets[3].boards.is_empty());
    }
}
