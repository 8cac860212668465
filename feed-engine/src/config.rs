use plebhome_core::{ConfigError, CoreError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Tunables for the home feed. Defaults match the shipped client; a TOML
/// file can override any subset of fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    /// Entries shown in the "newest" and "popular" digests.
    pub digest_size: usize,
    /// Fixed catalog column width in pixels; the column count for a grid is
    /// the viewport width divided by this.
    pub column_width: u32,
    /// Lookback bounding popular-eligibility, in seconds.
    pub popular_window_secs: i64,
    /// Minimum replies before a post can rank as popular.
    pub min_reply_count: u32,
    /// Coalescing window for recomputation after a burst of board updates.
    pub refresh_debounce_ms: u64,
    /// Posts requested per page for the featured board catalogs.
    pub catalog_page_size: usize,
    /// Boards pinned as catalog boxes on the home page.
    pub featured_boards: Vec<String>,
    /// Boards removed from the directory and all computations.
    pub blocklist: Vec<String>,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            digest_size: 8,
            column_width: 180,
            popular_window_secs: 60 * 60 * 24 * 15,
            min_reply_count: 2,
            refresh_debounce_ms: 100,
            catalog_page_size: 3,
            featured_boards: vec![
                "business-and-finance.eth".to_string(),
                "bitcoinbrothers.eth".to_string(),
            ],
            blocklist: vec!["decentralizedscam.eth".to_string()],
        }
    }
}

impl FeedConfig {
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let config: FeedConfig = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, CoreError> {
        let raw = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;
        Ok(Self::from_toml_str(&raw)?)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.digest_size == 0 {
            return Err(ConfigError::InvalidValue {
                field: "digest_size".to_string(),
                value: self.digest_size.to_string(),
            });
        }
        if self.column_width == 0 {
            return Err(ConfigError::InvalidValue {
                field: "column_width".to_string(),
                value: self.column_width.to_string(),
            });
        }
        if self.popular_window_secs <= 0 {
            return Err(ConfigError::InvalidValue {
                field: "popular_window_secs".to_string(),
                value: self.popular_window_secs.to_string(),
            });
        }
        Ok(())
    }
}
