//! Wire records as the feed source delivers them.
//!
//! Everything is optional on the wire: boards and posts arrive partially
//! populated and fill in over later snapshots. Validation into the core
//! types happens here, at the boundary, so the engine never sees a record
//! with missing identity fields.

use crate::address::short_address;
use crate::media::has_displayable_media;
use plebhome_core::{AdapterError, Board, BoardStats, Post};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPost {
    pub cid: Option<String>,
    pub subplebbit_address: Option<String>,
    pub title: Option<String>,
    pub content: Option<String>,
    pub link: Option<String>,
    pub thumbnail_url: Option<String>,
    pub timestamp: Option<i64>,
    #[serde(default)]
    pub removed: bool,
    #[serde(default)]
    pub deleted: bool,
    #[serde(default)]
    pub locked: bool,
    #[serde(default)]
    pub pinned: bool,
    #[serde(default)]
    pub reply_count: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawBoard {
    pub address: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub rules: Vec<String>,
    pub created_at: Option<i64>,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawBoardStats {
    #[serde(default)]
    pub hour_active_user_count: u64,
    #[serde(default)]
    pub hour_post_count: u64,
    #[serde(default)]
    pub day_active_user_count: u64,
    #[serde(default)]
    pub day_post_count: u64,
    #[serde(default)]
    pub all_active_user_count: u64,
    #[serde(default)]
    pub all_post_count: u64,
}

impl TryFrom<RawPost> for Post {
    type Error = AdapterError;

    fn try_from(raw: RawPost) -> Result<Self, Self::Error> {
        let board_address = raw
            .subplebbit_address
            .filter(|a| !a.is_empty())
            .ok_or_else(|| AdapterError::MalformedRecord {
                address: "<unknown>".to_string(),
                details: "post is missing its board address".to_string(),
            })?;

        let id = raw
            .cid
            .filter(|c| !c.is_empty())
            .ok_or_else(|| AdapterError::MalformedRecord {
                address: board_address.clone(),
                details: "post is missing its cid".to_string(),
            })?;

        let timestamp = raw.timestamp.ok_or_else(|| AdapterError::MalformedRecord {
            address: board_address.clone(),
            details: format!("post {id} is missing its timestamp"),
        })?;

        let has_media = has_displayable_media(raw.link.as_deref(), raw.thumbnail_url.as_deref());

        Ok(Post {
            id,
            board_address,
            title: raw.title,
            content: raw.content,
            link: raw.link,
            thumbnail: raw.thumbnail_url,
            timestamp,
            removed: raw.removed,
            deleted: raw.deleted,
            locked: raw.locked,
            pinned: raw.pinned,
            reply_count: raw.reply_count,
            has_displayable_media: has_media,
        })
    }
}

impl TryFrom<RawBoard> for Board {
    type Error = AdapterError;

    fn try_from(raw: RawBoard) -> Result<Self, Self::Error> {
        let address = raw
            .address
            .filter(|a| !a.is_empty())
            .ok_or_else(|| AdapterError::MalformedRecord {
                address: "<unknown>".to_string(),
                details: "board record is missing its address".to_string(),
            })?;

        Ok(Board {
            short_address: short_address(&address),
            address,
            title: raw.title,
            description: raw.description,
            rules: raw.rules,
            created_at: raw.created_at,
        })
    }
}

impl From<RawBoardStats> for BoardStats {
    fn from(raw: RawBoardStats) -> Self {
        Self {
            hour_active_user_count: raw.hour_active_user_count,
            hour_post_count: raw.hour_post_count,
            day_active_user_count: raw.day_active_user_count,
            day_post_count: raw.day_post_count,
            all_active_user_count: raw.all_active_user_count,
            all_post_count: raw.all_post_count,
        }
    }
}

impl RawPost {
    /// Convenience constructor for tests and simulated sources.
    pub fn new(cid: &str, board_address: &str, timestamp: i64) -> Self {
        Self {
            cid: Some(cid.to_string()),
            subplebbit_address: Some(board_address.to_string()),
            timestamp: Some(timestamp),
            ..Default::default()
        }
    }

    pub fn with_title(mut self, title: &str) -> Self {
        self.title = Some(title.to_string());
        self
    }

    pub fn with_link(mut self, link: &str) -> Self {
        self.link = Some(link.to_string());
        self
    }

    pub fn with_reply_count(mut self, reply_count: u32) -> Self {
        self.reply_count = reply_count;
        self
    }
}

impl RawBoard {
    pub fn new(address: &str) -> Self {
        Self {
            address: Some(address.to_string()),
            ..Default::default()
        }
    }

    pub fn with_title(mut self, title: &str) -> Self {
        self.title = Some(title.to_string());
        self
    }
}
