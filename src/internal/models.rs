use jiff::Timestamp;
use jiff::civil::DateTime;
use jiff::tz::TimeZone;
use serde::{Deserialize, Serialize};

/// A single aggregated news item as served by the backend.
#[derive(Debug, Deserialize, Clone, PartialEq, Default)]
pub struct Article {
    pub id: u32,
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    pub published_at: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub is_bookmarked: bool,
}

impl Article {
    /// Parse `published_at`. The backend emits naive ISO timestamps, which are UTC.
    pub fn published_timestamp(&self) -> Option<Timestamp> {
        parse_timestamp(&self.published_at)
    }
}

pub fn parse_timestamp(raw: &str) -> Option<Timestamp> {
    let raw = raw.trim();
    if let Ok(ts) = raw.parse::<Timestamp>() {
        return Some(ts);
    }
    raw.parse::<DateTime>()
        .ok()
        .and_then(|dt| dt.to_zoned(TimeZone::UTC).ok())
        .map(|zoned| zoned.timestamp())
}

/// Body of the bookmark create/delete requests.
#[derive(Debug, Serialize, Clone, Copy, PartialEq)]
pub struct BookmarkRequest {
    pub article_id: u32,
}
