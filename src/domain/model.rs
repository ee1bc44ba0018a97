use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One image shown in the dashboard gallery. Built fresh for every render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedImageEntry {
    pub url: String,
    pub title: String,
    pub link: String,
    pub thumbnail: String,
}

impl FeedImageEntry {
    pub fn new(url: String, title: String, link: String) -> Self {
        Self {
            thumbnail: url.clone(),
            url,
            title,
            link,
        }
    }
}

/// Syndication dialect, decided from the body of each response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedDialect {
    Atom,
    Rss,
}

impl FeedDialect {
    /// Textual marker check. `<entry>` wins when both markers are present.
    pub fn detect(body: &str) -> Option<Self> {
        if body.contains("<entry>") {
            Some(FeedDialect::Atom)
        } else if body.contains("<item>") {
            Some(FeedDialect::Rss)
        } else {
            None
        }
    }
}

/// Fields pulled out of a single Atom entry or RSS item before image search.
/// Title and link are checked only once an image has been found.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawFeedEntry {
    pub title: Option<String>,
    pub link: Option<String>,
    pub content: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: u64,
    pub title: String,
    pub content: String,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuickLink {
    pub id: u64,
    pub title: String,
    pub url: String,
    pub category: String,
    pub description: Option<String>,
    pub fast_access: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub username: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsItem {
    pub title: String,
    pub link: String,
    pub summary: String,
    pub published: String,
    pub source: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetupImage {
    pub url: String,
    pub title: String,
    pub link: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FastLink {
    #[serde(flatten)]
    pub link: QuickLink,
    pub favicon: String,
}

/// Everything the landing page template needs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardView {
    pub notes: Vec<Note>,
    pub links: Vec<FastLink>,
    pub news: Vec<NewsItem>,
    pub setup_image: SetupImage,
    pub gallery: Vec<FeedImageEntry>,
}
