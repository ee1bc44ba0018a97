//! Gallery images for the dashboard, taken from a syndication feed.
//!
//! A single fetch is attempted. Its outcome is one of [`AttemptOutcome`],
//! which [`select_resolution`] turns into the final [`Resolution`]:
//! the parsed entries, the keyword fallback, or the hardcoded fallback.
//! The resulting list is never empty.

use crate::adapters::http::HttpFeedFetcher;
use crate::config::toml_config::{DashboardConfig, FallbackConfig, FeedConfig};
use crate::core::extract::ImageExtractor;
use crate::core::fallback::{self, FallbackTier};
use crate::domain::model::{FeedDialect, FeedImageEntry, RawFeedEntry};
use crate::domain::ports::FeedFetcher;
use crate::utils::error::{DashboardError, Result};
use crate::utils::validation::is_absolute_http_url;
use std::future::Future;
use std::str::FromStr;
use url::Url;

#[derive(Debug)]
pub enum AttemptOutcome {
    Entries(Vec<FeedImageEntry>),
    Empty,
    Failed(DashboardError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Succeeded(Vec<FeedImageEntry>),
    Degraded {
        tier: FallbackTier,
        entries: Vec<FeedImageEntry>,
    },
}

impl Resolution {
    pub fn entries(&self) -> &[FeedImageEntry] {
        match self {
            Resolution::Succeeded(entries) => entries,
            Resolution::Degraded { entries, .. } => entries,
        }
    }

    pub fn into_entries(self) -> Vec<FeedImageEntry> {
        match self {
            Resolution::Succeeded(entries) => entries,
            Resolution::Degraded { entries, .. } => entries,
        }
    }

    /// `None` for the primary path.
    pub fn tier(&self) -> Option<FallbackTier> {
        match self {
            Resolution::Succeeded(_) => None,
            Resolution::Degraded { tier, .. } => Some(*tier),
        }
    }
}

/// Resolves gallery images with the built-in endpoint, headers and fallbacks.
pub async fn resolve_feed_images() -> Vec<FeedImageEntry> {
    let config = DashboardConfig::default();
    match FeedImageResolver::new(&config) {
        Ok(resolver) => resolver.resolve_images().await,
        Err(e) => select_resolution(AttemptOutcome::Failed(e), &config.fallback).into_entries(),
    }
}

pub fn select_resolution(outcome: AttemptOutcome, fallback_config: &FallbackConfig) -> Resolution {
    match outcome {
        AttemptOutcome::Entries(entries) if !entries.is_empty() => {
            return Resolution::Succeeded(entries);
        }
        AttemptOutcome::Entries(_) | AttemptOutcome::Empty => {
            tracing::info!("Feed produced no images");
        }
        AttemptOutcome::Failed(e) => {
            tracing::warn!(
                "Error fetching gallery feed: {} (category: {:?})",
                e,
                e.category()
            );
        }
    }

    match fallback::keyword_tier(fallback_config) {
        Ok(entries) => {
            tracing::info!("Using {} keyword images as fallback", entries.len());
            Resolution::Degraded {
                tier: FallbackTier::Keywords,
                entries,
            }
        }
        Err(e) => {
            tracing::warn!("Keyword fallback failed: {}", e);
            Resolution::Degraded {
                tier: FallbackTier::Hardcoded,
                entries: fallback::hardcoded_tier(),
            }
        }
    }
}

pub struct FeedImageResolver<F: FeedFetcher = HttpFeedFetcher> {
    fetcher: F,
    extractor: ImageExtractor,
    feed: FeedConfig,
    fallback: FallbackConfig,
}

impl FeedImageResolver<HttpFeedFetcher> {
    pub fn new(config: &DashboardConfig) -> Result<Self> {
        let fetcher = HttpFeedFetcher::new(&config.feed)?;
        Self::with_fetcher(fetcher, config)
    }
}

impl<F: FeedFetcher> FeedImageResolver<F> {
    pub fn with_fetcher(fetcher: F, config: &DashboardConfig) -> Result<Self> {
        Ok(Self {
            fetcher,
            extractor: ImageExtractor::new()?,
            feed: config.feed.clone(),
            fallback: config.fallback.clone(),
        })
    }

    pub async fn resolve_images(&self) -> Vec<FeedImageEntry> {
        self.resolve().await.into_entries()
    }

    pub async fn resolve(&self) -> Resolution {
        let outcome = self.attempt().await;
        select_resolution(outcome, &self.fallback)
    }

    /// Like [`resolve`](Self::resolve), but gives up on the fetch as soon as
    /// `cancel` completes and goes straight to the keyword fallback.
    pub async fn resolve_until<C>(&self, cancel: C) -> Resolution
    where
        C: Future<Output = ()>,
    {
        let outcome = tokio::select! {
            outcome = self.attempt() => outcome,
            _ = cancel => AttemptOutcome::Failed(DashboardError::Cancelled),
        };
        select_resolution(outcome, &self.fallback)
    }

    pub async fn attempt(&self) -> AttemptOutcome {
        let body = match self.fetcher.fetch(&self.feed.endpoint).await {
            Ok(body) => body,
            Err(e) => return AttemptOutcome::Failed(e),
        };

        match self.entries_from_body(&body) {
            Ok(entries) if entries.is_empty() => AttemptOutcome::Empty,
            Ok(entries) => AttemptOutcome::Entries(entries),
            Err(e) => AttemptOutcome::Failed(e),
        }
    }

    /// Parses `body` and keeps the entries in which an image was found.
    pub fn entries_from_body(&self, body: &str) -> Result<Vec<FeedImageEntry>> {
        let raw_entries = match FeedDialect::detect(body) {
            Some(FeedDialect::Atom) => atom_entries(body, self.feed.max_entries)?,
            Some(FeedDialect::Rss) => rss_entries(body, self.feed.max_entries)?,
            None => {
                tracing::debug!("Body has neither <entry> nor <item> markers");
                Vec::new()
            }
        };

        let mut images = Vec::new();
        for (index, raw) in raw_entries.into_iter().enumerate() {
            let base = raw.link.as_deref().and_then(|link| Url::parse(link).ok());
            let Some(image_url) = raw
                .content
                .as_deref()
                .and_then(|content| self.extractor.extract(content, base.as_ref()))
            else {
                tracing::debug!("No image in entry {}", index);
                continue;
            };

            match image_entry(image_url, raw.title, raw.link) {
                Ok(entry) => images.push(entry),
                Err(e) => tracing::debug!("Skipping entry {}: {}", index, e),
            }
        }

        tracing::info!("Found {} images from {}", images.len(), self.feed.endpoint);
        Ok(images)
    }
}

fn atom_entries(body: &str, max_entries: usize) -> Result<Vec<RawFeedEntry>> {
    let feed = atom_syndication::Feed::from_str(body)?;

    let entries = feed
        .entries()
        .iter()
        .take(max_entries)
        .map(|entry| RawFeedEntry {
            title: Some(entry.title().value.clone()),
            link: entry.links().first().map(|link| link.href().to_string()),
            content: entry
                .content()
                .and_then(|content| content.value())
                .map(str::to_string),
        })
        .collect();

    Ok(entries)
}

fn rss_entries(body: &str, max_entries: usize) -> Result<Vec<RawFeedEntry>> {
    let channel = rss::Channel::read_from(body.as_bytes())?;

    let entries = channel
        .items()
        .iter()
        .take(max_entries)
        .map(|item| RawFeedEntry {
            title: item.title().map(str::to_string),
            link: item.link().map(str::to_string),
            content: item.description().map(str::to_string),
        })
        .collect();

    Ok(entries)
}

fn image_entry(
    image_url: String,
    title: Option<String>,
    link: Option<String>,
) -> Result<FeedImageEntry> {
    let title = required_field("title", title.as_deref())?;
    let link = required_field("link", link.as_deref())?;

    if !is_absolute_http_url(&link) {
        return Err(DashboardError::InvalidUrl {
            field: "link".to_string(),
            value: link,
            reason: "not an absolute http(s) URL".to_string(),
        });
    }

    Ok(FeedImageEntry::new(image_url, title, link))
}

fn required_field(field: &str, value: Option<&str>) -> Result<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .ok_or_else(|| DashboardError::MissingField {
            field: field.to_string(),
        })
}
