//! Degraded gallery content used when the feed yields nothing.

use crate::config::toml_config::FallbackConfig;
use crate::domain::model::FeedImageEntry;
use crate::utils::error::{DashboardError, Result};
use crate::utils::validation::is_absolute_http_url;

const IMAGE_SEARCH_BASE: &str = "https://source.unsplash.com";
const FULL_SIZE: &str = "1600x900";
const THUMBNAIL_SIZE: &str = "400x300";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackTier {
    /// Image-search URLs built from the configured keyword strings.
    Keywords,
    /// A single literal entry.
    Hardcoded,
}

pub fn keyword_tier(config: &FallbackConfig) -> Result<Vec<FeedImageEntry>> {
    if config.keywords.len() < config.count {
        return Err(DashboardError::FallbackError {
            message: format!(
                "{} keyword strings configured, {} required",
                config.keywords.len(),
                config.count
            ),
        });
    }

    if !is_absolute_http_url(&config.back_link) {
        return Err(DashboardError::FallbackError {
            message: format!("back link '{}' is not an absolute URL", config.back_link),
        });
    }

    config
        .keywords
        .iter()
        .take(config.count)
        .map(|keyword| keyword_entry(keyword, &config.back_link))
        .collect()
}

fn keyword_entry(keyword: &str, back_link: &str) -> Result<FeedImageEntry> {
    let keyword = keyword.trim();
    if keyword.is_empty() {
        return Err(DashboardError::FallbackError {
            message: "blank keyword string".to_string(),
        });
    }

    let url = search_url(FULL_SIZE, keyword)?;
    let thumbnail = search_url(THUMBNAIL_SIZE, keyword)?;

    Ok(FeedImageEntry {
        url,
        title: format!("Linux Rice - {}", title_case(&keyword.replace(',', " "))),
        link: back_link.to_string(),
        thumbnail,
    })
}

fn search_url(size: &str, keyword: &str) -> Result<String> {
    let url = format!("{}/{}/?{}", IMAGE_SEARCH_BASE, size, keyword);
    if !is_absolute_http_url(&url) {
        return Err(DashboardError::FallbackError {
            message: format!("keyword '{}' does not form a valid URL", keyword),
        });
    }
    Ok(url)
}

/// Uppercases the first letter of every run of letters and lowercases the rest.
fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_word = false;
    for c in text.chars() {
        if in_word {
            out.extend(c.to_lowercase());
        } else {
            out.extend(c.to_uppercase());
        }
        in_word = c.is_alphabetic();
    }
    out
}

/// Last resort. Pure literals.
pub fn hardcoded_tier() -> Vec<FeedImageEntry> {
    vec![FeedImageEntry {
        url: "https://source.unsplash.com/1600x900/?linux,setup".to_string(),
        title: "Linux Setup".to_string(),
        link: "https://reddit.com/r/unixporn".to_string(),
        thumbnail: "https://source.unsplash.com/400x300/?linux,setup".to_string(),
    }]
}
