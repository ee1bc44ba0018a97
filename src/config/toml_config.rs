use crate::utils::error::{DashboardError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

pub const DEFAULT_FEED_ENDPOINT: &str = "https://www.reddit.com/r/unixporn.rss";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 15;
pub const DEFAULT_MAX_ENTRIES: usize = 5;
pub const DEFAULT_BACK_LINK: &str = "https://reddit.com/r/unixporn";
pub const DEFAULT_FALLBACK_COUNT: usize = 3;
pub const DEFAULT_FAVICON_SERVICE: &str = "https://www.google.com/s2/favicons";
pub const DEFAULT_FAVICON_SIZE: u32 = 64;

const DEFAULT_KEYWORDS: [&str; 5] = [
    "linux,setup,desktop,rice",
    "minimal,desktop,linux,terminal",
    "dark,theme,linux,workspace",
    "arch,linux,dotfiles,setup",
    "i3wm,linux,window,manager",
];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub feed: FeedConfig,
    pub fallback: FallbackConfig,
    pub favicon: FaviconConfig,
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    pub endpoint: String,
    pub timeout_seconds: u64,
    pub max_entries: usize,
    pub headers: BTreeMap<String, String>,
}

impl Default for FeedConfig {
    fn default() -> Self {
        let headers = [
            (
                "User-Agent",
                "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36",
            ),
            ("Accept", "application/rss+xml, application/xml, text/xml"),
            ("Accept-Language", "en-US,en;q=0.9"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        Self {
            endpoint: DEFAULT_FEED_ENDPOINT.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            max_entries: DEFAULT_MAX_ENTRIES,
            headers,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FallbackConfig {
    pub keywords: Vec<String>,
    pub count: usize,
    pub back_link: String,
}

impl Default for FallbackConfig {
    fn default() -> Self {
        Self {
            keywords: DEFAULT_KEYWORDS.iter().map(|k| k.to_string()).collect(),
            count: DEFAULT_FALLBACK_COUNT,
            back_link: DEFAULT_BACK_LINK.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FaviconConfig {
    pub service_url: String,
    pub size: u32,
}

impl Default for FaviconConfig {
    fn default() -> Self {
        Self {
            service_url: DEFAULT_FAVICON_SERVICE.to_string(),
            size: DEFAULT_FAVICON_SIZE,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub data_dir: String,
    pub snapshot_file: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: "./data".to_string(),
            snapshot_file: "dashboard.json".to_string(),
        }
    }
}

impl DashboardConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| DashboardError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unknown variables are left as-is.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}")?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_url("feed.endpoint", &self.feed.endpoint)?;
        validation::validate_range("feed.timeout_seconds", self.feed.timeout_seconds, 1, 300)?;
        validation::validate_positive_number("feed.max_entries", self.feed.max_entries, 1)?;

        validation::validate_positive_number("fallback.count", self.fallback.count, 1)?;
        validation::validate_url("fallback.back_link", &self.fallback.back_link)?;

        validation::validate_url("favicon.service_url", &self.favicon.service_url)?;
        validation::validate_range("favicon.size", self.favicon.size, 16, 256)?;

        validation::validate_path("storage.data_dir", &self.storage.data_dir)?;
        validation::validate_non_empty_string("storage.snapshot_file", &self.storage.snapshot_file)?;

        Ok(())
    }
}

impl Validate for DashboardConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
