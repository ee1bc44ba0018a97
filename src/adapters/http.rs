use crate::config::toml_config::FeedConfig;
use crate::domain::ports::FeedFetcher;
use crate::utils::error::{DashboardError, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Client;
use std::time::Duration;

/// Fetches feeds over HTTP with a bounded timeout. Redirects are followed,
/// no cookies are kept.
#[derive(Debug, Clone)]
pub struct HttpFeedFetcher {
    client: Client,
}

impl HttpFeedFetcher {
    pub fn new(config: &FeedConfig) -> Result<Self> {
        Self::with_timeout(config, Duration::from_secs(config.timeout_seconds))
    }

    pub fn with_timeout(config: &FeedConfig, timeout: Duration) -> Result<Self> {
        let mut headers = HeaderMap::new();
        for (name, value) in &config.headers {
            let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
                DashboardError::InvalidConfigValueError {
                    field: "feed.headers".to_string(),
                    value: name.clone(),
                    reason: e.to_string(),
                }
            })?;
            let header_value = HeaderValue::from_str(value).map_err(|e| {
                DashboardError::InvalidConfigValueError {
                    field: format!("feed.headers.{}", name),
                    value: value.clone(),
                    reason: e.to_string(),
                }
            })?;
            headers.insert(header_name, header_value);
        }

        let client = Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl FeedFetcher for HttpFeedFetcher {
    async fn fetch(&self, endpoint: &str) -> Result<String> {
        tracing::debug!("Requesting feed: {}", endpoint);
        let response = self.client.get(endpoint).send().await?;

        tracing::debug!("Feed response status: {}", response.status());
        let response = response.error_for_status()?;

        let bytes = response.bytes().await?;
        Ok(String::from_utf8(bytes.to_vec())?)
    }
}
