pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;

pub use crate::adapters::{http::HttpFeedFetcher, storage::LocalStorage};
pub use crate::config::toml_config::DashboardConfig;
pub use crate::core::dashboard::DashboardService;
pub use crate::core::favicon::resolve_favicon;
pub use crate::core::feed_images::{resolve_feed_images, FeedImageResolver, Resolution};
pub use crate::domain::model::FeedImageEntry;
pub use crate::utils::error::{DashboardError, Result};
