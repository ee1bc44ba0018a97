pub mod dashboard;
pub mod extract;
pub mod fallback;
pub mod favicon;
pub mod feed_images;
pub mod store;

pub use crate::domain::model::{FeedImageEntry, Note, QuickLink};
pub use crate::domain::ports::{FeedFetcher, Storage};
pub use crate::utils::error::Result;
