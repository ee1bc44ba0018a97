use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    /// `Ok(None)` when nothing has been written at `path` yet.
    fn read_file(
        &self,
        path: &str,
    ) -> impl std::future::Future<Output = Result<Option<Vec<u8>>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// Retrieves the raw body of a syndication endpoint.
#[async_trait]
pub trait FeedFetcher: Send + Sync {
    async fn fetch(&self, endpoint: &str) -> Result<String>;
}
