use crate::shared::Result;
use async_trait::async_trait;

/// DescriptorFetcher port for descriptors addressed by URL
#[async_trait]
pub trait DescriptorFetcher: Send + Sync {
    /// Fetches the raw descriptor bytes
    ///
    /// # Errors
    /// Returns an error if the location is unreachable or not found
    async fn fetch(&self, url: &str) -> Result<Vec<u8>>;
}
