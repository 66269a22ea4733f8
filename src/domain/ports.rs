use crate::utils::error::Result;
use async_trait::async_trait;

/// Where the static catalog is read from. Returns the raw JSON bytes.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn fetch(&self) -> Result<Vec<u8>>;

    /// Human-readable origin, used in logs.
    fn describe(&self) -> String;
}
