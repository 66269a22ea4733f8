use crate::core::CatalogSource;
use crate::utils::error::Result;
use async_trait::async_trait;
use reqwest::Client;

/// Fetches the catalog JSON from a remote URL once at startup.
pub struct HttpSource {
    url: String,
    client: Client,
}

impl HttpSource {
    pub fn new(url: String) -> Self {
        Self {
            url,
            client: Client::new(),
        }
    }
}

#[async_trait]
impl CatalogSource for HttpSource {
    async fn fetch(&self) -> Result<Vec<u8>> {
        // 發送 HTTP 請求
        tracing::debug!("Making API request to: {}", self.url);
        let response = self.client.get(&self.url).send().await?;
        tracing::debug!("API response status: {}", response.status());

        // a failed fetch must not start the server with an empty catalog
        let response = response.error_for_status()?;
        let body = response.bytes().await?;
        Ok(body.to_vec())
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}
