use std::time::Instant;

use reqwest::blocking::Client;
use tracing::debug;
use url::Url;

use crate::error::{CatalogError, Result};

/// Retrieves the HTML body of a page.
pub trait PageFetcher {
    fn fetch(&self, url: &Url) -> Result<String>;
}

/// Blocking HTTP GET using the client's default timeouts.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(user_agent: &str) -> Result<Self> {
        let client = Client::builder()
            .user_agent(user_agent)
            .build()
            .map_err(CatalogError::Client)?;
        Ok(HttpFetcher { client })
    }
}

impl PageFetcher for HttpFetcher {
    fn fetch(&self, url: &Url) -> Result<String> {
        let network = |source| CatalogError::Network {
            url: url.to_string(),
            source,
        };

        let start = Instant::now();
        let response = self.client.get(url.clone()).send().map_err(network)?;
        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().map_err(network)?;
        debug!(
            url = %url,
            bytes = body.len(),
            latency_ms = start.elapsed().as_millis() as u64,
            "fetched page"
        );
        Ok(body)
    }
}
