//! DuckDuckGo image search backend.

use crate::constants::image_search::{SEARCH_URL, TOKEN_URL};
use crate::enrich::ImageSearchBackend;
use crate::error::{Error, Result};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tokio::runtime::Handle;

/// Image search backend using the DuckDuckGo `i.js` endpoint.
///
/// The endpoint requires a `vqd` request token scraped from the front page
/// for the same query; both requests share the configured timeout.
pub struct DuckDuckGoImages {
    client: Client,
    handle: Handle,
}

/// Response shape of the `i.js` endpoint (only the fields we read).
#[derive(Debug, Deserialize)]
struct ImageResults {
    results: Vec<ImageResult>,
}

#[derive(Debug, Deserialize)]
struct ImageResult {
    image: String,
}

impl DuckDuckGoImages {
    /// Create a backend with explicit request timeouts.
    pub fn new(handle: Handle, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(timeout)
            .timeout(timeout)
            .build()
            .map_err(|e| Error::HttpClientBuild {
                reason: e.to_string(),
            })?;

        Ok(Self { client, handle })
    }

    async fn request(&self, query: &str) -> Result<Option<String>> {
        let front_page = self
            .client
            .get(TOKEN_URL)
            .query(&[("q", query)])
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|e| Error::ImageSearch {
                query: query.to_string(),
                source: Box::new(e),
            })?
            .text()
            .await
            .map_err(|e| Error::ImageSearch {
                query: query.to_string(),
                source: Box::new(e),
            })?;

        let Some(token) = extract_vqd(&front_page) else {
            return Err(Error::ImageSearchResponse {
                query: query.to_string(),
                reason: "no vqd token in front page".to_string(),
            });
        };

        let body = self
            .client
            .get(SEARCH_URL)
            .query(&[("l", "us-en"), ("o", "json"), ("q", query), ("vqd", &token)])
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|e| Error::ImageSearch {
                query: query.to_string(),
                source: Box::new(e),
            })?
            .text()
            .await
            .map_err(|e| Error::ImageSearch {
                query: query.to_string(),
                source: Box::new(e),
            })?;

        let results: ImageResults =
            serde_json::from_str(&body).map_err(|e| Error::ImageSearchResponse {
                query: query.to_string(),
                reason: format!("invalid JSON: {e}"),
            })?;

        Ok(results.results.into_iter().next().map(|r| r.image))
    }
}

impl ImageSearchBackend for DuckDuckGoImages {
    fn search(&self, query: &str) -> Result<Option<String>> {
        self.handle.block_on(self.request(query))
    }
}

/// Scrape the `vqd` request token out of the front-page markup.
///
/// The token appears as `vqd="4-..."` or `vqd=4-...&` depending on the
/// page variant.
fn extract_vqd(page: &str) -> Option<String> {
    for marker in ["vqd=\"", "vqd='", "vqd="] {
        if let Some(start) = page.find(marker) {
            let rest = &page[start + marker.len()..];
            let token: String = rest
                .chars()
                .take_while(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
                .collect();
            if !token.is_empty() {
                return Some(token);
            }
        }
    }
    None
}
