//! Google Translate web endpoint backend.

use crate::error::{Error, Result};
use crate::translate::TranslateBackend;
use reqwest::Client;
use std::time::Duration;
use tokio::runtime::Handle;

/// Translation backend using the public Google Translate web API.
///
/// The endpoint returns a nested JSON array where the first element holds
/// one `[translated, original, ...]` segment per input sentence.
pub struct GoogleTranslate {
    client: Client,
    handle: Handle,
    endpoint: String,
}

impl GoogleTranslate {
    /// Create a backend with explicit request timeouts.
    ///
    /// `handle` must belong to a runtime that outlives the backend; requests
    /// are driven through it so a hung service cannot block forever.
    pub fn new(handle: Handle, endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(timeout)
            .timeout(timeout)
            .build()
            .map_err(|e| Error::HttpClientBuild {
                reason: e.to_string(),
            })?;

        Ok(Self {
            client,
            handle,
            endpoint: endpoint.into(),
        })
    }

    async fn request(&self, text: &str, source: &str, target: &str) -> Result<String> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("client", "gtx"),
                ("sl", source),
                ("tl", target),
                ("dt", "t"),
                ("q", text),
            ])
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|e| Error::Translation {
                text: text.to_string(),
                source: Box::new(e),
            })?;

        let body = response.text().await.map_err(|e| Error::Translation {
            text: text.to_string(),
            source: Box::new(e),
        })?;

        parse_response(&body, text)
    }
}

impl TranslateBackend for GoogleTranslate {
    fn translate(&self, text: &str, source: &str, target: &str) -> Result<String> {
        self.handle.block_on(self.request(text, source, target))
    }
}

/// Extract the translated text from the endpoint's nested-array response.
fn parse_response(body: &str, text: &str) -> Result<String> {
    let value: serde_json::Value =
        serde_json::from_str(body).map_err(|e| Error::TranslationResponse {
            text: text.to_string(),
            reason: format!("invalid JSON: {e}"),
        })?;

    let segments = value
        .get(0)
        .and_then(serde_json::Value::as_array)
        .ok_or_else(|| Error::TranslationResponse {
            text: text.to_string(),
            reason: "missing translation segments".to_string(),
        })?;

    let translated: String = segments
        .iter()
        .filter_map(|segment| segment.get(0).and_then(serde_json::Value::as_str))
        .collect();

    Ok(translated)
}
