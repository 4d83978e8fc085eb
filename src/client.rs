//! Guggy API client
//!
//! Async HTTP client for the Guggy text-to-GIF endpoint.

use std::time::Duration;

use reqwest::{header::CONTENT_TYPE, Client, Response};
use tracing::{debug, error, info};

use crate::config::GuggyConfig;
use crate::error::{GuggyError, Result};
use crate::types::{GuggyGifResult, GuggyQuery};

/// Header carrying the Guggy API key.
pub const API_KEY_HEADER: &str = "apiKey";

/// Async Guggy API client.
pub struct GuggyClient {
    config: GuggyConfig,
    http: Client,
}

impl GuggyClient {
    /// Create a new Guggy client.
    ///
    /// # Arguments
    ///
    /// * `config` - Client configuration
    pub fn new(config: GuggyConfig) -> Result<Self> {
        config.validate()?;

        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(&config.user_agent)
            .build()?;

        Ok(Self { config, http })
    }

    /// Turn a sentence into a GIF.
    ///
    /// An empty `gif` field in the result means Guggy found nothing.
    pub async fn text_to_gif(&self, sentence: &str) -> Result<GuggyGifResult> {
        info!(sentence, "Transforming to GIF query");

        let query = GuggyQuery::gif(sentence);

        let response = self
            .http
            .post(&self.config.api_url)
            .header(CONTENT_TYPE, "application/json")
            .header(API_KEY_HEADER, &self.config.api_key)
            .json(&query)
            .send()
            .await
            .inspect_err(|e| error!(error = %e, "Guggy request failed"))?;

        let response = check_response(response).await?;
        let body = response.text().await?;
        let result: GuggyGifResult = serde_json::from_str(&body)
            .inspect_err(|e| error!(error = %e, "Undecodable Guggy response"))?;

        debug!(req_id = %result.req_id, gif = %result.gif, "Guggy response received");
        Ok(result)
    }

    /// Get the client configuration.
    pub fn config(&self) -> &GuggyConfig {
        &self.config
    }
}

async fn check_response(response: Response) -> Result<Response> {
    if response.status().is_success() {
        return Ok(response);
    }

    let status = response.status().as_u16();
    let text = response.text().await?;

    let message = serde_json::from_str::<serde_json::Value>(&text)
        .ok()
        .and_then(|v| {
            v["message"]
                .as_str()
                .or(v["error"].as_str())
                .map(String::from)
        })
        .unwrap_or(text);

    error!(status, %message, "Guggy API returned an error");
    Err(GuggyError::Api { status, message })
}
