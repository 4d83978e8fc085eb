//! Matrix media upload
//!
//! The command needs the GIF hosted on the chat server before it can be posted.
//! [`MediaUploader`] is the seam the host provides; [`MatrixMediaClient`] is the
//! stock implementation against a homeserver's media repository.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header::CONTENT_TYPE, Client};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::config::MatrixConfig;
use crate::error::{GuggyError, Result};

/// Prefix of Matrix content URIs.
pub const MXC_SCHEME: &str = "mxc://";

const UPLOAD_PATH: &str = "/_matrix/media/r0/upload";

/// Uploads remote media into the chat server.
#[async_trait]
pub trait MediaUploader: Send + Sync {
    /// Upload the media at `url` and return its content reference.
    async fn upload_link(&self, url: &str) -> Result<String>;
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    content_uri: String,
}

/// Uploads media to a Matrix homeserver's content repository.
pub struct MatrixMediaClient {
    config: MatrixConfig,
    http: Client,
}

impl MatrixMediaClient {
    /// Create a new media client.
    pub fn new(config: MatrixConfig) -> Result<Self> {
        config.validate()?;

        let http = Client::builder()
            .timeout(Duration::from_secs(60))
            .build()?;

        Ok(Self { config, http })
    }

    /// Get the client configuration.
    pub fn config(&self) -> &MatrixConfig {
        &self.config
    }

    fn upload_url(&self) -> String {
        format!(
            "{}{}",
            self.config.homeserver_url.trim_end_matches('/'),
            UPLOAD_PATH
        )
    }

    /// Upload raw bytes and return the `mxc://` content URI.
    pub async fn upload_to_content_repo(
        &self,
        body: Vec<u8>,
        content_type: &str,
    ) -> Result<String> {
        let response = self
            .http
            .post(self.upload_url())
            .bearer_auth(&self.config.access_token)
            .header(CONTENT_TYPE, content_type)
            .body(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "Media upload rejected");
            return Err(GuggyError::Upload(format!(
                "upload request returned HTTP {}",
                status.as_u16()
            )));
        }

        let body = response.text().await?;
        let uploaded: UploadResponse = serde_json::from_str(&body)?;
        Ok(uploaded.content_uri)
    }
}

#[async_trait]
impl MediaUploader for MatrixMediaClient {
    async fn upload_link(&self, url: &str) -> Result<String> {
        if url.starts_with(MXC_SCHEME) {
            return Ok(url.to_string());
        }

        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(GuggyError::Upload(format!(
                "fetching {} returned HTTP {}",
                url,
                status.as_u16()
            )));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("application/octet-stream")
            .to_string();
        let body = response.bytes().await?.to_vec();

        debug!(url, %content_type, size = body.len(), "Uploading media to homeserver");
        self.upload_to_content_repo(body, &content_type).await
    }
}
