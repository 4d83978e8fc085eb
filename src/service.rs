//! Guggy service
//!
//! Wires the `!guggy` command to the Guggy API and the room's media uploader.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::client::GuggyClient;
use crate::config::{GuggyConfig, GuggyServiceConfig};
use crate::error::Result;
use crate::matrix::MediaUploader;
use crate::plugin::{Command, CommandHandler, Plugin};
use crate::types::{ChatMessage, ImageMessage, TextMessage};

/// Service type identifier.
pub const SERVICE_TYPE: &str = "guggy";

/// Reply sent when Guggy returns no GIF.
pub const NO_GIF_FOUND: &str = "No GIF found!";

/// A configured Guggy service bound to a bot user.
#[derive(Clone)]
pub struct GuggyService {
    id: String,
    service_user_id: String,
    client: Arc<GuggyClient>,
}

impl GuggyService {
    /// Create a new service.
    pub fn new(
        id: impl Into<String>,
        service_user_id: impl Into<String>,
        config: GuggyConfig,
    ) -> Result<Self> {
        Ok(Self {
            id: id.into(),
            service_user_id: service_user_id.into(),
            client: Arc::new(GuggyClient::new(config)?),
        })
    }

    /// Create a service from its stored JSON configuration (`{"api_key": "..."}`).
    pub fn from_config_json(
        id: impl Into<String>,
        service_user_id: impl Into<String>,
        config: &serde_json::Value,
    ) -> Result<Self> {
        let stored: GuggyServiceConfig = serde_json::from_value(config.clone())?;
        Self::new(id, service_user_id, GuggyConfig::new(stored.api_key))
    }

    /// Service identifier.
    pub fn service_id(&self) -> &str {
        &self.id
    }

    /// Matrix user the service posts as.
    pub fn service_user_id(&self) -> &str {
        &self.service_user_id
    }

    /// Service type (`"guggy"`).
    pub fn service_type(&self) -> &'static str {
        SERVICE_TYPE
    }

    /// Underlying API client.
    pub fn client(&self) -> &GuggyClient {
        &self.client
    }

    /// Commands exposed to a room, uploading media through `uploader`.
    pub fn plugin(&self, uploader: Arc<dyn MediaUploader>) -> Plugin {
        let handler = GuggyCommand {
            service: self.clone(),
            uploader,
        };
        Plugin::new(vec![Command::new([SERVICE_TYPE], Arc::new(handler))])
    }

    /// Handle `!guggy <words>`.
    ///
    /// Returns a notice when nothing matched, otherwise an image message
    /// pointing at the uploaded GIF.
    pub async fn cmd_guggy(
        &self,
        uploader: &dyn MediaUploader,
        room_id: &str,
        user_id: &str,
        args: &[String],
    ) -> Result<ChatMessage> {
        let sentence = args.join(" ");
        info!(room_id, user_id, %sentence, "Handling guggy command");

        let result = self.client.text_to_gif(&sentence).await?;
        if !result.has_gif() {
            return Ok(TextMessage::notice(NO_GIF_FOUND).into());
        }

        let content_uri = uploader.upload_link(&result.gif).await?;

        Ok(ImageMessage::gif(
            sentence,
            content_uri,
            result.pixel_width(),
            result.pixel_height(),
        )
        .into())
    }
}

struct GuggyCommand {
    service: GuggyService,
    uploader: Arc<dyn MediaUploader>,
}

#[async_trait]
impl CommandHandler for GuggyCommand {
    async fn run(&self, room_id: &str, user_id: &str, args: &[String]) -> Result<ChatMessage> {
        self.service
            .cmd_guggy(self.uploader.as_ref(), room_id, user_id, args)
            .await
    }
}
