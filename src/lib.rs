//! elizaOS Guggy Plugin
//!
//! Turns `!guggy <sentence>` into an animated GIF from the Guggy text-to-GIF API
//! and replies with an image message hosted on the chat server.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use elizaos_plugin_guggy::{GuggyConfig, GuggyService, MatrixConfig, MatrixMediaClient};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let service = GuggyService::new("guggy", "@bot:example.org", GuggyConfig::from_env()?)?;
//! let uploader = Arc::new(MatrixMediaClient::new(MatrixConfig::from_env()?)?);
//!
//! let plugin = service.plugin(uploader);
//! if let Some(reply) = plugin.on_message("!room:example.org", "@alice:example.org", "!guggy happy dance").await {
//!     println!("{}", serde_json::to_string(&reply)?);
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

/// Guggy API client.
pub mod client;
/// Configuration types and helpers.
pub mod config;
/// Error types returned by the plugin.
pub mod error;
/// Logging setup.
pub mod logging;
/// Media upload to the chat server.
pub mod matrix;
/// Command routing.
pub mod plugin;
/// The Guggy chat service.
pub mod service;
/// Wire and message types.
pub mod types;

pub use client::GuggyClient;
pub use config::{GuggyConfig, GuggyServiceConfig, MatrixConfig};
pub use error::{GuggyError, Result};
pub use matrix::{MatrixMediaClient, MediaUploader};
pub use plugin::{Command, CommandHandler, Plugin};
pub use service::GuggyService;
pub use types::*;

/// Canonical plugin name.
pub const PLUGIN_NAME: &str = "guggy";
/// Plugin version (from Cargo package metadata).
pub const PLUGIN_VERSION: &str = env!("CARGO_PKG_VERSION");
/// Human-friendly plugin description.
pub const PLUGIN_DESCRIPTION: &str = "Text-to-GIF replies powered by Guggy";

/// Plugin metadata (name, description, and version).
#[derive(Debug, Clone)]
pub struct PluginInfo {
    /// The plugin identifier (`"guggy"`).
    pub name: String,
    /// A human-friendly description of the plugin.
    pub description: String,
    /// The plugin version string.
    pub version: String,
}

/// Returns the plugin metadata used by the host plugin system.
pub fn plugin_info() -> PluginInfo {
    PluginInfo {
        name: PLUGIN_NAME.to_string(),
        description: PLUGIN_DESCRIPTION.to_string(),
        version: PLUGIN_VERSION.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plugin_info() {
        let info = plugin_info();
        assert_eq!(info.name, PLUGIN_NAME);
        assert_eq!(info.name, service::SERVICE_TYPE);
        assert!(!info.description.is_empty());
    }
}
