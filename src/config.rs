//! Plugin configuration
//!
//! Settings come from environment variables, builder setters, or the JSON a
//! bot host stores per service.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{GuggyError, Result};

/// Default Guggy text-to-GIF endpoint.
pub const DEFAULT_API_URL: &str = "https://text2gif.guggy.com/guggify";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration options for the Guggy API client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuggyConfig {
    /// API key sent in the `apiKey` header.
    pub api_key: String,
    /// Text-to-GIF endpoint (overridable for testing).
    pub api_url: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
    /// User agent sent with every request.
    pub user_agent: String,
}

impl GuggyConfig {
    /// Creates a new config with sensible defaults.
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            api_url: DEFAULT_API_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: format!("elizaOS-Guggy-Plugin/{}", env!("CARGO_PKG_VERSION")),
        }
    }

    /// Loads configuration from environment variables.
    ///
    /// Required:
    /// - `GUGGY_API_KEY`
    ///
    /// Optional:
    /// - `GUGGY_API_URL`
    /// - `GUGGY_TIMEOUT_SECS`
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("GUGGY_API_KEY")
            .map_err(|_| GuggyError::MissingSetting("GUGGY_API_KEY".to_string()))?;

        let mut config = Self::new(api_key);

        if let Ok(url) = std::env::var("GUGGY_API_URL") {
            config.api_url = url;
        }

        if let Some(secs) = std::env::var("GUGGY_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
        {
            config.timeout_secs = secs;
        }

        Ok(config)
    }

    /// Sets the text-to-GIF endpoint.
    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into();
        self
    }

    /// Sets the request timeout in seconds.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Sets the user agent.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Validates the configuration values.
    ///
    /// The API key is passed through as-is; only the endpoint and timeout are checked.
    pub fn validate(&self) -> Result<()> {
        validate_http_url("api_url", &self.api_url)?;

        if self.timeout_secs == 0 {
            return Err(GuggyError::Config(
                "timeout_secs must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }
}

/// Service configuration as stored by the bot host: `{"api_key": "..."}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GuggyServiceConfig {
    /// Guggy API key.
    #[serde(default)]
    pub api_key: String,
}

/// Connection settings for the Matrix media repository.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatrixConfig {
    /// Homeserver base URL, e.g. `https://matrix.org`.
    pub homeserver_url: String,
    /// Access token of the bot user.
    pub access_token: String,
}

impl MatrixConfig {
    /// Creates a new Matrix config.
    pub fn new(homeserver_url: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            homeserver_url: homeserver_url.into(),
            access_token: access_token.into(),
        }
    }

    /// Loads configuration from `MATRIX_HOMESERVER_URL` and `MATRIX_ACCESS_TOKEN`.
    pub fn from_env() -> Result<Self> {
        let homeserver_url = std::env::var("MATRIX_HOMESERVER_URL")
            .map_err(|_| GuggyError::MissingSetting("MATRIX_HOMESERVER_URL".to_string()))?;
        let access_token = std::env::var("MATRIX_ACCESS_TOKEN")
            .map_err(|_| GuggyError::MissingSetting("MATRIX_ACCESS_TOKEN".to_string()))?;

        Ok(Self::new(homeserver_url, access_token))
    }

    /// Validates the configuration values.
    pub fn validate(&self) -> Result<()> {
        validate_http_url("homeserver_url", &self.homeserver_url)?;

        if self.access_token.is_empty() {
            return Err(GuggyError::Config(
                "Matrix access token cannot be empty".to_string(),
            ));
        }

        Ok(())
    }
}

fn validate_http_url(field: &str, value: &str) -> Result<()> {
    let url = Url::parse(value)?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(GuggyError::Config(format!(
            "{} must use http or https, got '{}'",
            field, other
        ))),
    }
}
