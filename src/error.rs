//! Error types for the Guggy plugin.

use thiserror::Error;

/// Result type alias for Guggy plugin operations.
pub type Result<T> = std::result::Result<T, GuggyError>;

/// Errors that can occur while turning a command into a GIF message.
#[derive(Error, Debug)]
pub enum GuggyError {
    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The Guggy API answered with a non-success status.
    #[error("Guggy API error ({status}): {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Error message from the response body
        message: String,
    },

    /// Uploading the media to the chat server failed.
    #[error("Media upload failed: {0}")]
    Upload(String),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Missing required setting.
    #[error("Missing required setting: {0}")]
    MissingSetting(String),
}

impl GuggyError {
    /// Check if the error is worth retrying by the caller.
    pub fn is_retryable(&self) -> bool {
        match self {
            GuggyError::Http(e) => e.is_timeout() || e.is_connect(),
            GuggyError::Api { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = GuggyError::MissingSetting("GUGGY_API_KEY".to_string());
        assert!(err.to_string().contains("GUGGY_API_KEY"));

        let err = GuggyError::Api {
            status: 403,
            message: "invalid key".to_string(),
        };
        assert_eq!(err.to_string(), "Guggy API error (403): invalid key");
    }

    #[test]
    fn test_error_retryable() {
        assert!(GuggyError::Api {
            status: 503,
            message: String::new()
        }
        .is_retryable());
        assert!(GuggyError::Api {
            status: 429,
            message: String::new()
        }
        .is_retryable());
        assert!(!GuggyError::Api {
            status: 401,
            message: String::new()
        }
        .is_retryable());
        assert!(!GuggyError::Upload("boom".to_string()).is_retryable());
    }
}
