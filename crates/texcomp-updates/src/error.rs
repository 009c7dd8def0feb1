//! Error types for the updates crate

use thiserror::Error;

/// Result type alias for update operations
pub type Result<T> = std::result::Result<T, UpdateError>;

/// Error type for version-check and report-formatting operations
#[derive(Debug, Error)]
pub enum UpdateError {
    /// Network-related errors during the version check
    #[error("Network error: {source}")]
    Network {
        #[from]
        source: reqwest::Error,
    },

    /// XML parsing errors in the marketplace feed
    #[error("XML parsing error: {source}")]
    Xml {
        #[from]
        source: quick_xml::Error,
    },

    /// Malformed feed payloads
    #[error("Feed error: {message}")]
    Feed { message: String },
}

impl UpdateError {
    /// Create a new feed error
    pub fn feed<S: Into<String>>(message: S) -> Self {
        Self::Feed {
            message: message.into(),
        }
    }
}
