//! Error types for the language-model crate

use thiserror::Error;

/// Result type alias for language-model operations
pub type Result<T> = std::result::Result<T, LangError>;

/// Error type for catalog loading and validation
#[derive(Debug, Error)]
pub enum LangError {
    /// YAML parsing errors while loading a command catalog
    #[error("YAML parsing error: {source}")]
    Yaml {
        #[from]
        source: serde_yaml::Error,
    },

    /// Catalog validation errors
    #[error("Catalog error: {message}")]
    Catalog { message: String },
}

impl LangError {
    /// Create a new catalog error
    pub fn catalog<S: Into<String>>(message: S) -> Self {
        Self::Catalog {
            message: message.into(),
        }
    }
}
