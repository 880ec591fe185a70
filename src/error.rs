//! Error types for devtranslate.

use thiserror::Error;

/// Failure of a single batch translation call.
///
/// Any of these means the whole batch failed; no partial results are returned.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum TranslationError {
    #[error("Request failed: {message}")]
    Request { message: String },

    #[error("Provider returned status {status}: {message}")]
    Provider { status: u16, message: String },

    #[error("Malformed response: {message}")]
    Malformed { message: String },

    #[error("Response does not match schema: {message}")]
    Schema { message: String },
}

impl TranslationError {
    pub fn request(msg: impl Into<String>) -> Self {
        Self::Request {
            message: msg.into(),
        }
    }

    pub fn provider(status: u16, msg: impl Into<String>) -> Self {
        Self::Provider {
            status,
            message: msg.into(),
        }
    }

    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::Malformed {
            message: msg.into(),
        }
    }

    pub fn schema(msg: impl Into<String>) -> Self {
        Self::Schema {
            message: msg.into(),
        }
    }

    /// Short machine-readable name, used in HTTP error bodies.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Request { .. } => "request_error",
            Self::Provider { .. } => "provider_error",
            Self::Malformed { .. } => "malformed_response",
            Self::Schema { .. } => "schema_error",
        }
    }
}

#[derive(Error, Debug)]
#[non_exhaustive]
pub enum DevTranslateError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error(transparent)]
    Translation(#[from] TranslationError),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("{0}")]
    Other(String),
}

impl DevTranslateError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    pub fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, DevTranslateError>;
