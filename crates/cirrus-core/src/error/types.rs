//! Core error type

use thiserror::Error;

/// Result type alias for cirrus operations
pub type CirrusResult<T> = Result<T, CirrusError>;

/// Main error type for the client layer
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CirrusError {
    /// Invalid or missing configuration, including malformed call parameters
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        context: Option<String>,
    },

    /// The accepted parameters of a target could not be determined
    #[error("Cannot determine accepted parameters of `{target}`")]
    Introspection { target: String },

    /// Error reported by the provider, passed through as received
    #[error("API error: {message}")]
    Api {
        status_code: Option<u16>,
        error_type: Option<String>,
        message: String,
    },

    /// HTTP transport errors
    #[error("HTTP error: {message}")]
    Http {
        message: String,
        url: Option<String>,
    },

    /// JSON serialization/deserialization errors
    #[error("JSON error: {message}")]
    Json { message: String },

    /// IO errors
    #[error("IO error: {message}")]
    Io {
        message: String,
        path: Option<String>,
    },
}

impl CirrusError {
    /// Stable code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Config { .. } => "CIRRUS_CONFIG",
            Self::Introspection { .. } => "CIRRUS_INTROSPECTION",
            Self::Api { .. } => "CIRRUS_API",
            Self::Http { .. } => "CIRRUS_HTTP",
            Self::Json { .. } => "CIRRUS_JSON",
            Self::Io { .. } => "CIRRUS_IO",
        }
    }

    /// Whether the caller has to change its input to make progress
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Config { .. } | Self::Introspection { .. })
    }

    /// HTTP status attached to the error, if any
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Api { status_code, .. } => *status_code,
            _ => None,
        }
    }
}
