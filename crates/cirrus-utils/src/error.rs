//! Error type for the utility functions

use thiserror::Error;

/// Result type alias for utility operations
pub type UtilResult<T> = Result<T, UtilError>;

/// Errors raised by the batching and image helpers
#[derive(Error, Debug, Clone, PartialEq)]
pub enum UtilError {
    /// Invalid arguments or unsupported input kinds
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Image encoding/decoding failures
    #[error("Image error: {message}")]
    Image { message: String },

    /// Malformed base64 payload
    #[error("Base64 error: {message}")]
    Base64 { message: String },

    /// Encoded payload is not valid UTF-8
    #[error("UTF-8 error: {message}")]
    Utf8 { message: String },
}

impl UtilError {
    /// Create a new configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new image error
    pub fn image(message: impl Into<String>) -> Self {
        Self::Image {
            message: message.into(),
        }
    }

    /// Whether the caller passed arguments that can never succeed
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Config { .. })
    }
}

impl From<::image::ImageError> for UtilError {
    fn from(error: ::image::ImageError) -> Self {
        Self::image(error.to_string())
    }
}

impl From<base64::DecodeError> for UtilError {
    fn from(error: base64::DecodeError) -> Self {
        Self::Base64 {
            message: error.to_string(),
        }
    }
}

impl From<std::string::FromUtf8Error> for UtilError {
    fn from(error: std::string::FromUtf8Error) -> Self {
        Self::Utf8 {
            message: error.to_string(),
        }
    }
}
