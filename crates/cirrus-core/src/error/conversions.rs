//! From trait implementations for CirrusError conversions

use super::types::CirrusError;

impl From<std::io::Error> for CirrusError {
    fn from(error: std::io::Error) -> Self {
        Self::io(error.to_string())
    }
}

impl From<serde_json::Error> for CirrusError {
    fn from(error: serde_json::Error) -> Self {
        Self::json(error.to_string())
    }
}

impl From<toml::de::Error> for CirrusError {
    fn from(error: toml::de::Error) -> Self {
        Self::config(format!("Invalid TOML: {}", error))
    }
}

impl From<reqwest::Error> for CirrusError {
    fn from(error: reqwest::Error) -> Self {
        Self::Http {
            message: error.to_string(),
            url: error.url().map(|u| u.to_string()),
        }
    }
}
