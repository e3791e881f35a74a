//! Timeout configuration for provider requests

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Timeout configuration for provider requests
///
/// - **Connection timeout**: time allowed to establish a connection
/// - **Request timeout**: time allowed for the complete request/response cycle
///
/// Streaming responses are bounded by the request timeout as well, so long
/// generations need a generous value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeoutConfig {
    /// Connection timeout in seconds. Default: 30 seconds
    #[serde(default = "TimeoutConfig::default_connection_timeout")]
    pub connection_timeout_secs: f64,

    /// Request timeout in seconds. Default: 600 seconds
    #[serde(default = "TimeoutConfig::default_request_timeout")]
    pub request_timeout_secs: f64,
}

impl TimeoutConfig {
    const fn default_connection_timeout() -> f64 {
        30.0
    }

    const fn default_request_timeout() -> f64 {
        600.0
    }

    /// Create a new timeout configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set connection timeout in seconds
    pub fn with_connection_timeout_secs(mut self, secs: f64) -> Self {
        self.connection_timeout_secs = secs;
        self
    }

    /// Set request timeout in seconds
    pub fn with_request_timeout_secs(mut self, secs: f64) -> Self {
        self.request_timeout_secs = secs;
        self
    }

    /// Connection timeout as Duration
    pub fn connection_timeout(&self) -> Duration {
        Duration::from_secs_f64(self.connection_timeout_secs)
    }

    /// Request timeout as Duration
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs_f64(self.request_timeout_secs)
    }

    /// Validate timeout configuration
    ///
    /// Returns an error if:
    /// - Any timeout is not a positive, finite number
    /// - Request timeout is less than connection timeout
    pub fn validate(&self) -> Result<(), String> {
        if !(self.connection_timeout_secs.is_finite() && self.connection_timeout_secs > 0.0) {
            return Err("Connection timeout must be a positive number of seconds".to_string());
        }
        if !(self.request_timeout_secs.is_finite() && self.request_timeout_secs > 0.0) {
            return Err("Request timeout must be a positive number of seconds".to_string());
        }
        if self.request_timeout_secs < self.connection_timeout_secs {
            return Err(format!(
                "Request timeout ({}s) must be >= connection timeout ({}s)",
                self.request_timeout_secs, self.connection_timeout_secs
            ));
        }
        Ok(())
    }
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            connection_timeout_secs: Self::default_connection_timeout(),
            request_timeout_secs: Self::default_request_timeout(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = TimeoutConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.connection_timeout(), Duration::from_secs(30));
        assert_eq!(config.request_timeout(), Duration::from_secs(600));
    }

    #[test]
    fn test_fractional_seconds() {
        let config = TimeoutConfig::new()
            .with_connection_timeout_secs(0.5)
            .with_request_timeout_secs(2.5);
        assert!(config.validate().is_ok());
        assert_eq!(config.request_timeout(), Duration::from_millis(2500));
    }

    #[test]
    fn test_validation_failures() {
        assert!(
            TimeoutConfig::new()
                .with_connection_timeout_secs(0.0)
                .validate()
                .is_err()
        );
        assert!(
            TimeoutConfig::new()
                .with_request_timeout_secs(f64::NAN)
                .validate()
                .is_err()
        );
        let err = TimeoutConfig::new()
            .with_connection_timeout_secs(10.0)
            .with_request_timeout_secs(5.0)
            .validate()
            .unwrap_err();
        assert!(err.contains("must be >="));
    }

    #[test]
    fn test_serde_defaults() {
        let config: TimeoutConfig = serde_json::from_str(r#"{"request_timeout_secs": 90}"#).unwrap();
        assert_eq!(config.request_timeout_secs, 90.0);
        assert_eq!(config.connection_timeout_secs, 30.0);
    }
}
