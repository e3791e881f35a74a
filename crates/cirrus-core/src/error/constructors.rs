//! Constructor methods for CirrusError

use super::types::CirrusError;
use serde_json::Value;

impl CirrusError {
    /// Create a new configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            context: None,
        }
    }

    /// Create a configuration error with context
    pub fn config_with_context(message: impl Into<String>, context: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            context: Some(context.into()),
        }
    }

    /// Create an introspection error for the named target
    pub fn introspection(target: impl Into<String>) -> Self {
        Self::Introspection {
            target: target.into(),
        }
    }

    /// Create an API error without a status code (e.g. a stream `error` event)
    pub fn api(message: impl Into<String>) -> Self {
        Self::Api {
            status_code: None,
            error_type: None,
            message: message.into(),
        }
    }

    /// Build an API error from a non-success response.
    ///
    /// The provider reports errors as `{"type":"error","error":{"type":..,"message":..}}`;
    /// anything else is kept verbatim as the message.
    pub fn from_response_body(status_code: u16, body: &str) -> Self {
        let parsed = serde_json::from_str::<Value>(body).ok();
        let error = parsed
            .as_ref()
            .map(|v| if v["error"].is_object() { &v["error"] } else { v });

        let error_type = error
            .and_then(|e| e["type"].as_str())
            .map(str::to_string);
        let message = error
            .and_then(|e| e["message"].as_str())
            .map(str::to_string)
            .unwrap_or_else(|| body.trim().to_string());

        Self::Api {
            status_code: Some(status_code),
            error_type,
            message,
        }
    }

    /// Create an HTTP error with message
    pub fn http(message: impl Into<String>) -> Self {
        Self::Http {
            message: message.into(),
            url: None,
        }
    }

    /// Create a JSON error with message
    pub fn json(message: impl Into<String>) -> Self {
        Self::Json {
            message: message.into(),
        }
    }

    /// Create an IO error with message
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
            path: None,
        }
    }

    /// Create an IO error with path
    pub fn io_with_path(message: impl Into<String>, path: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
            path: Some(path.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_response_body_with_error_envelope() {
        let body = r#"{"type":"error","error":{"type":"overloaded_error","message":"Overloaded"}}"#;
        let err = CirrusError::from_response_body(529, body);

        assert_eq!(
            err,
            CirrusError::Api {
                status_code: Some(529),
                error_type: Some("overloaded_error".to_string()),
                message: "Overloaded".to_string(),
            }
        );
        assert_eq!(err.status_code(), Some(529));
    }

    #[test]
    fn test_from_response_body_vertex_shape() {
        let body = r#"{"error":{"code":403,"message":"Permission denied","status":"PERMISSION_DENIED"}}"#;
        let err = CirrusError::from_response_body(403, body);

        match err {
            CirrusError::Api {
                message,
                error_type,
                ..
            } => {
                assert_eq!(message, "Permission denied");
                assert_eq!(error_type, None);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_from_response_body_plain_text() {
        let err = CirrusError::from_response_body(502, "  Bad Gateway\n");
        assert_eq!(err.to_string(), "API error: Bad Gateway");
    }

    #[test]
    fn test_classification() {
        assert!(CirrusError::config("x").is_configuration());
        assert!(CirrusError::introspection("f").is_configuration());
        assert!(!CirrusError::api("x").is_configuration());
        assert_eq!(CirrusError::http("x").error_code(), "CIRRUS_HTTP");
    }
}
