//! Vertex AI client configuration

use super::timeouts::TimeoutConfig;
use crate::error::{CirrusError, CirrusResult};
use crate::params::Options;
use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;

/// Environment variable consulted when no `region` option is given
pub const REGION_ENV: &str = "CLOUD_ML_REGION";
/// Environment variable consulted when no `project_id` option is given
pub const PROJECT_ID_ENV: &str = "ANTHROPIC_VERTEX_PROJECT_ID";
/// Environment variable consulted when no `base_url` option is given
pub const BASE_URL_ENV: &str = "ANTHROPIC_VERTEX_BASE_URL";

/// Option keys understood by the Vertex client constructors
pub const CONSTRUCTOR_PARAMS: &[&str] = &[
    "region",
    "project_id",
    "access_token",
    "base_url",
    "timeout",
    "connect_timeout",
    "default_headers",
];

/// Options as they arrive from the caller, before env fallbacks
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawVertexOptions {
    region: Option<String>,
    project_id: Option<String>,
    access_token: Option<String>,
    base_url: Option<String>,
    timeout: Option<f64>,
    connect_timeout: Option<f64>,
    #[serde(default)]
    default_headers: HashMap<String, String>,
}

/// Resolved configuration shared by the blocking and async Vertex clients
#[derive(Clone, PartialEq)]
pub struct VertexClientConfig {
    /// Vertex location, e.g. `us-east5` or `global`
    pub region: String,
    /// GCP project; required once a request is sent
    pub project_id: Option<String>,
    /// OAuth bearer token; required once a request is sent
    pub access_token: Option<String>,
    /// Endpoint root, without trailing slash
    pub base_url: String,
    /// Connection and request timeouts
    pub timeouts: TimeoutConfig,
    /// Headers sent with every request
    pub default_headers: HashMap<String, String>,
}

impl VertexClientConfig {
    /// Create a configuration for `region` with the default endpoint
    pub fn new(region: impl Into<String>) -> Self {
        let region = region.into();
        Self {
            base_url: default_base_url(&region),
            region,
            project_id: None,
            access_token: None,
            timeouts: TimeoutConfig::default(),
            default_headers: HashMap::new(),
        }
    }

    /// Set the GCP project
    pub fn with_project_id(mut self, project_id: impl Into<String>) -> Self {
        self.project_id = Some(project_id.into());
        self
    }

    /// Set the OAuth access token
    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    /// Override the endpoint root
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set timeouts
    pub fn with_timeouts(mut self, timeouts: TimeoutConfig) -> Self {
        self.timeouts = timeouts;
        self
    }

    /// Add a header sent with every request
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_headers.insert(name.into(), value.into());
        self
    }

    /// Build from filtered options, falling back to the process environment
    pub fn from_options(options: Options) -> CirrusResult<Self> {
        Self::from_options_with_env(options, |key| std::env::var(key).ok())
    }

    /// Build from filtered options with an explicit environment lookup
    pub fn from_options_with_env<F>(options: Options, env: F) -> CirrusResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let raw: RawVertexOptions =
            serde_json::from_value(serde_json::Value::Object(options)).map_err(|e| {
                CirrusError::config_with_context(
                    format!("Invalid client options: {}", e),
                    "Building Vertex client configuration",
                )
            })?;

        let region = raw.region.or_else(|| env(REGION_ENV)).ok_or_else(|| {
            CirrusError::config(format!(
                "No region was given. Set the `region` option or the {} environment variable",
                REGION_ENV
            ))
        })?;

        let mut config = Self::new(region);
        config.project_id = raw.project_id.or_else(|| env(PROJECT_ID_ENV));
        config.access_token = raw.access_token;
        if let Some(base_url) = raw.base_url.or_else(|| env(BASE_URL_ENV)) {
            config = config.with_base_url(base_url);
        }
        if let Some(secs) = raw.timeout {
            config.timeouts.request_timeout_secs = secs;
        }
        match raw.connect_timeout {
            Some(secs) => config.timeouts.connection_timeout_secs = secs,
            // A short request timeout pulls the default connect timeout down with it
            None if raw.timeout.is_some() => {
                let timeouts = &mut config.timeouts;
                timeouts.connection_timeout_secs =
                    timeouts.connection_timeout_secs.min(timeouts.request_timeout_secs);
            }
            None => {}
        }
        config.default_headers = raw.default_headers;

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> CirrusResult<()> {
        if self.region.trim().is_empty() {
            return Err(CirrusError::config("Region must not be empty"));
        }
        if !(self.base_url.starts_with("https://") || self.base_url.starts_with("http://")) {
            return Err(CirrusError::config(format!(
                "Base URL must be an http(s) URL, got '{}'",
                self.base_url
            )));
        }
        self.timeouts.validate().map_err(|e| {
            CirrusError::config_with_context(e, format!("Validating timeouts for {}", self.region))
        })
    }
}

impl fmt::Debug for VertexClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VertexClientConfig")
            .field("region", &self.region)
            .field("project_id", &self.project_id)
            .field(
                "access_token",
                &self.access_token.as_deref().map(mask_secret),
            )
            .field("base_url", &self.base_url)
            .field("timeouts", &self.timeouts)
            .field("default_headers", &self.default_headers.keys())
            .finish()
    }
}

/// Default Vertex endpoint root for a region
pub fn default_base_url(region: &str) -> String {
    if region == "global" {
        "https://aiplatform.googleapis.com/v1".to_string()
    } else {
        format!("https://{}-aiplatform.googleapis.com/v1", region)
    }
}

fn mask_secret(secret: &str) -> String {
    let visible: String = secret.chars().take(4).collect();
    format!("{}***", visible)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::to_options;
    use serde_json::json;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_default_base_url() {
        assert_eq!(
            default_base_url("us-east5"),
            "https://us-east5-aiplatform.googleapis.com/v1"
        );
        assert_eq!(
            default_base_url("global"),
            "https://aiplatform.googleapis.com/v1"
        );
    }

    #[test]
    fn test_from_options() {
        let options = to_options(json!({
            "region": "europe-west1",
            "project_id": "my-project",
            "access_token": "ya29.token",
            "timeout": 120,
            "connect_timeout": 5.5,
            "default_headers": {"x-trace": "1"}
        }))
        .unwrap();

        let config = VertexClientConfig::from_options_with_env(options, no_env).unwrap();
        assert_eq!(config.region, "europe-west1");
        assert_eq!(config.project_id.as_deref(), Some("my-project"));
        assert_eq!(config.access_token.as_deref(), Some("ya29.token"));
        assert_eq!(
            config.base_url,
            "https://europe-west1-aiplatform.googleapis.com/v1"
        );
        assert_eq!(config.timeouts.request_timeout_secs, 120.0);
        assert_eq!(config.timeouts.connection_timeout_secs, 5.5);
        assert_eq!(config.default_headers["x-trace"], "1");
    }

    #[test]
    fn test_env_fallbacks() {
        let env = |key: &str| match key {
            REGION_ENV => Some("us-east5".to_string()),
            PROJECT_ID_ENV => Some("env-project".to_string()),
            BASE_URL_ENV => Some("http://localhost:8080/v1/".to_string()),
            _ => None,
        };

        let config = VertexClientConfig::from_options_with_env(Options::new(), env).unwrap();
        assert_eq!(config.region, "us-east5");
        assert_eq!(config.project_id.as_deref(), Some("env-project"));
        assert_eq!(config.base_url, "http://localhost:8080/v1");
    }

    #[test]
    fn test_options_win_over_env() {
        let env = |key: &str| (key == REGION_ENV).then(|| "us-east5".to_string());
        let options = to_options(json!({"region": "asia-southeast1"})).unwrap();

        let config = VertexClientConfig::from_options_with_env(options, env).unwrap();
        assert_eq!(config.region, "asia-southeast1");
    }

    #[test]
    fn test_missing_region() {
        let err = VertexClientConfig::from_options_with_env(Options::new(), no_env).unwrap_err();
        assert!(err.is_configuration());
        assert!(err.to_string().contains(REGION_ENV));
    }

    #[test]
    fn test_invalid_timeout_rejected() {
        let options = to_options(json!({"region": "us-east5", "timeout": 0})).unwrap();
        assert!(VertexClientConfig::from_options_with_env(options, no_env).is_err());
    }

    #[test]
    fn test_short_timeout_lowers_default_connect_timeout() {
        let options = to_options(json!({"region": "us-east5", "timeout": 10})).unwrap();

        let config = VertexClientConfig::from_options_with_env(options, no_env).unwrap();
        assert_eq!(config.timeouts.request_timeout_secs, 10.0);
        assert_eq!(config.timeouts.connection_timeout_secs, 10.0);
    }

    #[test]
    fn test_long_timeout_keeps_default_connect_timeout() {
        let options = to_options(json!({"region": "us-east5", "timeout": 90})).unwrap();

        let config = VertexClientConfig::from_options_with_env(options, no_env).unwrap();
        assert_eq!(config.timeouts.request_timeout_secs, 90.0);
        assert_eq!(config.timeouts.connection_timeout_secs, 30.0);
    }

    #[test]
    fn test_explicit_connect_timeout_above_request_timeout_rejected() {
        let options = to_options(json!({
            "region": "us-east5",
            "timeout": 10,
            "connect_timeout": 20
        }))
        .unwrap();

        let err = VertexClientConfig::from_options_with_env(options, no_env).unwrap_err();
        assert!(err.is_configuration());
        assert!(err.to_string().contains("must be >= connection timeout"));
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        let config = VertexClientConfig::new("us-east5").with_base_url("ftp://example.com");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_debug_masks_token() {
        let config = VertexClientConfig::new("us-east5").with_access_token("ya29.very-secret");
        let rendered = format!("{:?}", config);
        assert!(rendered.contains("ya29***"));
        assert!(!rendered.contains("very-secret"));
    }
}
