//! Vertex `rawPredict` request shaping
//!
//! Pure functions: everything the blocking and async clients send is decided
//! here, so it can be checked without a network.

use crate::config::{PROJECT_ID_ENV, VertexClientConfig};
use crate::error::{CirrusError, CirrusResult};
use crate::llm::request::MessageCreateParams;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::time::Duration;
use tracing::debug;

/// `anthropic_version` sent when the body does not carry one
pub const VERTEX_ANTHROPIC_VERSION: &str = "vertex-2023-10-16";

/// A fully shaped request, ready to hand to an HTTP client
#[derive(Clone, PartialEq)]
pub struct VertexRequest {
    pub url: String,
    pub body: Value,
    pub stream: bool,
    pub access_token: String,
    pub headers: HashMap<String, String>,
    pub timeout: Option<Duration>,
}

impl fmt::Debug for VertexRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VertexRequest")
            .field("url", &self.url)
            .field("stream", &self.stream)
            .field("headers", &self.headers.keys())
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

/// Endpoint for a model; `stream` selects `streamRawPredict`
pub fn endpoint_url(config: &VertexClientConfig, project_id: &str, model: &str, stream: bool) -> String {
    let specifier = if stream {
        "streamRawPredict"
    } else {
        "rawPredict"
    };
    format!(
        "{}/projects/{}/locations/{}/publishers/anthropic/models/{}:{}",
        config.base_url, project_id, config.region, model, specifier
    )
}

/// Shape a create-message call into a Vertex request
pub fn build_request(
    config: &VertexClientConfig,
    params: &MessageCreateParams,
) -> CirrusResult<VertexRequest> {
    let project_id = config.project_id.as_deref().ok_or_else(|| {
        CirrusError::config(format!(
            "No project_id was given. Set the `project_id` option or the {} environment variable",
            PROJECT_ID_ENV
        ))
    })?;
    let access_token = config.access_token.clone().ok_or_else(|| {
        CirrusError::config("No access_token was given. Set the `access_token` option")
    })?;
    if params.model.trim().is_empty() {
        return Err(CirrusError::config("`model` must not be empty"));
    }

    let timeout = params.timeout.map(request_timeout).transpose()?;
    let stream = params.is_stream();

    let mut body = match serde_json::to_value(params)? {
        Value::Object(map) => map,
        _ => return Err(CirrusError::json("Message parameters did not serialize to an object")),
    };
    body.remove("model");
    body.entry("anthropic_version")
        .or_insert_with(|| Value::String(VERTEX_ANTHROPIC_VERSION.to_string()));
    for (key, value) in &params.extra_body {
        body.insert(key.clone(), value.clone());
    }

    let url = endpoint_url(config, project_id, &params.model, stream);
    debug!("Prepared Vertex request to {} (stream={})", url, stream);

    Ok(VertexRequest {
        url,
        body: Value::Object(body),
        stream,
        access_token,
        headers: params.extra_headers.clone(),
        timeout,
    })
}

fn request_timeout(secs: f64) -> CirrusResult<Duration> {
    if secs.is_finite() && secs > 0.0 {
        Ok(Duration::from_secs_f64(secs))
    } else {
        Err(CirrusError::config(format!(
            "`timeout` must be a positive number of seconds, got {}",
            secs
        )))
    }
}

/// Convert configured headers into a header map, skipping invalid entries
pub fn header_map(headers: &HashMap<String, String>) -> HeaderMap {
    let mut map = HeaderMap::new();
    for (key, value) in headers {
        match (
            HeaderName::from_bytes(key.as_bytes()),
            HeaderValue::from_str(value),
        ) {
            (Ok(name), Ok(val)) => {
                map.insert(name, val);
            }
            _ => debug!("Skipping invalid header '{}'", key),
        }
    }
    map
}
