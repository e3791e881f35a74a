//! Parameters of the create-message operation

use super::messages::MessageParam;
use crate::error::{CirrusError, CirrusResult};
use crate::params::{Options, Signature};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Option keys accepted by the create-message operation
pub const CREATE_PARAMS: &[&str] = &[
    "model",
    "messages",
    "max_tokens",
    "system",
    "temperature",
    "top_p",
    "top_k",
    "stop_sequences",
    "stream",
    "metadata",
    "tools",
    "tool_choice",
    "thinking",
    "extra_headers",
    "extra_body",
    "timeout",
];

/// Declared signature of the create-message operation
pub const CREATE_SIGNATURE: Signature = Signature::new("messages.create", CREATE_PARAMS);

/// Typed create-message request
///
/// Body fields serialize as the provider expects them. `extra_headers`,
/// `extra_body` and `timeout` only shape the HTTP request and are never
/// serialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageCreateParams {
    pub model: String,
    pub messages: Vec<MessageParam>,
    pub max_tokens: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_k: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stop_sequences: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stream: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_choice: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thinking: Option<Value>,

    /// Additional request headers
    #[serde(default, skip_serializing)]
    pub extra_headers: HashMap<String, String>,
    /// Additional body fields, merged over the serialized body
    #[serde(default, skip_serializing)]
    pub extra_body: Options,
    /// Per-request timeout in seconds
    #[serde(default, skip_serializing)]
    pub timeout: Option<f64>,
}

impl MessageCreateParams {
    /// Minimal request
    pub fn new(model: impl Into<String>, max_tokens: u32, messages: Vec<MessageParam>) -> Self {
        Self {
            model: model.into(),
            messages,
            max_tokens,
            system: None,
            temperature: None,
            top_p: None,
            top_k: None,
            stop_sequences: None,
            stream: None,
            metadata: None,
            tools: None,
            tool_choice: None,
            thinking: None,
            extra_headers: HashMap::new(),
            extra_body: Options::new(),
            timeout: None,
        }
    }

    /// Parse from an option map already reduced to [`CREATE_SIGNATURE`]
    pub fn from_options(options: Options) -> CirrusResult<Self> {
        serde_json::from_value(Value::Object(options)).map_err(|e| {
            CirrusError::config_with_context(
                format!("Invalid message parameters: {}", e),
                "Parsing create-message options",
            )
        })
    }

    pub fn with_system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(Value::String(system.into()));
        self
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_stream(mut self, stream: bool) -> Self {
        self.stream = Some(stream);
        self
    }

    pub fn with_extra_body(mut self, key: impl Into<String>, value: Value) -> Self {
        self.extra_body.insert(key.into(), value);
        self
    }

    /// Whether the response should be streamed
    pub fn is_stream(&self) -> bool {
        self.stream.unwrap_or(false)
    }
}
