//! Incremental events of a streamed message
//!
//! Event sequence for one message:
//! - message_start: message metadata with empty content
//! - content_block_start / content_block_delta* / content_block_stop, per block
//! - message_delta: stop reason and final output usage
//! - message_stop: stream end marker
//!
//! `ping` events are keep-alives and never surface; an `error` event surfaces
//! as an `Err` item.

use super::messages::{ContentBlock, Message};
use super::sse_decoder::SseEvent;
use crate::error::{CirrusError, CirrusResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::trace;

/// Incremental message event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RawMessageStreamEvent {
    MessageStart {
        message: Message,
    },
    MessageDelta {
        delta: MessageDelta,
        #[serde(default)]
        usage: MessageDeltaUsage,
    },
    MessageStop,
    ContentBlockStart {
        index: usize,
        content_block: ContentBlock,
    },
    ContentBlockDelta {
        index: usize,
        delta: ContentDelta,
    },
    ContentBlockStop {
        index: usize,
    },
}

/// Top-level message changes carried by `message_delta`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MessageDelta {
    #[serde(default)]
    pub stop_reason: Option<String>,
    #[serde(default)]
    pub stop_sequence: Option<String>,
}

/// Cumulative usage carried by `message_delta`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageDeltaUsage {
    #[serde(default)]
    pub output_tokens: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_tokens: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache_creation_input_tokens: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache_read_input_tokens: Option<u32>,
}

/// Delta applied to the content block at `index`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentDelta {
    TextDelta { text: String },
    InputJsonDelta { partial_json: String },
    ThinkingDelta { thinking: String },
    SignatureDelta { signature: String },
    #[serde(other)]
    Other,
}

const MESSAGE_EVENTS: &[&str] = &[
    "message_start",
    "message_delta",
    "message_stop",
    "content_block_start",
    "content_block_delta",
    "content_block_stop",
];

/// Interpret one SSE event.
///
/// Returns `None` for events that carry nothing for the caller (keep-alives,
/// unknown event types).
pub fn parse_sse_event(event: &SseEvent) -> Option<CirrusResult<RawMessageStreamEvent>> {
    let name = match event.event_type.as_deref() {
        Some(name) => name.to_string(),
        None => serde_json::from_str::<Value>(&event.data)
            .ok()
            .and_then(|v| v["type"].as_str().map(str::to_string))
            .unwrap_or_default(),
    };

    match name.as_str() {
        "ping" => None,
        "error" => Some(Err(stream_error(&event.data))),
        known if MESSAGE_EVENTS.contains(&known) => {
            Some(serde_json::from_str(&event.data).map_err(|e| {
                CirrusError::json(format!("Invalid `{}` event: {}", known, e))
            }))
        }
        other => {
            trace!("Skipping unknown stream event '{}'", other);
            None
        }
    }
}

fn stream_error(data: &str) -> CirrusError {
    let parsed: Value = serde_json::from_str(data).unwrap_or(Value::Null);
    let error = &parsed["error"];
    match error["message"].as_str() {
        Some(message) => CirrusError::Api {
            status_code: None,
            error_type: error["type"].as_str().map(str::to_string),
            message: message.to_string(),
        },
        None => CirrusError::api(data.trim()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_text_delta() {
        let event = SseEvent::with_type(
            "content_block_delta",
            r#"{"type":"content_block_delta","index":0,"delta":{"type":"text_delta","text":"Hi"}}"#,
        );

        let parsed = parse_sse_event(&event).unwrap().unwrap();
        assert_eq!(
            parsed,
            RawMessageStreamEvent::ContentBlockDelta {
                index: 0,
                delta: ContentDelta::TextDelta {
                    text: "Hi".to_string()
                },
            }
        );
    }

    #[test]
    fn test_event_name_falls_back_to_payload_type() {
        let event = SseEvent::new(r#"{"type":"message_stop"}"#);
        let parsed = parse_sse_event(&event).unwrap().unwrap();
        assert_eq!(parsed, RawMessageStreamEvent::MessageStop);
    }

    #[test]
    fn test_ping_and_unknown_are_skipped() {
        assert!(parse_sse_event(&SseEvent::with_type("ping", r#"{"type":"ping"}"#)).is_none());
        assert!(parse_sse_event(&SseEvent::with_type("vertex_event", "{}")).is_none());
        assert!(parse_sse_event(&SseEvent::new("not json")).is_none());
    }

    #[test]
    fn test_error_event_becomes_api_error() {
        let event = SseEvent::with_type(
            "error",
            r#"{"type":"error","error":{"type":"overloaded_error","message":"Overloaded"}}"#,
        );

        let err = parse_sse_event(&event).unwrap().unwrap_err();
        assert_eq!(
            err,
            CirrusError::Api {
                status_code: None,
                error_type: Some("overloaded_error".to_string()),
                message: "Overloaded".to_string(),
            }
        );
    }

    #[test]
    fn test_malformed_known_event_is_an_error() {
        let event = SseEvent::with_type("content_block_stop", r#"{"type":"content_block_stop"}"#);
        let err = parse_sse_event(&event).unwrap().unwrap_err();
        assert!(matches!(err, CirrusError::Json { .. }));
    }

    #[test]
    fn test_message_delta_usage_defaults() {
        let event = SseEvent::with_type(
            "message_delta",
            r#"{"type":"message_delta","delta":{"stop_reason":"end_turn"}}"#,
        );
        match parse_sse_event(&event).unwrap().unwrap() {
            RawMessageStreamEvent::MessageDelta { delta, usage } => {
                assert_eq!(delta.stop_reason.as_deref(), Some("end_turn"));
                assert_eq!(usage, MessageDeltaUsage::default());
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }
}
