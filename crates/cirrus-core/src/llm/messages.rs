//! Message types exchanged with the provider

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Role of a message in the conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// User message (human input, tool results)
    User,
    /// Assistant message (model output)
    Assistant,
}

impl std::fmt::Display for MessageRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MessageRole::User => write!(f, "user"),
            MessageRole::Assistant => write!(f, "assistant"),
        }
    }
}

/// Message content: plain text or a list of provider content blocks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MessageContent {
    Text(String),
    Blocks(Vec<Value>),
}

/// One input turn of a conversation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageParam {
    pub role: MessageRole,
    pub content: MessageContent,
}

impl MessageParam {
    /// Create a user turn with text content
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: MessageContent::Text(text.into()),
        }
    }

    /// Create an assistant turn with text content
    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: MessageContent::Text(text.into()),
        }
    }

    /// Create a user turn carrying a base64 image followed by text.
    ///
    /// `media_type` is e.g. `image/png`; `data` is the base64 payload.
    pub fn user_with_image(
        media_type: impl Into<String>,
        data: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            role: MessageRole::User,
            content: MessageContent::Blocks(vec![
                serde_json::json!({
                    "type": "image",
                    "source": {
                        "type": "base64",
                        "media_type": media_type.into(),
                        "data": data.into(),
                    }
                }),
                serde_json::json!({"type": "text", "text": text.into()}),
            ]),
        }
    }
}

/// Content block of a generated message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    Text {
        text: String,
    },
    ToolUse {
        id: String,
        name: String,
        #[serde(default)]
        input: Value,
    },
    Thinking {
        thinking: String,
        #[serde(default)]
        signature: String,
    },
    RedactedThinking {
        data: String,
    },
    /// Block types this crate does not model, kept as received
    #[serde(untagged)]
    Other(Value),
}

/// Token usage reported by the provider
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usage {
    #[serde(default)]
    pub input_tokens: u32,
    #[serde(default)]
    pub output_tokens: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache_creation_input_tokens: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache_read_input_tokens: Option<u32>,
}

/// A completed message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    #[serde(rename = "type", default = "Message::default_kind")]
    pub kind: String,
    pub role: MessageRole,
    #[serde(default)]
    pub content: Vec<ContentBlock>,
    pub model: String,
    #[serde(default)]
    pub stop_reason: Option<String>,
    #[serde(default)]
    pub stop_sequence: Option<String>,
    #[serde(default)]
    pub usage: Usage,
}

impl Message {
    fn default_kind() -> String {
        "message".to_string()
    }

    /// Concatenated text of all text blocks
    pub fn text(&self) -> String {
        self.content
            .iter()
            .filter_map(|block| match block {
                ContentBlock::Text { text } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Tool use blocks, in order
    pub fn tool_uses(&self) -> impl Iterator<Item = &ContentBlock> {
        self.content
            .iter()
            .filter(|block| matches!(block, ContentBlock::ToolUse { .. }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_message_deserialization() {
        let message: Message = serde_json::from_value(json!({
            "id": "msg_vrtx_01",
            "type": "message",
            "role": "assistant",
            "model": "claude-sonnet-4@20250514",
            "content": [
                {"type": "text", "text": "Hello"},
                {"type": "tool_use", "id": "toolu_1", "name": "lookup", "input": {"q": "x"}},
                {"type": "server_tool_use", "id": "srvtoolu_1"}
            ],
            "stop_reason": "tool_use",
            "stop_sequence": null,
            "usage": {"input_tokens": 12, "output_tokens": 6}
        }))
        .unwrap();

        assert_eq!(message.role, MessageRole::Assistant);
        assert_eq!(message.text(), "Hello");
        assert_eq!(message.tool_uses().count(), 1);
        assert_eq!(
            message.content[2],
            ContentBlock::Other(json!({"type": "server_tool_use", "id": "srvtoolu_1"}))
        );
        assert_eq!(message.usage.input_tokens, 12);
        assert_eq!(message.usage.cache_read_input_tokens, None);
    }

    #[test]
    fn test_unmodeled_blocks_can_be_sent_back() {
        let block = json!({
            "type": "server_tool_use",
            "id": "srvtoolu_1",
            "name": "web_search",
            "input": {"query": "vertex regions"}
        });
        let content: Vec<ContentBlock> =
            serde_json::from_value(json!([{"type": "text", "text": "Searching"}, block])).unwrap();

        let next_turn = MessageParam {
            role: MessageRole::Assistant,
            content: MessageContent::Blocks(
                content
                    .iter()
                    .map(|b| serde_json::to_value(b).unwrap())
                    .collect(),
            ),
        };
        let json = serde_json::to_value(next_turn).unwrap();
        assert_eq!(json["content"][0], json!({"type": "text", "text": "Searching"}));
        assert_eq!(json["content"][1], block);
    }

    #[test]
    fn test_message_param_serialization() {
        let json = serde_json::to_value(MessageParam::user("Hi")).unwrap();
        assert_eq!(json, json!({"role": "user", "content": "Hi"}));

        let json = serde_json::to_value(MessageParam::user_with_image("image/png", "AAAA", "What is this?"))
            .unwrap();
        assert_eq!(json["content"][0]["source"]["media_type"], "image/png");
        assert_eq!(json["content"][1]["text"], "What is this?");
    }

    #[test]
    fn test_message_param_deserializes_both_content_shapes() {
        let text: MessageParam =
            serde_json::from_value(json!({"role": "assistant", "content": "ok"})).unwrap();
        assert_eq!(text, MessageParam::assistant("ok"));

        let blocks: MessageParam = serde_json::from_value(
            json!({"role": "user", "content": [{"type": "text", "text": "a"}]}),
        )
        .unwrap();
        assert!(matches!(blocks.content, MessageContent::Blocks(ref b) if b.len() == 1));
    }

    #[test]
    fn test_role_display() {
        assert_eq!(MessageRole::User.to_string(), "user");
        assert_eq!(MessageRole::Assistant.to_string(), "assistant");
    }
}
