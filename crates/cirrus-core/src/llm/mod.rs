//! Claude message generation through Vertex AI

pub mod adapter;
pub mod api;
pub mod events;
pub mod generation;
pub mod messages;
pub mod request;
pub mod sse_decoder;
pub mod stream;
pub mod vertex;

pub use adapter::{ClaudeVertexClient, MessageClient};
pub use api::{AsyncMessagesApi, MessagesApi};
pub use events::{ContentDelta, MessageDelta, MessageDeltaUsage, RawMessageStreamEvent};
pub use generation::Generation;
pub use messages::{ContentBlock, Message, MessageContent, MessageParam, MessageRole, Usage};
pub use request::{CREATE_PARAMS, CREATE_SIGNATURE, MessageCreateParams};
pub use sse_decoder::{SseDecoder, SseEvent};
pub use stream::{
    AsyncMessageStream, MessageAccumulator, MessageStream, collect_stream, collect_stream_async,
};
pub use vertex::{AsyncVertexClient, VertexClient};
