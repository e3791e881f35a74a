//! Cirrus Core Library
//!
//! A thin adaptation layer over Claude served through Google Vertex AI:
//! option filtering against declared signatures, blocking and async transport
//! clients, and an adapter that routes one option map to both.

pub mod config;
pub mod error;
pub mod llm;
pub mod params;

// Re-export commonly used types
pub use config::{TimeoutConfig, VertexClientConfig, load_options, options_from_env};
pub use error::{CirrusError, CirrusResult};
pub use llm::{
    AsyncMessageStream, AsyncMessagesApi, AsyncVertexClient, ClaudeVertexClient, Generation,
    Message, MessageClient, MessageCreateParams, MessageParam, MessageStream, MessagesApi,
    RawMessageStreamEvent, VertexClient,
};
pub use params::{FromOptions, Options, Signature, filter_params, to_options};
