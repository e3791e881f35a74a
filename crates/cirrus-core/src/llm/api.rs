//! Provider client traits
//!
//! The adapter only talks to these seams, so the transport behind them can be
//! swapped (the Vertex clients in production, in-memory fakes in tests).

use super::events::RawMessageStreamEvent;
use super::generation::Generation;
use super::request::{CREATE_SIGNATURE, MessageCreateParams};
use crate::error::CirrusResult;
use crate::params::Signature;
use async_trait::async_trait;
use futures::Stream;

/// Blocking create-message operation
pub trait MessagesApi: Send + Sync {
    /// Stream returned for `stream: true` requests
    type Stream: Iterator<Item = CirrusResult<RawMessageStreamEvent>> + Send;

    /// Parameters accepted by [`MessagesApi::create`]
    fn create_signature(&self) -> Signature {
        CREATE_SIGNATURE
    }

    /// Create a message
    fn create(&self, params: MessageCreateParams) -> CirrusResult<Generation<Self::Stream>>;
}

/// Asynchronous create-message operation
#[async_trait]
pub trait AsyncMessagesApi: Send + Sync {
    /// Stream returned for `stream: true` requests
    type Stream: Stream<Item = CirrusResult<RawMessageStreamEvent>> + Send + Unpin;

    /// Parameters accepted by [`AsyncMessagesApi::create`]
    fn create_signature(&self) -> Signature {
        CREATE_SIGNATURE
    }

    /// Create a message
    async fn create(&self, params: MessageCreateParams) -> CirrusResult<Generation<Self::Stream>>;
}
