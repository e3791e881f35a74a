//! Result of a create-message call

use super::events::RawMessageStreamEvent;
use super::messages::Message;
use super::stream::{collect_stream, collect_stream_async};
use crate::error::CirrusResult;
use futures::Stream;
use std::fmt;

/// Either a complete message or a provider-native event stream
pub enum Generation<S> {
    /// Non-streaming response
    Message(Message),
    /// Streaming response, consumed by the caller
    Stream(S),
}

impl<S> Generation<S> {
    /// Whether the provider answered with a stream
    pub fn is_stream(&self) -> bool {
        matches!(self, Generation::Stream(_))
    }

    /// The complete message, if this is not a stream
    pub fn into_message(self) -> Option<Message> {
        match self {
            Generation::Message(message) => Some(message),
            Generation::Stream(_) => None,
        }
    }

    /// The stream, if this is one
    pub fn into_stream(self) -> Option<S> {
        match self {
            Generation::Message(_) => None,
            Generation::Stream(stream) => Some(stream),
        }
    }

    /// Transform the stream side, leaving a message untouched
    pub fn map_stream<T>(self, f: impl FnOnce(S) -> T) -> Generation<T> {
        match self {
            Generation::Message(message) => Generation::Message(message),
            Generation::Stream(stream) => Generation::Stream(f(stream)),
        }
    }
}

impl<S> Generation<S>
where
    S: Iterator<Item = CirrusResult<RawMessageStreamEvent>>,
{
    /// Return the message, draining a blocking stream if necessary
    pub fn resolve(self) -> CirrusResult<Message> {
        match self {
            Generation::Message(message) => Ok(message),
            Generation::Stream(stream) => collect_stream(stream),
        }
    }
}

impl<S> Generation<S>
where
    S: Stream<Item = CirrusResult<RawMessageStreamEvent>> + Unpin,
{
    /// Return the message, draining an async stream if necessary
    pub async fn resolve_async(self) -> CirrusResult<Message> {
        match self {
            Generation::Message(message) => Ok(message),
            Generation::Stream(stream) => collect_stream_async(stream).await,
        }
    }
}

impl<S> fmt::Debug for Generation<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Generation::Message(message) => f.debug_tuple("Message").field(message).finish(),
            Generation::Stream(_) => f.write_str("Stream(..)"),
        }
    }
}
