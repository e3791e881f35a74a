//! Streamed message responses
//!
//! Two provider-native stream shapes:
//! - [`MessageStream`]: blocking `Iterator` over a byte reader
//! - [`AsyncMessageStream`]: `futures::Stream` over a byte stream
//!
//! Both decode SSE and yield [`RawMessageStreamEvent`]s; [`MessageAccumulator`]
//! folds a sequence of events back into a complete [`Message`].

use super::events::{ContentDelta, RawMessageStreamEvent, parse_sse_event};
use super::messages::{ContentBlock, Message};
use super::sse_decoder::{SseDecoder, SseEvent};
use crate::error::{CirrusError, CirrusResult};
use futures::{Stream, StreamExt};
use std::collections::{HashMap, VecDeque};
use std::fmt::Display;
use std::io::Read;
use std::pin::Pin;
use std::task::{Context, Poll};

const READ_BUFFER_SIZE: usize = 8 * 1024;

/// Blocking stream of message events
pub struct MessageStream {
    reader: Box<dyn Read + Send>,
    decoder: SseDecoder,
    pending: VecDeque<SseEvent>,
    exhausted: bool,
}

impl MessageStream {
    /// Decode events from any byte reader (e.g. a blocking HTTP response body)
    pub fn from_reader(reader: impl Read + Send + 'static) -> Self {
        Self {
            reader: Box::new(reader),
            decoder: SseDecoder::new(),
            pending: VecDeque::new(),
            exhausted: false,
        }
    }

    /// Consume the stream into a complete message
    pub fn collect_message(self) -> CirrusResult<Message> {
        collect_stream(self)
    }
}

impl Iterator for MessageStream {
    type Item = CirrusResult<RawMessageStreamEvent>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut buf = [0u8; READ_BUFFER_SIZE];
        loop {
            while let Some(event) = self.pending.pop_front() {
                if let Some(item) = parse_sse_event(&event) {
                    return Some(item);
                }
            }

            if self.exhausted {
                return None;
            }

            match self.reader.read(&mut buf) {
                Ok(0) => {
                    self.exhausted = true;
                    self.pending.extend(self.decoder.finish());
                }
                Ok(n) => self.pending.extend(self.decoder.feed(&buf[..n])),
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => {}
                Err(e) => {
                    self.exhausted = true;
                    return Some(Err(CirrusError::http(format!("Stream error: {}", e))));
                }
            }
        }
    }
}

impl std::iter::FusedIterator for MessageStream {}

struct ByteStreamState<S> {
    inner: Pin<Box<S>>,
    decoder: SseDecoder,
    pending: VecDeque<SseEvent>,
    exhausted: bool,
}

/// Asynchronous stream of message events
pub struct AsyncMessageStream {
    inner: Pin<Box<dyn Stream<Item = CirrusResult<RawMessageStreamEvent>> + Send>>,
}

impl AsyncMessageStream {
    /// Decode events from a stream of byte chunks (e.g. `reqwest::Response::bytes_stream`)
    pub fn from_byte_stream<S, B, E>(byte_stream: S) -> Self
    where
        S: Stream<Item = Result<B, E>> + Send + 'static,
        B: AsRef<[u8]> + Send + 'static,
        E: Display + Send + 'static,
    {
        let state = ByteStreamState {
            inner: Box::pin(byte_stream),
            decoder: SseDecoder::new(),
            pending: VecDeque::new(),
            exhausted: false,
        };

        let events = futures::stream::unfold(state, |mut state| async move {
            loop {
                while let Some(event) = state.pending.pop_front() {
                    if let Some(item) = parse_sse_event(&event) {
                        return Some((item, state));
                    }
                }

                if state.exhausted {
                    return None;
                }

                match state.inner.next().await {
                    Some(Ok(chunk)) => {
                        let events = state.decoder.feed(chunk.as_ref());
                        state.pending.extend(events);
                    }
                    Some(Err(e)) => {
                        state.exhausted = true;
                        let err = CirrusError::http(format!("Stream error: {}", e));
                        return Some((Err(err), state));
                    }
                    None => {
                        state.exhausted = true;
                        let trailing = state.decoder.finish();
                        state.pending.extend(trailing);
                    }
                }
            }
        });

        Self {
            inner: Box::pin(events),
        }
    }

    /// Consume the stream into a complete message
    pub async fn collect_message(self) -> CirrusResult<Message> {
        collect_stream_async(self).await
    }
}

impl Stream for AsyncMessageStream {
    type Item = CirrusResult<RawMessageStreamEvent>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.inner.as_mut().poll_next(cx)
    }
}

/// Folds stream events into a [`Message`]
#[derive(Debug, Default)]
pub struct MessageAccumulator {
    message: Option<Message>,
    tool_input: HashMap<usize, String>,
}

impl MessageAccumulator {
    /// Create an empty accumulator
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one event; fails on events that arrive out of order
    pub fn apply(&mut self, event: &RawMessageStreamEvent) -> CirrusResult<()> {
        if let RawMessageStreamEvent::MessageStart { message } = event {
            self.message = Some(message.clone());
            self.tool_input.clear();
            return Ok(());
        }

        let message = self
            .message
            .as_mut()
            .ok_or_else(|| CirrusError::json("Stream event received before message_start"))?;

        match event {
            RawMessageStreamEvent::MessageStart { .. } | RawMessageStreamEvent::MessageStop => {}
            RawMessageStreamEvent::ContentBlockStart {
                index,
                content_block,
            } => {
                if *index != message.content.len() {
                    return Err(CirrusError::json(format!(
                        "content_block_start for index {} but {} block(s) exist",
                        index,
                        message.content.len()
                    )));
                }
                message.content.push(content_block.clone());
            }
            RawMessageStreamEvent::ContentBlockDelta { index, delta } => {
                let block = message.content.get_mut(*index).ok_or_else(|| {
                    CirrusError::json(format!("content_block_delta for unknown index {}", index))
                })?;
                match (block, delta) {
                    (ContentBlock::Text { text }, ContentDelta::TextDelta { text: more }) => {
                        text.push_str(more)
                    }
                    (ContentBlock::ToolUse { .. }, ContentDelta::InputJsonDelta { partial_json }) => {
                        self.tool_input
                            .entry(*index)
                            .or_default()
                            .push_str(partial_json)
                    }
                    (
                        ContentBlock::Thinking { thinking, .. },
                        ContentDelta::ThinkingDelta { thinking: more },
                    ) => thinking.push_str(more),
                    (
                        ContentBlock::Thinking { signature, .. },
                        ContentDelta::SignatureDelta { signature: more },
                    ) => signature.push_str(more),
                    _ => {}
                }
            }
            RawMessageStreamEvent::ContentBlockStop { index } => {
                if let Some(json) = self.tool_input.remove(index) {
                    if let Some(ContentBlock::ToolUse { input, .. }) = message.content.get_mut(*index)
                    {
                        *input = if json.trim().is_empty() {
                            serde_json::Value::Object(Default::default())
                        } else {
                            serde_json::from_str(&json).map_err(|e| {
                                CirrusError::json(format!(
                                    "Invalid tool input JSON for block {}: {}",
                                    index, e
                                ))
                            })?
                        };
                    }
                }
            }
            RawMessageStreamEvent::MessageDelta { delta, usage } => {
                message.stop_reason = delta.stop_reason.clone();
                message.stop_sequence = delta.stop_sequence.clone();
                message.usage.output_tokens = usage.output_tokens;
                if let Some(input) = usage.input_tokens {
                    message.usage.input_tokens = input;
                }
                if usage.cache_creation_input_tokens.is_some() {
                    message.usage.cache_creation_input_tokens = usage.cache_creation_input_tokens;
                }
                if usage.cache_read_input_tokens.is_some() {
                    message.usage.cache_read_input_tokens = usage.cache_read_input_tokens;
                }
            }
        }
        Ok(())
    }

    /// The message accumulated so far
    pub fn snapshot(&self) -> Option<&Message> {
        self.message.as_ref()
    }

    /// Finish accumulation
    pub fn finish(self) -> CirrusResult<Message> {
        self.message
            .ok_or_else(|| CirrusError::json("Stream ended without message_start"))
    }
}

/// Collect a blocking event stream into a complete message
pub fn collect_stream<I>(events: I) -> CirrusResult<Message>
where
    I: IntoIterator<Item = CirrusResult<RawMessageStreamEvent>>,
{
    let mut accumulator = MessageAccumulator::new();
    for event in events {
        accumulator.apply(&event?)?;
    }
    accumulator.finish()
}

/// Collect an asynchronous event stream into a complete message
pub async fn collect_stream_async<S>(mut events: S) -> CirrusResult<Message>
where
    S: Stream<Item = CirrusResult<RawMessageStreamEvent>> + Unpin,
{
    let mut accumulator = MessageAccumulator::new();
    while let Some(event) = events.next().await {
        accumulator.apply(&event?)?;
    }
    accumulator.finish()
}
