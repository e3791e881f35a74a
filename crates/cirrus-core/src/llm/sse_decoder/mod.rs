//! Server-Sent Events (SSE) decoder for streaming responses
//!
//! Network chunks are buffered as raw bytes until a blank line closes an
//! event. Only complete events are decoded as UTF-8, so multi-byte characters
//! split across chunk boundaries never need special handling: the delimiter
//! bytes (`\n`, `\r`) cannot occur inside a multi-byte sequence.

mod event;

pub use event::SseEvent;

/// Buffered SSE decoder that handles partial chunks
///
/// SSE format:
/// ```text
/// event: event_type\n
/// data: json_payload\n
/// data: continued_data\n
/// \n
/// ```
#[derive(Debug, Default)]
pub struct SseDecoder {
    buffer: Vec<u8>,
    // Offset where the next delimiter search starts
    scanned: usize,
}

impl SseDecoder {
    /// Create a new SSE decoder
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed raw bytes into the decoder and extract complete events
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<SseEvent> {
        self.buffer.extend_from_slice(chunk);

        let mut events = Vec::new();
        while let Some((end, delimiter_len)) = find_event_boundary(&self.buffer, self.scanned) {
            let raw: Vec<u8> = self.buffer.drain(..end + delimiter_len).collect();
            self.scanned = 0;
            if let Some(event) = parse_event(&raw[..end]) {
                events.push(event);
            }
        }
        // A delimiter is at most 4 bytes, so only the tail can still start one
        self.scanned = self.buffer.len().saturating_sub(MAX_DELIMITER_LEN - 1);
        events
    }

    /// Flush a trailing event that was not terminated by a blank line
    pub fn finish(&mut self) -> Option<SseEvent> {
        self.scanned = 0;
        let raw = std::mem::take(&mut self.buffer);
        parse_event(&raw)
    }

    /// Clear the internal buffer
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.scanned = 0;
    }

    /// Check if there's buffered data not yet emitted as an event
    pub fn has_remaining(&self) -> bool {
        !self.buffer.is_empty()
    }

    /// Number of buffered bytes
    pub fn remaining_len(&self) -> usize {
        self.buffer.len()
    }
}

const MAX_DELIMITER_LEN: usize = 4;

/// Position and length of the first blank-line delimiter at or after `from`
fn find_event_boundary(buffer: &[u8], from: usize) -> Option<(usize, usize)> {
    (from..buffer.len()).find_map(|i| {
        let rest = &buffer[i..];
        if rest.starts_with(b"\r\n\r\n") {
            Some((i, 4))
        } else if rest.starts_with(b"\n\n") || rest.starts_with(b"\r\r") {
            Some((i, 2))
        } else {
            None
        }
    })
}

/// Parse a single event block; blocks without `data` produce no event
fn parse_event(raw: &[u8]) -> Option<SseEvent> {
    let text = String::from_utf8_lossy(raw);

    let mut event_type = None;
    let mut id = None;
    let mut data_lines: Vec<&str> = Vec::new();

    for line in text.split(['\n', '\r']) {
        if line.is_empty() || line.starts_with(':') {
            continue;
        }

        let (field, value) = match line.split_once(':') {
            Some((field, value)) => (field, value.strip_prefix(' ').unwrap_or(value)),
            None => (line, ""),
        };

        match field {
            "event" => event_type = Some(value.to_string()),
            "data" => data_lines.push(value),
            "id" => id = Some(value.to_string()),
            // retry: and unknown fields are ignored
            _ => {}
        }
    }

    if data_lines.is_empty() {
        return None;
    }

    Some(SseEvent {
        event_type,
        data: data_lines.join("\n"),
        id,
    })
}
