//! Streaming support for the Anthropic API.
//!
//! This module provides:
//! - Tolerant extraction of `data: {...}` / `error: {...}` events from raw chunks
//! - Stream event types
//! - Incremental UTF-8 decoding of response body chunks
//! - A best-effort decoder for bodies holding several concatenated JSON objects
//!
//! Extraction is stateless: every chunk is scanned on its own and a
//! malformed event never affects its siblings.
//!
//! # Example
//!
//! ```
//! use anthropic_http::streaming::{extract_events, EventKind};
//!
//! let chunk = "event: ping\ndata: {\"type\":\"ping\"}\ndata: {broken}\n";
//! let events: Vec<_> = extract_events(chunk).collect();
//!
//! assert_eq!(events.len(), 1);
//! assert_eq!(events[0].kind, EventKind::Data);
//! assert_eq!(events[0].event_type(), Some("ping"));
//! ```

mod decoder;
mod extractor;
mod repair;

pub use decoder::Utf8ChunkDecoder;
pub use extractor::{extract_events, for_each_event, EventExtractor};
pub use repair::parse_concatenated_objects;

use serde_json::Value;

/// Wire prefix an event was found under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// `data: {...}`
    Data,
    /// `error: {...}`
    Error,
}

/// One JSON object extracted from a streamed chunk.
#[derive(Debug, Clone, PartialEq)]
pub struct StreamEvent {
    /// Prefix the object appeared under.
    pub kind: EventKind,
    /// The parsed object.
    pub payload: Value,
}

impl StreamEvent {
    /// Create a new event.
    #[must_use]
    pub const fn new(kind: EventKind, payload: Value) -> Self {
        Self { kind, payload }
    }

    /// True for events carried under `error:` or whose payload is typed `error`.
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.kind == EventKind::Error || self.event_type() == Some("error")
    }

    /// The payload's `type` field, if any (e.g. `content_block_delta`).
    #[must_use]
    pub fn event_type(&self) -> Option<&str> {
        self.payload.get("type").and_then(Value::as_str)
    }

    /// Text carried by a `content_block_delta` / `text_delta` event.
    #[must_use]
    pub fn text_delta(&self) -> Option<&str> {
        if self.event_type() != Some("content_block_delta") {
            return None;
        }
        let delta = self.payload.get("delta")?;
        match delta.get("type").and_then(Value::as_str) {
            Some("text_delta") => delta.get("text").and_then(Value::as_str),
            _ => None,
        }
    }

    /// Consume the event, returning the parsed object.
    #[must_use]
    pub fn into_payload(self) -> Value {
        self.payload
    }
}
