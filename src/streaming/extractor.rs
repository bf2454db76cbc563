//! Event extraction from raw stream chunks.
//!
//! A chunk may hold any number of `data: {...}` or `error: {...}` spans
//! mixed with other text. Each span is located with a brace-balancing
//! scanner that skips braces inside JSON strings and stops at the end of
//! the line, then parsed on its own. Spans that fail to parse are dropped.

use super::{EventKind, StreamEvent};

const DATA_PREFIX: &[u8] = b"data: ";
const ERROR_PREFIX: &[u8] = b"error: ";

/// Lazy iterator over the events embedded in one chunk.
///
/// Holds no state beyond its position in the chunk, so scanning the same
/// text twice yields the same events.
#[derive(Debug, Clone)]
pub struct EventExtractor<'a> {
    chunk: &'a str,
    pos: usize,
}

impl<'a> EventExtractor<'a> {
    /// Start scanning `chunk` from the beginning.
    #[must_use]
    pub const fn new(chunk: &'a str) -> Self {
        Self { chunk, pos: 0 }
    }
}

impl Iterator for EventExtractor<'_> {
    type Item = StreamEvent;

    fn next(&mut self) -> Option<StreamEvent> {
        let bytes = self.chunk.as_bytes();

        while let Some((kind, start)) = find_candidate(bytes, self.pos) {
            let end = match object_end(bytes, start) {
                Span::Closed(end) => end,
                // The rest of the line belongs to the unclosed object.
                Span::Unterminated { resume } => {
                    self.pos = resume;
                    continue;
                }
            };
            self.pos = end;

            // `start` and `end` sit on ASCII braces, so both are char boundaries.
            if let Ok(payload) = serde_json::from_str(&self.chunk[start..end]) {
                return Some(StreamEvent::new(kind, payload));
            }
        }

        self.pos = bytes.len();
        None
    }
}

/// Iterate over every well-formed event embedded in `chunk`, in order.
///
/// # Example
///
/// ```
/// use anthropic_http::streaming::extract_events;
///
/// let chunk = "data: {\"n\":1}\nerror: {\"n\":2}";
/// let values: Vec<_> = extract_events(chunk).map(|e| e.payload["n"].clone()).collect();
/// assert_eq!(values, vec![1, 2]);
/// ```
#[must_use]
pub const fn extract_events(chunk: &str) -> EventExtractor<'_> {
    EventExtractor::new(chunk)
}

/// Invoke `handler` once per well-formed event embedded in `chunk`.
///
/// Malformed events are skipped without calling `handler`.
pub fn for_each_event<F>(chunk: &str, handler: F)
where
    F: FnMut(StreamEvent),
{
    extract_events(chunk).for_each(handler);
}

/// Find the next `data: {` or `error: {` at or after `from`.
///
/// Returns the prefix kind and the index of the opening brace.
fn find_candidate(bytes: &[u8], from: usize) -> Option<(EventKind, usize)> {
    (from..bytes.len()).find_map(|i| {
        let rest = &bytes[i..];
        let (kind, len) = if starts_with_ignore_case(rest, DATA_PREFIX) {
            (EventKind::Data, DATA_PREFIX.len())
        } else if starts_with_ignore_case(rest, ERROR_PREFIX) {
            (EventKind::Error, ERROR_PREFIX.len())
        } else {
            return None;
        };
        (rest.get(len) == Some(&b'{')).then_some((kind, i + len))
    })
}

fn starts_with_ignore_case(haystack: &[u8], prefix: &[u8]) -> bool {
    haystack.len() >= prefix.len() && haystack[..prefix.len()].eq_ignore_ascii_case(prefix)
}

/// Outcome of scanning one candidate object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Span {
    /// Index one past the closing brace.
    Closed(usize),
    /// No closing brace before the end of the line; scanning continues at
    /// `resume`, just past the newline (or at the end of input).
    Unterminated { resume: usize },
}

/// Find the brace closing the object opened at `start`.
///
/// Each byte of the line is visited once, and the newline position is
/// reported back so the caller never rescans it.
fn object_end(bytes: &[u8], start: usize) -> Span {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, &b) in bytes[start..].iter().enumerate() {
        if b == b'\n' {
            return Span::Unterminated {
                resume: start + offset + 1,
            };
        }
        if in_string {
            if escaped {
                escaped = false;
            } else if b == b'\\' {
                escaped = true;
            } else if b == b'"' {
                in_string = false;
            }
            continue;
        }
        match b {
            b'"' => in_string = true,
            b'{' => depth += 1,
            b'}' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return Span::Closed(start + offset + 1);
                }
            }
            _ => {}
        }
    }

    Span::Unterminated {
        resume: bytes.len(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use serde_json::{json, Value};

    fn payloads(chunk: &str) -> Vec<Value> {
        extract_events(chunk).map(StreamEvent::into_payload).collect()
    }

    #[test]
    fn test_single_data_event() {
        let events: Vec<_> = extract_events(r#"data: {"type":"ping"}"#).collect();
        assert_eq!(
            events,
            vec![StreamEvent::new(EventKind::Data, json!({"type": "ping"}))]
        );
    }

    #[test]
    fn test_error_event() {
        let chunk = r#"error: {"type":"overloaded_error","message":"Overloaded"}"#;
        let events: Vec<_> = extract_events(chunk).collect();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind, EventKind::Error);
        assert_eq!(events[0].payload["message"], "Overloaded");
    }

    #[test]
    fn test_events_in_order() {
        let chunk = concat!(
            "event: message_start\n",
            "data: {\"seq\":1}\n\n",
            "event: content_block_delta\n",
            "data: {\"seq\":2}\n\n",
            "error: {\"seq\":3}\n",
        );
        assert_eq!(
            payloads(chunk),
            vec![json!({"seq": 1}), json!({"seq": 2}), json!({"seq": 3})]
        );
    }

    #[test]
    fn test_malformed_event_is_skipped() {
        let chunk = "data: {\"ok\":true}\ndata: {not json}\n";
        assert_eq!(payloads(chunk), vec![json!({"ok": true})]);
    }

    #[test]
    fn test_malformed_event_does_not_hide_later_siblings() {
        let chunk = "data: {not json}\ndata: {\"a\":1}\ndata: {\"b\":\"unterminated}\ndata: {\"c\":3}\n";
        assert_eq!(payloads(chunk), vec![json!({"a": 1}), json!({"c": 3})]);
    }

    #[test]
    fn test_prefix_is_case_insensitive() {
        let chunk = "DATA: {\"a\":1}\nError: {\"b\":2}";
        let events: Vec<_> = extract_events(chunk).collect();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].kind, EventKind::Data);
        assert_eq!(events[1].kind, EventKind::Error);
    }

    #[test]
    fn test_nested_objects() {
        let chunk = r#"data: {"type":"message_start","message":{"id":"msg_1","usage":{"input_tokens":3}}}"#;
        let events = payloads(chunk);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0]["message"]["usage"]["input_tokens"], 3);
    }

    #[test]
    fn test_braces_inside_strings() {
        let chunk = r#"data: {"text":"a } b { c \" }"} trailing"#;
        assert_eq!(payloads(chunk), vec![json!({"text": "a } b { c \" }"})]);
    }

    #[test]
    fn test_two_events_on_one_line() {
        let chunk = r#"data: {"a":1} data: {"b":2}"#;
        assert_eq!(payloads(chunk), vec![json!({"a": 1}), json!({"b": 2})]);
    }

    #[test]
    fn test_unclosed_object_consumes_rest_of_line() {
        let chunk = "data: {\"a\": data: {\"b\":1}\ndata: {\"c\":3}\n";
        assert_eq!(payloads(chunk), vec![json!({"c": 3})]);
    }

    #[test]
    fn test_long_line_of_unclosed_prefixes() {
        let mut chunk = "data: {".repeat(50_000);
        chunk.push_str("\ndata: {\"ok\":true}\n");
        assert_eq!(payloads(&chunk), vec![json!({"ok": true})]);
    }

    #[test]
    fn test_object_end_reports_resume_point() {
        let bytes = b"data: {\"a\":\nnext";
        assert_eq!(object_end(bytes, 6), Span::Unterminated { resume: 12 });
        assert_eq!(object_end(b"{\"a\":1}", 0), Span::Closed(7));
        assert_eq!(object_end(b"{", 0), Span::Unterminated { resume: 1 });
    }

    #[test]
    fn test_non_object_payloads_ignored() {
        let chunk = "data: [DONE]\ndata: \"text\"\ndata: 42\n";
        assert!(payloads(chunk).is_empty());
    }

    #[test]
    fn test_truncated_object_ignored() {
        let chunk = "data: {\"type\":\"content_block_delta\",\"delta\":{\"te";
        assert!(payloads(chunk).is_empty());
    }

    #[test]
    fn test_unrelated_text_ignored() {
        assert!(payloads("event: ping\nid: 1\nretry: 1000\n: comment\n").is_empty());
        assert!(payloads("").is_empty());
    }

    #[test]
    fn test_missing_space_after_colon_ignored() {
        assert!(payloads("data:{\"a\":1}").is_empty());
    }

    #[test]
    fn test_multibyte_text_around_events() {
        let chunk = "héllo → data: {\"emoji\":\"🦀\"} ✓";
        assert_eq!(payloads(chunk), vec![json!({"emoji": "🦀"})]);
    }

    #[test]
    fn test_for_each_event_invokes_once_per_valid_event() {
        let chunk = "data: {\"a\":1}\ndata: {oops}\nerror: {\"b\":2}\n";
        let mut seen = Vec::new();
        for_each_event(chunk, |event| seen.push(event.payload));
        assert_eq!(seen, vec![json!({"a": 1}), json!({"b": 2})]);
    }

    #[test]
    fn test_for_each_event_malformed_only() {
        let mut calls = 0;
        for_each_event("data: {nope}", |_| calls += 1);
        assert_eq!(calls, 0);
    }

    #[test]
    fn test_exhausted_iterator_stays_empty() {
        let mut extractor = extract_events("data: {\"a\":1}");
        assert!(extractor.next().is_some());
        assert!(extractor.next().is_none());
        assert!(extractor.next().is_none());
    }

    #[test]
    fn test_rescan_is_idempotent() {
        let chunk = "data: {\"a\":1}\ndata: {bad}\nerror: {\"b\":[1,{\"c\":2}]}";
        let first: Vec<_> = extract_events(chunk).collect();
        let second: Vec<_> = extract_events(chunk).collect();
        assert_eq!(first, second);
        assert_eq!(first.len(), 2);
    }

    proptest! {
        #[test]
        fn prop_rescan_is_idempotent(chunk in "\\PC*") {
            let first: Vec<_> = extract_events(&chunk).collect();
            let second: Vec<_> = extract_events(&chunk).collect();
            prop_assert_eq!(first, second);
        }

        #[test]
        fn prop_every_valid_event_found_in_order(values in proptest::collection::vec(any::<i64>(), 0..8)) {
            let chunk: String = values
                .iter()
                .map(|v| format!("event: x\ndata: {{\"v\":{v}}}\n\n"))
                .collect();
            let found: Vec<i64> = extract_events(&chunk)
                .filter_map(|e| e.payload["v"].as_i64())
                .collect();
            prop_assert_eq!(found, values);
        }
    }
}
