//! Streaming responses.

use futures_util::{Stream, StreamExt};
use reqwest::header::HeaderMap;
use reqwest::StatusCode;
use serde_json::Value;
use tokio::sync::mpsc;

use crate::error::Error;
use crate::streaming::{extract_events, StreamEvent, Utf8ChunkDecoder};

/// Capacity of the channel between the body reader task and the caller.
pub const EVENT_CHANNEL_CAPACITY: usize = 32;

/// A response whose body is delivered as extracted events.
///
/// Status and headers are available immediately. The body is read by a
/// background task; each chunk is scanned independently and its events are
/// sent in order. A transport failure mid-body arrives as a final `Err`.
/// Dropping the receiver stops the reader.
///
/// A non-2xx response yields no events; its body is read eagerly into
/// [`StreamingResponse::error_body`]. Use
/// [`StreamingResponse::error_for_status`] to turn it into an error.
#[derive(Debug)]
pub struct StreamingResponse {
    /// HTTP status.
    pub status: StatusCode,
    /// Response headers.
    pub headers: HeaderMap,
    /// Extracted events, in delivery order.
    pub events: mpsc::Receiver<Result<StreamEvent, Error>>,
    /// Body text of a non-2xx response.
    pub error_body: Option<String>,
}

impl StreamingResponse {
    /// Fail with [`Error::Api`] if the status is not 2xx.
    ///
    /// The message is the body's `error.message` when present, otherwise the
    /// raw body.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Api`] for any non-2xx status.
    pub fn error_for_status(self) -> Result<Self, Error> {
        if self.status.is_success() {
            return Ok(self);
        }
        let body = self.error_body.unwrap_or_default();
        let message = serde_json::from_str::<Value>(&body)
            .ok()
            .and_then(|v| v.pointer("/error/message").and_then(Value::as_str).map(str::to_string))
            .unwrap_or(body);
        Err(Error::Api {
            status: self.status.as_u16(),
            message,
        })
    }

    /// Receive the next event, or `None` once the body is exhausted.
    pub async fn next_event(&mut self) -> Option<Result<StreamEvent, Error>> {
        self.events.recv().await
    }

    /// Drain every remaining event.
    ///
    /// # Errors
    ///
    /// Returns the transport error that ended the body early, if any.
    pub async fn collect_events(mut self) -> Result<Vec<StreamEvent>, Error> {
        let mut events = Vec::new();
        while let Some(event) = self.events.recv().await {
            events.push(event?);
        }
        Ok(events)
    }
}

/// Read `body` to the end, sending every extracted event into `tx`.
///
/// Returns early when the receiver is dropped or a chunk fails.
pub(crate) async fn forward_events<S, B, E>(mut body: S, tx: mpsc::Sender<Result<StreamEvent, Error>>)
where
    S: Stream<Item = Result<B, E>> + Unpin,
    B: AsRef<[u8]>,
    E: Into<Error>,
{
    let mut decoder = Utf8ChunkDecoder::new();
    let mut chunks = 0usize;

    while let Some(chunk) = body.next().await {
        match chunk {
            Ok(bytes) => {
                chunks += 1;
                let text = decoder.decode(bytes.as_ref());
                for event in extract_events(&text) {
                    if tx.send(Ok(event)).await.is_err() {
                        tracing::debug!(chunks, "Event receiver dropped, stopping stream");
                        return;
                    }
                }
            }
            Err(e) => {
                let _ = tx.send(Err(e.into())).await;
                return;
            }
        }
    }

    let rest = decoder.finish();
    for event in extract_events(&rest) {
        if tx.send(Ok(event)).await.is_err() {
            return;
        }
    }

    tracing::debug!(chunks, "Stream body finished");
}
