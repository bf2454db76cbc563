//! Anthropic HTTP client
//!
//! A minimal client for the Anthropic API: authenticated requests,
//! JSON-serialized parameters, and tolerant extraction of events from
//! streamed responses.
//!
//! # Features
//!
//! - Explicit, shareable configuration with lazy credential checking
//! - `GET`, JSON `POST`, multipart `POST` and `DELETE` with raw responses
//! - Streaming responses as a channel of parsed `data:` / `error:` events
//! - Malformed events are skipped without disturbing their neighbours
//!
//! # Quick Start
//!
//! ```no_run
//! use anthropic_http::{Client, Configuration, Message, MessagesRequest};
//!
//! # async fn run() -> Result<(), anthropic_http::Error> {
//! let client = Client::new(Configuration::new().with_access_token("sk-ant-xxx"))?;
//! let request = MessagesRequest::new("claude-3-haiku-20240307", 64, vec![Message::user("Hi")]);
//!
//! let mut stream = client.messages_stream(&request).await?;
//! while let Some(event) = stream.next_event().await {
//!     if let Some(text) = event?.text_delta() {
//!         print!("{text}");
//!     }
//! }
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod streaming;
pub mod types;

pub use client::Client;
pub use config::{Configuration, SecretString, SharedConfiguration};
pub use error::{ConfigError, Error};
pub use http::{HttpClient, StreamingResponse};
pub use streaming::{extract_events, parse_concatenated_objects, EventKind, StreamEvent};
pub use types::{JsonResponse, Message, MessagesRequest};
