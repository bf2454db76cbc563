//! HTTP transport for the Anthropic API.
//!
//! This module provides:
//! - URI and header construction from the shared configuration
//! - `GET`, JSON `POST`, multipart `POST` and `DELETE` calls
//! - Streaming `POST` with tolerant event extraction
//!
//! Responses are returned raw; interpreting status codes is left to the
//! caller. Transport failures surface as [`Error::Transport`] unmodified and
//! nothing is retried.

#![allow(clippy::missing_errors_doc)]
#![allow(clippy::cast_possible_truncation)]

mod headers;
mod stream;

pub use headers::{build_headers, APPLICATION_JSON, MULTIPART_FORM_DATA};
pub use stream::{StreamingResponse, EVENT_CHANNEL_CAPACITY};

use std::time::Instant;

use reqwest::header::{HeaderValue, CONTENT_TYPE};
use reqwest::{Body, Client, Method, Response};
use serde::Serialize;
use tokio::sync::mpsc;

use crate::config::SharedConfiguration;
use crate::error::Error;

/// Low-level Anthropic HTTP client.
///
/// Reads a fresh configuration snapshot for every request, so changes made
/// through [`SharedConfiguration::configure`] apply to the next call.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    config: SharedConfiguration,
}

impl HttpClient {
    /// Create a client reading from `config`.
    pub fn new(config: impl Into<SharedConfiguration>) -> Result<Self, Error> {
        let client = Client::builder().build()?;
        Ok(Self {
            client,
            config: config.into(),
        })
    }

    /// Create a client around an existing `reqwest::Client`.
    #[must_use]
    pub fn with_client(client: Client, config: impl Into<SharedConfiguration>) -> Self {
        Self {
            client,
            config: config.into(),
        }
    }

    /// The configuration handle this client reads from.
    #[must_use]
    pub const fn configuration(&self) -> &SharedConfiguration {
        &self.config
    }

    /// Full URI for `path` under the current configuration.
    #[must_use]
    pub fn uri(&self, path: &str) -> String {
        self.config.get().uri(path)
    }

    /// `GET {uri_base}{api_version}{path}`.
    pub async fn get(&self, path: &str) -> Result<Response, Error> {
        self.execute(Method::GET, path, None, false).await
    }

    /// `POST` with `parameters` serialized as the JSON body.
    pub async fn json_post<P>(&self, path: &str, parameters: &P) -> Result<Response, Error>
    where
        P: Serialize + ?Sized,
    {
        let body = serde_json::to_string(parameters)?;
        self.execute(Method::POST, path, Some(Body::from(body)), false)
            .await
    }

    /// `POST` with `Content-Type: multipart/form-data` and the body sent as-is.
    ///
    /// The content type overrides configured extra headers.
    pub async fn multipart_post(
        &self,
        path: &str,
        body: Option<impl Into<Body>>,
    ) -> Result<Response, Error> {
        self.execute(Method::POST, path, body.map(Into::into), true)
            .await
    }

    /// `DELETE {uri_base}{api_version}{path}`.
    pub async fn delete(&self, path: &str) -> Result<Response, Error> {
        self.execute(Method::DELETE, path, None, false).await
    }

    /// JSON `POST` whose body is read as a stream of events.
    ///
    /// `parameters` are sent unchanged; set `"stream": true` in them if the
    /// endpoint requires it. A non-2xx body is read in full into
    /// [`StreamingResponse::error_body`] and yields no events.
    pub async fn json_post_stream<P>(
        &self,
        path: &str,
        parameters: &P,
    ) -> Result<StreamingResponse, Error>
    where
        P: Serialize + ?Sized,
    {
        let response = self.json_post(path, parameters).await?;
        let status = response.status();
        let headers = response.headers().clone();

        let (tx, rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);
        if !status.is_success() {
            drop(tx);
            let body = response.text().await?;
            return Ok(StreamingResponse {
                status,
                headers,
                events: rx,
                error_body: Some(body),
            });
        }

        tokio::spawn(stream::forward_events(response.bytes_stream(), tx));

        Ok(StreamingResponse {
            status,
            headers,
            events: rx,
            error_body: None,
        })
    }

    async fn execute(
        &self,
        method: Method,
        path: &str,
        body: Option<Body>,
        multipart: bool,
    ) -> Result<Response, Error> {
        let config = self.config.get();
        let url = config.uri(path);

        // Fails on a missing credential before anything is sent.
        let mut headers = build_headers(&config)?;
        if multipart {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static(MULTIPART_FORM_DATA));
        }

        tracing::debug!(
            method = %method,
            url = %url,
            timeout_ms = config.request_timeout.as_millis() as u64,
            "Sending Anthropic API request"
        );
        let start = Instant::now();

        let mut request = self
            .client
            .request(method, &url)
            .headers(headers)
            .timeout(config.request_timeout);
        if let Some(body) = body {
            request = request.body(body);
        }

        let response = request.send().await?;

        tracing::debug!(
            url = %url,
            status = %response.status(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Anthropic API response received"
        );

        Ok(response)
    }
}
