//! High-level Messages API client.
//!
//! Thin layer over [`HttpClient`]: posts parameters to the Messages (or
//! legacy Complete) endpoint and decodes the body.

#![allow(clippy::missing_errors_doc)]

use serde::Serialize;
use serde_json::Value;

use crate::config::{Configuration, SharedConfiguration};
use crate::error::Error;
use crate::http::{HttpClient, StreamingResponse};
use crate::streaming::parse_concatenated_objects;
use crate::types::JsonResponse;

const MESSAGES_PATH: &str = "/messages";
const COMPLETE_PATH: &str = "/complete";

/// Anthropic API client.
#[derive(Debug, Clone)]
pub struct Client {
    http: HttpClient,
}

impl Client {
    /// Create a client reading from `config`.
    pub fn new(config: impl Into<SharedConfiguration>) -> Result<Self, Error> {
        Ok(Self {
            http: HttpClient::new(config)?,
        })
    }

    /// Create a client from environment variables.
    pub fn from_env() -> Result<Self, Error> {
        Self::new(Configuration::from_env()?)
    }

    /// The underlying transport.
    #[must_use]
    pub const fn http(&self) -> &HttpClient {
        &self.http
    }

    /// The configuration handle this client reads from.
    #[must_use]
    pub const fn configuration(&self) -> &SharedConfiguration {
        self.http.configuration()
    }

    /// `POST /messages` and decode the body.
    ///
    /// Non-2xx responses are decoded too; check [`JsonResponse::is_success`].
    pub async fn messages<P>(&self, parameters: &P) -> Result<JsonResponse, Error>
    where
        P: Serialize + ?Sized,
    {
        self.post_and_decode(MESSAGES_PATH, parameters).await
    }

    /// `POST /messages` with `"stream": true`, yielding events as they arrive.
    ///
    /// `parameters` must serialize to a JSON object; anything else fails with
    /// [`Error::InvalidParameters`] before a request is sent.
    pub async fn messages_stream<P>(&self, parameters: &P) -> Result<StreamingResponse, Error>
    where
        P: Serialize + ?Sized,
    {
        let mut body = serde_json::to_value(parameters)?;
        match &mut body {
            Value::Object(map) => {
                map.insert("stream".to_string(), Value::Bool(true));
            }
            other => {
                return Err(Error::InvalidParameters {
                    reason: format!("expected a JSON object, got {}", json_type(other)),
                });
            }
        }
        self.http.json_post_stream(MESSAGES_PATH, &body).await
    }

    /// Legacy `POST /complete` and decode the body.
    pub async fn complete<P>(&self, parameters: &P) -> Result<JsonResponse, Error>
    where
        P: Serialize + ?Sized,
    {
        self.post_and_decode(COMPLETE_PATH, parameters).await
    }

    async fn post_and_decode<P>(&self, path: &str, parameters: &P) -> Result<JsonResponse, Error>
    where
        P: Serialize + ?Sized,
    {
        let response = self.http.json_post(path, parameters).await?;
        let status = response.status();
        let text = response.text().await?;
        let body = parse_concatenated_objects(&text)?;
        Ok(JsonResponse { status, body })
    }
}

const fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
