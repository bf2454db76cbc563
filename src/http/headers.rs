//! Request header assembly.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};

use crate::config::Configuration;
use crate::error::Error;

/// Content type for JSON requests.
pub const APPLICATION_JSON: &str = "application/json";
/// Content type for multipart requests.
pub const MULTIPART_FORM_DATA: &str = "multipart/form-data";

const API_KEY_HEADER: &str = "x-api-key";
const VERSION_HEADER: &str = "anthropic-version";
const ORGANIZATION_HEADER: &str = "anthropic-organization";

/// Build the headers for one request.
///
/// Defaults are `Content-Type`, `x-api-key` and `Anthropic-Version`, plus
/// `anthropic-organization` when configured. Extra headers are applied last
/// and replace any default with the same (case-insensitive) name.
///
/// # Errors
///
/// Returns [`Error::Config`] if no credential is configured, or
/// [`Error::InvalidHeader`] if a name or value is not valid HTTP.
pub fn build_headers(config: &Configuration) -> Result<HeaderMap, Error> {
    let token = config.access_token()?;

    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static(APPLICATION_JSON));

    let mut key = header_value(API_KEY_HEADER, token.expose())?;
    key.set_sensitive(true);
    headers.insert(HeaderName::from_static(API_KEY_HEADER), key);

    headers.insert(
        HeaderName::from_static(VERSION_HEADER),
        header_value(VERSION_HEADER, &config.anthropic_version)?,
    );

    if let Some(org) = &config.organization_id {
        headers.insert(
            HeaderName::from_static(ORGANIZATION_HEADER),
            header_value(ORGANIZATION_HEADER, org)?,
        );
    }

    for (name, value) in &config.extra_headers {
        let header_name =
            HeaderName::from_bytes(name.as_bytes()).map_err(|e| Error::InvalidHeader {
                name: name.clone(),
                reason: e.to_string(),
            })?;
        headers.insert(header_name, header_value(name, value)?);
    }

    Ok(headers)
}

fn header_value(name: &str, value: &str) -> Result<HeaderValue, Error> {
    HeaderValue::from_str(value).map_err(|e| Error::InvalidHeader {
        name: name.to_string(),
        reason: e.to_string(),
    })
}
