//! Response handling utilities for the Datadog API

use super::ApiError;
use reqwest::header::HeaderMap;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;

/// Status and headers of a received response
#[derive(Debug, Clone)]
pub struct ResponseMeta {
    pub status: StatusCode,
    pub headers: HeaderMap,
    status_text: String,
}

impl ResponseMeta {
    pub fn new(status: StatusCode, headers: HeaderMap) -> Self {
        Self::with_reason(status, headers, None)
    }

    /// Prefers the reason phrase sent by the server over the canonical one
    pub fn with_reason(status: StatusCode, headers: HeaderMap, reason: Option<&str>) -> Self {
        let status_text = match reason.or_else(|| status.canonical_reason()) {
            Some(reason) => format!("{} {}", status.as_u16(), reason),
            None => status.as_u16().to_string(),
        };
        Self {
            status,
            headers,
            status_text,
        }
    }

    pub(crate) fn from_response(response: &reqwest::Response) -> Self {
        // hyper only records the phrase when it differs from the canonical one
        let reason = response
            .extensions()
            .get::<hyper::ext::ReasonPhrase>()
            .map(|reason| String::from_utf8_lossy(reason.as_bytes()).into_owned());
        Self::with_reason(
            response.status(),
            response.headers().clone(),
            reason.as_deref(),
        )
    }

    /// Status line text, e.g. "404 Not Found"
    pub fn status_text(&self) -> &str {
        &self.status_text
    }
}

/// Successful response with its raw, unparsed body
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub meta: ResponseMeta,
    pub body: Vec<u8>,
}

impl RawResponse {
    pub fn status(&self) -> StatusCode {
        self.meta.status
    }

    /// Decode the body as JSON
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ApiError> {
        serde_json::from_slice(&self.body).map_err(|e| {
            tracing::error!(
                "Failed to deserialize response: {}, body: {}",
                e,
                String::from_utf8_lossy(&self.body)
            );
            ApiError::Decode(e)
        })
    }
}
