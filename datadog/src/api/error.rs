use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use thiserror::Error;

use super::response::ResponseMeta;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Nothing came back from the server
    #[error("HTTP request failed: {0}")]
    Transport(#[source] reqwest::Error),

    /// A response arrived but its body could not be read in full
    #[error("Failed to read response body ({}): {source}", .meta.status_text())]
    BodyRead {
        meta: ResponseMeta,
        #[source]
        source: reqwest::Error,
    },

    #[error(transparent)]
    Api(#[from] ApiFailure),

    #[error("Failed to parse response: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("Failed to serialize request body: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Invalid value for header {0}")]
    InvalidHeader(&'static str),
}

impl ApiError {
    /// Response metadata, when a response was received at all
    pub fn response(&self) -> Option<&ResponseMeta> {
        match self {
            ApiError::BodyRead { meta, .. } => Some(meta),
            ApiError::Api(failure) => Some(failure.response()),
            _ => None,
        }
    }

    /// Raw body of a failed (status >= 300) response
    pub fn body(&self) -> Option<&[u8]> {
        match self {
            ApiError::Api(failure) => Some(failure.body()),
            _ => None,
        }
    }

    pub fn status(&self) -> Option<StatusCode> {
        self.response().map(|meta| meta.status)
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(StatusCode::NOT_FOUND)
    }
}

/// Non-2xx response. Displays as the status text and keeps the raw body so
/// callers can parse structured error payloads.
#[derive(Debug, Clone, Error)]
#[error("{}", .meta.status_text())]
pub struct ApiFailure {
    meta: ResponseMeta,
    body: Vec<u8>,
}

impl ApiFailure {
    pub fn new(meta: ResponseMeta, body: Vec<u8>) -> Self {
        Self { meta, body }
    }

    pub fn status(&self) -> StatusCode {
        self.meta.status
    }

    pub fn status_text(&self) -> &str {
        self.meta.status_text()
    }

    pub fn response(&self) -> &ResponseMeta {
        &self.meta
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Decode the failure payload, e.g. `{"errors": [...]}`
    pub fn body_json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }
}

/// Standard error payload returned by the API
#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct ApiErrorResponse {
    #[serde(default)]
    pub errors: Vec<String>,
}
