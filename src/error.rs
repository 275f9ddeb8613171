//! Error Types
//!
//! Every failure the client can report, grouped by the stage at which it
//! happens: building the request, reaching the server, or handling the reply.

use crate::client::response::Response;
use reqwest::header::InvalidHeaderValue;
use serde::Deserialize;
use std::fmt;

/// Main error type for client operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The relative path could not be resolved against the base URL
    #[error("invalid request path: {0}")]
    Url(#[from] url::ParseError),

    /// The request body could not be serialized to JSON
    #[error("failed to encode request body: {0}")]
    Encode(#[source] serde_json::Error),

    /// A configured token or user agent is not a valid header value
    #[error("invalid header value: {0}")]
    InvalidHeader(#[from] InvalidHeaderValue),

    /// The default transport could not be set up
    #[error("failed to build HTTP client: {0}")]
    Builder(#[source] reqwest::Error),

    /// The transport could not complete the exchange (DNS, refused, timeout)
    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    /// The server answered with a status outside 200-299
    #[error(transparent)]
    Api(#[from] ApiError),

    /// A successful response body was not valid JSON for the destination
    #[error("failed to decode response body: {source}")]
    Decode {
        #[source]
        source: serde_json::Error,
        response: Box<Response>,
    },

    /// The response body stream broke off while being read
    #[error("failed to read response body: {source}")]
    Body {
        #[source]
        source: reqwest::Error,
        response: Box<Response>,
    },

    /// The raw destination refused a write
    #[error("failed to write response body: {source}")]
    Sink {
        #[source]
        source: std::io::Error,
        response: Box<Response>,
    },

    /// The blocking facade could not start its runtime
    #[error("failed to start runtime: {0}")]
    Runtime(#[source] std::io::Error),
}

impl Error {
    /// The response that accompanied this error, if the server was reached.
    pub fn response(&self) -> Option<&Response> {
        match self {
            Error::Api(err) => Some(&err.response),
            Error::Decode { response, .. }
            | Error::Body { response, .. }
            | Error::Sink { response, .. } => Some(response),
            _ => None,
        }
    }

    /// The structured API error, if this is one.
    pub fn as_api(&self) -> Option<&ApiError> {
        match self {
            Error::Api(err) => Some(err),
            _ => None,
        }
    }
}

/// A non-2xx reply from the API.
///
/// Carries the full response wrapper so the method, URL, status and rate
/// snapshot of the failed exchange stay available to the caller.
#[derive(Debug, Clone)]
pub struct ApiError {
    pub response: Response,
    pub message: Option<String>,
}

impl ApiError {
    /// Build an error for `response` from whatever body the server sent.
    pub(crate) fn from_body(response: Response, body: &[u8]) -> Self {
        let message = if body.is_empty() {
            None
        } else {
            serde_json::from_slice::<ErrorBody>(body)
                .ok()
                .and_then(ErrorBody::into_message)
        };
        Self { response, message }
    }

    /// Numeric status code of the failed exchange
    pub fn status(&self) -> u16 {
        self.response.status.as_u16()
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let r = &self.response;
        write!(f, "{} {}: {}", r.method, r.url, r.status.as_u16())?;
        if let Some(message) = &self.message {
            write!(f, " {}", message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ApiError {}

/// Error payload as sent by the API.
///
/// Both fields are read loosely so a malformed `errors` never hides a
/// well-formed `message`.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<serde_json::Value>,

    #[serde(default)]
    errors: Option<serde_json::Value>,
}

impl ErrorBody {
    fn into_message(self) -> Option<String> {
        if let Some(serde_json::Value::String(m)) = self.message {
            if !m.is_empty() {
                return Some(m);
            }
        }

        let errors: Vec<String> = match self.errors? {
            serde_json::Value::String(s) => vec![s],
            serde_json::Value::Array(items) => items
                .into_iter()
                .filter_map(|item| match item {
                    serde_json::Value::String(s) => Some(s),
                    _ => None,
                })
                .collect(),
            _ => Vec::new(),
        };
        let errors: Vec<String> = errors.into_iter().filter(|e| !e.is_empty()).collect();

        if errors.is_empty() {
            None
        } else {
            Some(errors.join(", "))
        }
    }
}

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, Error>;
