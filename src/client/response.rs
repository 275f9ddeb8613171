//! Response Handling
//!
//! Turns a transport response into a [`Response`] wrapper, classifies its
//! status, and routes the body to wherever the caller asked for it.

use crate::client::rate_limiter::Rate;
use crate::error::{ApiError, Error, Result};
use futures::StreamExt;
use reqwest::header::HeaderMap;
use reqwest::{Method, StatusCode, Url};
use serde::de::DeserializeOwned;
use std::io::Write;

/// What is left of an exchange once the body has been consumed.
#[derive(Debug, Clone)]
pub struct Response {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub url: Url,
    pub method: Method,
    pub rate: Rate,
}

impl Response {
    pub(crate) fn new(method: Method, inner: &reqwest::Response) -> Self {
        let headers = inner.headers().clone();
        Self {
            status: inner.status(),
            rate: Rate::from_headers(&headers),
            headers,
            url: inner.url().clone(),
            method,
        }
    }
}

/// A value that can be replaced by decoding a JSON document.
///
/// Implemented for every `DeserializeOwned` type. On failure the value is
/// left as it was.
pub trait JsonTarget: Send {
    fn decode_json(&mut self, bytes: &[u8]) -> serde_json::Result<()>;
}

impl<T> JsonTarget for T
where
    T: DeserializeOwned + Send,
{
    fn decode_json(&mut self, bytes: &[u8]) -> serde_json::Result<()> {
        *self = serde_json::from_slice(bytes)?;
        Ok(())
    }
}

/// Where a successful response body should go
pub enum Destination<'a> {
    /// Decode the body as JSON into the target
    Json(&'a mut dyn JsonTarget),

    /// Copy the body verbatim, no parsing
    Raw(&'a mut (dyn Write + Send)),
}

impl<'a> Destination<'a> {
    pub fn json<T: JsonTarget + 'a>(target: &'a mut T) -> Self {
        Destination::Json(target)
    }

    pub fn raw<W: Write + Send + 'a>(sink: &'a mut W) -> Self {
        Destination::Raw(sink)
    }
}

/// Classify the status of `inner`.
///
/// Anything in 200-299 passes. Otherwise the body is drained and searched for
/// a server message; a body that cannot be read or parsed just yields an
/// error without one.
pub(crate) async fn check_response(
    response: &Response,
    inner: reqwest::Response,
) -> std::result::Result<reqwest::Response, ApiError> {
    if response.status.is_success() {
        return Ok(inner);
    }

    let body = inner.bytes().await.unwrap_or_default();
    Err(ApiError::from_body(response.clone(), &body))
}

/// Hand the body of a successful response to `destination`.
pub(crate) async fn read_body(
    response: &Response,
    inner: reqwest::Response,
    destination: Option<Destination<'_>>,
) -> Result<()> {
    match destination {
        Some(Destination::Raw(sink)) => {
            let mut stream = inner.bytes_stream();
            while let Some(chunk) = stream.next().await {
                let chunk = chunk.map_err(|source| Error::Body {
                    source,
                    response: Box::new(response.clone()),
                })?;
                sink.write_all(&chunk).map_err(|source| Error::Sink {
                    source,
                    response: Box::new(response.clone()),
                })?;
            }
            sink.flush().map_err(|source| Error::Sink {
                source,
                response: Box::new(response.clone()),
            })
        }
        Some(Destination::Json(target)) => {
            let body = inner.bytes().await.map_err(|source| Error::Body {
                source,
                response: Box::new(response.clone()),
            })?;
            target.decode_json(&body).map_err(|source| Error::Decode {
                source,
                response: Box::new(response.clone()),
            })
        }
        None => {
            // Nobody asked for the body; read it to the end and forget it
            if let Err(err) = inner.bytes().await {
                tracing::trace!("discarding unread body: {}", err);
            }
            Ok(())
        }
    }
}
