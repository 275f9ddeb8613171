//! HTTP Transport
//!
//! The transport seam and the request builder. The client never talks to the
//! network directly; it hands fully built requests to a [`Transport`].

use crate::config::{ClientConfig, MEDIA_TYPE};
use crate::error::{Error, Result};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, CONNECTION, CONTENT_TYPE, USER_AGENT};
use reqwest::{Body, Method, Request, Url};
use serde::Serialize;
use std::future::Future;
use std::sync::Arc;

pub const HEADER_AUTH_TOKEN: &str = "x-auth-token";
pub const HEADER_CONSUMER_TOKEN: &str = "x-consumer-token";

/// Anything that can carry a request to the server and bring back a response.
///
/// Implementations report network-level failures only; a reply with an error
/// status is still `Ok`.
pub trait Transport: Send + Sync {
    fn execute(
        &self,
        request: Request,
    ) -> impl Future<Output = reqwest::Result<reqwest::Response>> + Send;
}

impl Transport for reqwest::Client {
    fn execute(
        &self,
        request: Request,
    ) -> impl Future<Output = reqwest::Result<reqwest::Response>> + Send {
        reqwest::Client::execute(self, request)
    }
}

impl<T: Transport> Transport for Arc<T> {
    fn execute(
        &self,
        request: Request,
    ) -> impl Future<Output = reqwest::Result<reqwest::Response>> + Send {
        (**self).execute(request)
    }
}

/// Build the default reqwest transport for `config`.
///
/// Idle connections are not kept, so every exchange opens its own.
pub fn default_transport(config: &ClientConfig) -> Result<reqwest::Client> {
    let mut builder = reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .danger_accept_invalid_certs(config.danger_accept_invalid_certs);

    if let Some(timeout) = config.timeout() {
        builder = builder.timeout(timeout);
    }

    builder.build().map_err(Error::Builder)
}

/// Headers attached to every outgoing request
pub(crate) fn default_headers(config: &ClientConfig) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    headers.insert(
        HeaderName::from_static(HEADER_AUTH_TOKEN),
        secret_value(&config.api_key)?,
    );
    headers.insert(
        HeaderName::from_static(HEADER_CONSUMER_TOKEN),
        secret_value(&config.consumer_token)?,
    );
    headers.insert(CONTENT_TYPE, HeaderValue::from_static(MEDIA_TYPE));
    headers.insert(ACCEPT, HeaderValue::from_static(MEDIA_TYPE));
    headers.insert(USER_AGENT, HeaderValue::from_str(&config.user_agent)?);
    headers.insert(CONNECTION, HeaderValue::from_static("close"));
    Ok(headers)
}

fn secret_value(token: &str) -> Result<HeaderValue> {
    let mut value = HeaderValue::from_str(token)?;
    value.set_sensitive(true);
    Ok(value)
}

/// Build a request for `path` relative to `base`.
///
/// `path` is resolved as a URL reference, so an absolute URL replaces the
/// base entirely. The body, if any, is encoded as JSON before anything else
/// happens.
pub(crate) fn build_request<B>(
    base: &Url,
    headers: &HeaderMap,
    method: Method,
    path: &str,
    body: Option<&B>,
) -> Result<Request>
where
    B: Serialize + ?Sized,
{
    let url = base.join(path)?;

    let body = match body {
        Some(value) => Some(serde_json::to_vec(value).map_err(Error::Encode)?),
        None => None,
    };

    let mut request = Request::new(method, url);
    *request.headers_mut() = headers.clone();
    if let Some(bytes) = body {
        *request.body_mut() = Some(Body::from(bytes));
    }

    Ok(request)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::ser::Error as _;
    use serde_json::json;

    fn base() -> Url {
        Url::parse("https://api.packet.net/").unwrap()
    }

    fn headers() -> HeaderMap {
        default_headers(&ClientConfig::new("consumer", "key")).unwrap()
    }

    #[test]
    fn test_relative_path_resolution() {
        let req = build_request::<()>(&base(), &headers(), Method::GET, "plans", None).unwrap();
        assert_eq!(req.url().as_str(), "https://api.packet.net/plans");
        assert_eq!(req.method(), Method::GET);
        assert!(req.body().is_none());

        let nested = Url::parse("https://api.example.com/v1/").unwrap();
        let req = build_request::<()>(&nested, &headers(), Method::GET, "devices/abc", None).unwrap();
        assert_eq!(req.url().as_str(), "https://api.example.com/v1/devices/abc");

        let req = build_request::<()>(&nested, &headers(), Method::GET, "/plans", None).unwrap();
        assert_eq!(req.url().as_str(), "https://api.example.com/plans");
    }

    #[test]
    fn test_absolute_path_overrides_base() {
        let req = build_request::<()>(
            &base(),
            &headers(),
            Method::GET,
            "https://other.example.com/x?page=2",
            None,
        )
        .unwrap();
        assert_eq!(req.url().as_str(), "https://other.example.com/x?page=2");
    }

    #[test]
    fn test_malformed_path() {
        let err = build_request::<()>(&base(), &headers(), Method::GET, "http://[::1", None)
            .unwrap_err();
        assert!(matches!(err, Error::Url(_)));
    }

    #[test]
    fn test_body_round_trips() {
        let body = json!({"hostname": "x", "plan": "baremetal_0"});
        let req =
            build_request(&base(), &headers(), Method::POST, "devices", Some(&body)).unwrap();
        let bytes = req.body().and_then(|b| b.as_bytes()).unwrap();
        let decoded: serde_json::Value = serde_json::from_slice(bytes).unwrap();
        assert_eq!(decoded, body);
    }

    #[test]
    fn test_unserializable_body() {
        struct Broken;
        impl Serialize for Broken {
            fn serialize<S: serde::Serializer>(&self, _: S) -> std::result::Result<S::Ok, S::Error> {
                Err(S::Error::custom("cannot serialize"))
            }
        }

        let err = build_request(&base(), &headers(), Method::POST, "devices", Some(&Broken))
            .unwrap_err();
        assert!(matches!(err, Error::Encode(_)));
    }

    #[test]
    fn test_fixed_headers() {
        let req = build_request::<()>(&base(), &headers(), Method::GET, "plans", None).unwrap();
        let h = req.headers();
        assert_eq!(h[HEADER_AUTH_TOKEN], "key");
        assert_eq!(h[HEADER_CONSUMER_TOKEN], "consumer");
        assert_eq!(h[CONTENT_TYPE], "application/json");
        assert_eq!(h[ACCEPT], "application/json");
        assert!(h[USER_AGENT].to_str().unwrap().starts_with("packet-client/"));
        assert_eq!(h[CONNECTION], "close");
    }

    #[test]
    fn test_default_transport_honours_sub_second_timeout() {
        let config = ClientConfig::new("consumer", "key")
            .with_timeout(std::time::Duration::from_millis(500));
        assert!(default_transport(&config).is_ok());
    }

    #[test]
    fn test_invalid_token_rejected() {
        let err = default_headers(&ClientConfig::new("consumer", "bad\nkey")).unwrap_err();
        assert!(matches!(err, Error::InvalidHeader(_)));
    }
}
