//! packet-client - client core for the Packet REST API
//!
//! Builds authenticated JSON requests, dispatches them through a pluggable
//! transport, tracks the rate limit the server advertises, and turns non-2xx
//! replies into structured errors.
//!
//! ```no_run
//! use packet_client::{Client, Destination, Method};
//! use packet_client::api::PlanList;
//!
//! # async fn run() -> packet_client::Result<()> {
//! let client = Client::new("consumer-token", "api-key")?;
//! let request = client.new_request(Method::GET, "plans", packet_client::NO_BODY)?;
//! let mut plans = PlanList::default();
//! let response = client.execute(request, Some(Destination::json(&mut plans))).await?;
//! println!("{} plans, {} calls left", plans.plans.len(), response.rate.requests_remaining);
//! # Ok(())
//! # }
//! ```

use reqwest::header::HeaderMap;
use serde::Serialize;
use std::fmt;

pub mod api;
pub mod blocking;
pub mod client;
pub mod config;
pub mod error;

pub use blocking::BlockingClient;
pub use client::{Destination, JsonTarget, Rate, Response, Transport};
pub use config::ClientConfig;
pub use error::{ApiError, Error, Result};
pub use reqwest::{Method, Request, Url};

use api::{
    DeviceService, FacilityService, OperatingSystemService, PlanService, ProjectService,
};
use client::http::{build_request, default_headers, default_transport};
use client::response::{check_response, read_body};
use client::RateLimitTracker;

/// Pass as the body of [`Client::new_request`] when there is none
pub const NO_BODY: Option<&()> = None;

/// The API client
pub struct Client<T = reqwest::Client> {
    /// Settings the client was built from
    config: ClientConfig,

    /// Parsed `config.base_url`
    base_url: Url,

    /// Fixed headers for every request
    headers: HeaderMap,

    /// Carries requests to the server
    transport: T,

    /// Snapshot from the latest exchange
    rate_limiter: RateLimitTracker,
}

impl Client {
    /// Create a client for the public endpoint
    pub fn new(consumer_token: impl Into<String>, api_key: impl Into<String>) -> Result<Self> {
        Self::from_config(ClientConfig::new(consumer_token, api_key))
    }

    /// Create a client with the default transport built from `config`
    pub fn from_config(config: ClientConfig) -> Result<Self> {
        let transport = default_transport(&config)?;
        Self::with_transport(config, transport)
    }
}

impl<T: Transport> Client<T> {
    /// Create a client that sends everything through `transport`
    pub fn with_transport(config: ClientConfig, transport: T) -> Result<Self> {
        let base_url = Url::parse(&config.base_url)?;
        let headers = default_headers(&config)?;

        Ok(Self {
            config,
            base_url,
            headers,
            transport,
            rate_limiter: RateLimitTracker::new(),
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Rate limit snapshot from the most recent response
    pub fn rate_limit(&self) -> Rate {
        self.rate_limiter.latest()
    }

    /// Build a request for `path`, relative to the base URL (no leading
    /// slash). A body is sent as JSON.
    pub fn new_request<B>(&self, method: Method, path: &str, body: Option<&B>) -> Result<Request>
    where
        B: Serialize + ?Sized,
    {
        build_request(&self.base_url, &self.headers, method, path, body)
    }

    /// Send `request` and deliver the body of a successful reply to
    /// `destination`.
    ///
    /// A transport failure returns before anything is recorded. Once a reply
    /// arrives, its rate limit snapshot is stored on the client whatever the
    /// status, and every error from then on carries the [`Response`].
    pub async fn execute(
        &self,
        request: Request,
        destination: Option<Destination<'_>>,
    ) -> Result<Response> {
        let method = request.method().clone();
        tracing::debug!(%method, url = %request.url(), "sending request");

        let inner = self.transport.execute(request).await?;

        let response = Response::new(method, &inner);
        self.rate_limiter.record(response.rate);
        tracing::debug!(
            status = response.status.as_u16(),
            limit = response.rate.request_limit,
            remaining = response.rate.requests_remaining,
            "received response"
        );

        let inner = check_response(&response, inner).await?;
        read_body(&response, inner, destination).await?;

        Ok(response)
    }

    pub fn plans(&self) -> PlanService<'_, T> {
        PlanService::new(self)
    }

    pub fn devices(&self) -> DeviceService<'_, T> {
        DeviceService::new(self)
    }

    pub fn projects(&self) -> ProjectService<'_, T> {
        ProjectService::new(self)
    }

    pub fn facilities(&self) -> FacilityService<'_, T> {
        FacilityService::new(self)
    }

    pub fn operating_systems(&self) -> OperatingSystemService<'_, T> {
        OperatingSystemService::new(self)
    }
}

impl<T> fmt::Debug for Client<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("config", &self.config)
            .field("rate_limit", &self.rate_limiter.latest())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = Client::new("consumer", "key").unwrap();
        assert_eq!(client.base_url().as_str(), "https://api.packet.net/");
        assert_eq!(client.rate_limit(), Rate::default());
    }

    #[test]
    fn test_bad_base_url() {
        let config = ClientConfig::new("consumer", "key").with_base_url("not a url");
        let err = Client::from_config(config).unwrap_err();
        assert!(matches!(err, Error::Url(_)));
    }

    #[test]
    fn test_bad_token() {
        let err = Client::new("consumer\r\n", "key").unwrap_err();
        assert!(matches!(err, Error::InvalidHeader(_)));
    }

    #[test]
    fn test_debug_hides_key() {
        let client = Client::new("consumer", "super-secret").unwrap();
        assert!(!format!("{:?}", client).contains("super-secret"));
    }
}
