//! Blocking Client
//!
//! Wraps [`Client`] with a private tokio runtime so each exchange blocks the
//! calling thread until the reply is in. Must not be used from inside an
//! async context.

use crate::client::{Destination, Rate, Response, Transport};
use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::{Client, Method, Request};
use serde::Serialize;
use std::future::Future;

/// Synchronous front for [`Client`]
pub struct BlockingClient<T = reqwest::Client> {
    inner: Client<T>,
    runtime: tokio::runtime::Runtime,
}

impl BlockingClient {
    /// Create a blocking client for the public endpoint
    pub fn new(consumer_token: impl Into<String>, api_key: impl Into<String>) -> Result<Self> {
        Self::from_client(Client::new(consumer_token, api_key)?)
    }

    pub fn from_config(config: ClientConfig) -> Result<Self> {
        Self::from_client(Client::from_config(config)?)
    }
}

impl<T: Transport> BlockingClient<T> {
    pub fn from_client(inner: Client<T>) -> Result<Self> {
        let runtime = tokio::runtime::Runtime::new().map_err(Error::Runtime)?;
        Ok(Self { inner, runtime })
    }

    /// The async client underneath.
    ///
    /// Its service objects return futures; drive them with
    /// [`BlockingClient::block_on`].
    pub fn client(&self) -> &Client<T> {
        &self.inner
    }

    pub fn rate_limit(&self) -> Rate {
        self.inner.rate_limit()
    }

    pub fn new_request<B>(&self, method: Method, path: &str, body: Option<&B>) -> Result<Request>
    where
        B: Serialize + ?Sized,
    {
        self.inner.new_request(method, path, body)
    }

    /// Run `future` to completion on the client's runtime
    pub fn block_on<F: Future>(&self, future: F) -> F::Output {
        self.runtime.block_on(future)
    }

    /// Send `request` and wait for the reply
    pub fn execute(
        &self,
        request: Request,
        destination: Option<Destination<'_>>,
    ) -> Result<Response> {
        self.runtime
            .block_on(self.inner.execute(request, destination))
    }
}
