//! Client Configuration
//!
//! Everything a client needs to talk to the API. Values are supplied by the
//! caller; nothing is read from files or the environment here.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Version embedded in the default user agent
pub const LIBRARY_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Public API endpoint
pub const DEFAULT_BASE_URL: &str = "https://api.packet.net/";

/// Media type for request and response bodies
pub const MEDIA_TYPE: &str = "application/json";

/// Default user agent, `packet-client/<version>`
pub fn default_user_agent() -> String {
    format!("packet-client/{}", LIBRARY_VERSION)
}

/// Client configuration
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL every relative request path is resolved against
    pub base_url: String,

    /// Sent as `X-Consumer-Token`
    pub consumer_token: String,

    /// Sent as `X-Auth-Token`
    pub api_key: String,

    /// Sent as `User-Agent`
    pub user_agent: String,

    /// Skip TLS certificate verification for this client only
    pub danger_accept_invalid_certs: bool,

    /// Whole-request timeout enforced by the default transport
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_ms: Option<u64>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            consumer_token: String::new(),
            api_key: String::new(),
            user_agent: default_user_agent(),
            danger_accept_invalid_certs: false,
            timeout_ms: None,
        }
    }
}

impl ClientConfig {
    /// Config for the public endpoint with the two mandatory credentials
    pub fn new(consumer_token: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            consumer_token: consumer_token.into(),
            api_key: api_key.into(),
            ..Self::default()
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Whole-request timeout, kept to millisecond precision
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        let millis = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
        self.timeout_ms = Some(millis.max(1));
        self
    }

    /// Disable certificate verification. Only meant for test endpoints.
    pub fn danger_accept_invalid_certs(mut self, accept: bool) -> Self {
        self.danger_accept_invalid_certs = accept;
        self
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }
}

// Tokens never end up in logs
impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("consumer_token", &redact(&self.consumer_token))
            .field("api_key", &redact(&self.api_key))
            .field("user_agent", &self.user_agent)
            .field("danger_accept_invalid_certs", &self.danger_accept_invalid_certs)
            .field("timeout_ms", &self.timeout_ms)
            .finish()
    }
}

fn redact(secret: &str) -> &'static str {
    if secret.is_empty() {
        ""
    } else {
        "<redacted>"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::new("consumer", "key");
        assert_eq!(config.base_url, "https://api.packet.net/");
        assert_eq!(config.user_agent, format!("packet-client/{}", LIBRARY_VERSION));
        assert!(!config.danger_accept_invalid_certs);
        assert!(config.timeout().is_none());
    }

    #[test]
    fn test_deserialize_partial_config() {
        let json = r#"{
            "consumer_token": "c",
            "api_key": "k",
            "timeout_ms": 30000
        }"#;

        let config: ClientConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.api_key, "k");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout(), Some(Duration::from_secs(30)));
    }

    #[test]
    fn test_sub_second_timeout_kept() {
        let config = ClientConfig::new("c", "k").with_timeout(Duration::from_millis(500));
        assert_eq!(config.timeout(), Some(Duration::from_millis(500)));

        let config = config.with_timeout(Duration::from_millis(1500));
        assert_eq!(config.timeout(), Some(Duration::from_millis(1500)));

        // Anything shorter than a millisecond still waits at least one
        let config = config.with_timeout(Duration::from_micros(10));
        assert_eq!(config.timeout(), Some(Duration::from_millis(1)));
    }

    #[test]
    fn test_debug_redacts_tokens() {
        let config = ClientConfig::new("consumer-secret", "key-secret");
        let printed = format!("{:?}", config);
        assert!(!printed.contains("consumer-secret"));
        assert!(!printed.contains("key-secret"));
        assert!(printed.contains("<redacted>"));
    }
}
