//! Client Module
//!
//! Transport, request building, response dispatch and rate limit tracking.

pub mod http;
pub mod rate_limiter;
pub mod response;

pub use http::{default_transport, Transport};
pub use rate_limiter::{Rate, RateLimitTracker};
pub use response::{Destination, JsonTarget, Response};
