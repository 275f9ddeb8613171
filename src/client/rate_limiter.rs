//! Rate Limit Tracking
//!
//! Reads the rate limit headers the API attaches to every response. The data
//! is advisory: headers that are missing or malformed leave the matching field
//! at its default and are never reported as errors.

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use reqwest::header::HeaderMap;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const HEADER_RATE_LIMIT: &str = "x-ratelimit-limit";
pub const HEADER_RATE_REMAINING: &str = "x-ratelimit-remaining";
pub const HEADER_RATE_RESET: &str = "x-ratelimit-reset";

/// Rate limit snapshot from a single response
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rate {
    /// Requests allowed in the current window
    pub request_limit: u32,

    /// Requests left in the current window
    pub requests_remaining: u32,

    /// When the window resets
    pub reset: Option<DateTime<Utc>>,
}

impl Rate {
    /// Extract a snapshot from response headers.
    ///
    /// Counts are unsigned, so a negative limit or remaining value is treated
    /// like any other unparseable header and leaves the field at 0.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let mut rate = Rate::default();

        if let Some(limit) = header_number::<u32>(headers, HEADER_RATE_LIMIT) {
            rate.request_limit = limit;
        }
        if let Some(remaining) = header_number::<u32>(headers, HEADER_RATE_REMAINING) {
            rate.requests_remaining = remaining;
        }
        // A reset of 0 means the server sent nothing useful, not the epoch
        if let Some(secs) = header_number::<i64>(headers, HEADER_RATE_RESET) {
            if secs != 0 {
                rate.reset = DateTime::<Utc>::from_timestamp(secs, 0);
            }
        }

        rate
    }

    /// True when the server reported a limit and nothing is left of it
    pub fn is_exhausted(&self) -> bool {
        self.request_limit > 0 && self.requests_remaining == 0
    }

    /// Time left until the window resets, if the reset lies after `now`
    pub fn time_until_reset(&self, now: DateTime<Utc>) -> Option<Duration> {
        self.reset
            .and_then(|reset| (reset - now).to_std().ok())
            .filter(|d| !d.is_zero())
    }
}

fn header_number<T: std::str::FromStr>(headers: &HeaderMap, name: &str) -> Option<T> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.trim().parse::<T>().ok())
}

/// The most recent snapshot seen by a client.
///
/// Every exchange overwrites it; concurrent exchanges race and the last
/// writer wins.
#[derive(Debug, Default)]
pub struct RateLimitTracker {
    latest: RwLock<Rate>,
}

impl RateLimitTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the stored snapshot
    pub fn record(&self, rate: Rate) {
        *self.latest.write() = rate;
    }

    /// Copy of the stored snapshot
    pub fn latest(&self) -> Rate {
        *self.latest.read()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderName;

    fn headers(pairs: &[(&'static str, &'static str)]) -> HeaderMap {
        let mut headers = HeaderMap::new();
        for (k, v) in pairs {
            headers.insert(HeaderName::try_from(*k).unwrap(), v.parse().unwrap());
        }
        headers
    }

    #[test]
    fn test_all_headers_present() {
        let rate = Rate::from_headers(&headers(&[
            ("X-RateLimit-Limit", "100"),
            ("X-RateLimit-Remaining", "99"),
            ("X-RateLimit-Reset", "1700000000"),
        ]));
        assert_eq!(rate.request_limit, 100);
        assert_eq!(rate.requests_remaining, 99);
        assert_eq!(rate.reset.unwrap().timestamp(), 1_700_000_000);
    }

    #[test]
    fn test_zero_reset_is_unset() {
        let rate = Rate::from_headers(&headers(&[("X-RateLimit-Reset", "0")]));
        assert!(rate.reset.is_none());
    }

    #[test]
    fn test_missing_and_malformed_headers() {
        let rate = Rate::from_headers(&headers(&[
            ("X-RateLimit-Limit", "lots"),
            ("X-RateLimit-Reset", "soon"),
        ]));
        assert_eq!(rate, Rate::default());

        let rate = Rate::from_headers(&headers(&[("X-RateLimit-Limit", "50")]));
        assert_eq!(rate.request_limit, 50);
        assert_eq!(rate.requests_remaining, 0);
        assert!(rate.reset.is_none());
    }

    #[test]
    fn test_negative_counts_are_dropped() {
        let rate = Rate::from_headers(&headers(&[
            ("X-RateLimit-Limit", "-1"),
            ("X-RateLimit-Remaining", "-5"),
        ]));
        assert_eq!(rate.request_limit, 0);
        assert_eq!(rate.requests_remaining, 0);
    }

    #[test]
    fn test_advisory_helpers() {
        let now = DateTime::<Utc>::from_timestamp(1_000, 0).unwrap();
        let rate = Rate {
            request_limit: 10,
            requests_remaining: 0,
            reset: DateTime::<Utc>::from_timestamp(1_030, 0),
        };
        assert!(rate.is_exhausted());
        assert_eq!(rate.time_until_reset(now), Some(Duration::from_secs(30)));

        let later = DateTime::<Utc>::from_timestamp(2_000, 0).unwrap();
        assert_eq!(rate.time_until_reset(later), None);
        assert!(!Rate::default().is_exhausted());
    }

    #[test]
    fn test_tracker_last_writer_wins() {
        let tracker = RateLimitTracker::new();
        assert_eq!(tracker.latest(), Rate::default());

        tracker.record(Rate {
            request_limit: 100,
            requests_remaining: 99,
            reset: None,
        });
        tracker.record(Rate {
            request_limit: 100,
            requests_remaining: 42,
            reset: None,
        });
        assert_eq!(tracker.latest().requests_remaining, 42);
    }
}
