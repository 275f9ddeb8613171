//! List Options
//!
//! Paging parameters shared by list endpoints. The client passes them through
//! as query parameters and does not interpret them.

use reqwest::Url;
use serde::{Deserialize, Serialize};

/// Optional parameters for list calls
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListOptions {
    /// Page of results to retrieve
    #[serde(default)]
    pub page: u32,

    /// Number of results per page
    #[serde(default)]
    pub per_page: u32,

    /// Resources to return as collections instead of references
    #[serde(default)]
    pub includes: String,
}

impl ListOptions {
    pub fn page(page: u32, per_page: u32) -> Self {
        Self {
            page,
            per_page,
            ..Self::default()
        }
    }

    pub fn with_includes(mut self, includes: impl Into<String>) -> Self {
        self.includes = includes.into();
        self
    }

    /// Append the non-empty options to `url` as query parameters.
    pub fn apply(&self, url: &mut Url) {
        if self.page == 0 && self.per_page == 0 && self.includes.is_empty() {
            return;
        }

        let mut pairs = url.query_pairs_mut();
        if self.page > 0 {
            pairs.append_pair("page", &self.page.to_string());
        }
        if self.per_page > 0 {
            pairs.append_pair("per_page", &self.per_page.to_string());
        }
        if !self.includes.is_empty() {
            pairs.append_pair("include", &self.includes);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_options_leave_url_alone() {
        let mut url = Url::parse("https://api.packet.net/plans").unwrap();
        ListOptions::default().apply(&mut url);
        assert_eq!(url.as_str(), "https://api.packet.net/plans");
    }

    #[test]
    fn test_options_as_query() {
        let mut url = Url::parse("https://api.packet.net/projects").unwrap();
        ListOptions::page(2, 50)
            .with_includes("devices,members")
            .apply(&mut url);
        assert_eq!(
            url.as_str(),
            "https://api.packet.net/projects?page=2&per_page=50&include=devices%2Cmembers"
        );
    }
}
