//! Plans
//!
//! Hardware plans offered by the API.

use crate::api::ListOptions;
use crate::client::{Destination, Response, Transport};
use crate::error::Result;
use crate::{Client, Method, NO_BODY};
use serde::{Deserialize, Serialize};

/// A hardware plan
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<String>,
}

/// Envelope of `GET plans`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlanList {
    #[serde(default)]
    pub plans: Vec<Plan>,
}

/// Service object for plans
pub struct PlanService<'a, T = reqwest::Client> {
    client: &'a Client<T>,
}

impl<'a, T: Transport> PlanService<'a, T> {
    pub fn new(client: &'a Client<T>) -> Self {
        Self { client }
    }

    /// List all plans
    pub async fn list(&self, opts: &ListOptions) -> Result<(Vec<Plan>, Response)> {
        let mut request = self.client.new_request(Method::GET, "plans", NO_BODY)?;
        opts.apply(request.url_mut());

        let mut root = PlanList::default();
        let response = self
            .client
            .execute(request, Some(Destination::json(&mut root)))
            .await?;
        Ok((root.plans, response))
    }
}
