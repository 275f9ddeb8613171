//! Facilities
//!
//! Datacenters devices can be provisioned in.

use crate::api::ListOptions;
use crate::client::{Destination, Response, Transport};
use crate::error::Result;
use crate::{Client, Method, NO_BODY};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Facility {
    pub id: String,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub code: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub features: Vec<String>,
}

/// Envelope of `GET facilities`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FacilityList {
    #[serde(default)]
    pub facilities: Vec<Facility>,
}

/// Service object for facilities
pub struct FacilityService<'a, T = reqwest::Client> {
    client: &'a Client<T>,
}

impl<'a, T: Transport> FacilityService<'a, T> {
    pub fn new(client: &'a Client<T>) -> Self {
        Self { client }
    }

    pub async fn list(&self, opts: &ListOptions) -> Result<(Vec<Facility>, Response)> {
        let mut request = self.client.new_request(Method::GET, "facilities", NO_BODY)?;
        opts.apply(request.url_mut());

        let mut root = FacilityList::default();
        let response = self
            .client
            .execute(request, Some(Destination::json(&mut root)))
            .await?;
        Ok((root.facilities, response))
    }
}
