//! Operating Systems

use crate::client::{Destination, Response, Transport};
use crate::error::Result;
use crate::{Client, Method, NO_BODY};
use serde::{Deserialize, Serialize};

/// An installable operating system; `slug` is what device creation takes
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OperatingSystem {
    pub slug: String,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub distro: String,

    #[serde(default)]
    pub version: String,
}

/// Envelope of `GET operating-systems`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OperatingSystemList {
    #[serde(default)]
    pub operating_systems: Vec<OperatingSystem>,
}

/// Service object for operating systems
pub struct OperatingSystemService<'a, T = reqwest::Client> {
    client: &'a Client<T>,
}

impl<'a, T: Transport> OperatingSystemService<'a, T> {
    pub fn new(client: &'a Client<T>) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<(Vec<OperatingSystem>, Response)> {
        let request = self
            .client
            .new_request(Method::GET, "operating-systems", NO_BODY)?;

        let mut root = OperatingSystemList::default();
        let response = self
            .client
            .execute(request, Some(Destination::json(&mut root)))
            .await?;
        Ok((root.operating_systems, response))
    }
}
