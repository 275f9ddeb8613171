//! Devices
//!
//! Servers provisioned inside a project.

use crate::api::{ListOptions, Plan};
use crate::client::{Destination, Response, Transport};
use crate::error::Result;
use crate::{Client, Method, NO_BODY};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A provisioned server
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Device {
    pub id: String,

    #[serde(default)]
    pub hostname: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub billing_cycle: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plan: Option<Plan>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Envelope of `GET projects/{id}/devices`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeviceList {
    #[serde(default)]
    pub devices: Vec<Device>,
}

/// Body of a device creation call
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeviceCreateRequest {
    pub hostname: String,
    pub plan: String,
    pub facility: String,
    pub operating_system: String,
    pub billing_cycle: String,

    #[serde(skip)]
    pub project_id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub userdata: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

/// Service object for devices
pub struct DeviceService<'a, T = reqwest::Client> {
    client: &'a Client<T>,
}

impl<'a, T: Transport> DeviceService<'a, T> {
    pub fn new(client: &'a Client<T>) -> Self {
        Self { client }
    }

    /// List the devices of a project
    pub async fn list(
        &self,
        project_id: &str,
        opts: &ListOptions,
    ) -> Result<(Vec<Device>, Response)> {
        let path = format!("projects/{}/devices", project_id);
        let mut request = self.client.new_request(Method::GET, &path, NO_BODY)?;
        opts.apply(request.url_mut());

        let mut root = DeviceList::default();
        let response = self
            .client
            .execute(request, Some(Destination::json(&mut root)))
            .await?;
        Ok((root.devices, response))
    }

    pub async fn get(&self, device_id: &str) -> Result<(Device, Response)> {
        let path = format!("devices/{}", device_id);
        let request = self.client.new_request(Method::GET, &path, NO_BODY)?;

        let mut device = Device::default();
        let response = self
            .client
            .execute(request, Some(Destination::json(&mut device)))
            .await?;
        Ok((device, response))
    }

    /// Provision a device in `create.project_id`
    pub async fn create(&self, create: &DeviceCreateRequest) -> Result<(Device, Response)> {
        let path = format!("projects/{}/devices", create.project_id);
        let request = self.client.new_request(Method::POST, &path, Some(create))?;

        let mut device = Device::default();
        let response = self
            .client
            .execute(request, Some(Destination::json(&mut device)))
            .await?;
        Ok((device, response))
    }

    pub async fn delete(&self, device_id: &str) -> Result<Response> {
        let path = format!("devices/{}", device_id);
        let request = self.client.new_request(Method::DELETE, &path, NO_BODY)?;
        self.client.execute(request, None).await
    }
}
