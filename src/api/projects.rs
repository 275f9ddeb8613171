//! Projects

use crate::api::ListOptions;
use crate::client::{Destination, Response, Transport};
use crate::error::Result;
use crate::{Client, Method, NO_BODY};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,

    #[serde(default)]
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Envelope of `GET projects`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectList {
    #[serde(default)]
    pub projects: Vec<Project>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectCreateRequest {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method_id: Option<String>,
}

/// Service object for projects
pub struct ProjectService<'a, T = reqwest::Client> {
    client: &'a Client<T>,
}

impl<'a, T: Transport> ProjectService<'a, T> {
    pub fn new(client: &'a Client<T>) -> Self {
        Self { client }
    }

    pub async fn list(&self, opts: &ListOptions) -> Result<(Vec<Project>, Response)> {
        let mut request = self.client.new_request(Method::GET, "projects", NO_BODY)?;
        opts.apply(request.url_mut());

        let mut root = ProjectList::default();
        let response = self
            .client
            .execute(request, Some(Destination::json(&mut root)))
            .await?;
        Ok((root.projects, response))
    }

    pub async fn get(&self, project_id: &str) -> Result<(Project, Response)> {
        let path = format!("projects/{}", project_id);
        let request = self.client.new_request(Method::GET, &path, NO_BODY)?;

        let mut project = Project::default();
        let response = self
            .client
            .execute(request, Some(Destination::json(&mut project)))
            .await?;
        Ok((project, response))
    }

    pub async fn create(&self, create: &ProjectCreateRequest) -> Result<(Project, Response)> {
        let request = self.client.new_request(Method::POST, "projects", Some(create))?;

        let mut project = Project::default();
        let response = self
            .client
            .execute(request, Some(Destination::json(&mut project)))
            .await?;
        Ok((project, response))
    }

    pub async fn delete(&self, project_id: &str) -> Result<Response> {
        let path = format!("projects/{}", project_id);
        let request = self.client.new_request(Method::DELETE, &path, NO_BODY)?;
        self.client.execute(request, None).await
    }
}
