//! # Hosting Platform Integration
//!
//! Opening a merge request is the only thing go-bump asks of the hosting
//! platform, captured by the [`ReviewRequester`] trait. The orchestrator only
//! sees the trait, so supporting another platform means adding another
//! implementation.
//!
//! [`GitLabHosting`] talks to the GitLab REST API (v4). The instance and the
//! project both come from the library identifier: for
//! `gitlab.example.com/team/service` the request goes to
//! `https://gitlab.example.com/api/v4/projects/team%2Fservice/merge_requests`.
//! Requests authenticate with a personal access token sent as
//! `PRIVATE-TOKEN`.

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{Error, Result};
use crate::library::LibraryId;

/// Creates merge requests on a hosting platform.
pub trait ReviewRequester {
    /// Open a request to merge `source_branch` into `target_branch` of
    /// `project`, returning its web URL.
    fn create_review_request(
        &self,
        project: &LibraryId,
        title: &str,
        source_branch: &str,
        target_branch: &str,
    ) -> Result<String>;
}

#[derive(Debug, Serialize)]
struct CreateMergeRequest<'a> {
    title: &'a str,
    source_branch: &'a str,
    target_branch: &'a str,
}

#[derive(Debug, Deserialize)]
struct MergeRequest {
    web_url: String,
}

/// GitLab REST client.
pub struct GitLabHosting {
    agent: ureq::Agent,
    token: Option<String>,
    base_url: Option<Url>,
}

impl GitLabHosting {
    /// Client reaching each project's own host over HTTPS.
    pub fn new(token: Option<String>) -> Self {
        if token.is_none() {
            warn!(
                "{} is not set; merge requests will be created anonymously",
                crate::defaults::API_TOKEN_ENV
            );
        }
        Self {
            agent: ureq::AgentBuilder::new().build(),
            token,
            base_url: None,
        }
    }

    /// Send every request to `base_url` instead of the project's host.
    pub fn with_base_url(mut self, base_url: Url) -> Self {
        self.base_url = Some(base_url);
        self
    }

    /// The merge request collection URL for `project`.
    pub fn endpoint(&self, project: &LibraryId) -> Result<Url> {
        let invalid = |message: String| Error::Request {
            library: project.to_string(),
            message,
        };

        let mut url = match &self.base_url {
            Some(base) => base.clone(),
            None => Url::parse(&format!("https://{}/", project.host()))
                .map_err(|e| invalid(format!("invalid host '{}': {}", project.host(), e)))?,
        };

        url.path_segments_mut()
            .map_err(|_| invalid("API base URL is not hierarchical".to_string()))?
            .pop_if_empty()
            .extend(["api", "v4", "projects"])
            // A single segment, so the slash is percent-encoded.
            .push(&project.project_path())
            .push("merge_requests");

        Ok(url)
    }
}

impl ReviewRequester for GitLabHosting {
    fn create_review_request(
        &self,
        project: &LibraryId,
        title: &str,
        source_branch: &str,
        target_branch: &str,
    ) -> Result<String> {
        let request_error = |message: String| Error::Request {
            library: project.to_string(),
            message,
        };

        let endpoint = self.endpoint(project)?;
        debug!("POST {}", endpoint);

        let mut request = self.agent.post(endpoint.as_str());
        if let Some(token) = &self.token {
            request = request.set("PRIVATE-TOKEN", token);
        }

        let response = request
            .send_json(CreateMergeRequest {
                title,
                source_branch,
                target_branch,
            })
            .map_err(|e| match e {
                ureq::Error::Status(code, response) => {
                    let body = response.into_string().unwrap_or_default();
                    request_error(format!("HTTP {}: {}", code, body.trim()))
                }
                ureq::Error::Transport(transport) => request_error(transport.to_string()),
            })?;

        let merge_request: MergeRequest = response
            .into_json()
            .map_err(|e| request_error(format!("invalid response body: {}", e)))?;

        Ok(merge_request.web_url)
    }
}
