use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde::Deserialize;
use std::time::Duration;
use url::Url;

use crate::error::{ReleaseTagError, Result};
use crate::forge::ForgePort;

const PRIVATE_TOKEN_HEADER: &str = "PRIVATE-TOKEN";

/// Subset of the GitLab merge request resource we read
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct MergeRequest {
    pub iid: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub labels: Vec<String>,
}

/// Blocking GitLab REST v4 client authenticated with a private token.
pub struct GitLabClient {
    http: Client,
    host: Url,
    project_id: String,
    private_token: String,
}

impl GitLabClient {
    pub fn new(
        host: &str,
        project_id: impl Into<String>,
        private_token: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let host = Url::parse(host).map_err(|e| {
            ReleaseTagError::resolver(format!("Invalid forge host '{}': {}", host, e))
        })?;

        let http = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("release-tagger/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ReleaseTagError::resolver(format!("Cannot build HTTP client: {}", e)))?;

        Ok(GitLabClient {
            http,
            host,
            project_id: project_id.into(),
            private_token: private_token.into(),
        })
    }

    /// `{host}/api/v4/<segments...>`, each segment percent-encoded.
    pub fn api_url(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.host.clone();
        {
            let mut path = url.path_segments_mut().map_err(|_| {
                ReleaseTagError::resolver(format!(
                    "Forge host '{}' cannot be a base URL",
                    self.host
                ))
            })?;
            path.pop_if_empty().extend(["api", "v4"]).extend(segments);
        }
        Ok(url)
    }

    fn get_json<T: serde::de::DeserializeOwned>(&self, url: Url) -> Result<T> {
        tracing::debug!(url = %url, "GET");

        let response = self
            .http
            .get(url.clone())
            .header(PRIVATE_TOKEN_HEADER, &self.private_token)
            .send()
            .map_err(|e| ReleaseTagError::resolver(format!("Request to {} failed: {}", url, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(status_error(status, &url));
        }

        response.json::<T>().map_err(|e| {
            ReleaseTagError::resolver(format!("Unexpected response from {}: {}", url, e))
        })
    }

    /// Verify the token by reading the current user.
    pub fn authenticate(&self) -> Result<()> {
        let url = self.api_url(&["user"])?;
        self.get_json::<serde_json::Value>(url).map(|_| ())
    }

    pub fn merge_request(&self, iid: u64) -> Result<MergeRequest> {
        let iid = iid.to_string();
        let url = self.api_url(&["projects", &self.project_id, "merge_requests", &iid])?;
        self.get_json(url)
    }
}

impl ForgePort for GitLabClient {
    fn merge_request_labels(&self, iid: u64) -> Result<Vec<String>> {
        self.authenticate()?;
        let merge_request = self.merge_request(iid)?;
        tracing::debug!(iid, title = %merge_request.title, "resolved merge request");
        Ok(merge_request.labels)
    }
}

fn status_error(status: StatusCode, url: &Url) -> ReleaseTagError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            ReleaseTagError::resolver(format!("Authentication rejected ({}) for {}", status, url))
        }
        StatusCode::NOT_FOUND => ReleaseTagError::resolver(format!("Not found: {}", url)),
        _ => ReleaseTagError::resolver(format!("Unexpected status {} from {}", status, url)),
    }
}
