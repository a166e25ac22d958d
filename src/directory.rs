//! HTTP role directory backed by `reqwest`.
//!
//! ERROR HANDLING
//! ==============
//! Transport failures, non-success statuses and malformed bodies all map to
//! [`DirectoryError`] variants so the resolver's retry budget can tell
//! retryable failures (network, 429, 5xx) from terminal ones (401, 403, bad
//! role string).

use access::{DirectoryError, Role, RoleDirectory};
use serde::Deserialize;

use crate::config::ResolverConfig;

#[derive(Debug, Deserialize)]
struct RoleResponse {
    role: String,
}

pub(crate) fn role_endpoint(base_url: &str) -> String {
    format!("{}/users/role", base_url.trim_end_matches('/'))
}

/// Role directory reached over the ScarletAid REST API.
pub struct HttpRoleDirectory {
    client: reqwest::Client,
    endpoint: String,
    access_token: Option<String>,
}

impl HttpRoleDirectory {
    /// Build a directory client with the configured timeouts.
    ///
    /// # Errors
    ///
    /// Returns [`reqwest::Error`] if the HTTP client cannot be constructed.
    pub fn new(config: &ResolverConfig, access_token: Option<String>) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(config.timeouts.request)
            .connect_timeout(config.timeouts.connect)
            .build()?;
        Ok(Self { client, endpoint: role_endpoint(&config.api_base_url), access_token })
    }
}

#[async_trait::async_trait(?Send)]
impl RoleDirectory for HttpRoleDirectory {
    async fn lookup_role(&self, key: &str) -> Result<Role, DirectoryError> {
        let mut request = self.client.get(&self.endpoint).query(&[("key", key)]);
        if let Some(token) = &self.access_token {
            request = request.bearer_auth(token);
        }

        let resp = request.send().await.map_err(|e| DirectoryError::Transport(e.to_string()))?;
        let status = resp.status();
        if !status.is_success() {
            tracing::debug!(key, status = status.as_u16(), "role directory returned error status");
            return Err(DirectoryError::from_status(status.as_u16()));
        }

        let body: RoleResponse = resp.json().await.map_err(|e| DirectoryError::Decode(e.to_string()))?;
        Ok(body.role.parse::<Role>()?)
    }
}

#[cfg(test)]
#[path = "directory_test.rs"]
mod tests;
