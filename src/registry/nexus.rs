//! Nexus Repository search API client

use serde::Deserialize;
use tracing::warn;

use crate::config::REGISTRY_TIMEOUT;
use crate::error::RegistryError;
use crate::registry::RegistryClient;

/// Response from the Nexus search endpoint
#[derive(Debug, Deserialize)]
struct SearchResponse {
    items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    name: String,
    version: String,
}

/// Client for the search API of a self-hosted Nexus registry
pub struct NexusSearchClient {
    client: reqwest::Client,
    source: String,
    repository: String,
    credentials: Option<(String, String)>,
}

impl NexusSearchClient {
    pub fn new(source: &str, repository: &str) -> Self {
        Self {
            client: reqwest::Client::builder()
                .user_agent("nuget-publish")
                .timeout(REGISTRY_TIMEOUT)
                .build()
                .expect("Failed to create HTTP client"),
            source: source.trim_end_matches('/').to_string(),
            repository: repository.to_string(),
            credentials: None,
        }
    }

    pub fn with_credentials(mut self, username: &str, password: &str) -> Self {
        self.credentials = Some((username.to_string(), password.to_string()));
        self
    }
}

#[async_trait::async_trait]
impl RegistryClient for NexusSearchClient {
    async fn version_exists(
        &self,
        package_name: &str,
        version: &str,
    ) -> Result<bool, RegistryError> {
        let url = format!("{}/service/rest/v1/search", self.source);

        let mut request = self.client.get(&url).query(&[
            ("repository", self.repository.as_str()),
            ("name", package_name),
            ("version", version),
        ]);

        if let Some((username, password)) = &self.credentials {
            request = request.basic_auth(username, Some(password));
        }

        let response = request.send().await?;

        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Ok(false);
        }

        if !status.is_success() {
            warn!("Nexus search returned status {}: {}", status, url);
            return Err(RegistryError::InvalidResponse(format!(
                "Unexpected status: {}",
                status
            )));
        }

        let body: SearchResponse = response.json().await.map_err(|e| {
            warn!("Failed to parse Nexus search response: {}", e);
            RegistryError::InvalidResponse(e.to_string())
        })?;

        // Some servers ignore the name/version query filters and return a
        // broader item set, so match each returned item exactly.
        Ok(body
            .items
            .iter()
            .any(|item| item.name == package_name && item.version == version))
    }
}
