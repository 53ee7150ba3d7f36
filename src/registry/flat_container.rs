//! NuGet v3 flat-container index client

use serde::Deserialize;
use tracing::warn;

use crate::config::REGISTRY_TIMEOUT;
use crate::error::RegistryError;
use crate::registry::RegistryClient;

/// Per-package index document listing every published version string
#[derive(Debug, Deserialize)]
struct FlatContainerIndex {
    versions: Vec<String>,
}

/// Client for the flat-container listing API of a NuGet v3 feed
pub struct FlatContainerClient {
    client: reqwest::Client,
    source: String,
}

impl FlatContainerClient {
    pub fn new(source: &str) -> Self {
        Self {
            client: reqwest::Client::builder()
                .user_agent("nuget-publish")
                .timeout(REGISTRY_TIMEOUT)
                .build()
                .expect("Failed to create HTTP client"),
            source: source.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait::async_trait]
impl RegistryClient for FlatContainerClient {
    async fn version_exists(
        &self,
        package_name: &str,
        version: &str,
    ) -> Result<bool, RegistryError> {
        let url = format!(
            "{}/v3-flatcontainer/{}/index.json",
            self.source, package_name
        );

        let response = self.client.get(&url).send().await?;

        let status = response.status();

        // A missing index means the package has never been published.
        if status == reqwest::StatusCode::NOT_FOUND {
            return Ok(false);
        }

        if !status.is_success() {
            warn!("flat-container index returned status {}: {}", status, url);
            return Err(RegistryError::InvalidResponse(format!(
                "Unexpected status: {}",
                status
            )));
        }

        let index: FlatContainerIndex = response.json().await.map_err(|e| {
            warn!("Failed to parse flat-container index: {}", e);
            RegistryError::InvalidResponse(e.to_string())
        })?;

        Ok(index.versions.iter().any(|v| v == version))
    }
}
