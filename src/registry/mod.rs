//! Registry clients for checking whether a package version is already published

#[cfg(test)]
use mockall::automock;

pub mod flat_container;
pub mod nexus;

pub use flat_container::FlatContainerClient;
pub use nexus::NexusSearchClient;

use crate::config::{Config, RegistryApi};
use crate::error::RegistryError;

/// Trait for the existence check against a package registry
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait RegistryClient: Send + Sync {
    /// Returns true when `version` of `package_name` is already on the
    /// registry. A registry that has never seen the package reports false,
    /// not an error.
    async fn version_exists(
        &self,
        package_name: &str,
        version: &str,
    ) -> Result<bool, RegistryError>;
}

/// Builds the client the configuration selects
pub fn from_config(config: &Config) -> Box<dyn RegistryClient> {
    match config.registry_api {
        RegistryApi::FlatContainer => Box::new(FlatContainerClient::new(&config.nuget_source)),
        RegistryApi::NexusSearch => {
            let mut client =
                NexusSearchClient::new(&config.nuget_source, &config.nexus_repository);
            if let Some((username, password)) = config.nexus_credentials() {
                client = client.with_credentials(username, password);
            }
            Box::new(client)
        }
    }
}
