use std::path::PathBuf;
use std::time::Duration;

use crate::error::ConfigError;

/// Timeout applied to every registry request (30 seconds)
pub const REGISTRY_TIMEOUT: Duration = Duration::from_secs(30);

/// Default Nexus hosted repository name
pub const DEFAULT_NEXUS_REPOSITORY: &str = "nuget-hosted";

/// Which registry API to query for existing versions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegistryApi {
    /// NuGet v3 flat-container index (per-package list of version strings)
    #[default]
    FlatContainer,
    /// Nexus search API with optional basic auth
    NexusSearch,
}

impl RegistryApi {
    fn parse(value: &str) -> Result<Self, ConfigError> {
        match value {
            "flat-container" => Ok(Self::FlatContainer),
            "nexus-search" => Ok(Self::NexusSearch),
            other => Err(ConfigError::Invalid {
                key: "REGISTRY_API",
                value: other.to_string(),
            }),
        }
    }
}

/// Run configuration, read once from the environment and immutable afterwards
#[derive(Debug, Clone)]
pub struct Config {
    pub project_file: PathBuf,
    pub package_name: String,
    pub version_regex: Option<String>,
    pub version_static: Option<String>,
    pub nuget_key: Option<String>,
    pub nuget_source: String,
    pub registry_api: RegistryApi,
    pub nexus_repository: String,
    pub nexus_username: Option<String>,
    pub nexus_password: Option<String>,
    pub include_symbols: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from an injectable key lookup, so tests never have to
    /// mutate the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let project_file = PathBuf::from(required(&lookup, "PROJECT_FILE_PATH")?);
        let package_name = required(&lookup, "PACKAGE_NAME")?;
        let nuget_source = required(&lookup, "NUGET_SOURCE")?;

        let version_static = optional(&lookup, "VERSION_STATIC");
        let version_regex = optional(&lookup, "VERSION_REGEX");
        if version_static.is_none() && version_regex.is_none() {
            return Err(ConfigError::Missing("VERSION_REGEX"));
        }

        let registry_api = match optional(&lookup, "REGISTRY_API") {
            Some(value) => RegistryApi::parse(&value)?,
            None => RegistryApi::default(),
        };

        let nuget_key = optional(&lookup, "NUGET_KEY");
        // The search-API variant has no unauthenticated upload path.
        if registry_api == RegistryApi::NexusSearch && nuget_key.is_none() {
            return Err(ConfigError::Missing("NUGET_KEY"));
        }

        let nexus_repository = optional(&lookup, "NEXUS_REPOSITORY")
            .unwrap_or_else(|| DEFAULT_NEXUS_REPOSITORY.to_string());

        let include_symbols = match optional(&lookup, "INCLUDE_SYMBOLS") {
            None => false,
            Some(value) => parse_bool(&value).ok_or(ConfigError::Invalid {
                key: "INCLUDE_SYMBOLS",
                value,
            })?,
        };

        Ok(Self {
            project_file,
            package_name,
            version_regex,
            version_static,
            nuget_key,
            nuget_source,
            registry_api,
            nexus_repository,
            nexus_username: optional(&lookup, "NEXUS_USERNAME"),
            nexus_password: optional(&lookup, "NEXUS_PASSWORD"),
            include_symbols,
        })
    }

    /// Basic auth credentials, present only when both halves are configured
    pub fn nexus_credentials(&self) -> Option<(&str, &str)> {
        match (&self.nexus_username, &self.nexus_password) {
            (Some(user), Some(pass)) => Some((user.as_str(), pass.as_str())),
            _ => None,
        }
    }
}

fn required<F>(lookup: &F, key: &'static str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    optional(lookup, key).ok_or(ConfigError::Missing(key))
}

fn optional<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key).filter(|value| !value.is_empty())
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => None,
    }
}
