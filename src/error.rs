use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required configuration: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {key}: {value}")]
    Invalid { key: &'static str, value: String },

    #[error("Project file not found: {0}")]
    ProjectFileNotFound(PathBuf),
}

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("Failed to read project file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid version regex: {0}")]
    InvalidRegex(#[from] regex::Error),

    #[error("Version regex has no capture group: {0}")]
    NoCaptureGroup(String),

    #[error("Version not found in project file (pattern: {0})")]
    VersionNotFound(String),
}

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

#[derive(Debug, Error)]
pub enum PublishError {
    #[error("Failed to spawn command {command}: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Command failed with exit code {code:?}: {command}")]
    CommandFailed { command: String, code: Option<i32> },
}

/// Union of everything that can abort a publish run. The orchestrator
/// propagates these up to `main`, the single termination boundary.
#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Publish(#[from] PublishError),
}
