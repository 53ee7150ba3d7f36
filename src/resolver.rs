//! Resolves the version to publish, either from an explicit value or by
//! extracting it from the project file with a regex.

use std::fs;
use std::path::Path;

use regex::RegexBuilder;
use tracing::info;

use crate::config::Config;
use crate::error::ResolveError;

/// Resolves the target version. A static version is used verbatim and the
/// project file is never read in that case.
pub fn resolve_version(config: &Config) -> Result<String, ResolveError> {
    if let Some(version) = &config.version_static {
        return Ok(version.clone());
    }

    // Config validation guarantees a regex is present when no static
    // version is given.
    let pattern = config
        .version_regex
        .as_deref()
        .ok_or_else(|| ResolveError::VersionNotFound(String::new()))?;

    extract_version(&config.project_file, pattern)
}

/// Applies `pattern` in multiline mode to the project file content; the
/// first capture group is the version.
pub fn extract_version(project_file: &Path, pattern: &str) -> Result<String, ResolveError> {
    let regex = RegexBuilder::new(pattern).multi_line(true).build()?;
    if regex.captures_len() < 2 {
        return Err(ResolveError::NoCaptureGroup(pattern.to_string()));
    }

    let content = fs::read_to_string(project_file).map_err(|source| ResolveError::Read {
        path: project_file.to_path_buf(),
        source,
    })?;

    let version = regex
        .captures(&content)
        .and_then(|captures| captures.get(1))
        .map(|group| group.as_str().to_string())
        .ok_or_else(|| ResolveError::VersionNotFound(pattern.to_string()))?;

    info!("Extracted version {} from {}", version, project_file.display());

    Ok(version)
}
