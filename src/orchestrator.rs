//! Publish workflow: resolve the version, check the registry, then publish
//! or skip.

use std::fmt;

use tracing::{info, warn};

use crate::config::Config;
use crate::error::{ConfigError, RunError};
use crate::publish::{CommandRunner, Publisher};
use crate::registry::RegistryClient;
use crate::resolver;

/// Final outcome of one run. Failure is the `Err` arm of [`run`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The version was already on the registry; nothing was published
    Skipped { version: String },
    /// The package was built, packed and pushed
    Published { version: String },
    /// Built and packed, but no API key was available to push
    Packed { version: String },
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Skipped { version } => {
                write!(f, "Version {} already exists, nothing to publish", version)
            }
            Outcome::Published { version } => {
                write!(f, "Version {} was packed and published", version)
            }
            Outcome::Packed { version } => write!(
                f,
                "Version {} was packed but not pushed (no API key)",
                version
            ),
        }
    }
}

/// Runs the whole workflow once. Every step either advances the run or
/// aborts it with a typed error; no state is carried between steps other
/// than the resolved version.
pub async fn run(
    config: &Config,
    registry: &dyn RegistryClient,
    runner: &dyn CommandRunner,
) -> Result<Outcome, RunError> {
    if !config.project_file.exists() {
        return Err(ConfigError::ProjectFileNotFound(config.project_file.clone()).into());
    }
    info!("Project file: {}", config.project_file.display());

    let version = resolver::resolve_version(config)?;
    info!("Package version: {}", version);

    if registry
        .version_exists(&config.package_name, &version)
        .await?
    {
        info!(
            "Version {} of {} already exists on the registry",
            version, config.package_name
        );
        return Ok(Outcome::Skipped { version });
    }

    info!("Generating new version: {}", version);
    let publisher = Publisher::new(runner, config);
    publisher.build()?;
    publisher.pack()?;

    let Some(api_key) = config.nuget_key.as_deref() else {
        warn!("NUGET_KEY not provided, skipping upload");
        return Ok(Outcome::Packed { version });
    };

    publisher.push(api_key)?;
    info!("Version {} has been uploaded", version);

    Ok(Outcome::Published { version })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RegistryApi;
    use crate::error::{PublishError, RegistryError};
    use crate::publish::MockCommandRunner;
    use crate::registry::MockRegistryClient;
    use mockall::Sequence;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn config_for(project_file: &NamedTempFile, nuget_key: Option<&str>) -> Config {
        Config {
            project_file: project_file.path().to_path_buf(),
            package_name: "Foo.Bar".to_string(),
            version_regex: Some(r"<Version>(.*)</Version>".to_string()),
            version_static: None,
            nuget_key: nuget_key.map(str::to_string),
            nuget_source: "https://api.nuget.org".to_string(),
            registry_api: RegistryApi::FlatContainer,
            nexus_repository: "nuget-hosted".to_string(),
            nexus_username: None,
            nexus_password: None,
            include_symbols: false,
        }
    }

    fn project_file() -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"<Project><Version>2.0.0</Version></Project>")
            .unwrap();
        file
    }

    fn registry_reporting(exists: bool) -> MockRegistryClient {
        let mut registry = MockRegistryClient::new();
        registry
            .expect_version_exists()
            .withf(|name, version| name == "Foo.Bar" && version == "2.0.0")
            .times(1)
            .returning(move |_, _| Ok(exists));
        registry
    }

    #[tokio::test]
    async fn existing_version_is_skipped_without_running_any_command() {
        let file = project_file();
        let config = config_for(&file, Some("key"));
        let registry = registry_reporting(true);
        // No expectations: any runner invocation panics.
        let runner = MockCommandRunner::new();

        let outcome = run(&config, &registry, &runner).await.unwrap();

        assert_eq!(
            outcome,
            Outcome::Skipped {
                version: "2.0.0".to_string()
            }
        );
    }

    #[tokio::test]
    async fn absent_version_runs_build_pack_push_in_order() {
        let file = project_file();
        let config = config_for(&file, Some("key"));
        let registry = registry_reporting(false);

        let mut runner = MockCommandRunner::new();
        let mut seq = Sequence::new();
        for step in ["build", "pack", "nuget"] {
            runner
                .expect_run()
                .withf(move |_, args| args[0] == step)
                .times(1)
                .in_sequence(&mut seq)
                .returning(|_, _| Ok(()));
        }

        let outcome = run(&config, &registry, &runner).await.unwrap();

        assert_eq!(
            outcome,
            Outcome::Published {
                version: "2.0.0".to_string()
            }
        );
    }

    #[tokio::test]
    async fn failed_pack_step_stops_the_run_before_push() {
        let file = project_file();
        let config = config_for(&file, Some("key"));
        let registry = registry_reporting(false);

        let mut runner = MockCommandRunner::new();
        let mut seq = Sequence::new();
        runner
            .expect_run()
            .withf(|_, args| args[0] == "build")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(()));
        runner
            .expect_run()
            .withf(|_, args| args[0] == "pack")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| {
                Err(PublishError::CommandFailed {
                    command: "dotnet pack".to_string(),
                    code: Some(1),
                })
            });
        // No push expectation: reaching it would panic.

        let result = run(&config, &registry, &runner).await;

        assert!(matches!(result, Err(RunError::Publish(_))));
    }

    #[tokio::test]
    async fn missing_api_key_skips_push_after_build_and_pack() {
        let file = project_file();
        let config = config_for(&file, None);
        let registry = registry_reporting(false);

        let mut runner = MockCommandRunner::new();
        let mut seq = Sequence::new();
        for step in ["build", "pack"] {
            runner
                .expect_run()
                .withf(move |_, args| args[0] == step)
                .times(1)
                .in_sequence(&mut seq)
                .returning(|_, _| Ok(()));
        }

        let outcome = run(&config, &registry, &runner).await.unwrap();

        assert_eq!(
            outcome,
            Outcome::Packed {
                version: "2.0.0".to_string()
            }
        );
    }

    #[tokio::test]
    async fn registry_error_aborts_the_run() {
        let file = project_file();
        let config = config_for(&file, Some("key"));

        let mut registry = MockRegistryClient::new();
        registry.expect_version_exists().times(1).returning(|_, _| {
            Err(RegistryError::InvalidResponse(
                "Unexpected status: 500".to_string(),
            ))
        });
        let runner = MockCommandRunner::new();

        let result = run(&config, &registry, &runner).await;

        assert!(matches!(result, Err(RunError::Registry(_))));
    }

    #[tokio::test]
    async fn missing_project_file_fails_before_anything_else() {
        let file = project_file();
        let mut config = config_for(&file, Some("key"));
        config.project_file = "does/not/exist.csproj".into();

        let registry = MockRegistryClient::new();
        let runner = MockCommandRunner::new();

        let result = run(&config, &registry, &runner).await;

        assert!(matches!(
            result,
            Err(RunError::Config(ConfigError::ProjectFileNotFound(_)))
        ));
    }

    #[tokio::test]
    async fn static_version_bypasses_extraction() {
        let file = project_file();
        let mut config = config_for(&file, Some("key"));
        config.version_static = Some("5.0.0".to_string());
        config.version_regex = None;

        let mut registry = MockRegistryClient::new();
        registry
            .expect_version_exists()
            .withf(|_, version| version == "5.0.0")
            .times(1)
            .returning(|_, _| Ok(true));
        let runner = MockCommandRunner::new();

        let outcome = run(&config, &registry, &runner).await.unwrap();

        assert_eq!(
            outcome,
            Outcome::Skipped {
                version: "5.0.0".to_string()
            }
        );
    }
}
