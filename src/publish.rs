//! Invocation of the external dotnet build/pack/push pipeline

use std::process::Command;

#[cfg(test)]
use mockall::automock;

use tracing::info;

use crate::config::Config;
use crate::error::PublishError;

/// Trait for running one external command to completion
#[cfg_attr(test, automock)]
pub trait CommandRunner: Send + Sync {
    /// Runs `program` with `args`, inheriting stdio. Returns an error when
    /// the process cannot be spawned or exits non-zero.
    fn run(&self, program: &str, args: &[String]) -> Result<(), PublishError>;
}

/// Runner backed by real child processes
pub struct ShellRunner;

impl CommandRunner for ShellRunner {
    fn run(&self, program: &str, args: &[String]) -> Result<(), PublishError> {
        info!("Executing: {} {}", program, args.join(" "));

        let status = Command::new(program)
            .args(args)
            .status()
            .map_err(|source| PublishError::Spawn {
                command: program.to_string(),
                source,
            })?;

        if !status.success() {
            return Err(PublishError::CommandFailed {
                command: format!("{} {}", program, args.join(" ")),
                code: status.code(),
            });
        }

        Ok(())
    }
}

/// Sequences the build, pack and push steps for one package version
pub struct Publisher<'a> {
    runner: &'a dyn CommandRunner,
    config: &'a Config,
}

impl<'a> Publisher<'a> {
    pub fn new(runner: &'a dyn CommandRunner, config: &'a Config) -> Self {
        Self { runner, config }
    }

    fn project_file(&self) -> String {
        self.config.project_file.to_string_lossy().into_owned()
    }

    pub fn build(&self) -> Result<(), PublishError> {
        let args = vec![
            "build".to_string(),
            "-c".to_string(),
            "Release".to_string(),
            "--verbosity".to_string(),
            "quiet".to_string(),
            self.project_file(),
        ];
        self.runner.run("dotnet", &args)
    }

    pub fn pack(&self) -> Result<(), PublishError> {
        let mut args = vec!["pack".to_string()];
        if self.config.include_symbols {
            args.push("--include-symbols".to_string());
            args.push("-p:SymbolPackageFormat=snupkg".to_string());
        }
        args.extend([
            "--no-build".to_string(),
            "--verbosity".to_string(),
            "quiet".to_string(),
            "-c".to_string(),
            "Release".to_string(),
            self.project_file(),
            "-o".to_string(),
            ".".to_string(),
        ]);
        self.runner.run("dotnet", &args)
    }

    pub fn push(&self, api_key: &str) -> Result<(), PublishError> {
        let args = vec![
            "nuget".to_string(),
            "push".to_string(),
            "*.nupkg".to_string(),
            "--source".to_string(),
            self.config.nuget_source.clone(),
            "--api-key".to_string(),
            api_key.to_string(),
            "--skip-duplicate".to_string(),
        ];
        self.runner.run("dotnet", &args)
    }
}
