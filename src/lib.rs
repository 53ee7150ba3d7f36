//! CI helper that publishes a NuGet package unless the version already
//! exists on the registry.
//!
//! # Workflow
//!
//! 1. [`config`]: read and validate environment configuration
//! 2. [`resolver`]: resolve the version (literal, or regex over the project file)
//! 3. [`registry`]: ask the registry whether that version is already published
//! 4. [`publish`]: when absent, run the dotnet build/pack/push pipeline
//! 5. [`orchestrator`]: tie the steps together into one `Result<Outcome, _>`

pub mod config;
pub mod error;
pub mod orchestrator;
pub mod publish;
pub mod registry;
pub mod resolver;
