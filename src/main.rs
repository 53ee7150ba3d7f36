use clap::Parser;
use tracing_subscriber::EnvFilter;

use nuget_publish::config::Config;
use nuget_publish::orchestrator;
use nuget_publish::publish::ShellRunner;
use nuget_publish::registry;

#[derive(Parser)]
#[command(name = "nuget-publish")]
#[command(version, about = "Publishes a NuGet package unless the version already exists")]
struct Cli {}

fn main() -> anyhow::Result<()> {
    let _cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let config = Config::from_env()?;
    let client = registry::from_config(&config);
    let runner = ShellRunner;

    let outcome = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?
        .block_on(orchestrator::run(&config, client.as_ref(), &runner))?;

    println!("{outcome}");
    Ok(())
}
