use anyhow::Result;
use clap::Parser;

use module_installer::Cli;
use module_installer::commands::{install_command, installers_command, plan_command};
use module_installer::Commands;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing based on RUST_LOG env var
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.config.as_deref();

    match cli.command {
        Commands::Plan {
            module,
            target,
            flags,
            json,
        } => plan_command(&module, &target, flags, json, config).await,
        Commands::Install {
            module,
            target,
            flags,
        } => install_command(&module, &target, flags, config).await,
        Commands::Installers { target } => installers_command(&target, config).await,
    }
}
