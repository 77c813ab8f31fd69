//! Switchyard CLI entry point.

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use switchyard::cli::{commands, Cli, Commands};
use switchyard::config::Settings;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config_path = cli.config.as_ref().map(PathBuf::from);
    let settings = Settings::load_from(config_path.as_ref())?;

    // Initialize logging
    let log_level = match cli.verbose {
        0 => settings.general.log_level.as_str(),
        1 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(EnvFilter::new(std::env::var("RUST_LOG").unwrap_or_else(|_| {
            format!("switchyard={},tower_http={}", log_level, log_level)
        })))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    // Execute command
    match &cli.command {
        Commands::Serve { host, port } => {
            commands::run_serve(host.clone(), *port, settings).await?;
        }

        Commands::Route { query, model } => {
            commands::run_route(query, model.clone(), settings).await?;
        }

        Commands::Tools => {
            commands::run_tools(&settings)?;
        }

        Commands::Doctor => {
            commands::run_doctor(config_path.as_deref(), &settings)?;
        }

        Commands::Config { action } => {
            commands::run_config(action, config_path.as_deref(), settings)?;
        }
    }

    Ok(())
}
