//! jobscout CLI entry point.

use anyhow::Result;
use clap::Parser;
use jobscout::cli::{commands, Cli, Commands};
use jobscout::config::Settings;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // API keys may live in a local .env file
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Initialize logging
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| format!("jobscout={}", log_level)),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    // Load configuration
    let settings = match &cli.config {
        Some(path) => Settings::load_from(Some(&std::path::PathBuf::from(path)))?,
        None => Settings::load()?,
    };

    // Execute command
    match &cli.command {
        Commands::Init => {
            commands::run_init(&settings)?;
        }

        Commands::Doctor => {
            commands::run_doctor(&settings)?;
        }

        Commands::Chat { model, resume } => {
            commands::run_chat(model.clone(), resume.clone(), settings).await?;
        }

        Commands::Agent { task, resume, model } => {
            commands::run_agent(task, resume.clone(), model.clone(), settings).await?;
        }

        Commands::Search { query, board, limit } => {
            commands::run_search(query, board.clone(), *limit, settings).await?;
        }

        Commands::Research { company } => {
            commands::run_research(company, settings).await?;
        }

        Commands::Resume { file } => {
            commands::run_resume(file, settings).await?;
        }

        Commands::Track { file } => {
            commands::run_track(file, settings).await?;
        }

        Commands::Serve { host, port } => {
            commands::run_serve(host, *port, settings).await?;
        }

        Commands::Config { action } => {
            commands::run_config(action, settings)?;
        }
    }

    Ok(())
}
