use anyhow::Result;
use clap::Parser;
use std::path::Path;
use tracing::error;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod app;
mod cli;
mod config;
mod domain;
mod gallery;
mod i18n;
mod providers;
mod sql;
mod storage;
mod tui;

use cli::Cli;

#[tokio::main]
async fn main() {
    // The TUI owns the screen, so panics go to the log
    std::panic::set_hook(Box::new(|panic_info| {
        error!("Application panicked: {}", panic_info);
        std::process::exit(1);
    }));

    // Load environment variables from .env file
    let dotenv = dotenvy::dotenv();

    if let Err(e) = execute().await {
        error!("Application error: {:#}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }

    if let Err(e) = dotenv {
        tracing::debug!("No .env file loaded: {}", e);
    }
}

async fn execute() -> Result<()> {
    let cli = Cli::parse();
    let settings = cli.settings().await?;
    settings.ensure_data_dir()?;
    let _guard = init_logging(&settings.data_dir, cli.debug)?;
    cli.execute(settings).await
}

/// Log to `schemax.log` in the data directory
fn init_logging(data_dir: &Path, debug: bool) -> Result<WorkerGuard> {
    let default_filter = if debug { "schemax=debug" } else { "schemax=info" };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into());

    let file_appender = tracing_appender::rolling::never(data_dir, "schemax.log");
    let (writer, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false),
        )
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {}", e))?;

    Ok(guard)
}
