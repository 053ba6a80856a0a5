//! MEMP Shore server: period reports for vessel operational data.
//!
//! Main entry point that loads configuration, wires storage and services
//! together and starts the HTTP server.

use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt};

use memp_api::{AppState, Repositories};
use memp_core::config::AppConfig;
use memp_core::error::AppError;
use memp_database::{DatabasePool, MemoryStore};

/// MEMP Shore period report service
#[derive(Debug, Parser)]
#[command(name = "memp-server", version, about)]
struct Cli {
    /// Configuration overlay to apply on top of `default.toml`
    #[arg(long, default_value = "development", global = true)]
    env: String,

    /// Directory holding the TOML configuration files
    #[arg(long, default_value = "config", global = true)]
    config_dir: String,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Start the HTTP server (default)
    Serve {
        /// Override the server port
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Apply pending database migrations and exit
    Migrate,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match AppConfig::load_from(&cli.config_dir, &cli.env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    let result = match cli.command.unwrap_or(Command::Serve { port: None }) {
        Command::Serve { port } => serve(config, port).await,
        Command::Migrate => migrate(config).await,
    };

    if let Err(e) = result {
        tracing::error!(error = %e, "MEMP Shore exited with an error");
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

async fn serve(mut config: AppConfig, port: Option<u16>) -> Result<(), AppError> {
    if let Some(port) = port {
        config.server.port = port;
    }
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        provider = %config.database.provider,
        "Starting MEMP Shore"
    );

    let (repositories, db) = match config.database.provider.as_str() {
        "memory" => {
            tracing::warn!("Using the in-memory store; data is lost on shutdown");
            (Repositories::memory(Arc::new(MemoryStore::new())), None)
        }
        "postgres" => {
            let db = DatabasePool::connect(&config.database).await?;
            if config.database.run_migrations {
                memp_database::migration::run_migrations(db.pool()).await?;
            }
            (Repositories::postgres(&db), Some(db))
        }
        other => {
            return Err(AppError::configuration(format!(
                "Unknown database provider '{other}'"
            )));
        }
    };

    let state = AppState::new(config, repositories, db).await?;
    memp_api::run_server(state, shutdown_signal()).await
}

async fn migrate(config: AppConfig) -> Result<(), AppError> {
    let db = DatabasePool::connect(&config.database).await?;
    let result = memp_database::migration::run_migrations(db.pool()).await;
    db.close().await;
    result
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
