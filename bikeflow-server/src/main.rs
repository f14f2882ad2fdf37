use std::path::PathBuf;
use std::process::ExitCode;

use bikeflow_core::ReactiveController;
use bikeflow_core::loading::load_datasets;
use bikeflow_server::{AppState, ServerConfig, router};
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Serves the bike-share station overlay over HTTP
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Path to the TOML configuration
    #[arg(short, long, default_value = "bikeflow.toml")]
    config: PathBuf,
    /// Overrides the bind address of the configuration
    #[arg(long)]
    bind: Option<std::net::SocketAddr>,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let mut config = match ServerConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            error!("{e}");
            return ExitCode::FAILURE;
        }
    };
    if let Some(bind) = args.bind {
        config.bind = bind;
    }

    // Nothing is served unless both datasets load
    let (registry, trips) = match load_datasets(&config.datasets) {
        Ok(datasets) => datasets,
        Err(e) => {
            error!("Failed to load datasets: {e}");
            return ExitCode::FAILURE;
        }
    };

    let controller = ReactiveController::new(registry, trips, config.view);
    let app = router(AppState::new(controller), config.limits);

    let listener = match tokio::net::TcpListener::bind(config.bind).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Failed to bind {}: {e}", config.bind);
            return ExitCode::FAILURE;
        }
    };
    info!("Listening on {}", config.bind);

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("Server error: {e}");
        return ExitCode::FAILURE;
    }
    info!("Shut down");
    ExitCode::SUCCESS
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
}
