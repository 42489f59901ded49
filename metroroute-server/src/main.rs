mod config;
mod routes;

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use metroroute_core::create_metro_network;
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::config::ServerConfig;

#[derive(Debug, Parser)]
#[command(name = "metroroute-server", about = "HTTP route queries over a metro network")]
struct Args {
    /// TOML file with [data] and [http] tables
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Segment file, overrides [data].data_path
    #[arg(short, long)]
    data: Option<PathBuf>,
    /// Listen address, overrides [http].bind
    #[arg(short, long)]
    bind: Option<String>,
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[tokio::main]
async fn main() {
    init_logging();
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => match ServerConfig::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                error!("{e}");
                std::process::exit(2);
            }
        },
        None => ServerConfig::default(),
    };
    let network_config = match config.resolve(args.data, args.bind) {
        Ok(network_config) => network_config,
        Err(e) => {
            error!("{e}");
            std::process::exit(2);
        }
    };

    let network = match create_metro_network(&network_config) {
        Ok(network) => Arc::new(network),
        Err(e) => {
            error!("Failed to build metro network: {e}");
            std::process::exit(1);
        }
    };
    info!(
        "Serving {} stations on {} lines",
        network.station_count(),
        network.lines().len()
    );

    let app = routes::build_router(network, &config.http);
    let listener = match TcpListener::bind(config.http.bind.as_str()).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Cannot bind {}: {e}", config.http.bind);
            std::process::exit(1);
        }
    };
    info!("Listening on {}", config.http.bind);

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("Server error: {e}");
        std::process::exit(1);
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {e}");
        return;
    }
    info!("Shutting down");
}
