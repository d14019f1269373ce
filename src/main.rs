//! HTTP server for the tax engine.
//!
//! Environment:
//! - `STEUER_CONFIG_DIR`: directory with the tariff YAML files; the
//!   compiled-in 2026 table is used when unset.
//! - `STEUER_BIND_ADDR`: listen address, default `127.0.0.1:3000`.
//! - `RUST_LOG`: log filter, default `info`.

use std::env;

use steuer_engine::api::{AppState, create_router};
use steuer_engine::config::ConfigLoader;
use tracing::info;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

async fn wait_for_shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    info!("Shutdown signal received");
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let loader = match env::var("STEUER_CONFIG_DIR") {
        Ok(dir) => {
            info!(config_dir = %dir, "Loading tariff table");
            ConfigLoader::load(&dir)?
        }
        Err(_) => {
            info!("STEUER_CONFIG_DIR not set, using built-in 2026 table");
            ConfigLoader::builtin()
        }
    };
    let tariff_year = loader.table().year;

    let bind_addr = env::var("STEUER_BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!(bind_addr = %bind_addr, tariff_year, "Server listening");

    axum::serve(listener, create_router(AppState::from_loader(loader)))
        .with_graceful_shutdown(wait_for_shutdown_signal())
        .await?;

    Ok(())
}
