//! User management server backed by an in-memory identity provider.
//!
//! ## Usage
//!
//! ```bash
//! backend-resources-server [config.json]
//! ```
//!
//! Without an argument the configuration is read from `BACKEND_RESOURCES_CONFIG`
//! (a JSON file path) when set, otherwise from `BACKEND_RESOURCES_*`
//! variables. Log output is controlled by `RUST_LOG` (default `info`).
//!
//! ## Exit Codes
//!
//! - `0`: Server shut down after Ctrl-C
//! - `1`: Invalid configuration or the listener could not be bound

use backend_resources::http::{AppState, router};
use backend_resources::{InMemoryRealm, ServerConfig};
use log::{error, info, warn};
use std::env;
use std::process;

const CONFIG_PATH_VAR: &str = "BACKEND_RESOURCES_CONFIG";

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run().await {
        error!("Server failed: {}", e);
        process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config()?;
    let address = config.socket_addr()?;

    let service = config.build_service(InMemoryRealm::new())?;
    let authenticator = config.authenticator().await;
    if config.credentials.is_empty() {
        warn!("No credentials configured; every request will be rejected");
    }

    let app = router(AppState::new(service, authenticator));
    let listener = tokio::net::TcpListener::bind(address).await?;
    info!(
        "Serving realm '{}' on http://{}",
        config.realm,
        listener.local_addr()?
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("Server stopped");
    Ok(())
}

fn load_config() -> Result<ServerConfig, Box<dyn std::error::Error>> {
    let path = env::args().nth(1).or_else(|| env::var(CONFIG_PATH_VAR).ok());
    let config = match path {
        Some(path) => ServerConfig::from_json_file(path)?,
        None => ServerConfig::from_env()?,
    };
    Ok(config)
}

/// Resolves on ctrl-c. If the signal handler cannot be installed the server
/// keeps running until it is killed.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal, running until killed: {}", e);
        std::future::pending::<()>().await;
    }
}
