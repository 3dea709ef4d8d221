use api::{app::App, config::Config, http::server::ApiError};
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Default filter: service logs at info, the MongoDB driver only when it warns.
const DEFAULT_LOG_FILTER: &str = "info,mongodb=warn";

fn init_tracing() {
    // RUST_LOG=groupsync_core::domain::message=debug traces every send and
    // subscription; RUST_LOG=tower_http=debug logs each request.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .with_target(true)
        .init();
}

#[tokio::main]
async fn main() -> Result<(), ApiError> {
    init_tracing();

    // .env only fills gaps; the process environment wins.
    match dotenvy::dotenv() {
        Ok(path) => info!(path = %path.display(), "Loaded .env file"),
        Err(_) => debug!("No .env file, reading configuration from the environment"),
    }

    let config = Config::parse();
    info!(
        backend = ?config.backend,
        port = config.server.api_port,
        "Starting groupsync API"
    );

    App::new(config).await?.start().await
}
