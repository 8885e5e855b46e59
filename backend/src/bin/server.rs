//! Proposal HTTP Server Binary
//!
//! This is the main entry point for the proposal REST API server.
//! It wires the solar collaborators into the loader, sets up the HTTP router,
//! and starts serving requests.
//!
//! # Usage
//!
//! ```bash
//! # Run against the Google Solar API (default)
//! cargo run --bin proposals-server
//!
//! # Run with in-memory fixtures
//! SOLAR_BACKEND=local cargo run --bin proposals-server
//! ```
//!
//! # Environment Variables
//!
//! - `HOST`: Server host (default: 0.0.0.0)
//! - `PORT`: Server port (default: 8080)
//! - `NUMBER_LOCALE`: Digit grouping locale (default: en-US)
//! - `LOAD_DEADLINE_SECS`: Bound on a single rooftop load (default: 60)
//! - `SESSION_RETENTION_SECS`: How long settled sessions stay readable (default: 300)
//! - `SOLAR_*`: Solar service settings, see `SolarConfig::from_env`
//! - `RUST_LOG`: Log level (default: info)

use std::env;
use std::sync::Arc;
use std::time::Duration;

use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use sunroof_proposals::config::ServerConfig;
use sunroof_proposals::http::{create_router, AppState};
use sunroof_proposals::services::ProposalDataLoader;
use sunroof_proposals::solar::{SolarClientFactory, SolarConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    FmtSubscriber::builder()
        .with_max_level(
            env::var("RUST_LOG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(Level::INFO),
        )
        .with_target(true)
        .with_thread_ids(true)
        .init();

    info!("Starting proposal HTTP server");

    let server_config = ServerConfig::from_env().map_err(|e| anyhow::anyhow!(e))?;
    let solar_config = SolarConfig::from_env().map_err(|e| anyhow::anyhow!(e))?;
    info!("Solar backend: {}", solar_config.backend.as_str());

    let solar = SolarClientFactory::create(&solar_config)?;
    let mut loader = ProposalDataLoader::new(solar.lookup, solar.readiness)
        .with_locale(server_config.locale);
    if let Some(deadline) = server_config.load_deadline {
        loader = loader.with_deadline(deadline);
    }

    let state = AppState::new(Arc::new(loader))
        .with_session_retention(server_config.session_retention);

    // Sweep settled sessions nobody came back for.
    let sweeper = state.clone();
    let sweep_every = server_config.session_retention.max(Duration::from_secs(1));
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(sweep_every);
        loop {
            ticker.tick().await;
            sweeper.prune_sessions();
        }
    });

    let app = create_router(state);

    let addr = server_config
        .socket_addr()
        .map_err(|e| anyhow::anyhow!(e))?;

    info!("Server listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
