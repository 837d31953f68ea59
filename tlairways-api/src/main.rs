use anyhow::Context;
use std::net::SocketAddr;
use std::sync::Arc;
use tlairways_api::{app, app_config::Config, AppState};
use tlairways_order::TracingSink;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tlairways_api=debug,tlairways_order=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load().context("Failed to load config")?;
    tracing::info!("Starting TLAirways tracking API on port {}", config.server.port);

    let app_state = AppState::from_config(&config, Arc::new(TracingSink))
        .context("Invalid pricing or sector configuration")?;

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app(app_state)).await?;

    Ok(())
}
