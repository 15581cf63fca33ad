//! Agri Advisor - Backend Server
//!
//! Crop recommendations and yield predictions for Indian farmers.

use std::net::SocketAddr;

use agri_advisor_backend::{create_app, AppState, Config};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "agri_advisor_backend=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::load()?;

    tracing::info!("Starting Agri Advisor Server");
    tracing::info!("Environment: {}", config.environment);

    let host: std::net::IpAddr = config.server.host.parse()?;
    let addr = SocketAddr::from((host, config.server.port));

    // Create application state
    let state = AppState::new(config)?;
    tracing::info!(
        crops = state.reference.crops.len(),
        states = state.reference.states.len(),
        predictor = state.predictor.name(),
        "Reference data loaded"
    );

    // Build application
    let app = create_app(state);

    // Start server
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
