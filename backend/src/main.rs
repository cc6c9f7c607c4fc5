//! Rain Forecast - Backend Server

use std::net::SocketAddr;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use rain_forecast_backend::{artifacts::Artifacts, create_app, AppState, Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rain_forecast_backend=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::load()?;

    tracing::info!("Starting Rain Forecast Server");
    tracing::info!("Environment: {}", config.environment);

    // Load model artifacts once; failures halt forecasting but keep the error page up
    let artifacts = Artifacts::load(&config.artifacts);
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;

    let state = AppState::new(config, artifacts);
    if !state.forecaster.is_ready() {
        tracing::error!("Forecasting is halted; serving the startup error only");
    }

    // Build application
    let app = create_app(state);

    // Start server
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
