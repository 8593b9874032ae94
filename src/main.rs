use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use vendorbook::config::AppConfig;
use vendorbook::handlers;
use vendorbook::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::from_env();
    let port = config.port;

    let state = Arc::new(AppState::from_config(config)?);
    tracing::info!(
        backend = state.bookings.mode().as_str(),
        "booking backend ready"
    );

    let app = handlers::router(state);

    let addr = format!("0.0.0.0:{port}");
    tracing::info!("starting server on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
