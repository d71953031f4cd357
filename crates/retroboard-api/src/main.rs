//! # retroboard-api — Binary Entry Point
//!
//! Starts the Axum HTTP server for the retrospective board API.
//! Binds to configurable port (default 8080).

use retroboard_api::state::{AppConfig, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured tracing.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env();

    // Initialize the SQLite pool and run embedded migrations.
    let pool = retroboard_api::repo::init_pool(&config.database_url)
        .await
        .map_err(|e| {
            tracing::error!("Database initialization failed: {e}");
            e
        })?;

    if config.seed_demo {
        retroboard_api::seed::seed_demo_data(&pool).await.map_err(|e| {
            tracing::error!("Demo seeding failed: {e}");
            e
        })?;
    }

    let port = config.port;
    let state = AppState::with_config(pool, config);
    let app = retroboard_api::app(state);

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Retroboard API listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
