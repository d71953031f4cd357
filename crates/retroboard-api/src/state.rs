//! # Application State
//!
//! Shared state for the Axum application, passed to all route handlers via
//! the `State` extractor.
//!
//! The state holds the SQLite pool and configuration — nothing else. Board
//! and note data is never cached in memory across requests: every operation
//! goes through the repository as one atomic unit against the store, so two
//! concurrent clients editing the same board always observe and produce
//! consistent rows.

use sqlx::SqlitePool;

/// Application configuration, read once from the environment at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Port to bind the HTTP server to (`PORT`).
    pub port: u16,
    /// SQLite database URL (`DATABASE_URL`).
    pub database_url: String,
    /// Whether to seed a demo board on startup (`RETROBOARD_SEED_DEMO`).
    pub seed_demo: bool,
}

impl AppConfig {
    /// Build configuration from environment variables, falling back to
    /// development defaults for anything unset or unparsable.
    pub fn from_env() -> Self {
        let port = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(8080);
        let database_url = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://retroboard.db".to_string());
        let seed_demo = std::env::var("RETROBOARD_SEED_DEMO")
            .map(|v| v.to_lowercase() == "true" || v == "1")
            .unwrap_or(false);
        Self {
            port,
            database_url,
            seed_demo,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            database_url: "sqlite://retroboard.db".to_string(),
            seed_demo: false,
        }
    }
}

/// Shared application state accessible to all route handlers.
///
/// Clone-friendly: `SqlitePool` is an `Arc` internally.
#[derive(Debug, Clone)]
pub struct AppState {
    /// SQLite connection pool — the sole authority for board/note data.
    pub db: SqlitePool,
    /// Application configuration.
    pub config: AppConfig,
}

impl AppState {
    /// Create application state over an initialized pool with default configuration.
    pub fn new(db: SqlitePool) -> Self {
        Self {
            db,
            config: AppConfig::default(),
        }
    }

    /// Create application state with the given configuration.
    pub fn with_config(db: SqlitePool, config: AppConfig) -> Self {
        Self { db, config }
    }
}
