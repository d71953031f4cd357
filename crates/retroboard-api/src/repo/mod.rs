//! # Board/Note Repository
//!
//! Sole authority for creating, reading, mutating, and deleting boards and
//! notes. Enforces the data model invariants: board names and note text are
//! trimmed and non-empty, categories stay inside the good/bad/improve set,
//! votes never go negative, every note's board reference resolves, and
//! deleting a board cascades to its notes.
//!
//! ## Concurrency
//!
//! Every mutating operation executes as a single atomic unit against SQLite:
//! either one `UPDATE ... RETURNING` statement (votes, category and text
//! updates) or an explicit transaction (note creation, merge, deletes).
//! Nothing is cached in memory across requests — the pool is the store.
//! Two merges racing over a shared participant serialize on the store's
//! write transaction; the loser observes the deleted participant and fails
//! with [`RepoError::NotFound`].

pub mod boards;
pub mod notes;

use std::str::FromStr;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;
use thiserror::Error;
use utoipa::ToSchema;

use retroboard_core::{Category, ValidationError};

/// Repository-level failure.
///
/// Two error kinds cover the domain (`NotFound`, `Validation`); `Db` carries
/// storage failures the API layer surfaces as internal errors.
#[derive(Debug, Error)]
pub enum RepoError {
    /// Referenced board or note does not exist, or exists under a different board.
    #[error("{0}")]
    NotFound(String),

    /// Malformed or semantically invalid input.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Underlying storage failure.
    #[error("database error: {0}")]
    Db(#[from] sqlx::Error),
}

/// A single categorized feedback item with votes and authorship.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Note {
    pub id: String,
    pub text: String,
    /// One of `good`, `bad`, `improve`.
    #[schema(value_type = String)]
    pub category: Category,
    pub author: String,
    pub votes: i64,
    pub created_at: DateTime<Utc>,
}

/// Board summary for list views; `notes_count` is derived, not stored.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BoardSummary {
    pub id: String,
    pub name: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub notes_count: i64,
}

/// Board with its full note collection.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BoardDetail {
    pub id: String,
    pub name: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub notes: Vec<Note>,
}

/// Initialize the SQLite connection pool and run embedded migrations.
///
/// Creates the database file if missing, enables WAL journaling and foreign
/// key enforcement.
pub async fn init_pool(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .acquire_timeout(Duration::from_secs(5))
        .connect_with(options)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;
    tracing::info!(url = database_url, "SQLite database ready");

    Ok(pool)
}

/// Generate a fresh opaque identifier.
pub(crate) fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// In-memory pool with migrations applied, for tests.
///
/// Capped at one connection so that every query sees the same in-memory
/// database.
#[cfg(test)]
pub(crate) async fn test_pool() -> SqlitePool {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .unwrap()
        .foreign_keys(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .expect("in-memory SQLite pool");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("migrations");
    pool
}
