//! # retroboard-api — Axum API for Team Retrospective Boards
//!
//! HTTP service for collaborative sprint retrospectives: boards hold notes
//! in three fixed categories (`good`, `bad`, `improve`); teams vote on
//! notes, drag them between columns, edit them, and merge duplicates.
//!
//! ## API Surface
//!
//! | Route                                          | Module             | Operation        |
//! |------------------------------------------------|--------------------|------------------|
//! | `POST/GET /api/boards`                         | [`routes::boards`] | Create / list    |
//! | `GET/DELETE /api/boards/:board_id`             | [`routes::boards`] | Detail / delete  |
//! | `POST /api/boards/:board_id/notes`             | [`routes::notes`]  | Create note      |
//! | `PUT/DELETE /.../notes/:note_id`               | [`routes::notes`]  | Edit / delete    |
//! | `PUT /.../notes/:note_id/vote`                 | [`routes::notes`]  | Vote             |
//! | `PUT /.../notes/:note_id/category`             | [`routes::notes`]  | Recategorize     |
//! | `PUT /.../notes/:note_id/merge`                | [`routes::notes`]  | Merge duplicates |
//!
//! All state lives in SQLite via SQLx; every mutation is a single atomic
//! statement or an explicit transaction. The merge and author rules live in
//! the `retroboard-core` crate.
//!
//! ## OpenAPI
//!
//! Auto-generated spec via utoipa derive macros at `/openapi.json`.

pub mod error;
pub mod extractors;
pub mod openapi;
pub mod repo;
pub mod routes;
pub mod seed;
pub mod state;

use axum::extract::{DefaultBodyLimit, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Assemble the full application router.
///
/// Health probes (`/health/*`) are mounted alongside the API routes; there
/// is no authentication layer, boards are open to the whole team.
pub fn app(state: AppState) -> Router {
    // Body size limit: 1 MiB. Note text is capped at 10k characters, so
    // anything larger is garbage.
    let api = Router::new()
        .merge(routes::boards::router())
        .merge(routes::notes::router())
        .merge(openapi::router())
        .layer(DefaultBodyLimit::max(1024 * 1024))
        .layer(TraceLayer::new_for_http());

    Router::new()
        .route("/health/liveness", axum::routing::get(liveness))
        .route("/health/readiness", axum::routing::get(readiness))
        .merge(api)
        .with_state(state)
}

/// Liveness probe — always returns 200 if the process is running.
async fn liveness() -> &'static str {
    "ok"
}

/// Readiness probe — verifies the database connection is healthy.
///
/// Returns 200 "ready" or 503 with a diagnostic message.
async fn readiness(State(state): State<AppState>) -> impl IntoResponse {
    if let Err(e) = sqlx::query("SELECT 1").execute(&state.db).await {
        tracing::warn!("database health check failed: {e}");
        return (StatusCode::SERVICE_UNAVAILABLE, "database unreachable").into_response();
    }
    (StatusCode::OK, "ready").into_response()
}
