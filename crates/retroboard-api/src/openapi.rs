//! # OpenAPI Specification Assembly
//!
//! Assembles all utoipa-documented routes into a single OpenAPI spec,
//! served at `/openapi.json`.

use axum::routing::get;
use axum::{Json, Router};
use utoipa::OpenApi;

use crate::state::AppState;

/// Assembled OpenAPI spec for the entire API surface.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Retroboard API",
        version = "1.0.0",
        description = "Backend for collaborative sprint retrospective boards.\n\nProvides:\n- **Board lifecycle** — create, list with note counts, fetch with notes, cascade delete\n- **Note lifecycle** — create in a category (good / bad / improve), vote, drag-and-drop recategorization, edit, delete\n- **Note merging** — fold duplicate notes together, combining text, votes, and authors",
        license(name = "MIT")
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server"),
    ),
    paths(
        // ── Boards ──────────────────────────────────────────────────────
        crate::routes::boards::create_board,
        crate::routes::boards::list_boards,
        crate::routes::boards::get_board,
        crate::routes::boards::delete_board,
        // ── Notes ───────────────────────────────────────────────────────
        crate::routes::notes::create_note,
        crate::routes::notes::vote_note,
        crate::routes::notes::update_note_category,
        crate::routes::notes::update_note,
        crate::routes::notes::merge_notes,
        crate::routes::notes::delete_note,
    ),
    components(
        schemas(
            // ── Repository records ──────────────────────────────────────
            crate::repo::Note,
            crate::repo::BoardSummary,
            crate::repo::BoardDetail,
            // ── Error types ─────────────────────────────────────────────
            crate::error::ErrorBody,
            crate::error::ErrorDetail,
            // ── Board DTOs ──────────────────────────────────────────────
            crate::routes::boards::CreateBoardRequest,
            // ── Note DTOs ───────────────────────────────────────────────
            crate::routes::notes::CreateNoteRequest,
            crate::routes::notes::UpdateNoteCategoryRequest,
            crate::routes::notes::UpdateNoteRequest,
            crate::routes::notes::MergeNotesRequest,
            // ── Shared DTOs ─────────────────────────────────────────────
            crate::routes::DeleteAck,
        ),
    ),
    tags(
        (name = "boards", description = "Board lifecycle — creation, listing, detail fetch, cascade deletion"),
        (name = "notes", description = "Note lifecycle — creation, voting, recategorization, editing, merging, deletion"),
    )
)]
pub struct ApiDoc;

/// Build the OpenAPI router.
///
/// Serves the OpenAPI JSON spec at `/openapi.json`.
pub fn router() -> Router<AppState> {
    Router::new().route("/openapi.json", get(openapi_json))
}

/// GET /openapi.json — Return the generated OpenAPI specification.
async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
