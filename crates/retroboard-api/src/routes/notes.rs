//! # Note API
//!
//! Note creation, voting, drag-and-drop recategorization, editing, merging,
//! and deletion. The merge endpoint's URL note id is the **target** (the
//! surviving note); the body names the source note that is folded in and
//! deleted.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::routing::{post, put};
use axum::{Json, Router};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::error::AppError;
use crate::extractors::{extract_validated_json, Validate};
use crate::repo::{self, Note};
use crate::routes::DeleteAck;
use crate::state::AppState;

const MAX_TEXT_LEN: usize = 10_000;
const MAX_AUTHOR_LEN: usize = 255;

/// Request to add a note to a board.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateNoteRequest {
    pub text: String,
    /// One of `good`, `bad`, `improve`.
    pub category: String,
    #[serde(default)]
    pub author: String,
}

impl Validate for CreateNoteRequest {
    fn validate(&self) -> Result<(), String> {
        if self.text.trim().is_empty() {
            return Err("text must not be empty".to_string());
        }
        if self.text.len() > MAX_TEXT_LEN {
            return Err(format!("text must not exceed {MAX_TEXT_LEN} characters"));
        }
        if self.author.len() > MAX_AUTHOR_LEN {
            return Err(format!("author must not exceed {MAX_AUTHOR_LEN} characters"));
        }
        Ok(())
    }
}

/// Request to move a note to another category.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateNoteCategoryRequest {
    /// One of `good`, `bad`, `improve`.
    pub category: String,
}

impl Validate for UpdateNoteCategoryRequest {
    fn validate(&self) -> Result<(), String> {
        if self.category.trim().is_empty() {
            return Err("category must not be empty".to_string());
        }
        Ok(())
    }
}

/// Request to replace a note's text and author.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateNoteRequest {
    pub text: String,
    #[serde(default)]
    pub author: String,
}

impl Validate for UpdateNoteRequest {
    fn validate(&self) -> Result<(), String> {
        if self.text.trim().is_empty() {
            return Err("text must not be empty".to_string());
        }
        if self.text.len() > MAX_TEXT_LEN {
            return Err(format!("text must not exceed {MAX_TEXT_LEN} characters"));
        }
        if self.author.len() > MAX_AUTHOR_LEN {
            return Err(format!("author must not exceed {MAX_AUTHOR_LEN} characters"));
        }
        Ok(())
    }
}

/// Request to merge another note into the one named in the URL.
#[derive(Debug, Deserialize, ToSchema)]
pub struct MergeNotesRequest {
    /// The note that will be folded into the target and deleted.
    #[serde(rename = "sourceNoteId")]
    pub source_note_id: String,
}

impl Validate for MergeNotesRequest {
    fn validate(&self) -> Result<(), String> {
        if self.source_note_id.trim().is_empty() {
            return Err("sourceNoteId must not be empty".to_string());
        }
        Ok(())
    }
}

/// Build the notes router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/boards/:board_id/notes", post(create_note))
        .route(
            "/api/boards/:board_id/notes/:note_id",
            put(update_note).delete(delete_note),
        )
        .route("/api/boards/:board_id/notes/:note_id/vote", put(vote_note))
        .route(
            "/api/boards/:board_id/notes/:note_id/category",
            put(update_note_category),
        )
        .route(
            "/api/boards/:board_id/notes/:note_id/merge",
            put(merge_notes),
        )
}

/// POST /api/boards/:board_id/notes — Add a note to a board.
#[utoipa::path(
    post,
    path = "/api/boards/{board_id}/notes",
    params(("board_id" = String, Path, description = "Board ID")),
    request_body = CreateNoteRequest,
    responses(
        (status = 201, description = "Note created", body = Note),
        (status = 400, description = "Validation failure", body = crate::error::ErrorBody),
        (status = 404, description = "Board not found", body = crate::error::ErrorBody),
    ),
    tag = "notes"
)]
pub(crate) async fn create_note(
    State(state): State<AppState>,
    Path(board_id): Path<String>,
    body: Result<Json<CreateNoteRequest>, JsonRejection>,
) -> Result<(axum::http::StatusCode, Json<Note>), AppError> {
    let req = extract_validated_json(body)?;
    let note =
        repo::notes::create_note(&state.db, &board_id, &req.text, &req.category, &req.author)
            .await?;
    tracing::info!(board_id = %board_id, note_id = %note.id, category = %note.category, "note created");
    Ok((axum::http::StatusCode::CREATED, Json(note)))
}

/// PUT /api/boards/:board_id/notes/:note_id/vote — Vote for a note.
#[utoipa::path(
    put,
    path = "/api/boards/{board_id}/notes/{note_id}/vote",
    params(
        ("board_id" = String, Path, description = "Board ID"),
        ("note_id" = String, Path, description = "Note ID"),
    ),
    responses(
        (status = 200, description = "Vote recorded", body = Note),
        (status = 404, description = "Not found", body = crate::error::ErrorBody),
    ),
    tag = "notes"
)]
pub(crate) async fn vote_note(
    State(state): State<AppState>,
    Path((board_id, note_id)): Path<(String, String)>,
) -> Result<Json<Note>, AppError> {
    let note = repo::notes::vote_note(&state.db, &board_id, &note_id).await?;
    Ok(Json(note))
}

/// PUT /api/boards/:board_id/notes/:note_id/category — Move a note
/// between columns (drag-and-drop).
#[utoipa::path(
    put,
    path = "/api/boards/{board_id}/notes/{note_id}/category",
    params(
        ("board_id" = String, Path, description = "Board ID"),
        ("note_id" = String, Path, description = "Note ID"),
    ),
    request_body = UpdateNoteCategoryRequest,
    responses(
        (status = 200, description = "Category updated", body = Note),
        (status = 400, description = "Invalid category", body = crate::error::ErrorBody),
        (status = 404, description = "Not found", body = crate::error::ErrorBody),
    ),
    tag = "notes"
)]
pub(crate) async fn update_note_category(
    State(state): State<AppState>,
    Path((board_id, note_id)): Path<(String, String)>,
    body: Result<Json<UpdateNoteCategoryRequest>, JsonRejection>,
) -> Result<Json<Note>, AppError> {
    let req = extract_validated_json(body)?;
    let note =
        repo::notes::update_note_category(&state.db, &board_id, &note_id, &req.category).await?;
    Ok(Json(note))
}

/// PUT /api/boards/:board_id/notes/:note_id/merge — Merge the source note
/// into this note; the source is deleted.
#[utoipa::path(
    put,
    path = "/api/boards/{board_id}/notes/{note_id}/merge",
    params(
        ("board_id" = String, Path, description = "Board ID"),
        ("note_id" = String, Path, description = "Target note ID (survives the merge)"),
    ),
    request_body = MergeNotesRequest,
    responses(
        (status = 200, description = "Merged target note", body = Note),
        (status = 400, description = "Self-merge", body = crate::error::ErrorBody),
        (status = 404, description = "Not found", body = crate::error::ErrorBody),
    ),
    tag = "notes"
)]
pub(crate) async fn merge_notes(
    State(state): State<AppState>,
    Path((board_id, note_id)): Path<(String, String)>,
    body: Result<Json<MergeNotesRequest>, JsonRejection>,
) -> Result<Json<Note>, AppError> {
    let req = extract_validated_json(body)?;
    let note =
        repo::notes::merge_notes(&state.db, &board_id, &note_id, &req.source_note_id).await?;
    tracing::info!(
        board_id = %board_id,
        target = %note_id,
        source = %req.source_note_id,
        "notes merged"
    );
    Ok(Json(note))
}

/// PUT /api/boards/:board_id/notes/:note_id — Replace a note's text and author.
#[utoipa::path(
    put,
    path = "/api/boards/{board_id}/notes/{note_id}",
    params(
        ("board_id" = String, Path, description = "Board ID"),
        ("note_id" = String, Path, description = "Note ID"),
    ),
    request_body = UpdateNoteRequest,
    responses(
        (status = 200, description = "Note updated", body = Note),
        (status = 400, description = "Validation failure", body = crate::error::ErrorBody),
        (status = 404, description = "Not found", body = crate::error::ErrorBody),
    ),
    tag = "notes"
)]
pub(crate) async fn update_note(
    State(state): State<AppState>,
    Path((board_id, note_id)): Path<(String, String)>,
    body: Result<Json<UpdateNoteRequest>, JsonRejection>,
) -> Result<Json<Note>, AppError> {
    let req = extract_validated_json(body)?;
    let note =
        repo::notes::update_note_text(&state.db, &board_id, &note_id, &req.text, &req.author)
            .await?;
    Ok(Json(note))
}

/// DELETE /api/boards/:board_id/notes/:note_id — Delete a note.
#[utoipa::path(
    delete,
    path = "/api/boards/{board_id}/notes/{note_id}",
    params(
        ("board_id" = String, Path, description = "Board ID"),
        ("note_id" = String, Path, description = "Note ID"),
    ),
    responses(
        (status = 200, description = "Note deleted", body = DeleteAck),
        (status = 404, description = "Not found", body = crate::error::ErrorBody),
    ),
    tag = "notes"
)]
pub(crate) async fn delete_note(
    State(state): State<AppState>,
    Path((board_id, note_id)): Path<(String, String)>,
) -> Result<Json<DeleteAck>, AppError> {
    repo::notes::delete_note(&state.db, &board_id, &note_id).await?;
    Ok(Json(DeleteAck {
        message: "Note deleted successfully".to_string(),
        id: note_id,
    }))
}
