//! # Board API
//!
//! Board creation, listing, detail fetch, and cascade deletion.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::error::AppError;
use crate::extractors::{extract_validated_json, Validate};
use crate::repo::{self, BoardDetail, BoardSummary};
use crate::routes::DeleteAck;
use crate::state::AppState;

/// Request to create a board.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateBoardRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

impl Validate for CreateBoardRequest {
    fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("name must not be empty".to_string());
        }
        if self.name.len() > 255 {
            return Err("name must not exceed 255 characters".to_string());
        }
        if self.description.len() > 2000 {
            return Err("description must not exceed 2000 characters".to_string());
        }
        Ok(())
    }
}

/// Build the boards router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/boards", get(list_boards).post(create_board))
        .route("/api/boards/:board_id", get(get_board).delete(delete_board))
}

/// POST /api/boards — Create a new retrospective board.
#[utoipa::path(
    post,
    path = "/api/boards",
    request_body = CreateBoardRequest,
    responses(
        (status = 201, description = "Board created", body = BoardDetail),
        (status = 400, description = "Validation failure", body = crate::error::ErrorBody),
    ),
    tag = "boards"
)]
pub(crate) async fn create_board(
    State(state): State<AppState>,
    body: Result<Json<CreateBoardRequest>, JsonRejection>,
) -> Result<(axum::http::StatusCode, Json<BoardDetail>), AppError> {
    let req = extract_validated_json(body)?;
    let board = repo::boards::create_board(&state.db, &req.name, &req.description).await?;
    tracing::info!(board_id = %board.id, name = %board.name, "board created");
    Ok((axum::http::StatusCode::CREATED, Json(board)))
}

/// GET /api/boards — List all boards with derived note counts.
#[utoipa::path(
    get,
    path = "/api/boards",
    responses(
        (status = 200, description = "Board summaries", body = Vec<BoardSummary>),
    ),
    tag = "boards"
)]
pub(crate) async fn list_boards(
    State(state): State<AppState>,
) -> Result<Json<Vec<BoardSummary>>, AppError> {
    let boards = repo::boards::list_boards(&state.db).await?;
    Ok(Json(boards))
}

/// GET /api/boards/:board_id — Fetch a board with its full notes list.
#[utoipa::path(
    get,
    path = "/api/boards/{board_id}",
    params(("board_id" = String, Path, description = "Board ID")),
    responses(
        (status = 200, description = "Board found", body = BoardDetail),
        (status = 404, description = "Not found", body = crate::error::ErrorBody),
    ),
    tag = "boards"
)]
pub(crate) async fn get_board(
    State(state): State<AppState>,
    Path(board_id): Path<String>,
) -> Result<Json<BoardDetail>, AppError> {
    let board = repo::boards::get_board(&state.db, &board_id).await?;
    Ok(Json(board))
}

/// DELETE /api/boards/:board_id — Delete a board and all its notes.
#[utoipa::path(
    delete,
    path = "/api/boards/{board_id}",
    params(("board_id" = String, Path, description = "Board ID")),
    responses(
        (status = 200, description = "Board deleted", body = DeleteAck),
        (status = 404, description = "Not found", body = crate::error::ErrorBody),
    ),
    tag = "boards"
)]
pub(crate) async fn delete_board(
    State(state): State<AppState>,
    Path(board_id): Path<String>,
) -> Result<Json<DeleteAck>, AppError> {
    repo::boards::delete_board(&state.db, &board_id).await?;
    Ok(Json(DeleteAck {
        message: "Board deleted successfully".to_string(),
        id: board_id,
    }))
}
