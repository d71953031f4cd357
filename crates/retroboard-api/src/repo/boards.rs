//! Board persistence operations.
//!
//! All functions take a `&SqlitePool` and operate on the `boards` table
//! (plus `notes` for cascades and derived counts). Validation is enforced
//! here, not in SQL, so the errors carry domain meaning.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use super::{new_id, notes, BoardDetail, BoardSummary, RepoError};

/// Create a new board with a trimmed, non-empty name.
pub async fn create_board(
    pool: &SqlitePool,
    name: &str,
    description: &str,
) -> Result<BoardDetail, RepoError> {
    let name = retroboard_core::validate_board_name(name)?;
    let description = description.trim().to_string();
    let id = new_id();
    let created_at = Utc::now();

    sqlx::query("INSERT INTO boards (id, name, description, created_at) VALUES (?1, ?2, ?3, ?4)")
        .bind(&id)
        .bind(&name)
        .bind(&description)
        .bind(created_at)
        .execute(pool)
        .await?;

    tracing::debug!(board_id = %id, "board created");

    Ok(BoardDetail {
        id,
        name,
        description,
        created_at,
        notes: Vec::new(),
    })
}

/// List all boards as summaries with derived note counts.
pub async fn list_boards(pool: &SqlitePool) -> Result<Vec<BoardSummary>, RepoError> {
    let rows = sqlx::query_as::<_, BoardSummaryRow>(
        "SELECT b.id, b.name, b.description, b.created_at, COUNT(n.id) AS notes_count
         FROM boards b
         LEFT JOIN notes n ON n.board_id = b.id
         GROUP BY b.id
         ORDER BY b.created_at",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(BoardSummaryRow::into_summary).collect())
}

/// Fetch a board with its full note collection.
pub async fn get_board(pool: &SqlitePool, board_id: &str) -> Result<BoardDetail, RepoError> {
    let row = sqlx::query_as::<_, BoardRow>(
        "SELECT id, name, description, created_at FROM boards WHERE id = ?1",
    )
    .bind(board_id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| RepoError::NotFound(format!("board {board_id} not found")))?;

    let notes = notes::list_for_board(pool, board_id).await?;

    Ok(BoardDetail {
        id: row.id,
        name: row.name,
        description: row.description,
        created_at: row.created_at,
        notes,
    })
}

/// Delete a board, cascading to all its notes in one transaction.
pub async fn delete_board(pool: &SqlitePool, board_id: &str) -> Result<(), RepoError> {
    let mut tx = pool.begin().await?;

    let removed_notes = sqlx::query("DELETE FROM notes WHERE board_id = ?1")
        .bind(board_id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

    let removed = sqlx::query("DELETE FROM boards WHERE id = ?1")
        .bind(board_id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

    if removed == 0 {
        // Dropping the transaction rolls back the note deletion.
        return Err(RepoError::NotFound(format!("board {board_id} not found")));
    }

    tx.commit().await?;
    tracing::debug!(board_id = %board_id, notes = removed_notes, "board deleted");
    Ok(())
}

/// Internal row type for SQLx mapping.
#[derive(sqlx::FromRow)]
struct BoardRow {
    id: String,
    name: String,
    description: String,
    created_at: DateTime<Utc>,
}

#[derive(sqlx::FromRow)]
struct BoardSummaryRow {
    id: String,
    name: String,
    description: String,
    created_at: DateTime<Utc>,
    notes_count: i64,
}

impl BoardSummaryRow {
    fn into_summary(self) -> BoardSummary {
        BoardSummary {
            id: self.id,
            name: self.name,
            description: self.description,
            created_at: self.created_at,
            notes_count: self.notes_count,
        }
    }
}
