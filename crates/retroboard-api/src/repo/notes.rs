//! Note persistence operations, including the merge algorithm.
//!
//! All functions take a `&SqlitePool` and operate on the `notes` table.
//! Every lookup is scoped by `board_id` — a note reached through the wrong
//! board is treated as absent, never leaked across boards.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use retroboard_core::{merge, Category, ValidationError};

use super::{new_id, Note, RepoError};

const NOTE_COLUMNS: &str = "id, text, category, author, votes, created_at";

/// Create a note on a board. Fails if the board is absent, the category is
/// outside the fixed set, or the text trims to empty. Blank authors default
/// to "Anonymous"; votes start at 0.
pub async fn create_note(
    pool: &SqlitePool,
    board_id: &str,
    text: &str,
    category: &str,
    author: &str,
) -> Result<Note, RepoError> {
    let mut tx = pool.begin().await?;

    // Board existence is checked before input validation: a request against
    // a missing board is NotFound even when the payload is also invalid.
    let board_exists: Option<i64> = sqlx::query_scalar("SELECT 1 FROM boards WHERE id = ?1")
        .bind(board_id)
        .fetch_optional(&mut *tx)
        .await?;
    if board_exists.is_none() {
        return Err(RepoError::NotFound(format!("board {board_id} not found")));
    }

    let category: Category = category.parse()?;
    let text = retroboard_core::validate_note_text(text)?;
    let author = merge::normalize_author(author);
    let id = new_id();
    let created_at = Utc::now();

    sqlx::query(
        "INSERT INTO notes (id, board_id, text, category, author, votes, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, 0, ?6)",
    )
    .bind(&id)
    .bind(board_id)
    .bind(&text)
    .bind(category.as_str())
    .bind(&author)
    .bind(created_at)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;
    tracing::debug!(board_id = %board_id, note_id = %id, %category, "note created");

    Ok(Note {
        id,
        text,
        category,
        author,
        votes: 0,
        created_at,
    })
}

/// List all notes on a board, oldest first.
pub async fn list_for_board(pool: &SqlitePool, board_id: &str) -> Result<Vec<Note>, RepoError> {
    let rows = sqlx::query_as::<_, NoteRow>(&format!(
        "SELECT {NOTE_COLUMNS} FROM notes WHERE board_id = ?1 ORDER BY created_at, id"
    ))
    .bind(board_id)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(NoteRow::into_note).collect())
}

/// Increment a note's vote count by exactly one.
///
/// A single `UPDATE ... RETURNING` statement, so concurrent votes on the
/// same note never lose updates.
pub async fn vote_note(
    pool: &SqlitePool,
    board_id: &str,
    note_id: &str,
) -> Result<Note, RepoError> {
    let row = sqlx::query_as::<_, NoteRow>(&format!(
        "UPDATE notes SET votes = votes + 1
         WHERE board_id = ?1 AND id = ?2
         RETURNING {NOTE_COLUMNS}"
    ))
    .bind(board_id)
    .bind(note_id)
    .fetch_optional(pool)
    .await?;

    row.map(NoteRow::into_note)
        .ok_or_else(|| RepoError::NotFound(format!("note {note_id} not found")))
}

/// Move a note to a (possibly unchanged) category. Setting the current
/// category is a no-op success.
pub async fn update_note_category(
    pool: &SqlitePool,
    board_id: &str,
    note_id: &str,
    category: &str,
) -> Result<Note, RepoError> {
    let category: Category = category.parse()?;

    let row = sqlx::query_as::<_, NoteRow>(&format!(
        "UPDATE notes SET category = ?1
         WHERE board_id = ?2 AND id = ?3
         RETURNING {NOTE_COLUMNS}"
    ))
    .bind(category.as_str())
    .bind(board_id)
    .bind(note_id)
    .fetch_optional(pool)
    .await?;

    row.map(NoteRow::into_note)
        .ok_or_else(|| RepoError::NotFound(format!("note {note_id} not found")))
}

/// Replace a note's text and author.
pub async fn update_note_text(
    pool: &SqlitePool,
    board_id: &str,
    note_id: &str,
    text: &str,
    author: &str,
) -> Result<Note, RepoError> {
    let text = retroboard_core::validate_note_text(text)?;
    let author = merge::normalize_author(author);

    let row = sqlx::query_as::<_, NoteRow>(&format!(
        "UPDATE notes SET text = ?1, author = ?2
         WHERE board_id = ?3 AND id = ?4
         RETURNING {NOTE_COLUMNS}"
    ))
    .bind(&text)
    .bind(&author)
    .bind(board_id)
    .bind(note_id)
    .fetch_optional(pool)
    .await?;

    row.map(NoteRow::into_note)
        .ok_or_else(|| RepoError::NotFound(format!("note {note_id} not found")))
}

/// Merge the source note into the target note and delete the source, all in
/// one transaction.
///
/// Field reconciliation follows [`retroboard_core::merge`]: texts joined
/// with the separator, votes summed, authors reconciled toward the target.
/// The target's id, category, board reference, and creation timestamp are
/// unchanged. Not commutative — swapping target and source changes the
/// surviving id, the text ordering, and the author-merge direction.
pub async fn merge_notes(
    pool: &SqlitePool,
    board_id: &str,
    target_note_id: &str,
    source_note_id: &str,
) -> Result<Note, RepoError> {
    if target_note_id == source_note_id {
        return Err(ValidationError::SelfMerge.into());
    }

    let mut tx = pool.begin().await?;

    // Source is checked before target; the two NotFound messages are distinct.
    let source = sqlx::query_as::<_, NoteRow>(&format!(
        "SELECT {NOTE_COLUMNS} FROM notes WHERE board_id = ?1 AND id = ?2"
    ))
    .bind(board_id)
    .bind(source_note_id)
    .fetch_optional(&mut *tx)
    .await?
    .ok_or_else(|| RepoError::NotFound(format!("source note {source_note_id} not found")))?;

    let target = sqlx::query_as::<_, NoteRow>(&format!(
        "SELECT {NOTE_COLUMNS} FROM notes WHERE board_id = ?1 AND id = ?2"
    ))
    .bind(board_id)
    .bind(target_note_id)
    .fetch_optional(&mut *tx)
    .await?
    .ok_or_else(|| RepoError::NotFound(format!("target note {target_note_id} not found")))?;

    let text = merge::merge_text(&target.text, &source.text);
    let votes = target.votes + source.votes;
    let author = merge::merge_authors(&target.author, &source.author);

    sqlx::query("UPDATE notes SET text = ?1, votes = ?2, author = ?3 WHERE id = ?4")
        .bind(&text)
        .bind(votes)
        .bind(&author)
        .bind(target_note_id)
        .execute(&mut *tx)
        .await?;

    sqlx::query("DELETE FROM notes WHERE id = ?1")
        .bind(source_note_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    tracing::debug!(
        board_id = %board_id,
        target = %target_note_id,
        source = %source_note_id,
        votes,
        "notes merged"
    );

    let category = parse_category(&target.id, &target.category);
    Ok(Note {
        id: target.id,
        text,
        category,
        author,
        votes,
        created_at: target.created_at,
    })
}

/// Delete a note from a board.
pub async fn delete_note(
    pool: &SqlitePool,
    board_id: &str,
    note_id: &str,
) -> Result<(), RepoError> {
    let mut tx = pool.begin().await?;

    let board_exists: Option<i64> = sqlx::query_scalar("SELECT 1 FROM boards WHERE id = ?1")
        .bind(board_id)
        .fetch_optional(&mut *tx)
        .await?;
    if board_exists.is_none() {
        return Err(RepoError::NotFound(format!("board {board_id} not found")));
    }

    let removed = sqlx::query("DELETE FROM notes WHERE board_id = ?1 AND id = ?2")
        .bind(board_id)
        .bind(note_id)
        .execute(&mut *tx)
        .await?
        .rows_affected();
    if removed == 0 {
        return Err(RepoError::NotFound(format!("note {note_id} not found")));
    }

    tx.commit().await?;
    tracing::debug!(board_id = %board_id, note_id = %note_id, "note deleted");
    Ok(())
}

/// Parse a stored category string. The schema CHECK constraint keeps invalid
/// values out of the table, so the fallback is unreachable in practice.
fn parse_category(note_id: &str, raw: &str) -> Category {
    raw.parse().unwrap_or_else(|_| {
        tracing::warn!(note_id = %note_id, category = %raw, "unknown category in database");
        Category::Good
    })
}

/// Internal row type for SQLx mapping.
#[derive(sqlx::FromRow)]
struct NoteRow {
    id: String,
    text: String,
    category: String,
    author: String,
    votes: i64,
    created_at: DateTime<Utc>,
}

impl NoteRow {
    fn into_note(self) -> Note {
        let category = parse_category(&self.id, &self.category);
        Note {
            id: self.id,
            text: self.text,
            category,
            author: self.author,
            votes: self.votes,
            created_at: self.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repo::{boards, test_pool};

    async fn board(pool: &SqlitePool) -> String {
        boards::create_board(pool, "Sprint retro", "")
            .await
            .unwrap()
            .id
    }

    #[tokio::test]
    async fn create_note_defaults_and_trims() {
        let pool = test_pool().await;
        let board_id = board(&pool).await;

        let note = create_note(&pool, &board_id, "  ship it  ", "good", "  ").await.unwrap();
        assert_eq!(note.text, "ship it");
        assert_eq!(note.category, Category::Good);
        assert_eq!(note.author, "Anonymous");
        assert_eq!(note.votes, 0);
    }

    #[tokio::test]
    async fn create_note_rejects_invalid_category() {
        let pool = test_pool().await;
        let board_id = board(&pool).await;

        let err = create_note(&pool, &board_id, "text", "urgent", "A").await.unwrap_err();
        assert!(matches!(
            err,
            RepoError::Validation(ValidationError::InvalidCategory(_))
        ));
    }

    #[tokio::test]
    async fn create_note_accepts_all_valid_categories() {
        let pool = test_pool().await;
        let board_id = board(&pool).await;

        for cat in ["good", "bad", "improve"] {
            let note = create_note(&pool, &board_id, "text", cat, "A").await.unwrap();
            assert_eq!(note.category.as_str(), cat);
        }
    }

    #[tokio::test]
    async fn create_note_rejects_empty_text() {
        let pool = test_pool().await;
        let board_id = board(&pool).await;

        let err = create_note(&pool, &board_id, " \n ", "good", "A").await.unwrap_err();
        assert!(matches!(
            err,
            RepoError::Validation(ValidationError::EmptyNoteText)
        ));
    }

    #[tokio::test]
    async fn create_note_on_missing_board_is_not_found() {
        let pool = test_pool().await;
        let err = create_note(&pool, "no-board", "text", "good", "A").await.unwrap_err();
        assert!(matches!(err, RepoError::NotFound(_)));
    }

    #[tokio::test]
    async fn missing_board_wins_over_invalid_payload() {
        let pool = test_pool().await;
        let err = create_note(&pool, "no-board", "text", "urgent", "A").await.unwrap_err();
        assert!(matches!(err, RepoError::NotFound(_)));
    }

    #[tokio::test]
    async fn votes_are_monotonic_under_sequential_voting() {
        let pool = test_pool().await;
        let board_id = board(&pool).await;
        let note = create_note(&pool, &board_id, "vote me", "good", "").await.unwrap();

        for expected in 1..=5 {
            let voted = vote_note(&pool, &board_id, &note.id).await.unwrap();
            assert_eq!(voted.votes, expected);
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_votes_never_lose_updates() {
        // A file-backed database so the pool can hand out several real
        // connections; the shared in-memory test pool is capped at one.
        let path = std::env::temp_dir().join(format!("retroboard-votes-{}.db", new_id()));
        let url = format!("sqlite://{}", path.display());
        let pool = crate::repo::init_pool(&url).await.unwrap();

        let board_id = boards::create_board(&pool, "Concurrent", "")
            .await
            .unwrap()
            .id;
        let note = create_note(&pool, &board_id, "hot take", "good", "").await.unwrap();

        let mut handles = Vec::new();
        for _ in 0..10 {
            let pool = pool.clone();
            let board_id = board_id.clone();
            let note_id = note.id.clone();
            handles.push(tokio::spawn(async move {
                vote_note(&pool, &board_id, &note_id).await
            }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let notes = list_for_board(&pool, &board_id).await.unwrap();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].votes, 10);

        pool.close().await;
        for suffix in ["", "-wal", "-shm"] {
            let _ = std::fs::remove_file(format!("{}{}", path.display(), suffix));
        }
    }

    #[tokio::test]
    async fn vote_is_scoped_to_the_owning_board() {
        let pool = test_pool().await;
        let board_a = board(&pool).await;
        let board_b = boards::create_board(&pool, "Other", "").await.unwrap().id;
        let note = create_note(&pool, &board_b, "note on B", "bad", "").await.unwrap();

        let err = vote_note(&pool, &board_a, &note.id).await.unwrap_err();
        assert!(matches!(err, RepoError::NotFound(_)));

        // The note itself is untouched.
        let fresh = vote_note(&pool, &board_b, &note.id).await.unwrap();
        assert_eq!(fresh.votes, 1);
    }

    #[tokio::test]
    async fn recategorization_is_idempotent() {
        let pool = test_pool().await;
        let board_id = board(&pool).await;
        let note = create_note(&pool, &board_id, "move me", "bad", "").await.unwrap();

        let first = update_note_category(&pool, &board_id, &note.id, "good").await.unwrap();
        assert_eq!(first.category, Category::Good);
        let second = update_note_category(&pool, &board_id, &note.id, "good").await.unwrap();
        assert_eq!(second.category, Category::Good);
    }

    #[tokio::test]
    async fn recategorization_rejects_invalid_category() {
        let pool = test_pool().await;
        let board_id = board(&pool).await;
        let note = create_note(&pool, &board_id, "move me", "bad", "").await.unwrap();

        let err = update_note_category(&pool, &board_id, &note.id, "urgent").await.unwrap_err();
        assert!(matches!(err, RepoError::Validation(_)));
    }

    #[tokio::test]
    async fn update_text_replaces_text_and_author() {
        let pool = test_pool().await;
        let board_id = board(&pool).await;
        let note = create_note(&pool, &board_id, "draft", "improve", "Alex").await.unwrap();

        let updated = update_note_text(&pool, &board_id, &note.id, " final ", "").await.unwrap();
        assert_eq!(updated.text, "final");
        assert_eq!(updated.author, "Anonymous");
        assert_eq!(updated.category, Category::Improve);
        assert_eq!(updated.created_at, note.created_at);
    }

    #[tokio::test]
    async fn update_text_rejects_empty_text() {
        let pool = test_pool().await;
        let board_id = board(&pool).await;
        let note = create_note(&pool, &board_id, "draft", "good", "").await.unwrap();

        let err = update_note_text(&pool, &board_id, &note.id, "  ", "A").await.unwrap_err();
        assert!(matches!(
            err,
            RepoError::Validation(ValidationError::EmptyNoteText)
        ));
    }

    // ── merge ─────────────────────────────────────────────────────

    #[tokio::test]
    async fn merge_composes_text_with_literal_separator() {
        let pool = test_pool().await;
        let board_id = board(&pool).await;
        let target = create_note(&pool, &board_id, "A", "good", "").await.unwrap();
        let source = create_note(&pool, &board_id, "B", "good", "").await.unwrap();

        let merged = merge_notes(&pool, &board_id, &target.id, &source.id).await.unwrap();
        assert_eq!(merged.id, target.id);
        assert_eq!(merged.text, "A\n\n---\n\nB");

        // Source note is gone for good.
        let err = vote_note(&pool, &board_id, &source.id).await.unwrap_err();
        assert!(matches!(err, RepoError::NotFound(_)));
    }

    #[tokio::test]
    async fn merge_sums_votes() {
        let pool = test_pool().await;
        let board_id = board(&pool).await;
        let target = create_note(&pool, &board_id, "A", "good", "").await.unwrap();
        let source = create_note(&pool, &board_id, "B", "good", "").await.unwrap();
        for _ in 0..2 {
            vote_note(&pool, &board_id, &target.id).await.unwrap();
        }
        for _ in 0..3 {
            vote_note(&pool, &board_id, &source.id).await.unwrap();
        }

        let merged = merge_notes(&pool, &board_id, &target.id, &source.id).await.unwrap();
        assert_eq!(merged.votes, 5);
    }

    #[tokio::test]
    async fn merge_author_rules_cover_all_cases() {
        let pool = test_pool().await;
        let board_id = board(&pool).await;

        let cases = [
            ("", "Mary", "Mary"),          // anonymous target adopts source
            ("Alex", "Mary", "Alex & Mary"), // both named, different
            ("Alex", "Alex", "Alex"),      // equal authors
            ("Alex", "", "Alex"),          // anonymous source leaves target
        ];

        for (target_author, source_author, expected) in cases {
            let target = create_note(&pool, &board_id, "A", "good", target_author).await.unwrap();
            let source = create_note(&pool, &board_id, "B", "good", source_author).await.unwrap();
            let merged = merge_notes(&pool, &board_id, &target.id, &source.id).await.unwrap();
            assert_eq!(merged.author, expected, "case {target_author:?} + {source_author:?}");
        }
    }

    #[tokio::test]
    async fn merge_preserves_target_category_and_timestamp() {
        let pool = test_pool().await;
        let board_id = board(&pool).await;
        let target = create_note(&pool, &board_id, "A", "improve", "").await.unwrap();
        let source = create_note(&pool, &board_id, "B", "bad", "").await.unwrap();

        let merged = merge_notes(&pool, &board_id, &target.id, &source.id).await.unwrap();
        assert_eq!(merged.category, Category::Improve);
        assert_eq!(merged.created_at, target.created_at);
    }

    #[tokio::test]
    async fn self_merge_is_rejected() {
        let pool = test_pool().await;
        let board_id = board(&pool).await;
        let note = create_note(&pool, &board_id, "A", "good", "").await.unwrap();

        let err = merge_notes(&pool, &board_id, &note.id, &note.id).await.unwrap_err();
        assert!(matches!(
            err,
            RepoError::Validation(ValidationError::SelfMerge)
        ));
    }

    #[tokio::test]
    async fn merge_with_missing_source_is_not_found() {
        let pool = test_pool().await;
        let board_id = board(&pool).await;
        let target = create_note(&pool, &board_id, "A", "good", "").await.unwrap();

        let err = merge_notes(&pool, &board_id, &target.id, "ghost").await.unwrap_err();
        match err {
            RepoError::NotFound(msg) => assert!(msg.contains("source"), "got: {msg}"),
            other => panic!("expected NotFound, got: {other:?}"),
        }
    }

    #[tokio::test]
    async fn merge_with_missing_target_is_not_found() {
        let pool = test_pool().await;
        let board_id = board(&pool).await;
        let source = create_note(&pool, &board_id, "B", "good", "").await.unwrap();

        let err = merge_notes(&pool, &board_id, "ghost", &source.id).await.unwrap_err();
        match err {
            RepoError::NotFound(msg) => assert!(msg.contains("target"), "got: {msg}"),
            other => panic!("expected NotFound, got: {other:?}"),
        }

        // A failed merge must not delete the source.
        let still_there = vote_note(&pool, &board_id, &source.id).await.unwrap();
        assert_eq!(still_there.votes, 1);
    }

    #[tokio::test]
    async fn merge_is_scoped_to_one_board() {
        let pool = test_pool().await;
        let board_a = board(&pool).await;
        let board_b = boards::create_board(&pool, "Other", "").await.unwrap().id;
        let target = create_note(&pool, &board_a, "A", "good", "").await.unwrap();
        let source = create_note(&pool, &board_b, "B", "good", "").await.unwrap();

        let err = merge_notes(&pool, &board_a, &target.id, &source.id).await.unwrap_err();
        assert!(matches!(err, RepoError::NotFound(_)));
    }

    // ── delete ────────────────────────────────────────────────────

    #[tokio::test]
    async fn delete_note_removes_it() {
        let pool = test_pool().await;
        let board_id = board(&pool).await;
        let note = create_note(&pool, &board_id, "bye", "bad", "").await.unwrap();

        delete_note(&pool, &board_id, &note.id).await.unwrap();
        let err = vote_note(&pool, &board_id, &note.id).await.unwrap_err();
        assert!(matches!(err, RepoError::NotFound(_)));
    }

    #[tokio::test]
    async fn delete_note_missing_board_reports_board_not_found() {
        let pool = test_pool().await;
        let err = delete_note(&pool, "no-board", "no-note").await.unwrap_err();
        match err {
            RepoError::NotFound(msg) => assert!(msg.contains("board"), "got: {msg}"),
            other => panic!("expected NotFound, got: {other:?}"),
        }
    }

    #[tokio::test]
    async fn delete_note_missing_note_is_not_found() {
        let pool = test_pool().await;
        let board_id = board(&pool).await;
        let err = delete_note(&pool, &board_id, "ghost").await.unwrap_err();
        assert!(matches!(err, RepoError::NotFound(_)));
    }
}
