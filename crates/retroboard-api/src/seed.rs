//! Demo data seeding.
//!
//! Creates one example board with a handful of notes so a fresh deployment
//! has something to show. Enabled via `RETROBOARD_SEED_DEMO=true`.

use sqlx::SqlitePool;

use crate::repo::{new_id, RepoError};

/// Seed the demo board if the database is empty.
///
/// Idempotent: if any board already exists, nothing is written. The whole
/// seed runs in one transaction.
pub async fn seed_demo_data(pool: &SqlitePool) -> Result<(), RepoError> {
    let mut tx = pool.begin().await?;

    let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM boards")
        .fetch_one(&mut *tx)
        .await?;
    if existing > 0 {
        tracing::debug!(boards = existing, "demo data skipped, boards already exist");
        return Ok(());
    }

    let board_id = new_id();
    let created_at = chrono::Utc::now();

    sqlx::query("INSERT INTO boards (id, name, description, created_at) VALUES (?1, ?2, ?3, ?4)")
        .bind(&board_id)
        .bind("Demo retro board")
        .bind("Example board for trying things out")
        .bind(created_at)
        .execute(&mut *tx)
        .await?;

    let demo_notes: [(&str, &str, &str, i64); 5] = [
        ("Great communication across the team", "good", "Alexey", 0),
        ("Bug fixes take too long to land", "bad", "Maria", 1),
        ("Introduce a code review process", "improve", "Sergey", 0),
        ("Well organized meetings", "good", "Anna", 2),
        ("Set up a CI/CD pipeline", "improve", "Igor", 1),
    ];

    for (text, category, author, votes) in demo_notes {
        sqlx::query(
            "INSERT INTO notes (id, board_id, text, category, author, votes, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        )
        .bind(new_id())
        .bind(&board_id)
        .bind(text)
        .bind(category)
        .bind(author)
        .bind(votes)
        .bind(created_at)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;
    tracing::info!(board_id = %board_id, "demo data seeded");
    Ok(())
}
