//! # retroboard-core — Domain Types for the Retroboard Service
//!
//! Pure domain logic shared by the API layer: the closed [`Category`] enum,
//! the note-merge rules ([`merge`]), free-text normalization, and the
//! [`ValidationError`] hierarchy. No I/O lives here — persistence and
//! transport are the `retroboard-api` crate's concern.

pub mod category;
pub mod error;
pub mod merge;

pub use category::Category;
pub use error::ValidationError;

/// Validate and normalize a board name: trimmed, non-empty.
pub fn validate_board_name(name: &str) -> Result<String, ValidationError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyBoardName);
    }
    Ok(trimmed.to_string())
}

/// Validate and normalize note text: trimmed, non-empty.
pub fn validate_note_text(text: &str) -> Result<String, ValidationError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyNoteText);
    }
    Ok(trimmed.to_string())
}
