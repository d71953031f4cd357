//! # Domain Validation Errors
//!
//! Structured validation failures raised by the repository and the merge
//! rules. The API layer converts these into 400-class responses.

use thiserror::Error;

/// Malformed or semantically invalid input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Board name was empty after trimming.
    #[error("board name must not be empty")]
    EmptyBoardName,

    /// Note text was empty after trimming.
    #[error("note text must not be empty")]
    EmptyNoteText,

    /// Category outside the good/bad/improve set.
    #[error("invalid category '{0}': must be one of good, bad, improve")]
    InvalidCategory(String),

    /// A note cannot be merged with itself.
    #[error("cannot merge a note with itself")]
    SelfMerge,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_are_human_readable() {
        assert_eq!(
            ValidationError::EmptyBoardName.to_string(),
            "board name must not be empty"
        );
        assert!(ValidationError::InvalidCategory("urgent".into())
            .to_string()
            .contains("urgent"));
        assert!(ValidationError::SelfMerge.to_string().contains("itself"));
    }
}
