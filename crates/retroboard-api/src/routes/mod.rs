//! # API Route Modules
//!
//! Route modules for the retroboard API surface:
//!
//! - `boards` — board lifecycle: create, list, fetch with notes, cascade delete.
//! - `notes` — note lifecycle: create, vote, recategorize (drag-and-drop),
//!   edit, merge duplicates, delete.
//!
//! Handlers are thin: they parse and validate the request shape, then call
//! the repository, which owns every invariant.

pub mod boards;
pub mod notes;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Acknowledgment body returned by delete operations.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DeleteAck {
    pub message: String,
    pub id: String,
}
