//! Caller-owned entity store snapshot.
//!
//! # Responsibility
//! - Hold the user/project/task/notification collections for one session.
//! - Decode datasets from JSON and reject inconsistent ones.
//! - Insert validated drafts without breaking reference integrity.
//!
//! # Invariants
//! - Every task references an existing user and project.
//! - Ids are unique within each collection.
//! - Notifications change only through the inbox reducer.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod snapshot;

pub type StoreResult<T> = Result<T, StoreError>;

/// Store-level error for dataset loading and insertion.
#[derive(Debug)]
pub enum StoreError {
    /// Dataset file cannot be read.
    Io(std::io::Error),
    /// Dataset is not valid JSON or does not match the entity schema.
    Json(serde_json::Error),
    /// Decoded dataset violates a cross-record invariant.
    Integrity(String),
    /// Insert would duplicate an existing id.
    DuplicateId {
        collection: &'static str,
        id: String,
    },
    /// Insert references a record that does not exist.
    UnknownReference {
        field: &'static str,
        id: String,
    },
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "failed to read dataset: {err}"),
            Self::Json(err) => write!(f, "invalid dataset json: {err}"),
            Self::Integrity(message) => write!(f, "inconsistent dataset: {message}"),
            Self::DuplicateId { collection, id } => {
                write!(f, "duplicate {collection} id: {id}")
            }
            Self::UnknownReference { field, id } => {
                write!(f, "{field} references unknown id: {id}")
            }
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Json(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for StoreError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}
