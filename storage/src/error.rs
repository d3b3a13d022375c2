//! Storage error types.
//!
//! Returned by [`crate::HistoryStore`] when the history file cannot be written.
//! Read failures never surface: they are recovered as an empty store.

use thiserror::Error;

/// Errors that can occur when persisting conversation history.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialize error: {0}")]
    Serialize(#[from] serde_json::Error),
}
