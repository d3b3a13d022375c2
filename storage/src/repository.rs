//! History store abstraction.
//!
//! Handlers receive an `Arc<dyn HistoryStore>` so tests can swap the backing file
//! for a temporary one.

use crate::error::StorageError;
use prompt::Turn;

/// Bounded, ordered history of turns per conversation identifier.
pub trait HistoryStore: Send + Sync {
    /// Appends a turn, evicts the oldest turns beyond the bound, then persists the whole store.
    ///
    /// The in-memory append is kept even when persisting fails; the error is returned for logging.
    fn append(&self, conversation_id: &str, turn: Turn) -> Result<(), StorageError>;

    /// Ordered turns for the conversation (oldest first); empty if none.
    fn get(&self, conversation_id: &str) -> Vec<Turn>;

    /// Writes the full mapping to stable storage.
    fn persist(&self) -> Result<(), StorageError>;

    /// Number of conversations currently held.
    fn conversation_count(&self) -> usize;
}
