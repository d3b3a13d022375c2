//! Storage crate: bounded conversation history persisted to a JSON file.
//!
//! ## Modules
//!
//! - [`error`] – Storage error types
//! - [`repository`] – HistoryStore trait
//! - [`history_store`] – JsonHistoryStore (JSON file, atomic rewrite)
//! - [`locks`] – ConversationLocks (per-conversation async mutex)

mod error;
mod history_store;
mod locks;
mod repository;


pub use error::StorageError;
pub use history_store::{JsonHistoryStore, MAX_TURNS};
pub use locks::ConversationLocks;
pub use repository::HistoryStore;
