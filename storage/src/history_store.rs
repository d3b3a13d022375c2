//! JSON-file history store.
//!
//! The whole mapping lives in memory and is rewritten to disk after every append.
//! Writes go to a temp file in the target directory which is then renamed over the
//! history file, so a crash mid-write never leaves a truncated file behind.
//!
//! On-disk layout: one JSON object, keys are conversation ids, values are ordered
//! arrays of `{role, content}` turns.

use std::collections::BTreeMap;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use prompt::Turn;
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

use crate::error::StorageError;
use crate::repository::HistoryStore;

/// Maximum number of turns kept per conversation.
pub const MAX_TURNS: usize = 20;

type Histories = BTreeMap<String, Vec<Turn>>;

pub struct JsonHistoryStore {
    path: PathBuf,
    max_turns: usize,
    histories: Mutex<Histories>,
}

impl JsonHistoryStore {
    /// Loads the store from `path` with the default bound of [`MAX_TURNS`].
    ///
    /// A missing, unreadable or corrupt file yields an empty store; this never fails.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        Self::load_with_max_turns(path, MAX_TURNS)
    }

    /// Same as [`Self::load`] with a custom per-conversation bound (at least 1).
    pub fn load_with_max_turns(path: impl Into<PathBuf>, max_turns: usize) -> Self {
        let path = path.into();
        let max_turns = max_turns.max(1);
        let mut histories = read_histories(&path);
        for turns in histories.values_mut() {
            truncate_front(turns, max_turns);
        }
        info!(
            path = %path.display(),
            conversations = histories.len(),
            max_turns = max_turns,
            "History store loaded"
        );
        Self {
            path,
            max_turns,
            histories: Mutex::new(histories),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn max_turns(&self) -> usize {
        self.max_turns
    }

    fn lock(&self) -> MutexGuard<'_, Histories> {
        // A panic while holding the lock cannot leave a turn half-appended.
        self.histories.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn write_locked(&self, histories: &Histories) -> Result<(), StorageError> {
        let bytes = serde_json::to_vec_pretty(histories)?;
        write_atomic(&self.path, &bytes)?;
        debug!(
            path = %self.path.display(),
            bytes = bytes.len(),
            "History store persisted"
        );
        Ok(())
    }
}

impl HistoryStore for JsonHistoryStore {
    fn append(&self, conversation_id: &str, turn: Turn) -> Result<(), StorageError> {
        let mut histories = self.lock();
        let turns = histories.entry(conversation_id.to_string()).or_default();
        turns.push(turn);
        let evicted = truncate_front(turns, self.max_turns);
        if evicted > 0 {
            debug!(
                conversation_id = %conversation_id,
                evicted = evicted,
                "Evicted oldest turns"
            );
        }
        self.write_locked(&histories)
    }

    fn get(&self, conversation_id: &str) -> Vec<Turn> {
        self.lock()
            .get(conversation_id)
            .cloned()
            .unwrap_or_default()
    }

    fn persist(&self) -> Result<(), StorageError> {
        let histories = self.lock();
        self.write_locked(&histories)
    }

    fn conversation_count(&self) -> usize {
        self.lock().len()
    }
}

/// Drops turns from the front until at most `max` remain. Returns how many were dropped.
fn truncate_front(turns: &mut Vec<Turn>, max: usize) -> usize {
    let excess = turns.len().saturating_sub(max);
    if excess > 0 {
        turns.drain(..excess);
    }
    excess
}

fn read_histories(path: &Path) -> Histories {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            info!(
                path = %path.display(),
                "History file not found, starting empty; it will be created on the first turn"
            );
            return Histories::new();
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Failed to read history file, starting empty");
            return Histories::new();
        }
    };
    match serde_json::from_slice(&bytes) {
        Ok(histories) => histories,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Failed to parse history file, starting empty");
            Histories::new()
        }
    }
}

fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), StorageError> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)?;
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(bytes)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| StorageError::Io(e.error))?;
    Ok(())
}
