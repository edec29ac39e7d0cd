//! Durable notify-once state.
//!
//! A JSON file records which alert keys have already fired plus the
//! heartbeat and status timestamps. Writes go to a temp file in the
//! same directory and are renamed into place, so a crash mid-write or
//! an overlapping external scheduler never leaves a partial file.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum StateError {
    #[error("Failed to write state file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to encode state: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Persisted alert state. A missing file is a fresh, un-notified
/// baseline for every key.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AlertState {
    /// alert key -> already notified during the current dwell
    #[serde(default)]
    pub notified: HashMap<String, bool>,
    /// Epoch seconds of the last explicit status push
    #[serde(default)]
    pub last_status_ts: i64,
    /// Epoch seconds of the last heartbeat summary
    #[serde(default)]
    pub last_summary_ts: i64,
    /// One-shot flag for the secondary-idea advisory
    #[serde(default)]
    pub secondary_idea_suggested: bool,
}

impl AlertState {
    /// Whether the once-guard for this key has already been consumed.
    pub fn is_notified(&self, key: &str) -> bool {
        self.notified.get(key).copied().unwrap_or(false)
    }

    /// Consume the once-guard for a key. Keys are never reset here; a
    /// key only clears when the state file is removed or edited
    /// externally.
    pub fn mark_notified(&mut self, key: impl Into<String>) {
        self.notified.insert(key.into(), true);
    }
}

/// File-backed store for [`AlertState`].
#[derive(Debug, Clone)]
pub struct StateStore {
    path: PathBuf,
}

impl StateStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the state. A missing or unreadable file yields the empty
    /// baseline, never an error.
    pub fn load(&self) -> AlertState {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(_) => return AlertState::default(),
        };
        match serde_json::from_str(&raw) {
            Ok(state) => state,
            Err(e) => {
                warn!(
                    path = %self.path.display(),
                    error = %e,
                    "Corrupt state file, starting from empty state"
                );
                AlertState::default()
            }
        }
    }

    /// Persist the state atomically: write a temp file next to the
    /// target, then rename over it.
    pub fn save(&self, state: &AlertState) -> Result<(), StateError> {
        let json = serde_json::to_string_pretty(state)?;
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}
