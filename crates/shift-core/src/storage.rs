use crate::error::Result;
use crate::migrations::{self, CURRENT_SCHEMA_VERSION};
use crate::paths;
use crate::state::AppState;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;
use std::path::PathBuf;

// ---------------------------------------------------------------------------
// StorageBackend
// ---------------------------------------------------------------------------

/// Durable string storage addressed by key.
pub trait StorageBackend {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
    fn remove(&mut self, key: &str) -> Result<()>;
}

/// One `<key>.json` file per key inside a data directory.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        paths::record_path(&self.dir, key)
    }
}

impl StorageBackend for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(std::fs::read_to_string(path)?))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        crate::io::atomic_write(&self.path_for(key), value.as_bytes())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        crate::io::remove_if_exists(&self.path_for(key))?;
        Ok(())
    }
}

/// In-process storage; nothing survives the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageBackend for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Persistence
// ---------------------------------------------------------------------------

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Envelope<'a> {
    version: u32,
    saved_at: DateTime<Utc>,
    state: &'a AppState,
}

/// Keeps one storage record in step with an [`AppState`].
///
/// Storage trouble never escapes: failed writes are logged and the caller's
/// in-memory state stays authoritative, unreadable records load as "no state".
#[derive(Debug, Clone)]
pub struct Persistence<B: StorageBackend> {
    backend: B,
    key: String,
}

impl<B: StorageBackend> Persistence<B> {
    pub fn new(backend: B, key: impl Into<String>) -> Self {
        Self {
            backend,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    #[cfg(test)]
    fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Write a snapshot of `state`. Returns `false` if the write failed.
    pub fn save(&mut self, state: &AppState) -> bool {
        match self.try_save(state) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "failed to save state");
                false
            }
        }
    }

    pub fn try_save(&mut self, state: &AppState) -> Result<()> {
        let envelope = Envelope {
            version: CURRENT_SCHEMA_VERSION,
            saved_at: Utc::now(),
            state,
        };
        let data = serde_json::to_string(&envelope)?;
        self.backend.set(&self.key, &data)
    }

    /// The stored state, or `None` if nothing usable is stored.
    pub fn load(&self) -> Option<AppState> {
        match self.try_load() {
            Ok(state) => state,
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "discarding unreadable state record");
                None
            }
        }
    }

    pub fn try_load(&self) -> Result<Option<AppState>> {
        let Some(text) = self.backend.get(&self.key)? else {
            return Ok(None);
        };
        if text.trim().is_empty() {
            return Ok(None);
        }
        decode(&text).map(Some)
    }

    /// Delete the stored record. Failures are logged only.
    pub fn clear(&mut self) {
        if let Err(e) = self.backend.remove(&self.key) {
            tracing::warn!(key = %self.key, error = %e, "failed to clear state");
        }
    }
}

/// Parse a stored document, migrating older schemas forward.
pub fn decode(text: &str) -> Result<AppState> {
    let doc: serde_json::Value = serde_json::from_str(text)?;
    let (version, payload) = migrations::split_envelope(doc)?;
    if version < CURRENT_SCHEMA_VERSION {
        tracing::info!(from = version, to = CURRENT_SCHEMA_VERSION, "migrating state record");
    }
    let payload = migrations::migrate_state(version, payload)?;
    let mut state: AppState = serde_json::from_value(payload)?;
    let before = state.ng_shifts.len();
    state
        .ng_shifts
        .retain(|ng| crate::types::validate_day_of_week(ng.day_of_week).is_ok());
    let dropped = before - state.ng_shifts.len();
    if dropped > 0 {
        tracing::warn!(dropped, "dropped NG shifts with an out-of-range weekday");
    }
    let collapsed = crate::pattern::dedupe_by_day(&mut state.patterns);
    if collapsed > 0 {
        tracing::info!(collapsed, "collapsed duplicate assignments for the same staff and day");
    }
    Ok(state)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
