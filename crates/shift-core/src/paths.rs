use crate::error::{Result, ShiftError};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

// ---------------------------------------------------------------------------
// Directory constants
// ---------------------------------------------------------------------------

pub const SHIFTS_DIR: &str = ".shifts";
pub const CONFIG_FILE: &str = ".shifts/config.yaml";

pub const DEFAULT_STORAGE_KEY: &str = "shift-manager-state";
pub const RECORD_EXTENSION: &str = "json";

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

pub fn shifts_dir(root: &Path) -> PathBuf {
    root.join(SHIFTS_DIR)
}

pub fn config_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE)
}

/// Location of the record stored under `key` inside a data directory.
pub fn record_path(data_dir: &Path, key: &str) -> PathBuf {
    data_dir.join(format!("{key}.{RECORD_EXTENSION}"))
}

/// Fallback root when nothing closer to the working directory claims one.
pub fn home_root() -> Result<PathBuf> {
    home::home_dir().ok_or(ShiftError::HomeNotFound)
}

// ---------------------------------------------------------------------------
// Storage key validation
// ---------------------------------------------------------------------------

static KEY_RE: OnceLock<Regex> = OnceLock::new();

fn key_re() -> &'static Regex {
    KEY_RE.get_or_init(|| Regex::new(r"^[a-z0-9][a-z0-9\-]*[a-z0-9]$|^[a-z0-9]$").unwrap())
}

/// Storage keys become file names, so they are held to the slug alphabet.
pub fn validate_storage_key(key: &str) -> Result<()> {
    if key.is_empty() || key.len() > 64 || !key_re().is_match(key) {
        return Err(ShiftError::InvalidStorageKey(key.to_string()));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
