use crate::error::{Result, ShiftError};
use crate::history::DEFAULT_HISTORY_LIMIT;
use crate::paths;
use serde::{Deserialize, Serialize};
use std::path::Path;

// ---------------------------------------------------------------------------
// ConfigWarning / WarnLevel
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigWarning {
    pub level: WarnLevel,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarnLevel {
    Warning,
    Error,
}

// ---------------------------------------------------------------------------
// StorageConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Name of the record the roster is stored under.
    #[serde(default = "default_storage_key")]
    pub key: String,
}

fn default_storage_key() -> String {
    paths::DEFAULT_STORAGE_KEY.to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            key: default_storage_key(),
        }
    }
}

// ---------------------------------------------------------------------------
// HistoryConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryConfig {
    /// Undo depth. 0 turns undo off.
    #[serde(default = "default_history_limit")]
    pub limit: usize,
}

fn default_history_limit() -> usize {
    DEFAULT_HISTORY_LIMIT
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            limit: default_history_limit(),
        }
    }
}

// ---------------------------------------------------------------------------
// Config (top-level)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub history: HistoryConfig,
}

fn default_version() -> u32 {
    1
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: default_version(),
            storage: StorageConfig::default(),
            history: HistoryConfig::default(),
        }
    }
}

impl Config {
    pub fn load(root: &Path) -> Result<Self> {
        let path = paths::config_path(root);
        if !path.exists() {
            return Err(ShiftError::NotInitialized);
        }
        let data = std::fs::read_to_string(&path)?;
        let cfg: Config = serde_yaml::from_str(&data)?;
        crate::migrations::migrate_config(cfg)
    }

    pub fn save(&self, root: &Path) -> Result<()> {
        let path = paths::config_path(root);
        let data = serde_yaml::to_string(self)?;
        crate::io::atomic_write(&path, data.as_bytes())
    }

    // -----------------------------------------------------------------------
    // Validation
    // -----------------------------------------------------------------------

    pub fn validate(&self) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();

        if let Err(e) = paths::validate_storage_key(&self.storage.key) {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: format!("storage.key: {e}"),
            });
        }

        if self.history.limit == 0 {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: "history.limit is 0: undo and redo are disabled".to_string(),
            });
        } else if self.history.limit > 10_000 {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: format!(
                    "history.limit={} is unusually large; every entry is rewritten on each save",
                    self.history.limit
                ),
            });
        }

        if self.version > default_version() {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: format!(
                    "config version {} is newer than this build understands",
                    self.version
                ),
            });
        }

        warnings
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_roundtrip() {
        let cfg = Config::default();
        let yaml = serde_yaml::to_string(&cfg).unwrap();
        let parsed: Config = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed, cfg);
        assert_eq!(parsed.storage.key, "shift-manager-state");
        assert_eq!(parsed.history.limit, 200);
    }

    #[test]
    fn sparse_yaml_takes_defaults() {
        let cfg: Config = serde_yaml::from_str("version: 1\n").unwrap();
        assert_eq!(cfg, Config::default());

        let cfg: Config = serde_yaml::from_str("history:\n  limit: 5\n").unwrap();
        assert_eq!(cfg.history.limit, 5);
        assert_eq!(cfg.storage.key, "shift-manager-state");
    }

    #[test]
    fn load_missing_is_not_initialized() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(
            Config::load(dir.path()),
            Err(ShiftError::NotInitialized)
        ));
    }

    #[test]
    fn save_then_load() {
        let dir = TempDir::new().unwrap();
        let mut cfg = Config::default();
        cfg.history.limit = 10;
        cfg.save(dir.path()).unwrap();
        assert_eq!(Config::load(dir.path()).unwrap(), cfg);
    }

    #[test]
    fn validate_flags_bad_key_and_zero_limit() {
        let mut cfg = Config::default();
        assert!(cfg.validate().is_empty());

        cfg.storage.key = "Bad Key".to_string();
        cfg.history.limit = 0;
        let warnings = cfg.validate();
        assert_eq!(warnings.len(), 2);
        assert_eq!(warnings[0].level, WarnLevel::Error);
        assert_eq!(warnings[1].level, WarnLevel::Warning);
    }
}
