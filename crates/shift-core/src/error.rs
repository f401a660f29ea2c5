use thiserror::Error;

#[derive(Debug, Error)]
pub enum ShiftError {
    #[error("not initialized: run 'shifts init'")]
    NotInitialized,

    #[error("staff name must not be empty")]
    EmptyName,

    #[error("unknown shift time '{0}'")]
    InvalidShiftTime(String),

    #[error("invalid day of week {0}: must be 0 (Sunday) through 6 (Saturday)")]
    InvalidDayOfWeek(u8),

    #[error("invalid date range: {start} is after {end}")]
    InvalidDateRange { start: String, end: String },

    #[error("invalid storage key '{0}': must be lowercase alphanumeric with hyphens")]
    InvalidStorageKey(String),

    #[error("unsupported state schema version {found} (newest known is {supported})")]
    UnsupportedSchemaVersion { found: u32, supported: u32 },

    #[error("malformed state record: {0}")]
    MalformedRecord(String),

    #[error("home directory not found: set HOME environment variable")]
    HomeNotFound,

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ShiftError>;
