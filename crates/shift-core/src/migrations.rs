use crate::config::Config;
use crate::error::{Result, ShiftError};
use serde_json::{Map, Value};

/// Schema version written by this build.
///
/// Version 0 is the unversioned record the browser build kept in local
/// storage: a bare state object with no envelope.
pub const CURRENT_SCHEMA_VERSION: u32 = 1;

const COLLECTIONS: [&str; 7] = [
    "staff",
    "patterns",
    "templates",
    "ngShifts",
    "weeklyPatterns",
    "history",
    "redo",
];

/// Split a stored document into its schema version and state payload.
pub fn split_envelope(doc: Value) -> Result<(u32, Value)> {
    let Value::Object(mut obj) = doc else {
        return Err(ShiftError::MalformedRecord(
            "top-level value is not an object".to_string(),
        ));
    };

    if obj.contains_key("state") && obj.contains_key("version") {
        let version = obj
            .get("version")
            .and_then(Value::as_u64)
            .and_then(|v| u32::try_from(v).ok())
            .ok_or_else(|| ShiftError::MalformedRecord("version is not a number".to_string()))?;
        let state = obj.remove("state").unwrap_or(Value::Null);
        return Ok((version, state));
    }

    if obj.contains_key("staff") || obj.contains_key("patterns") {
        return Ok((0, Value::Object(obj)));
    }

    Err(ShiftError::MalformedRecord(
        "neither a versioned envelope nor a legacy state object".to_string(),
    ))
}

/// Bring a state payload written at `version` up to [`CURRENT_SCHEMA_VERSION`].
pub fn migrate_state(version: u32, state: Value) -> Result<Value> {
    match version {
        0 => migrate_v0_to_v1(state),
        CURRENT_SCHEMA_VERSION => Ok(state),
        found => Err(ShiftError::UnsupportedSchemaVersion {
            found,
            supported: CURRENT_SCHEMA_VERSION,
        }),
    }
}

/// Legacy records may lack whole collections (the reducer state never carried
/// `history`) and may carry view-only keys such as `shifts`.
fn migrate_v0_to_v1(state: Value) -> Result<Value> {
    let Value::Object(mut obj) = state else {
        return Err(ShiftError::MalformedRecord(
            "legacy state is not an object".to_string(),
        ));
    };
    let mut out = Map::new();
    for key in COLLECTIONS {
        let value = match obj.remove(key) {
            Some(Value::Null) | None => Value::Array(Vec::new()),
            Some(v) => v,
        };
        out.insert(key.to_string(), value);
    }
    Ok(Value::Object(out))
}

/// Run any pending schema migrations on a loaded [`Config`].
///
/// Config schema v1 has no migrations yet.
pub fn migrate_config(cfg: Config) -> Result<Config> {
    Ok(cfg)
}
