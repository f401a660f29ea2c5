pub mod config;
pub mod history;
pub mod init;
pub mod ng;
pub mod pattern;
pub mod reset;
pub mod staff;
pub mod summary;
pub mod template;
pub mod weekly;

use anyhow::Context;
use shift_core::staff::Staff;
use shift_core::storage::FileStorage;
use shift_core::ShiftStore;
use std::path::Path;

pub fn open_store(root: &Path) -> anyhow::Result<ShiftStore<FileStorage>> {
    ShiftStore::open_at(root).with_context(|| format!("failed to open roster at {}", root.display()))
}

/// Find a staff member by id, or by name when the name is unambiguous.
pub fn resolve_staff<'a>(store: &'a ShiftStore<FileStorage>, ident: &str) -> anyhow::Result<&'a Staff> {
    if let Some(s) = store.find_staff(ident) {
        return Ok(s);
    }
    let mut matches = store.staff().iter().filter(|s| s.name == ident);
    match (matches.next(), matches.next()) {
        (Some(s), None) => Ok(s),
        (Some(_), Some(_)) => anyhow::bail!("staff name '{ident}' is ambiguous; use the id"),
        (None, _) => anyhow::bail!("staff '{ident}' not found"),
    }
}

pub fn resolve_staff_id(store: &ShiftStore<FileStorage>, ident: &str) -> anyhow::Result<String> {
    resolve_staff(store, ident).map(|s| s.id.clone())
}

/// Display name for a staff id, falling back to the id itself.
pub fn staff_name(store: &ShiftStore<FileStorage>, id: &str) -> String {
    store
        .find_staff(id)
        .map(|s| s.name.clone())
        .unwrap_or_else(|| id.to_string())
}
