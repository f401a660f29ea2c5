use super::{open_store, staff_name};
use crate::output::print_json;
use shift_core::history::HistoryEntry;
use shift_core::storage::FileStorage;
use shift_core::ShiftStore;
use std::path::Path;

pub fn undo(root: &Path, json: bool) -> anyhow::Result<()> {
    let mut store = open_store(root)?;
    let entry = store.undo();
    let remaining = store.can_undo();
    report(&store, entry.as_ref(), remaining, ("undo", "Undid"), json)
}

pub fn redo(root: &Path, json: bool) -> anyhow::Result<()> {
    let mut store = open_store(root)?;
    let entry = store.redo();
    let remaining = store.can_redo();
    report(&store, entry.as_ref(), remaining, ("redo", "Redid"), json)
}

fn report(
    store: &ShiftStore<FileStorage>,
    entry: Option<&HistoryEntry>,
    remaining: bool,
    (noun, verb): (&str, &str),
    json: bool,
) -> anyhow::Result<()> {
    if json {
        return print_json(&serde_json::json!({ "entry": entry, "remaining": remaining }));
    }
    let Some(e) = entry else {
        println!("Nothing to {noun}.");
        return Ok(());
    };
    let p = &e.data;
    let name = staff_name(store, &p.staff_id);
    match &e.previous {
        Some(prev) => println!(
            "{verb} {}: {} {name} {} -> {}",
            e.action, p.date, prev.shift_time, p.shift_time
        ),
        None => println!("{verb} {}: {} {name} {}", e.action, p.date, p.shift_time),
    }
    Ok(())
}
