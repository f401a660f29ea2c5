use super::{open_store, resolve_staff_id, staff_name};
use crate::output::{print_json, print_table};
use anyhow::Context;
use chrono::NaiveDate;
use clap::Subcommand;
use shift_core::types::{ShiftTime, DAYS_PER_WEEK};
use shift_core::weekly::WeeklyPattern;
use std::path::Path;

#[derive(Subcommand)]
pub enum WeeklySubcommand {
    /// Define (or replace) a named seven-day rule for a staff member
    Add {
        staff: String,
        name: String,
        /// Seven comma-separated slots, "-" for a day off (e.g. morning,-,day,-,-,-,-)
        slots: String,
    },
    /// Delete a weekly pattern
    Remove { staff: String, name: String },
    /// List weekly patterns
    List,
    /// Write the pattern onto the seven days beginning at START
    Apply {
        staff: String,
        name: String,
        start: NaiveDate,
    },
}

pub fn run(root: &Path, subcmd: WeeklySubcommand, json: bool) -> anyhow::Result<()> {
    match subcmd {
        WeeklySubcommand::Add { staff, name, slots } => add(root, &staff, &name, &slots, json),
        WeeklySubcommand::Remove { staff, name } => remove(root, &staff, &name, json),
        WeeklySubcommand::List => list(root, json),
        WeeklySubcommand::Apply { staff, name, start } => apply(root, &staff, &name, start, json),
    }
}

fn parse_slots(raw: &str) -> anyhow::Result<[Option<ShiftTime>; DAYS_PER_WEEK]> {
    let parts: Vec<&str> = raw.split(',').map(str::trim).collect();
    if parts.len() != DAYS_PER_WEEK {
        anyhow::bail!(
            "expected {DAYS_PER_WEEK} comma-separated slots, got {}",
            parts.len()
        );
    }
    let mut slots = [None; DAYS_PER_WEEK];
    for (slot, part) in slots.iter_mut().zip(parts) {
        if part != "-" && !part.is_empty() {
            *slot = Some(part.parse::<ShiftTime>()?);
        }
    }
    Ok(slots)
}

fn format_slots(slots: &[Option<ShiftTime>; DAYS_PER_WEEK]) -> String {
    slots
        .iter()
        .map(|s| s.map_or("-", |t| t.alias()))
        .collect::<Vec<_>>()
        .join(",")
}

fn add(root: &Path, ident: &str, name: &str, raw: &str, json: bool) -> anyhow::Result<()> {
    let slots = parse_slots(raw).context("invalid weekly slots")?;
    let mut store = open_store(root)?;
    let id = resolve_staff_id(&store, ident)?;
    let record = WeeklyPattern::new(id, name, slots);
    let replaced = store.add_weekly_pattern(record.clone());

    if json {
        print_json(&serde_json::json!({ "pattern": record, "replaced": replaced }))?;
    } else {
        let verb = if replaced { "Replaced" } else { "Added" };
        println!(
            "{verb} weekly pattern '{name}' for {}: {}",
            staff_name(&store, &record.staff_id),
            format_slots(&record.pattern)
        );
    }
    Ok(())
}

fn remove(root: &Path, ident: &str, name: &str, json: bool) -> anyhow::Result<()> {
    let mut store = open_store(root)?;
    let id = resolve_staff_id(&store, ident)?;
    if !store.remove_weekly_pattern(&id, name) {
        anyhow::bail!("weekly pattern '{name}' not found for '{ident}'");
    }

    if json {
        print_json(&serde_json::json!({ "staffId": id, "name": name, "removed": true }))?;
    } else {
        println!("Removed weekly pattern '{name}'");
    }
    Ok(())
}

fn list(root: &Path, json: bool) -> anyhow::Result<()> {
    let store = open_store(root)?;

    if json {
        return print_json(&store.weekly_patterns());
    }
    if store.weekly_patterns().is_empty() {
        println!("No weekly patterns.");
        return Ok(());
    }
    let rows = store
        .weekly_patterns()
        .iter()
        .map(|wp| {
            vec![
                staff_name(&store, &wp.staff_id),
                wp.name.clone(),
                format_slots(&wp.pattern),
                wp.assigned_days().to_string(),
            ]
        })
        .collect();
    print_table(&["STAFF", "NAME", "SLOTS", "DAYS"], rows);
    Ok(())
}

fn apply(root: &Path, ident: &str, name: &str, start: NaiveDate, json: bool) -> anyhow::Result<()> {
    let mut store = open_store(root)?;
    let id = resolve_staff_id(&store, ident)?;
    let outcome = store
        .apply_weekly_pattern(&id, name, start)
        .with_context(|| format!("weekly pattern '{name}' not found for '{ident}'"))?;

    if json {
        print_json(&serde_json::json!({
            "inserted": outcome.inserted,
            "replaced": outcome.replaced,
            "unchanged": outcome.unchanged,
        }))?;
    } else {
        println!(
            "Applied '{name}' from {start}: {} new, {} replaced, {} unchanged",
            outcome.inserted, outcome.replaced, outcome.unchanged
        );
    }
    Ok(())
}
