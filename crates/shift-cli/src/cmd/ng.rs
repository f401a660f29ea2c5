use super::{open_store, resolve_staff_id, staff_name};
use crate::output::{print_json, print_table};
use anyhow::Context;
use clap::Subcommand;
use shift_core::ng_shift::{NgShift, ViolationReason};
use shift_core::types::{weekday_name, ShiftTime};
use std::path::Path;

#[derive(Subcommand)]
pub enum NgSubcommand {
    /// Forbid a shift for a staff member on a weekday (0 = Sunday .. 6 = Saturday)
    Add {
        staff: String,
        shift: ShiftTime,
        day_of_week: u8,
    },
    /// Remove a forbidden (staff, shift, weekday) entry
    Remove {
        staff: String,
        shift: ShiftTime,
        day_of_week: u8,
    },
    /// List NG shifts
    List,
    /// Report assignments that break an NG shift or NG day
    Check,
}

pub fn run(root: &Path, subcmd: NgSubcommand, json: bool) -> anyhow::Result<()> {
    match subcmd {
        NgSubcommand::Add {
            staff,
            shift,
            day_of_week,
        } => add(root, &staff, shift, day_of_week, json),
        NgSubcommand::Remove {
            staff,
            shift,
            day_of_week,
        } => remove(root, &staff, shift, day_of_week, json),
        NgSubcommand::List => list(root, json),
        NgSubcommand::Check => check(root, json),
    }
}

fn add(root: &Path, ident: &str, shift: ShiftTime, dow: u8, json: bool) -> anyhow::Result<()> {
    let mut store = open_store(root)?;
    let id = resolve_staff_id(&store, ident)?;
    let record = NgShift::new(id, shift, dow).context("invalid NG shift")?;
    let name = staff_name(&store, &record.staff_id);
    store.add_ng_shift(record.clone());

    if json {
        print_json(&record)?;
    } else {
        println!("NG: {name} may not work {shift} on {}", weekday_name(dow));
    }
    Ok(())
}

fn remove(root: &Path, ident: &str, shift: ShiftTime, dow: u8, json: bool) -> anyhow::Result<()> {
    let mut store = open_store(root)?;
    let id = resolve_staff_id(&store, ident)?;
    let removed = store.remove_ng_shift(&id, shift, dow);

    if json {
        print_json(&serde_json::json!({ "removed": removed }))?;
    } else {
        println!("Removed {removed} NG shift(s)");
    }
    Ok(())
}

fn list(root: &Path, json: bool) -> anyhow::Result<()> {
    let store = open_store(root)?;

    if json {
        return print_json(&store.ng_shifts());
    }
    if store.ng_shifts().is_empty() {
        println!("No NG shifts.");
        return Ok(());
    }
    let rows = store
        .ng_shifts()
        .iter()
        .map(|ng| {
            vec![
                staff_name(&store, &ng.staff_id),
                ng.shift_time.to_string(),
                weekday_name(ng.day_of_week).to_string(),
            ]
        })
        .collect();
    print_table(&["STAFF", "SHIFT", "DAY"], rows);
    Ok(())
}

fn check(root: &Path, json: bool) -> anyhow::Result<()> {
    let store = open_store(root)?;
    let violations = store.ng_violations();

    if json {
        return print_json(&violations);
    }
    if violations.is_empty() {
        println!("No NG conflicts.");
        return Ok(());
    }
    let rows = violations
        .iter()
        .map(|v| {
            let reason = match &v.reason {
                ViolationReason::NgShift { day_of_week } => {
                    format!("NG shift on {}", weekday_name(*day_of_week))
                }
                ViolationReason::NgDay => "NG day".to_string(),
            };
            vec![
                v.pattern.date.to_string(),
                staff_name(&store, &v.pattern.staff_id),
                v.pattern.shift_time.to_string(),
                reason,
            ]
        })
        .collect();
    print_table(&["DATE", "STAFF", "SHIFT", "REASON"], rows);
    Ok(())
}
