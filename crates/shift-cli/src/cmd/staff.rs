use super::{open_store, resolve_staff_id};
use crate::output::{print_json, print_table};
use anyhow::Context;
use chrono::NaiveDate;
use clap::Subcommand;
use shift_core::staff::StaffUpdate;
use std::path::Path;

#[derive(Subcommand)]
pub enum StaffSubcommand {
    /// Add a staff member
    Add {
        #[arg(required = true)]
        name: Vec<String>,
    },
    /// List the roster
    List,
    /// Rename a staff member
    Rename {
        /// Staff id or name
        staff: String,
        #[arg(required = true)]
        name: Vec<String>,
    },
    /// Mark a staff member active
    Activate { staff: String },
    /// Mark a staff member inactive
    Deactivate { staff: String },
    /// Add or remove whole days a staff member cannot work
    NgDays {
        staff: String,
        /// Date to add (YYYY-MM-DD, repeatable)
        #[arg(long = "add", value_name = "DATE")]
        add: Vec<NaiveDate>,
        /// Date to remove (YYYY-MM-DD, repeatable)
        #[arg(long = "remove", value_name = "DATE")]
        remove: Vec<NaiveDate>,
    },
    /// Remove a staff member and all their assignments and rules
    Remove { staff: String },
}

pub fn run(root: &Path, subcmd: StaffSubcommand, json: bool) -> anyhow::Result<()> {
    match subcmd {
        StaffSubcommand::Add { name } => add(root, &name.join(" "), json),
        StaffSubcommand::List => list(root, json),
        StaffSubcommand::Rename { staff, name } => {
            update(root, &staff, StaffUpdate::rename(name.join(" ")), "Renamed", json)
        }
        StaffSubcommand::Activate { staff } => {
            update(root, &staff, StaffUpdate::active(true), "Activated", json)
        }
        StaffSubcommand::Deactivate { staff } => {
            update(root, &staff, StaffUpdate::active(false), "Deactivated", json)
        }
        StaffSubcommand::NgDays { staff, add, remove } => ng_days(root, &staff, &add, &remove, json),
        StaffSubcommand::Remove { staff } => remove_staff(root, &staff, json),
    }
}

fn add(root: &Path, name: &str, json: bool) -> anyhow::Result<()> {
    let mut store = open_store(root)?;
    let id = store.add_staff(name).context("failed to add staff")?;

    if json {
        print_json(&serde_json::json!({ "id": id, "name": name.trim() }))?;
    } else {
        println!("Added staff [{id}]: {}", name.trim());
    }
    Ok(())
}

fn list(root: &Path, json: bool) -> anyhow::Result<()> {
    let store = open_store(root)?;

    if json {
        return print_json(&store.staff());
    }
    if store.staff().is_empty() {
        println!("No staff yet. Run: shifts staff add <name>");
        return Ok(());
    }
    let rows = store
        .staff()
        .iter()
        .map(|s| {
            vec![
                s.id.clone(),
                s.name.clone(),
                if s.is_active { "active" } else { "inactive" }.to_string(),
                s.ng_days
                    .iter()
                    .map(|d| d.to_string())
                    .collect::<Vec<_>>()
                    .join(","),
            ]
        })
        .collect();
    print_table(&["ID", "NAME", "STATUS", "NG DAYS"], rows);
    Ok(())
}

fn update(root: &Path, ident: &str, update: StaffUpdate, verb: &str, json: bool) -> anyhow::Result<()> {
    let mut store = open_store(root)?;
    let id = resolve_staff_id(&store, ident)?;
    store
        .update_staff(&id, update)
        .with_context(|| format!("failed to update staff '{ident}'"))?;
    let staff = super::resolve_staff(&store, &id)?;

    if json {
        print_json(staff)?;
    } else {
        println!("{verb} [{}]: {}", staff.id, staff.name);
    }
    Ok(())
}

fn ng_days(
    root: &Path,
    ident: &str,
    add: &[NaiveDate],
    remove: &[NaiveDate],
    json: bool,
) -> anyhow::Result<()> {
    let mut store = open_store(root)?;
    let staff = super::resolve_staff(&store, ident)?;
    let id = staff.id.clone();

    let mut days: Vec<NaiveDate> = staff
        .ng_days
        .iter()
        .copied()
        .filter(|d| !remove.contains(d))
        .collect();
    days.extend_from_slice(add);

    let update = StaffUpdate {
        ng_days: Some(days),
        ..StaffUpdate::default()
    };
    store
        .update_staff(&id, update)
        .with_context(|| format!("failed to update staff '{ident}'"))?;
    let staff = super::resolve_staff(&store, &id)?;

    if json {
        print_json(&serde_json::json!({ "id": staff.id, "ngDays": staff.ng_days }))?;
    } else if staff.ng_days.is_empty() {
        println!("{} has no NG days", staff.name);
    } else {
        let days: Vec<String> = staff.ng_days.iter().map(|d| d.to_string()).collect();
        println!("{} NG days: {}", staff.name, days.join(", "));
    }
    Ok(())
}

fn remove_staff(root: &Path, ident: &str, json: bool) -> anyhow::Result<()> {
    let mut store = open_store(root)?;
    let id = resolve_staff_id(&store, ident)?;
    let name = super::staff_name(&store, &id);
    let cascade = store
        .remove_staff(&id)
        .with_context(|| format!("staff '{ident}' not found"))?;

    if json {
        print_json(&serde_json::json!({ "id": id, "removed": cascade }))?;
    } else {
        println!(
            "Removed staff [{id}]: {name} ({} assignments, {} NG shifts, {} weekly patterns, \
             {} template assignments, {} history entries)",
            cascade.patterns,
            cascade.ng_shifts,
            cascade.weekly_patterns,
            cascade.template_patterns,
            cascade.history
        );
    }
    Ok(())
}
