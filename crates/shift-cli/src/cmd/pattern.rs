use super::{open_store, resolve_staff_id, staff_name};
use crate::output::{print_json, print_table};
use chrono::NaiveDate;
use clap::Subcommand;
use shift_core::pattern::{ShiftPattern, Upsert};
use shift_core::types::{day_of_week, weekday_name, ShiftTime};
use std::path::Path;

#[derive(Subcommand)]
pub enum PatternSubcommand {
    /// Assign a shift to a staff member on one day (replaces that day's shift)
    Add {
        /// Staff id or name
        staff: String,
        /// Date (YYYY-MM-DD)
        date: NaiveDate,
        /// Shift label or alias (morning, day, midday, evening, night, night-support)
        shift: ShiftTime,
    },
    /// Assign one shift to several staff over an inclusive date range
    Bulk {
        /// Staff id or name (repeatable)
        #[arg(long = "staff", required = true)]
        staff: Vec<String>,
        #[arg(long)]
        from: NaiveDate,
        #[arg(long)]
        to: NaiveDate,
        shift: ShiftTime,
    },
    /// Remove a staff member's shift on one day
    Remove { staff: String, date: NaiveDate },
    /// List assignments
    List {
        /// Only this day
        #[arg(long)]
        date: Option<NaiveDate>,
        /// Only this staff member
        #[arg(long)]
        staff: Option<String>,
    },
}

pub fn run(root: &Path, subcmd: PatternSubcommand, json: bool) -> anyhow::Result<()> {
    match subcmd {
        PatternSubcommand::Add { staff, date, shift } => add(root, &staff, date, shift, json),
        PatternSubcommand::Bulk {
            staff,
            from,
            to,
            shift,
        } => bulk(root, &staff, from, to, shift, json),
        PatternSubcommand::Remove { staff, date } => remove(root, &staff, date, json),
        PatternSubcommand::List { date, staff } => list(root, date, staff.as_deref(), json),
    }
}

fn add(root: &Path, ident: &str, date: NaiveDate, shift: ShiftTime, json: bool) -> anyhow::Result<()> {
    let mut store = open_store(root)?;
    let id = resolve_staff_id(&store, ident)?;
    let name = staff_name(&store, &id);
    let outcome = store.add_pattern(ShiftPattern::new(id.clone(), date, shift));

    let (status, replaced) = match &outcome {
        Upsert::Inserted => ("inserted", None),
        Upsert::Replaced(old) => ("replaced", Some(old.shift_time)),
        Upsert::Unchanged => ("unchanged", None),
    };

    if json {
        print_json(&serde_json::json!({
            "staffId": id,
            "date": date,
            "shiftTime": shift,
            "status": status,
            "replaced": replaced,
        }))?;
    } else {
        match replaced {
            Some(old) => println!("{date} {name}: {old} -> {shift}"),
            None => println!("{date} {name}: {shift} ({status})"),
        }
    }
    Ok(())
}

fn bulk(
    root: &Path,
    idents: &[String],
    from: NaiveDate,
    to: NaiveDate,
    shift: ShiftTime,
    json: bool,
) -> anyhow::Result<()> {
    let mut store = open_store(root)?;
    let ids = idents
        .iter()
        .map(|ident| resolve_staff_id(&store, ident))
        .collect::<anyhow::Result<Vec<_>>>()?;
    let outcome = store.add_pattern_range(&ids, from, to, shift)?;

    if json {
        print_json(&serde_json::json!({
            "inserted": outcome.inserted,
            "replaced": outcome.replaced,
            "unchanged": outcome.unchanged,
        }))?;
    } else {
        println!(
            "Assigned {shift} from {from} to {to}: {} new, {} replaced, {} unchanged",
            outcome.inserted, outcome.replaced, outcome.unchanged
        );
    }
    Ok(())
}

fn remove(root: &Path, ident: &str, date: NaiveDate, json: bool) -> anyhow::Result<()> {
    let mut store = open_store(root)?;
    let id = resolve_staff_id(&store, ident)?;
    let name = staff_name(&store, &id);
    let removed = store.remove_pattern(&id, date);

    if json {
        print_json(&serde_json::json!({ "removed": removed }))?;
    } else {
        match removed {
            Some(p) => println!("Removed {date} {name}: {}", p.shift_time),
            None => println!("No shift for {name} on {date}"),
        }
    }
    Ok(())
}

fn list(root: &Path, date: Option<NaiveDate>, ident: Option<&str>, json: bool) -> anyhow::Result<()> {
    let store = open_store(root)?;
    let staff_id = ident.map(|i| resolve_staff_id(&store, i)).transpose()?;

    let mut patterns: Vec<&ShiftPattern> = store
        .patterns()
        .iter()
        .filter(|p| date.map_or(true, |d| p.date == d))
        .filter(|p| staff_id.as_deref().map_or(true, |id| p.staff_id == id))
        .collect();
    patterns.sort_by(|a, b| (a.date, a.shift_time).cmp(&(b.date, b.shift_time)));

    if json {
        return print_json(&patterns);
    }
    if patterns.is_empty() {
        println!("No assignments.");
        return Ok(());
    }
    let rows = patterns
        .iter()
        .map(|p| {
            vec![
                p.date.to_string(),
                weekday_name(day_of_week(p.date)).to_string(),
                staff_name(&store, &p.staff_id),
                p.shift_time.to_string(),
                format!("{}-{}", p.shift_time.start().format("%H:%M"), p.shift_time.end().format("%H:%M")),
            ]
        })
        .collect();
    print_table(&["DATE", "DAY", "STAFF", "SHIFT", "HOURS"], rows);
    Ok(())
}
