use super::open_store;
use crate::output::{print_json, print_table, print_table_indented};
use shift_core::types::{weekday_name, ShiftTime};
use std::path::Path;

fn check_month(month: u32) -> anyhow::Result<()> {
    if !(1..=12).contains(&month) {
        anyhow::bail!("month must be 1-12, got {month}");
    }
    Ok(())
}

/// Per-staff shift counts for one month.
pub fn summary(root: &Path, year: i32, month: u32, json: bool) -> anyhow::Result<()> {
    check_month(month)?;
    let store = open_store(root)?;
    let report = store.monthly_summary(year, month);

    if json {
        return print_json(&report);
    }
    println!("{year}-{month:02}");
    if report.staff.is_empty() {
        println!("  No staff.");
        return Ok(());
    }

    let mut headers = vec!["STAFF"];
    headers.extend(ShiftTime::all().iter().map(|s| s.alias()));
    headers.push("TOTAL");

    let rows = report
        .staff
        .iter()
        .map(|row| {
            let mut cells = vec![row.name.clone()];
            cells.extend(ShiftTime::all().iter().map(|s| row.count(*s).to_string()));
            cells.push(row.total.to_string());
            cells
        })
        .collect();
    print_table_indented(&headers, rows, 2);
    Ok(())
}

/// Day-by-day listing of a month's assignments.
pub fn calendar(root: &Path, year: i32, month: u32, json: bool) -> anyhow::Result<()> {
    check_month(month)?;
    let store = open_store(root)?;
    let days = store.month_calendar(year, month);

    if json {
        return print_json(&days);
    }
    let rows = days
        .iter()
        .map(|day| {
            let cells = day
                .assignments
                .iter()
                .map(|a| format!("{} {}", a.shift_time, a.name))
                .collect::<Vec<_>>()
                .join(", ");
            vec![
                day.date.to_string(),
                weekday_name(day.day_of_week).to_string(),
                if cells.is_empty() { "-".to_string() } else { cells },
            ]
        })
        .collect();
    print_table(&["DATE", "DAY", "ASSIGNMENTS"], rows);
    Ok(())
}
