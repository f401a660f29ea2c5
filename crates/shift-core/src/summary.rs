use crate::pattern::ShiftPattern;
use crate::staff::Staff;
use crate::types::{day_of_week, ShiftTime};
use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use std::collections::BTreeMap;

// ---------------------------------------------------------------------------
// Monthly counts
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffSummary {
    pub staff_id: String,
    pub name: String,
    pub counts: BTreeMap<ShiftTime, u32>,
    pub total: u32,
}

impl StaffSummary {
    pub fn count(&self, shift: ShiftTime) -> u32 {
        self.counts.get(&shift).copied().unwrap_or(0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlySummary {
    pub year: i32,
    pub month: u32,
    pub staff: Vec<StaffSummary>,
}

/// Per-staff shift counts for one month, in roster order.
///
/// Every shift type appears in `counts`, zero or not. Assignments belonging
/// to staff not on the roster are ignored.
pub fn monthly_summary(roster: &[Staff], patterns: &[ShiftPattern], year: i32, month: u32) -> MonthlySummary {
    let mut rows: Vec<StaffSummary> = roster
        .iter()
        .map(|s| StaffSummary {
            staff_id: s.id.clone(),
            name: s.name.clone(),
            counts: ShiftTime::all().iter().map(|&t| (t, 0)).collect(),
            total: 0,
        })
        .collect();

    for p in patterns
        .iter()
        .filter(|p| p.date.year() == year && p.date.month() == month)
    {
        if let Some(row) = rows.iter_mut().find(|r| r.staff_id == p.staff_id) {
            *row.counts.entry(p.shift_time).or_insert(0) += 1;
            row.total += 1;
        }
    }

    MonthlySummary {
        year,
        month,
        staff: rows,
    }
}

// ---------------------------------------------------------------------------
// Calendar grid
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    pub staff_id: String,
    pub name: String,
    pub shift_time: ShiftTime,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub day_of_week: u8,
    pub assignments: Vec<Assignment>,
}

/// Every day of the month with that day's assignments, sorted by shift then roster order.
/// Returns an empty list for an invalid year/month.
pub fn month_calendar(roster: &[Staff], patterns: &[ShiftPattern], year: i32, month: u32) -> Vec<CalendarDay> {
    let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
        return Vec::new();
    };

    first
        .iter_days()
        .take_while(|d| d.month() == month)
        .map(|date| {
            let mut assignments: Vec<(usize, Assignment)> = patterns
                .iter()
                .filter(|p| p.date == date)
                .filter_map(|p| {
                    let pos = roster.iter().position(|s| s.id == p.staff_id)?;
                    Some((
                        pos,
                        Assignment {
                            staff_id: p.staff_id.clone(),
                            name: roster[pos].name.clone(),
                            shift_time: p.shift_time,
                        },
                    ))
                })
                .collect();
            assignments.sort_by_key(|(pos, a)| (a.shift_time, *pos));
            CalendarDay {
                date,
                day_of_week: day_of_week(date),
                assignments: assignments.into_iter().map(|(_, a)| a).collect(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn roster() -> Vec<Staff> {
        ["Alice", "Bob"]
            .iter()
            .enumerate()
            .map(|(i, name)| {
                let mut s = Staff::new(*name);
                s.id = format!("s{}", i + 1);
                s
            })
            .collect()
    }

    #[test]
    fn summary_counts_only_the_month() {
        let patterns = vec![
            ShiftPattern::new("s1", d(2024, 6, 1), ShiftTime::Morning),
            ShiftPattern::new("s1", d(2024, 6, 2), ShiftTime::Morning),
            ShiftPattern::new("s1", d(2024, 6, 3), ShiftTime::Night),
            ShiftPattern::new("s1", d(2024, 7, 1), ShiftTime::Night),
            ShiftPattern::new("s2", d(2024, 6, 30), ShiftTime::Day),
            ShiftPattern::new("ghost", d(2024, 6, 1), ShiftTime::Day),
        ];
        let summary = monthly_summary(&roster(), &patterns, 2024, 6);
        assert_eq!(summary.staff.len(), 2);

        let alice = &summary.staff[0];
        assert_eq!(alice.count(ShiftTime::Morning), 2);
        assert_eq!(alice.count(ShiftTime::Night), 1);
        assert_eq!(alice.total, 3);
        assert_eq!(alice.counts.len(), ShiftTime::all().len());

        assert_eq!(summary.staff[1].total, 1);
    }

    #[test]
    fn calendar_covers_every_day() {
        let cal = month_calendar(&roster(), &[], 2024, 2);
        assert_eq!(cal.len(), 29);
        assert_eq!(cal[0].date, d(2024, 2, 1));
        // 2024-02-01 was a Thursday.
        assert_eq!(cal[0].day_of_week, 4);
        assert!(month_calendar(&roster(), &[], 2024, 13).is_empty());
    }

    #[test]
    fn calendar_orders_by_shift_then_roster() {
        let patterns = vec![
            ShiftPattern::new("s1", d(2024, 6, 1), ShiftTime::Night),
            ShiftPattern::new("s2", d(2024, 6, 1), ShiftTime::Morning),
            ShiftPattern::new("ghost", d(2024, 6, 1), ShiftTime::Morning),
        ];
        let cal = month_calendar(&roster(), &patterns, 2024, 6);
        let names: Vec<_> = cal[0].assignments.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["Bob", "Alice"]);
        assert!(cal[1].assignments.is_empty());
    }
}
