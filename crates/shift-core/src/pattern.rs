use crate::error::{Result, ShiftError};
use crate::types::ShiftTime;
use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

/// One staff member's assignment on one calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShiftPattern {
    pub staff_id: String,
    #[serde(with = "crate::types::calendar_date")]
    pub date: NaiveDate,
    pub shift_time: ShiftTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_default: Option<bool>,
}

impl ShiftPattern {
    pub fn new(staff_id: impl Into<String>, date: NaiveDate, shift_time: ShiftTime) -> Self {
        Self {
            staff_id: staff_id.into(),
            date,
            shift_time,
            is_default: None,
        }
    }

    pub fn is_for(&self, staff_id: &str, date: NaiveDate) -> bool {
        self.staff_id == staff_id && self.date == date
    }
}

/// What an upsert did to the collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Upsert {
    Inserted,
    /// An assignment already existed for the same staff and day; it is returned.
    Replaced(ShiftPattern),
    Unchanged,
}

// ---------------------------------------------------------------------------
// Pattern collection operations
// ---------------------------------------------------------------------------

/// Insert `pattern`, replacing any existing entry for the same staff and day.
///
/// The replacement takes the slot of the old entry so collection order stays
/// stable for everything else.
pub fn upsert(patterns: &mut Vec<ShiftPattern>, pattern: ShiftPattern) -> Upsert {
    match patterns
        .iter()
        .position(|p| p.is_for(&pattern.staff_id, pattern.date))
    {
        Some(i) if patterns[i] == pattern => Upsert::Unchanged,
        Some(i) => Upsert::Replaced(std::mem::replace(&mut patterns[i], pattern)),
        None => {
            patterns.push(pattern);
            Upsert::Inserted
        }
    }
}

/// Remove the assignment for `staff_id` on `date`, returning it if present.
pub fn remove(patterns: &mut Vec<ShiftPattern>, staff_id: &str, date: NaiveDate) -> Option<ShiftPattern> {
    let pos = patterns.iter().position(|p| p.is_for(staff_id, date))?;
    Some(patterns.remove(pos))
}

pub fn find<'a>(patterns: &'a [ShiftPattern], staff_id: &str, date: NaiveDate) -> Option<&'a ShiftPattern> {
    patterns.iter().find(|p| p.is_for(staff_id, date))
}

pub fn on_date(patterns: &[ShiftPattern], date: NaiveDate) -> Vec<&ShiftPattern> {
    patterns.iter().filter(|p| p.date == date).collect()
}

/// Collapse duplicates of the same (staff, day), keeping the last written entry.
///
/// Records written before uniqueness was enforced can hold several entries for
/// one day; the last one is what the calendar showed.
pub fn dedupe_by_day(patterns: &mut Vec<ShiftPattern>) -> usize {
    let before = patterns.len();
    let mut kept: Vec<ShiftPattern> = Vec::with_capacity(before);
    for p in patterns.drain(..) {
        upsert(&mut kept, p);
    }
    *patterns = kept;
    before - patterns.len()
}

// ---------------------------------------------------------------------------
// Date ranges
// ---------------------------------------------------------------------------

/// Every date from `start` through `end`, inclusive.
pub fn date_range(start: NaiveDate, end: NaiveDate) -> Result<Vec<NaiveDate>> {
    if start > end {
        return Err(ShiftError::InvalidDateRange {
            start: start.to_string(),
            end: end.to_string(),
        });
    }
    Ok(start.iter_days().take_while(|d| *d <= end).collect())
}

pub fn add_days(date: NaiveDate, days: u64) -> Option<NaiveDate> {
    date.checked_add_days(Days::new(days))
}

/// Move `date` by a signed number of days.
pub fn shift_date(date: NaiveDate, delta: i64) -> Option<NaiveDate> {
    if delta >= 0 {
        date.checked_add_days(Days::new(delta as u64))
    } else {
        date.checked_sub_days(Days::new(delta.unsigned_abs()))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
