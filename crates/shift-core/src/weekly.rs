use crate::pattern::{add_days, ShiftPattern};
use crate::types::{ShiftTime, DAYS_PER_WEEK};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A named per-weekday rule for one staff member.
///
/// Slot `i` is applied to `start + i` days when the pattern is instantiated,
/// so slot 0 is whatever weekday the caller starts on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyPattern {
    pub staff_id: String,
    pub name: String,
    pub pattern: [Option<ShiftTime>; DAYS_PER_WEEK],
}

impl WeeklyPattern {
    pub fn new(
        staff_id: impl Into<String>,
        name: impl Into<String>,
        pattern: [Option<ShiftTime>; DAYS_PER_WEEK],
    ) -> Self {
        Self {
            staff_id: staff_id.into(),
            name: name.into(),
            pattern,
        }
    }

    pub fn is_keyed(&self, staff_id: &str, name: &str) -> bool {
        self.staff_id == staff_id && self.name == name
    }

    /// Concrete assignments for the week beginning at `start`; empty slots are skipped.
    pub fn expand(&self, start: NaiveDate) -> Vec<ShiftPattern> {
        self.pattern
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| {
                let shift = (*slot)?;
                let date = add_days(start, i as u64)?;
                Some(ShiftPattern::new(self.staff_id.clone(), date, shift))
            })
            .collect()
    }

    pub fn assigned_days(&self) -> usize {
        self.pattern.iter().filter(|s| s.is_some()).count()
    }
}

/// Insert or replace the pattern with the same (staff, name) key.
/// Returns `true` when an existing pattern was replaced.
pub fn upsert(records: &mut Vec<WeeklyPattern>, record: WeeklyPattern) -> bool {
    match records
        .iter_mut()
        .find(|wp| wp.is_keyed(&record.staff_id, &record.name))
    {
        Some(existing) => {
            *existing = record;
            true
        }
        None => {
            records.push(record);
            false
        }
    }
}

pub fn remove(records: &mut Vec<WeeklyPattern>, staff_id: &str, name: &str) -> bool {
    let before = records.len();
    records.retain(|wp| !wp.is_keyed(staff_id, name));
    records.len() != before
}

pub fn find<'a>(records: &'a [WeeklyPattern], staff_id: &str, name: &str) -> Option<&'a WeeklyPattern> {
    records.iter().find(|wp| wp.is_keyed(staff_id, name))
}
