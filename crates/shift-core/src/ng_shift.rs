use crate::error::Result;
use crate::pattern::ShiftPattern;
use crate::staff::Staff;
use crate::types::{day_of_week, validate_day_of_week, ShiftTime};
use serde::{Deserialize, Serialize};

/// "This staff member must not work this shift on this weekday."
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NgShift {
    pub staff_id: String,
    pub shift_time: ShiftTime,
    /// 0 = Sunday through 6 = Saturday.
    pub day_of_week: u8,
}

impl NgShift {
    pub fn new(staff_id: impl Into<String>, shift_time: ShiftTime, day_of_week: u8) -> Result<Self> {
        Ok(Self {
            staff_id: staff_id.into(),
            shift_time,
            day_of_week: validate_day_of_week(day_of_week)?,
        })
    }

    pub fn matches(&self, staff_id: &str, shift_time: ShiftTime, day_of_week: u8) -> bool {
        self.staff_id == staff_id && self.shift_time == shift_time && self.day_of_week == day_of_week
    }

    pub fn forbids(&self, pattern: &ShiftPattern) -> bool {
        self.matches(&pattern.staff_id, pattern.shift_time, day_of_week(pattern.date))
    }
}

/// Remove every record equal to the given triple, duplicates included.
pub fn remove_ng_shift(
    records: &mut Vec<NgShift>,
    staff_id: &str,
    shift_time: ShiftTime,
    day_of_week: u8,
) -> usize {
    let before = records.len();
    records.retain(|ng| !ng.matches(staff_id, shift_time, day_of_week));
    before - records.len()
}

// ---------------------------------------------------------------------------
// Violations
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ViolationReason {
    /// The assignment hits a forbidden (shift, weekday) pair.
    NgShift { day_of_week: u8 },
    /// The staff member marked the whole day unavailable.
    NgDay,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Violation {
    pub pattern: ShiftPattern,
    pub reason: ViolationReason,
}

/// Assignments that conflict with NG shifts or a staff member's NG days.
pub fn violations(patterns: &[ShiftPattern], ng_shifts: &[NgShift], roster: &[Staff]) -> Vec<Violation> {
    let mut out = Vec::new();
    for p in patterns {
        if let Some(ng) = ng_shifts.iter().find(|ng| ng.forbids(p)) {
            out.push(Violation {
                pattern: p.clone(),
                reason: ViolationReason::NgShift {
                    day_of_week: ng.day_of_week,
                },
            });
        }
        let unavailable = roster
            .iter()
            .any(|s| s.id == p.staff_id && s.is_unavailable_on(p.date));
        if unavailable {
            out.push(Violation {
                pattern: p.clone(),
                reason: ViolationReason::NgDay,
            });
        }
    }
    out
}
