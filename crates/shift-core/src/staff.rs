use crate::error::{Result, ShiftError};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Staff {
    pub id: String,
    pub name: String,
    #[serde(default = "default_active")]
    pub is_active: bool,
    /// Dates this person cannot work at all.
    #[serde(default, with = "crate::types::calendar_dates")]
    pub ng_days: Vec<NaiveDate>,
}

fn default_active() -> bool {
    true
}

impl Staff {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            is_active: true,
            ng_days: Vec::new(),
        }
    }

    pub fn is_unavailable_on(&self, date: NaiveDate) -> bool {
        self.ng_days.contains(&date)
    }
}

/// Partial update merged into an existing [`Staff`]; `None` leaves a field as is.
#[derive(Debug, Clone, Default)]
pub struct StaffUpdate {
    pub name: Option<String>,
    pub is_active: Option<bool>,
    pub ng_days: Option<Vec<NaiveDate>>,
}

impl StaffUpdate {
    pub fn rename(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn active(is_active: bool) -> Self {
        Self {
            is_active: Some(is_active),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.is_active.is_none() && self.ng_days.is_none()
    }
}

// ---------------------------------------------------------------------------
// Roster operations (operate on a mutable Vec<Staff>)
// ---------------------------------------------------------------------------

/// Append a new active staff member and return the generated id.
pub fn add_staff(roster: &mut Vec<Staff>, name: &str) -> Result<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ShiftError::EmptyName);
    }
    let staff = Staff::new(name);
    let id = staff.id.clone();
    roster.push(staff);
    Ok(id)
}

/// Merge `update` into the matching record. Returns `false` if `id` is unknown.
pub fn update_staff(roster: &mut [Staff], id: &str, update: StaffUpdate) -> Result<bool> {
    let Some(staff) = roster.iter_mut().find(|s| s.id == id) else {
        return Ok(false);
    };
    if let Some(name) = update.name {
        let name = name.trim();
        if name.is_empty() {
            return Err(ShiftError::EmptyName);
        }
        staff.name = name.to_string();
    }
    if let Some(active) = update.is_active {
        staff.is_active = active;
    }
    if let Some(mut days) = update.ng_days {
        days.sort();
        days.dedup();
        staff.ng_days = days;
    }
    Ok(true)
}

/// Remove a staff record by id. Returns `true` if it was present.
pub fn remove_staff(roster: &mut Vec<Staff>, id: &str) -> bool {
    let before = roster.len();
    roster.retain(|s| s.id != id);
    roster.len() != before
}

pub fn find<'a>(roster: &'a [Staff], id: &str) -> Option<&'a Staff> {
    roster.iter().find(|s| s.id == id)
}

pub fn contains(roster: &[Staff], id: &str) -> bool {
    roster.iter().any(|s| s.id == id)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
