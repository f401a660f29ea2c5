use crate::pattern::{shift_date, ShiftPattern};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A named snapshot of assignments that can be stamped onto another period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Template {
    pub id: String,
    pub name: String,
    pub patterns: Vec<ShiftPattern>,
}

impl Template {
    pub fn new(name: impl Into<String>, patterns: Vec<ShiftPattern>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            patterns,
        }
    }

    /// Earliest date in the snapshot; the point that lands on the anchor.
    pub fn first_date(&self) -> Option<NaiveDate> {
        self.patterns.iter().map(|p| p.date).min()
    }

    /// The stored patterns moved so that [`first_date`](Self::first_date)
    /// falls on `anchor`. Relative offsets between entries are preserved.
    pub fn anchored_at(&self, anchor: NaiveDate) -> Vec<ShiftPattern> {
        let Some(first) = self.first_date() else {
            return Vec::new();
        };
        let delta = (anchor - first).num_days();
        self.patterns
            .iter()
            .filter_map(|p| {
                let date = shift_date(p.date, delta)?;
                Some(ShiftPattern { date, ..p.clone() })
            })
            .collect()
    }

    /// Drop every entry belonging to `staff_id`. Returns how many were dropped.
    pub fn forget_staff(&mut self, staff_id: &str) -> usize {
        let before = self.patterns.len();
        self.patterns.retain(|p| p.staff_id != staff_id);
        before - self.patterns.len()
    }
}

pub fn remove_template(templates: &mut Vec<Template>, id: &str) -> bool {
    let before = templates.len();
    templates.retain(|t| t.id != id);
    templates.len() != before
}

pub fn find<'a>(templates: &'a [Template], id: &str) -> Option<&'a Template> {
    templates.iter().find(|t| t.id == id)
}
