use crate::history::HistoryEntry;
use crate::ng_shift::NgShift;
use crate::pattern::ShiftPattern;
use crate::staff::Staff;
use crate::template::Template;
use crate::weekly::WeeklyPattern;
use serde::{Deserialize, Serialize};

/// Everything the roster owns. One instance per [`ShiftStore`](crate::store::ShiftStore).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    pub staff: Vec<Staff>,
    pub patterns: Vec<ShiftPattern>,
    pub templates: Vec<Template>,
    pub ng_shifts: Vec<NgShift>,
    pub weekly_patterns: Vec<WeeklyPattern>,
    /// Undo stack, oldest first.
    pub history: Vec<HistoryEntry>,
    /// Entries popped by undo, most recent last.
    #[serde(default)]
    pub redo: Vec<HistoryEntry>,
}

/// How many records a staff cascade removed from each collection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Cascade {
    pub patterns: usize,
    pub ng_shifts: usize,
    pub weekly_patterns: usize,
    pub template_patterns: usize,
    pub history: usize,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.staff.is_empty()
            && self.patterns.is_empty()
            && self.templates.is_empty()
            && self.ng_shifts.is_empty()
            && self.weekly_patterns.is_empty()
    }

    /// Drop every record that references `staff_id`.
    pub fn purge_staff_references(&mut self, staff_id: &str) -> Cascade {
        fn drop_where<T>(items: &mut Vec<T>, pred: impl Fn(&T) -> bool) -> usize {
            let before = items.len();
            items.retain(|i| !pred(i));
            before - items.len()
        }

        Cascade {
            patterns: drop_where(&mut self.patterns, |p| p.staff_id == staff_id),
            ng_shifts: drop_where(&mut self.ng_shifts, |ng| ng.staff_id == staff_id),
            weekly_patterns: drop_where(&mut self.weekly_patterns, |wp| wp.staff_id == staff_id),
            template_patterns: self
                .templates
                .iter_mut()
                .map(|t| t.forget_staff(staff_id))
                .sum(),
            history: drop_where(&mut self.history, |h| h.touches_staff(staff_id))
                + drop_where(&mut self.redo, |h| h.touches_staff(staff_id)),
        }
    }

    /// True when some record still points at `staff_id`.
    pub fn references_staff(&self, staff_id: &str) -> bool {
        self.patterns.iter().any(|p| p.staff_id == staff_id)
            || self.ng_shifts.iter().any(|ng| ng.staff_id == staff_id)
            || self.weekly_patterns.iter().any(|wp| wp.staff_id == staff_id)
            || self
                .templates
                .iter()
                .any(|t| t.patterns.iter().any(|p| p.staff_id == staff_id))
            || self.history.iter().any(|h| h.touches_staff(staff_id))
            || self.redo.iter().any(|h| h.touches_staff(staff_id))
    }
}
