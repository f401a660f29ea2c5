use crate::pattern::{self, ShiftPattern, Upsert};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEFAULT_HISTORY_LIMIT: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HistoryAction {
    Add,
    Remove,
    Edit,
}

impl fmt::Display for HistoryAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            HistoryAction::Add => "add",
            HistoryAction::Remove => "remove",
            HistoryAction::Edit => "edit",
        };
        f.write_str(s)
    }
}

/// One reversible change to the pattern collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub timestamp: DateTime<Utc>,
    pub action: HistoryAction,
    /// The pattern written (add/edit) or deleted (remove).
    pub data: ShiftPattern,
    /// For edits, the assignment that was overwritten.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous: Option<ShiftPattern>,
}

impl HistoryEntry {
    pub fn added(data: ShiftPattern) -> Self {
        Self::at(HistoryAction::Add, data, None)
    }

    pub fn removed(data: ShiftPattern) -> Self {
        Self::at(HistoryAction::Remove, data, None)
    }

    pub fn edited(data: ShiftPattern, previous: ShiftPattern) -> Self {
        Self::at(HistoryAction::Edit, data, Some(previous))
    }

    /// Entry describing what an upsert of `data` did, if anything.
    pub fn for_upsert(data: ShiftPattern, outcome: Upsert) -> Option<Self> {
        match outcome {
            Upsert::Inserted => Some(Self::added(data)),
            Upsert::Replaced(previous) => Some(Self::edited(data, previous)),
            Upsert::Unchanged => None,
        }
    }

    fn at(action: HistoryAction, data: ShiftPattern, previous: Option<ShiftPattern>) -> Self {
        Self {
            timestamp: Utc::now(),
            action,
            data,
            previous,
        }
    }

    pub fn touches_staff(&self, staff_id: &str) -> bool {
        self.data.staff_id == staff_id
            || self
                .previous
                .as_ref()
                .is_some_and(|p| p.staff_id == staff_id)
    }

    /// Undo this change on `patterns`.
    pub fn revert(&self, patterns: &mut Vec<ShiftPattern>) {
        match self.action {
            HistoryAction::Add => {
                pattern::remove(patterns, &self.data.staff_id, self.data.date);
            }
            HistoryAction::Remove => {
                pattern::upsert(patterns, self.data.clone());
            }
            HistoryAction::Edit => match &self.previous {
                Some(prev) => {
                    pattern::upsert(patterns, prev.clone());
                }
                None => {
                    pattern::remove(patterns, &self.data.staff_id, self.data.date);
                }
            },
        }
    }

    /// Apply this change again after it was reverted.
    pub fn reapply(&self, patterns: &mut Vec<ShiftPattern>) {
        match self.action {
            HistoryAction::Add | HistoryAction::Edit => {
                pattern::upsert(patterns, self.data.clone());
            }
            HistoryAction::Remove => {
                pattern::remove(patterns, &self.data.staff_id, self.data.date);
            }
        }
    }
}

/// Push `entry`, dropping the oldest entries beyond `limit`.
pub fn record(entries: &mut Vec<HistoryEntry>, entry: HistoryEntry, limit: usize) {
    if limit == 0 {
        return;
    }
    entries.push(entry);
    if entries.len() > limit {
        entries.drain(..entries.len() - limit);
    }
}
