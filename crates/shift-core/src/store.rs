use crate::config::Config;
use crate::error::Result;
use crate::history::{self, HistoryEntry};
use crate::ng_shift::{self, NgShift, Violation};
use crate::paths;
use crate::pattern::{self, ShiftPattern, Upsert};
use crate::staff::{self, Staff, StaffUpdate};
use crate::state::{AppState, Cascade};
use crate::storage::{FileStorage, Persistence, StorageBackend};
use crate::summary::{self, CalendarDay, MonthlySummary};
use crate::template::{self, Template};
use crate::types::ShiftTime;
use crate::weekly::{self, WeeklyPattern};
use chrono::NaiveDate;
use std::path::Path;

/// The roster's single source of truth.
///
/// Mutations run to completion and then snapshot the whole state through the
/// [`Persistence`] adapter. A failed snapshot is logged and otherwise ignored.
#[derive(Debug)]
pub struct ShiftStore<B: StorageBackend> {
    state: AppState,
    persistence: Persistence<B>,
    history_limit: usize,
}

/// Tally returned by bulk operations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BulkOutcome {
    pub inserted: usize,
    pub replaced: usize,
    pub unchanged: usize,
    /// Entries skipped because their staff member is not on the roster.
    pub skipped: usize,
}

impl BulkOutcome {
    pub fn written(&self) -> usize {
        self.inserted + self.replaced
    }
}

impl ShiftStore<FileStorage> {
    /// Open the roster kept under `root/.shifts/` using that root's config.
    pub fn open_at(root: &Path) -> Result<Self> {
        let cfg = Config::load(root)?;
        paths::validate_storage_key(&cfg.storage.key)?;
        let storage = FileStorage::new(paths::shifts_dir(root));
        Ok(Self::open(Persistence::new(storage, cfg.storage.key.clone()), &cfg))
    }
}

impl<B: StorageBackend> ShiftStore<B> {
    /// Load whatever `persistence` holds, or start empty.
    pub fn open(persistence: Persistence<B>, cfg: &Config) -> Self {
        let state = persistence.load().unwrap_or_default();
        Self {
            state,
            persistence,
            history_limit: cfg.history.limit,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn persistence(&self) -> &Persistence<B> {
        &self.persistence
    }

    pub fn into_persistence(self) -> Persistence<B> {
        self.persistence
    }

    fn persist(&mut self) -> bool {
        self.persistence.save(&self.state)
    }

    // -----------------------------------------------------------------------
    // Staff
    // -----------------------------------------------------------------------

    pub fn staff(&self) -> &[Staff] {
        &self.state.staff
    }

    pub fn find_staff(&self, id: &str) -> Option<&Staff> {
        staff::find(&self.state.staff, id)
    }

    pub fn add_staff(&mut self, name: &str) -> Result<String> {
        let id = staff::add_staff(&mut self.state.staff, name)?;
        tracing::debug!(staff_id = %id, "staff added");
        self.persist();
        Ok(id)
    }

    pub fn update_staff(&mut self, id: &str, update: StaffUpdate) -> Result<bool> {
        let changed = staff::update_staff(&mut self.state.staff, id, update)?;
        if changed {
            self.persist();
        }
        Ok(changed)
    }

    /// Remove a staff member and everything that refers to them.
    /// Returns `None` if `id` is unknown.
    pub fn remove_staff(&mut self, id: &str) -> Option<Cascade> {
        if !staff::remove_staff(&mut self.state.staff, id) {
            return None;
        }
        let cascade = self.state.purge_staff_references(id);
        tracing::debug!(staff_id = %id, ?cascade, "staff removed");
        self.persist();
        Some(cascade)
    }

    // -----------------------------------------------------------------------
    // Patterns
    // -----------------------------------------------------------------------

    pub fn patterns(&self) -> &[ShiftPattern] {
        &self.state.patterns
    }

    pub fn pattern_for(&self, staff_id: &str, date: NaiveDate) -> Option<&ShiftPattern> {
        pattern::find(&self.state.patterns, staff_id, date)
    }

    pub fn patterns_on(&self, date: NaiveDate) -> Vec<&ShiftPattern> {
        pattern::on_date(&self.state.patterns, date)
    }

    /// Assign a shift, replacing any assignment the staff member already has that day.
    ///
    /// Assignments for staff not on the roster are ignored ([`Upsert::Unchanged`]).
    pub fn add_pattern(&mut self, p: ShiftPattern) -> Upsert {
        let outcome = self.upsert_recorded(p);
        if outcome != Upsert::Unchanged {
            self.persist();
        }
        outcome
    }

    /// Assign `shift` to every listed staff member on every day from `start`
    /// through `end` inclusive.
    pub fn add_pattern_range(
        &mut self,
        staff_ids: &[String],
        start: NaiveDate,
        end: NaiveDate,
        shift: ShiftTime,
    ) -> Result<BulkOutcome> {
        let days = pattern::date_range(start, end)?;
        let batch: Vec<ShiftPattern> = staff_ids
            .iter()
            .flat_map(|id| days.iter().map(move |&d| ShiftPattern::new(id.clone(), d, shift)))
            .collect();
        Ok(self.upsert_batch(batch))
    }

    pub fn remove_pattern(&mut self, staff_id: &str, date: NaiveDate) -> Option<ShiftPattern> {
        let removed = pattern::remove(&mut self.state.patterns, staff_id, date)?;
        self.push_history(HistoryEntry::removed(removed.clone()));
        self.persist();
        Some(removed)
    }

    // -----------------------------------------------------------------------
    // Templates
    // -----------------------------------------------------------------------

    pub fn templates(&self) -> &[Template] {
        &self.state.templates
    }

    pub fn add_template(&mut self, t: Template) {
        self.state.templates.push(t);
        self.persist();
    }

    /// Snapshot the current assignments as a new template and return its id.
    pub fn save_template(&mut self, name: &str) -> String {
        let t = Template::new(name, self.state.patterns.clone());
        let id = t.id.clone();
        self.add_template(t);
        id
    }

    pub fn remove_template(&mut self, id: &str) -> bool {
        let removed = template::remove_template(&mut self.state.templates, id);
        if removed {
            self.persist();
        }
        removed
    }

    /// Stamp a template onto the calendar so its earliest day lands on `anchor`.
    /// Returns `None` if the template does not exist.
    pub fn apply_template(&mut self, template_id: &str, anchor: NaiveDate) -> Option<BulkOutcome> {
        let batch = template::find(&self.state.templates, template_id)?.anchored_at(anchor);
        Some(self.upsert_batch(batch))
    }

    // -----------------------------------------------------------------------
    // NG shifts
    // -----------------------------------------------------------------------

    pub fn ng_shifts(&self) -> &[NgShift] {
        &self.state.ng_shifts
    }

    pub fn add_ng_shift(&mut self, record: NgShift) {
        self.state.ng_shifts.push(record);
        self.persist();
    }

    pub fn remove_ng_shift(&mut self, staff_id: &str, shift: ShiftTime, day_of_week: u8) -> usize {
        let removed = ng_shift::remove_ng_shift(&mut self.state.ng_shifts, staff_id, shift, day_of_week);
        if removed > 0 {
            self.persist();
        }
        removed
    }

    pub fn ng_violations(&self) -> Vec<Violation> {
        ng_shift::violations(&self.state.patterns, &self.state.ng_shifts, &self.state.staff)
    }

    // -----------------------------------------------------------------------
    // Weekly patterns
    // -----------------------------------------------------------------------

    pub fn weekly_patterns(&self) -> &[WeeklyPattern] {
        &self.state.weekly_patterns
    }

    /// Store a weekly pattern, replacing one with the same staff and name.
    /// Returns `true` if an existing pattern was replaced.
    pub fn add_weekly_pattern(&mut self, record: WeeklyPattern) -> bool {
        let replaced = weekly::upsert(&mut self.state.weekly_patterns, record);
        self.persist();
        replaced
    }

    pub fn remove_weekly_pattern(&mut self, staff_id: &str, name: &str) -> bool {
        let removed = weekly::remove(&mut self.state.weekly_patterns, staff_id, name);
        if removed {
            self.persist();
        }
        removed
    }

    /// Instantiate a weekly pattern for the seven days starting at `start`.
    /// Returns `None` if no pattern has that key.
    pub fn apply_weekly_pattern(&mut self, staff_id: &str, name: &str, start: NaiveDate) -> Option<BulkOutcome> {
        let batch = weekly::find(&self.state.weekly_patterns, staff_id, name)?.expand(start);
        Some(self.upsert_batch(batch))
    }

    // -----------------------------------------------------------------------
    // Undo / redo
    // -----------------------------------------------------------------------

    pub fn can_undo(&self) -> bool {
        !self.state.history.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.state.redo.is_empty()
    }

    /// Revert the most recent assignment change. No-op on an empty history.
    pub fn undo(&mut self) -> Option<HistoryEntry> {
        let entry = self.state.history.pop()?;
        entry.revert(&mut self.state.patterns);
        self.state.redo.push(entry.clone());
        self.persist();
        Some(entry)
    }

    /// Re-apply the most recently undone change.
    pub fn redo(&mut self) -> Option<HistoryEntry> {
        let entry = self.state.redo.pop()?;
        entry.reapply(&mut self.state.patterns);
        history::record(&mut self.state.history, entry.clone(), self.history_limit);
        self.persist();
        Some(entry)
    }

    // -----------------------------------------------------------------------
    // Views
    // -----------------------------------------------------------------------

    pub fn monthly_summary(&self, year: i32, month: u32) -> MonthlySummary {
        summary::monthly_summary(&self.state.staff, &self.state.patterns, year, month)
    }

    pub fn month_calendar(&self, year: i32, month: u32) -> Vec<CalendarDay> {
        summary::month_calendar(&self.state.staff, &self.state.patterns, year, month)
    }

    // -----------------------------------------------------------------------
    // Reset
    // -----------------------------------------------------------------------

    /// Forget everything: clear the stored record and start from empty defaults.
    pub fn reset(&mut self) {
        self.persistence.clear();
        self.state = AppState::new();
        tracing::info!(key = %self.persistence.key(), "state reset");
    }

    // -----------------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------------

    fn upsert_recorded(&mut self, p: ShiftPattern) -> Upsert {
        if !staff::contains(&self.state.staff, &p.staff_id) {
            tracing::debug!(staff_id = %p.staff_id, "ignoring assignment for unknown staff");
            return Upsert::Unchanged;
        }
        let outcome = pattern::upsert(&mut self.state.patterns, p.clone());
        if let Some(entry) = HistoryEntry::for_upsert(p, outcome.clone()) {
            self.push_history(entry);
        }
        outcome
    }

    fn upsert_batch(&mut self, batch: Vec<ShiftPattern>) -> BulkOutcome {
        let mut out = BulkOutcome::default();
        for p in batch {
            if !staff::contains(&self.state.staff, &p.staff_id) {
                out.skipped += 1;
                continue;
            }
            match self.upsert_recorded(p) {
                Upsert::Inserted => out.inserted += 1,
                Upsert::Replaced(_) => out.replaced += 1,
                Upsert::Unchanged => out.unchanged += 1,
            }
        }
        if out.written() > 0 {
            self.persist();
        }
        out
    }

    fn push_history(&mut self, entry: HistoryEntry) {
        self.state.redo.clear();
        history::record(&mut self.state.history, entry, self.history_limit);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
