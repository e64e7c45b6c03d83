//! In-memory shift store.
//!
//! Owns the full collection for the process lifetime, guarded by a single
//! mutex: every mutation is read-modify-write over the whole sequence, so
//! no finer-grained locking applies. Insertion order is retained for the
//! default listing. After every mutation a full snapshot goes to the
//! [`SnapshotStore`]; a failed write is logged and the in-memory change
//! still stands.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::{Days, NaiveDateTime, Utc};
use tracing::{info, warn};

use super::error::ShiftError;
use super::persist::SnapshotStore;
use super::types::{DISPLAY_TIME_FORMAT, DashboardStats, Shift, SortBy, SortOrder};
use super::validate::validate_shift;

struct StoreState {
    shifts: Vec<Shift>,
    /// Highest id handed out so far, as epoch milliseconds.
    last_id: i64,
}

/// The single mutable collection behind all shift operations.
pub struct ShiftStore {
    state: Mutex<StoreState>,
    snapshots: Box<dyn SnapshotStore>,
}

impl ShiftStore {
    /// Construct the store from the persisted snapshot.
    pub fn new(snapshots: Box<dyn SnapshotStore>) -> Self {
        let shifts = snapshots.load_all();
        let last_id = highest_id(&shifts);
        Self {
            state: Mutex::new(StoreState { shifts, last_id }),
            snapshots,
        }
    }

    fn lock(&self) -> MutexGuard<'_, StoreState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Validate and append a new shift, then persist a snapshot.
    ///
    /// Name and role are trimmed before validation. On rejection the
    /// collection is untouched and every collected message is returned.
    pub fn add(
        &self,
        name: &str,
        role: &str,
        start_time: &str,
        end_time: &str,
    ) -> Result<Shift, ShiftError> {
        let name = name.trim();
        let role = role.trim();

        let mut state = self.lock();

        let (start, end) = validate_shift(name, role, start_time, end_time, &state.shifts)
            .map_err(ShiftError::Validation)?;

        // Time-derived id, bumped past the previous one on collision
        let id = Utc::now().timestamp_millis().max(state.last_id + 1);
        state.last_id = id;

        let shift = Shift {
            id: id.to_string(),
            name: name.to_string(),
            role: role.to_string(),
            start_time: start_time.to_string(),
            end_time: end_time.to_string(),
            display_start: start.format(DISPLAY_TIME_FORMAT).to_string(),
            display_end: end.format(DISPLAY_TIME_FORMAT).to_string(),
        };

        state.shifts.push(shift.clone());
        info!("Added shift {} for {} ({})", shift.id, shift.name, shift.role);
        self.persist(&state.shifts);

        Ok(shift)
    }

    /// Remove a shift by id and persist; a no-op when the id is absent.
    pub fn remove(&self, id: &str) {
        let mut state = self.lock();
        let before = state.shifts.len();
        state.shifts.retain(|shift| shift.id != id);

        if state.shifts.len() < before {
            info!("Deleted shift {id}");
        }
        self.persist(&state.shifts);
    }

    /// List shifts filtered by role and sorted by the requested key.
    ///
    /// `role_filter` is an exact match unless it is `"all"`. Sorting is
    /// stable, so equal keys keep insertion order in both directions.
    pub fn list(&self, role_filter: &str, sort_by: SortBy, order: SortOrder) -> Vec<Shift> {
        let state = self.lock();

        let mut shifts: Vec<Shift> = state
            .shifts
            .iter()
            .filter(|shift| role_filter == "all" || shift.role == role_filter)
            .cloned()
            .collect();

        let key_cmp = |a: &Shift, b: &Shift| match sort_by {
            SortBy::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
            SortBy::Role => a.role.cmp(&b.role),
            // The fixed time format sorts chronologically as text
            SortBy::Start => a.start_time.cmp(&b.start_time),
        };

        match order {
            SortOrder::Asc => shifts.sort_by(key_cmp),
            SortOrder::Desc => shifts.sort_by(|a, b| key_cmp(b, a)),
        }

        shifts
    }

    /// Dashboard statistics relative to `now`.
    ///
    /// Today/tomorrow are calendar-day windows from `now`'s midnight; a
    /// shift counts in at most one bucket by its start time. Shifts whose
    /// stored times no longer parse are skipped silently, both for the
    /// buckets and for the duration average.
    pub fn stats(&self, now: NaiveDateTime) -> DashboardStats {
        let state = self.lock();

        let today = now.date().and_hms_opt(0, 0, 0).unwrap_or(now);
        let tomorrow = today + Days::new(1);
        let day_after_tomorrow = today + Days::new(2);

        let mut upcoming_today = 0;
        let mut upcoming_tomorrow = 0;
        let mut total_hours = 0.0;
        let mut parseable = 0usize;

        for shift in &state.shifts {
            let Some((start, end)) = shift.interval() else {
                continue;
            };

            if start >= today && start < tomorrow {
                upcoming_today += 1;
            } else if start >= tomorrow && start < day_after_tomorrow {
                upcoming_tomorrow += 1;
            }

            total_hours += (end - start).num_seconds() as f64 / 3600.0;
            parseable += 1;
        }

        let avg_shift_hours = if parseable > 0 {
            round_one_decimal(total_hours / parseable as f64)
        } else {
            0.0
        };

        DashboardStats {
            total_shifts: state.shifts.len(),
            shifts_by_role: count_by_role(&state.shifts),
            upcoming_today,
            upcoming_tomorrow,
            avg_shift_hours,
        }
    }

    /// Sorted distinct roles across the whole collection.
    pub fn roles(&self) -> Vec<String> {
        let state = self.lock();
        let mut roles: Vec<String> = state.shifts.iter().map(|s| s.role.clone()).collect();
        roles.sort();
        roles.dedup();
        roles
    }

    /// Replace the entire collection with a restored backup and persist.
    pub fn restore(&self, shifts: Vec<Shift>) {
        let mut state = self.lock();
        state.last_id = highest_id(&shifts).max(state.last_id);
        state.shifts = shifts;
        info!("Restored {} shifts from backup", state.shifts.len());
        self.persist(&state.shifts);
    }

    /// Clone of the full collection, in insertion order.
    pub fn all(&self) -> Vec<Shift> {
        self.lock().shifts.clone()
    }

    fn persist(&self, shifts: &[Shift]) {
        if let Err(err) = self.snapshots.save_all(shifts) {
            warn!("Error saving shift snapshot: {err}");
        }
    }
}

/// Shift count per role, in role order.
pub(crate) fn count_by_role(shifts: &[Shift]) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for shift in shifts {
        *counts.entry(shift.role.clone()).or_insert(0) += 1;
    }
    counts
}

/// Average shift length in hours over parseable shifts, one decimal place.
pub(crate) fn average_shift_hours(shifts: &[Shift]) -> f64 {
    let durations: Vec<f64> = shifts.iter().filter_map(Shift::duration_hours).collect();
    if durations.is_empty() {
        return 0.0;
    }
    round_one_decimal(durations.iter().sum::<f64>() / durations.len() as f64)
}

pub(crate) fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn highest_id(shifts: &[Shift]) -> i64 {
    shifts
        .iter()
        .filter_map(|shift| shift.id.parse::<i64>().ok())
        .max()
        .unwrap_or(0)
}
