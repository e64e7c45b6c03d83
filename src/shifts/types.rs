//! Serializable shift, request, and response types.
//!
//! `Shift` keeps the wire shape of the JSON backup format: times are stored
//! as strings and parsed on demand, so a record whose stored times no longer
//! parse stays listable and exportable and is only skipped where a parsed
//! time is actually needed (statistics, overlap checks, durations).

use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Input time format, matching HTML `datetime-local` values.
pub(crate) const INPUT_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// Human-readable time format used in exports and display fields.
pub(crate) const DISPLAY_TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Parse a stored shift time, returning `None` when it is malformed.
pub(crate) fn parse_shift_time(value: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, INPUT_TIME_FORMAT).ok()
}

/// A time-bounded work assignment for one staff member.
///
/// Immutable after creation; removed only by id. The id is time-derived
/// (epoch milliseconds) and monotonic within the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shift {
    pub id: String,
    pub name: String,
    pub role: String,
    /// Start time in `%Y-%m-%dT%H:%M` format
    pub start_time: String,
    /// End time in `%Y-%m-%dT%H:%M` format
    pub end_time: String,
    /// Start time formatted for display (`%Y-%m-%d %H:%M`)
    pub display_start: String,
    /// End time formatted for display (`%Y-%m-%d %H:%M`)
    pub display_end: String,
}

impl Shift {
    /// Parsed `(start, end)` interval, or `None` when either time is malformed.
    pub fn interval(&self) -> Option<(NaiveDateTime, NaiveDateTime)> {
        Some((
            parse_shift_time(&self.start_time)?,
            parse_shift_time(&self.end_time)?,
        ))
    }

    /// Shift duration in fractional hours, or `None` when the times are malformed.
    pub fn duration_hours(&self) -> Option<f64> {
        let (start, end) = self.interval()?;
        Some((end - start).num_seconds() as f64 / 3600.0)
    }
}

/// Sort key for shift listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortBy {
    /// Case-insensitive staff name (default)
    #[default]
    Name,
    /// Lexicographic role
    Role,
    /// Chronological shift start
    Start,
}

/// Sort direction for shift listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

/// Dashboard aggregation over the whole store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardStats {
    /// Total number of recorded shifts
    pub total_shifts: usize,
    /// Shift count per role
    pub shifts_by_role: BTreeMap<String, usize>,
    /// Shifts starting within today's calendar day
    pub upcoming_today: usize,
    /// Shifts starting within tomorrow's calendar day
    pub upcoming_tomorrow: usize,
    /// Average shift length in hours over parseable shifts, one decimal place
    pub avg_shift_hours: f64,
}

/// Request body for creating a shift.
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateShiftRequest {
    pub name: String,
    pub role: String,
    pub start_time: String,
    pub end_time: String,
}

/// Query parameters for listing shifts.
#[derive(Debug, Serialize, Deserialize)]
pub struct ListShiftsQuery {
    /// Exact role to filter on, or "all" for no filter
    #[serde(default = "default_role_filter")]
    pub role: String,
    #[serde(default)]
    pub sort_by: SortBy,
    #[serde(default)]
    pub order: SortOrder,
}

pub(crate) fn default_role_filter() -> String {
    "all".to_string()
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ShiftListResponse {
    /// Shifts matching the filter, in the requested order
    pub shifts: Vec<Shift>,
    /// Number of shifts returned
    pub count: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DashboardResponse {
    #[serde(flatten)]
    pub stats: DashboardStats,
    /// Sorted distinct roles, for filter dropdowns
    pub roles: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RestoreResponse {
    /// Number of shifts in the restored collection
    pub restored: usize,
    pub message: String,
}

/// Error body returned for rejected requests.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub errors: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    mod shift_times {
        use super::*;

        #[test]
        fn test_parse_valid_time() {
            let parsed = parse_shift_time("2024-01-01T08:00");
            assert!(parsed.is_some());
        }

        #[test]
        fn test_parse_rejects_display_format() {
            assert!(parse_shift_time("2024-01-01 08:00").is_none());
        }

        #[test]
        fn test_parse_rejects_garbage() {
            assert!(parse_shift_time("not-a-time").is_none());
            assert!(parse_shift_time("").is_none());
        }

        #[test]
        fn test_duration_hours() {
            let shift = Shift {
                id: "1".to_string(),
                name: "Alice".to_string(),
                role: "Nurse".to_string(),
                start_time: "2024-01-01T08:00".to_string(),
                end_time: "2024-01-01T16:30".to_string(),
                display_start: "2024-01-01 08:00".to_string(),
                display_end: "2024-01-01 16:30".to_string(),
            };
            assert_eq!(shift.duration_hours(), Some(8.5));
        }

        #[test]
        fn test_duration_none_for_malformed_times() {
            let shift = Shift {
                id: "1".to_string(),
                name: "Alice".to_string(),
                role: "Nurse".to_string(),
                start_time: "garbage".to_string(),
                end_time: "2024-01-01T16:00".to_string(),
                display_start: String::new(),
                display_end: String::new(),
            };
            assert!(shift.duration_hours().is_none());
            assert!(shift.interval().is_none());
        }
    }

    mod query_defaults {
        use super::*;

        #[test]
        fn test_list_query_defaults() {
            let query: ListShiftsQuery = serde_json::from_str("{}").unwrap();
            assert_eq!(query.role, "all");
            assert_eq!(query.sort_by, SortBy::Name);
            assert_eq!(query.order, SortOrder::Asc);
        }

        #[test]
        fn test_sort_by_deserializes_snake_case() {
            let query: ListShiftsQuery =
                serde_json::from_str(r#"{"sort_by":"start","order":"desc"}"#).unwrap();
            assert_eq!(query.sort_by, SortBy::Start);
            assert_eq!(query.order, SortOrder::Desc);
        }
    }

    mod shift_serialization {
        use super::*;

        #[test]
        fn test_backup_wire_shape() {
            let shift = Shift {
                id: "1700000000000".to_string(),
                name: "Alice".to_string(),
                role: "Nurse".to_string(),
                start_time: "2024-01-01T08:00".to_string(),
                end_time: "2024-01-01T16:00".to_string(),
                display_start: "2024-01-01 08:00".to_string(),
                display_end: "2024-01-01 16:00".to_string(),
            };

            let json = serde_json::to_value(&shift).unwrap();
            for field in [
                "id",
                "name",
                "role",
                "start_time",
                "end_time",
                "display_start",
                "display_end",
            ] {
                assert!(json.get(field).is_some(), "missing field {field}");
            }
        }
    }
}
