//! Shift validation rules.
//!
//! A new shift is checked in order for: required fields, parseable times,
//! chronology (`end > start`), an exact duplicate, and a time overlap with
//! any existing shift for the same person. Names compare case-insensitively
//! throughout. Existing shifts whose stored times no longer parse are
//! skipped during the duplicate/overlap scan; validation is total and never
//! fails on malformed stored data.

use chrono::NaiveDateTime;

use super::types::{Shift, parse_shift_time};

/// Validate a candidate shift against the current collection.
///
/// Returns the parsed `(start, end)` pair on success, or every
/// human-readable message collected on failure. The duplicate and overlap
/// scans stop at the first offending existing shift.
pub(crate) fn validate_shift(
    name: &str,
    role: &str,
    start_time: &str,
    end_time: &str,
    existing: &[Shift],
) -> Result<(NaiveDateTime, NaiveDateTime), Vec<String>> {
    let mut errors = Vec::new();

    if name.is_empty() {
        errors.push("Staff name is required".to_string());
    }

    if role.is_empty() {
        errors.push("Staff role is required".to_string());
    }

    if start_time.is_empty() {
        errors.push("Shift start time is required".to_string());
    }

    if end_time.is_empty() {
        errors.push("Shift end time is required".to_string());
    }

    let mut interval = None;
    if !start_time.is_empty() && !end_time.is_empty() {
        match (parse_shift_time(start_time), parse_shift_time(end_time)) {
            (Some(start), Some(end)) => {
                if end <= start {
                    errors.push("Shift end time must be after start time".to_string());
                } else {
                    interval = Some((start, end));
                }
            }
            _ => errors.push("Invalid time format".to_string()),
        }
    }

    if let Some((start, end)) = interval {
        let name_lower = name.to_lowercase();

        for shift in existing {
            let Some((shift_start, shift_end)) = shift.interval() else {
                continue;
            };

            if shift.name.to_lowercase() != name_lower {
                continue;
            }

            // Exact duplicate: same name, role, start and end time
            if role == shift.role && start == shift_start && end == shift_end {
                errors.push("This exact shift already exists".to_string());
                break;
            }

            // Overlap with an existing shift for the same person
            if start < shift_end && end > shift_start {
                errors.push(format!(
                    "This shift overlaps with an existing shift for {name}"
                ));
                break;
            }
        }
    }

    match interval {
        Some(interval) if errors.is_empty() => Ok(interval),
        _ => Err(errors),
    }
}
