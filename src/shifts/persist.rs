//! Snapshot persistence port and JSON file implementation.
//!
//! The store mirrors its whole collection to a single JSON file after every
//! mutation. Persistence is best-effort: a failed write is logged by the
//! caller and the in-memory change still stands. Loading is forgiving — a
//! missing or corrupt file yields an empty collection.

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use tracing::warn;

use super::error::ShiftError;
use super::types::Shift;

/// Fields every element of a restore upload must carry.
const REQUIRED_BACKUP_FIELDS: &[&str] = &[
    "id",
    "name",
    "role",
    "start_time",
    "end_time",
    "display_start",
    "display_end",
];

/// Trait for snapshot persistence operations.
///
/// Implementations must be thread-safe (`Send + Sync`); the store invokes
/// them while holding its mutation lock. The default implementation writes
/// a single JSON file.
pub trait SnapshotStore: Send + Sync {
    /// Load the persisted collection; empty on missing or corrupt data.
    fn load_all(&self) -> Vec<Shift>;

    /// Overwrite the persisted collection with a full snapshot.
    fn save_all(&self, shifts: &[Shift]) -> Result<(), ShiftError>;
}

/// JSON-file implementation of [`SnapshotStore`].
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SnapshotStore for JsonFileStore {
    fn load_all(&self) -> Vec<Shift> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => return Vec::new(),
            Err(err) => {
                warn!("Error reading {}: {err}", self.path.display());
                return Vec::new();
            }
        };

        match serde_json::from_slice(&bytes) {
            Ok(shifts) => shifts,
            Err(err) => {
                warn!("Corrupt snapshot {}: {err}", self.path.display());
                Vec::new()
            }
        }
    }

    fn save_all(&self, shifts: &[Shift]) -> Result<(), ShiftError> {
        let bytes = serde_json::to_vec(shifts)?;
        fs::write(&self.path, bytes)?;
        Ok(())
    }
}

/// Parse and validate a restore upload.
///
/// The body must be a JSON array whose every element carries the full
/// backup field set. Any failure rejects the whole upload; the caller's
/// store is never touched.
pub fn parse_backup(bytes: &[u8]) -> Result<Vec<Shift>, ShiftError> {
    let value: serde_json::Value = serde_json::from_slice(bytes)
        .map_err(|_| ShiftError::Format("Invalid JSON file".to_string()))?;

    let Some(entries) = value.as_array() else {
        return Err(ShiftError::Format(
            "Invalid backup file format".to_string(),
        ));
    };

    for entry in entries {
        let valid = entry.as_object().is_some_and(|object| {
            REQUIRED_BACKUP_FIELDS
                .iter()
                .all(|field| object.contains_key(*field))
        });
        if !valid {
            return Err(ShiftError::Format(
                "Invalid backup file structure".to_string(),
            ));
        }
    }

    serde_json::from_value(value)
        .map_err(|_| ShiftError::Format("Invalid backup file structure".to_string()))
}
