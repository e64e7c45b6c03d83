//! Error taxonomy for the shift logger.
//!
//! Three categories, matching how each failure surfaces:
//!
//! 1. **Validation**: a rejected add. Carries the full list of
//!    human-readable messages; nothing is written to the store.
//! 2. **Format**: a malformed restore upload. Rejected with a descriptive
//!    message; the store is left unchanged.
//! 3. **Persistence**: a failed snapshot read or write. Logged by the
//!    caller and never propagated as a request failure, since the
//!    in-memory change has already taken effect.
//!
//! None of these are fatal to the process.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ShiftError {
    /// Shift rejected by validation; carries every message collected.
    #[error("shift validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),

    /// Restore upload rejected before touching the store.
    #[error("{0}")]
    Format(String),

    /// Snapshot file read/write failure (best-effort, logged only).
    #[error("snapshot persistence failed: {0}")]
    Persist(#[from] std::io::Error),

    /// Snapshot serialization failure.
    #[error("snapshot encoding failed: {0}")]
    Encode(#[from] serde_json::Error),
}
