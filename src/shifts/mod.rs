//! Shift logging module providing the store, persistence, and HTTP surface.
//!
//! This module is organized into the following submodules:
//!
//! - `types`: Serializable shift, request, and response types
//! - `config`: Configuration resolution with environment variable support
//! - `error`: Error taxonomy for validation, restore, and persistence failures
//! - `validate`: Shift validation rules (required fields, chronology, duplicates, overlaps)
//! - `store`: In-memory shift store with filter/sort listing and dashboard statistics
//! - `persist`: Snapshot persistence port and JSON file implementation
//! - `export`: CSV and spreadsheet export encoders
//! - `routes`: HTTP route handlers

pub mod config;
pub mod error;
pub mod export;
pub mod persist;
pub mod routes;
pub mod store;
pub mod types;
pub(crate) mod validate;

pub use store::ShiftStore;
