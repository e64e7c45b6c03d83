//! Healthcare staff shift logging service.
//!
//! The [`shifts`] module holds the whole application: the in-memory
//! [`shifts::ShiftStore`], its JSON snapshot persistence, CSV/spreadsheet
//! export encoders, and the HTTP route handlers served by `poem`.

pub mod shifts;
