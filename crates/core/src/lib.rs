//! Domain logic for the Find My Document backend.
//!
//! This crate is I/O-free: it holds the shared ID/timestamp types, the
//! domain error taxonomy, the document status state machine, the point
//! award schedule, and the translation grouping used by the API layer.

pub mod error;
pub mod lifecycle;
pub mod points;
pub mod translations;
pub mod types;
