//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async query methods
//! that accept `&PgPool` as the first argument.

pub mod phase_event_repo;

pub use phase_event_repo::{EventSnapshot, PhaseEventRepo};
