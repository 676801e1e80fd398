//! Pure aggregation pipeline for the phase dashboard.
//!
//! Turns an unordered bag of `(target_id, timestamp, phase)` events into the
//! per-phase statistics and timeline intervals the chart layer renders. Every
//! function here is total and side-effect free: each refresh tick rebuilds
//! everything from a fresh event snapshot, so nothing in this crate holds
//! state between calls.

pub mod colors;
pub mod error;
pub mod intervals;
pub mod stats;
pub mod timeline;

pub use colors::{assign_colors, FALLBACK_COLOR, PHASE_PALETTE};
pub use error::CoreError;
pub use intervals::{flatten, Interval};
pub use stats::{aggregate, average_minutes, PhaseStats};
pub use timeline::{filter_and_group, DateSelector, GroupedTimeline, PhaseEntry, PhaseEvent};
