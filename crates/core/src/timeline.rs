//! Raw phase events and the date filter that groups them into timelines.
//!
//! [`filter_and_group`] is the entry point of the pipeline: it partitions raw
//! events by target and calendar date, applies the dropdown's date selection,
//! and guarantees each bucket is sorted ascending by timestamp. That sort is
//! a hard postcondition -- dwell times are computed as the gap between
//! *consecutive* bucket entries, so an unsorted bucket silently produces
//! wrong durations.

use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Event types
// ---------------------------------------------------------------------------

/// One raw phase-change event as delivered by the row source.
///
/// Duplicates are valid data; every event counts independently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhaseEvent {
    /// Opaque identifier of the tracked target (job, order, unit, ...).
    pub target_id: String,
    /// Moment the target entered the phase, second precision.
    pub timestamp: NaiveDateTime,
    /// Phase label, free-form.
    pub phase: String,
}

impl PhaseEvent {
    pub fn new(
        target_id: impl Into<String>,
        timestamp: NaiveDateTime,
        phase: impl Into<String>,
    ) -> Self {
        Self {
            target_id: target_id.into(),
            timestamp,
            phase: phase.into(),
        }
    }
}

/// One entry in a target+date bucket: the phase entered and when.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PhaseEntry {
    pub phase: String,
    pub timestamp: NaiveDateTime,
}

/// Events grouped by target, then by calendar date, each bucket sorted
/// ascending by timestamp.
///
/// `BTreeMap` at both levels keeps the walk order deterministic (target asc,
/// date asc), which downstream consumers rely on for reproducible output.
/// Built fresh on every refresh tick, never mutated after construction.
pub type GroupedTimeline = BTreeMap<String, BTreeMap<NaiveDate, Vec<PhaseEntry>>>;

// ---------------------------------------------------------------------------
// Date selector
// ---------------------------------------------------------------------------

/// The dropdown's date selection: all data, or a single calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateSelector {
    All,
    Day(NaiveDate),
}

impl DateSelector {
    /// Parse the wire form of the selector: `"all"` or `"YYYY-MM-DD"`.
    pub fn parse(raw: &str) -> Result<Self, CoreError> {
        if raw == "all" {
            return Ok(Self::All);
        }
        raw.parse::<NaiveDate>()
            .map(Self::Day)
            .map_err(|_| CoreError::Validation(format!("Invalid date selector: {raw}")))
    }

    /// Whether an event on `date` passes this filter.
    pub fn matches(self, date: NaiveDate) -> bool {
        match self {
            Self::All => true,
            Self::Day(selected) => date == selected,
        }
    }
}

// ---------------------------------------------------------------------------
// Date filter
// ---------------------------------------------------------------------------

/// Partition `events` into a [`GroupedTimeline`], keeping only events whose
/// calendar date passes `selector`.
///
/// Pure function of its inputs. Buckets are sorted ascending by timestamp
/// after grouping regardless of input order; the row source's `ORDER BY` is
/// not trusted. Empty input yields an empty structure.
pub fn filter_and_group(events: &[PhaseEvent], selector: DateSelector) -> GroupedTimeline {
    let mut grouped: GroupedTimeline = BTreeMap::new();

    for event in events {
        let date = event.timestamp.date();
        if !selector.matches(date) {
            continue;
        }
        grouped
            .entry(event.target_id.clone())
            .or_default()
            .entry(date)
            .or_default()
            .push(PhaseEntry {
                phase: event.phase.clone(),
                timestamp: event.timestamp,
            });
    }

    // Sort postcondition: stable, so simultaneous events keep arrival order.
    for dates in grouped.values_mut() {
        for entries in dates.values_mut() {
            entries.sort_by_key(|e| e.timestamp);
        }
    }

    grouped
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
