//! Per-phase dwell-time totals, occurrence counts, and averages.
//!
//! Duration is attributed by walking consecutive entries within each
//! target+date bucket: the gap between entry `i` and entry `i+1` belongs to
//! entry `i`'s phase, and counts as one occurrence of it. The last entry of a
//! bucket has no successor and contributes neither duration nor count.

use indexmap::IndexMap;

use crate::timeline::GroupedTimeline;

/// Seconds per minute, for average conversion.
const SECS_PER_MINUTE: f64 = 60.0;

// ---------------------------------------------------------------------------
// Phase statistics
// ---------------------------------------------------------------------------

/// Dwell-time totals and occurrence counts, pooled across all targets and
/// dates.
///
/// Both maps are keyed in first-seen order of the aggregation walk. That
/// order is part of the contract: it decides which palette entry each phase
/// gets and the key order of serialized chart payloads. A phase appears only
/// once it has been attributed at least one occurrence; a missing key reads
/// as zero.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PhaseStats {
    /// Total seconds attributed to each phase.
    pub total_seconds: IndexMap<String, f64>,
    /// Number of occurrences attributed to each phase.
    pub counts: IndexMap<String, u64>,
}

impl PhaseStats {
    /// Distinct phases in discovery order.
    pub fn phases(&self) -> impl Iterator<Item = &str> {
        self.total_seconds.keys().map(String::as_str)
    }
}

// ---------------------------------------------------------------------------
// Aggregation
// ---------------------------------------------------------------------------

/// Walk every target+date bucket and attribute durations and occurrences to
/// phases.
///
/// Buckets with fewer than two entries contribute nothing. Zero durations
/// (simultaneous timestamps) are recorded as-is and still counted. Negative
/// durations (out-of-order timestamps, a violated precondition) are recorded
/// unchanged rather than clamped, so upstream data problems stay visible.
pub fn aggregate(timeline: &GroupedTimeline) -> PhaseStats {
    let mut stats = PhaseStats::default();

    for dates in timeline.values() {
        for entries in dates.values() {
            for pair in entries.windows(2) {
                let duration = (pair[1].timestamp - pair[0].timestamp).num_seconds() as f64;
                *stats
                    .total_seconds
                    .entry(pair[0].phase.clone())
                    .or_insert(0.0) += duration;
                *stats.counts.entry(pair[0].phase.clone()).or_insert(0) += 1;
            }
        }
    }

    stats
}

// ---------------------------------------------------------------------------
// Averaging
// ---------------------------------------------------------------------------

/// Mean dwell time per phase in minutes, rounded to 2 decimal places.
///
/// Only phases with a positive occurrence count appear in the result, so the
/// division is always well-defined.
pub fn average_minutes(stats: &PhaseStats) -> IndexMap<String, f64> {
    stats
        .counts
        .iter()
        .filter(|(_, count)| **count > 0)
        .map(|(phase, count)| {
            let total = stats.total_seconds.get(phase).copied().unwrap_or(0.0);
            let minutes = total / *count as f64 / SECS_PER_MINUTE;
            (phase.clone(), round2(minutes))
        })
        .collect()
}

/// Round to 2 decimal places, half away from zero.
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
