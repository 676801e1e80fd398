//! Declarative chart specifications consumed by the dashboard frontend.
//!
//! These structs are the rendering contract: the server describes each chart
//! (bars, colors, inline labels, axis titles) and the browser draws it. Bar
//! and lane order follows the order of the input maps, so payloads are
//! reproducible across ticks for unchanged data.

use chrono::NaiveDateTime;
use indexmap::IndexMap;
use phasedash_core::{Interval, FALLBACK_COLOR};
use serde::Serialize;

// ---------------------------------------------------------------------------
// Bar charts
// ---------------------------------------------------------------------------

/// One bar of a horizontal bar chart.
#[derive(Debug, Clone, Serialize)]
pub struct Bar {
    /// Category label (the phase name), drawn on the y axis.
    pub label: String,
    /// Bar length, drawn on the x axis.
    pub value: f64,
    /// Fill color.
    pub color: String,
    /// Inline value label drawn inside the bar.
    pub text: String,
}

/// A horizontal bar chart.
#[derive(Debug, Clone, Serialize)]
pub struct BarChartSpec {
    pub x_axis_title: &'static str,
    pub y_axis_title: &'static str,
    /// Always `"h"`; kept explicit so the frontend stays declarative.
    pub orientation: &'static str,
    pub bars: Vec<Bar>,
}

/// Average dwell time per phase, in minutes.
pub fn avg_duration_bar(
    averages: &IndexMap<String, f64>,
    colors: &IndexMap<String, String>,
) -> BarChartSpec {
    BarChartSpec {
        x_axis_title: "Average Duration (minutes)",
        y_axis_title: "Phase",
        orientation: "h",
        bars: averages
            .iter()
            .map(|(phase, minutes)| Bar {
                label: phase.clone(),
                value: *minutes,
                color: color_for(colors, phase),
                text: format!("{minutes}"),
            })
            .collect(),
    }
}

/// Occurrence count per phase.
pub fn phase_count_bar(
    counts: &IndexMap<String, u64>,
    colors: &IndexMap<String, String>,
) -> BarChartSpec {
    BarChartSpec {
        x_axis_title: "Total",
        y_axis_title: "Phase",
        orientation: "h",
        bars: counts
            .iter()
            .map(|(phase, count)| Bar {
                label: phase.clone(),
                value: *count as f64,
                color: color_for(colors, phase),
                text: count.to_string(),
            })
            .collect(),
    }
}

// ---------------------------------------------------------------------------
// Timeline (Gantt)
// ---------------------------------------------------------------------------

/// One colored bar on the timeline, in its target's lane.
#[derive(Debug, Clone, Serialize)]
pub struct TimelineBar {
    pub phase: String,
    pub start: NaiveDateTime,
    pub finish: NaiveDateTime,
    /// Lane key: each target gets its own row.
    pub target_id: String,
    pub color: String,
}

/// The Gantt view: every phase occurrence across all targets.
#[derive(Debug, Clone, Serialize)]
pub struct TimelineSpec {
    pub title: &'static str,
    pub bars: Vec<TimelineBar>,
}

/// Build the timeline spec from flattened intervals.
pub fn timeline_chart(
    intervals: &[Interval],
    colors: &IndexMap<String, String>,
) -> TimelineSpec {
    TimelineSpec {
        title: "Phase Duration Gantt Chart",
        bars: intervals
            .iter()
            .map(|interval| TimelineBar {
                phase: interval.phase.clone(),
                start: interval.start,
                finish: interval.finish,
                target_id: interval.target_id.clone(),
                color: color_for(colors, &interval.phase),
            })
            .collect(),
    }
}

/// Look up a phase's color, falling back for phases the aggregation pass
/// never discovered (dangling-only phases have no palette slot).
fn color_for(colors: &IndexMap<String, String>, phase: &str) -> String {
    colors
        .get(phase)
        .cloned()
        .unwrap_or_else(|| FALLBACK_COLOR.to_string())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
