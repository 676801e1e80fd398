//! The dashboard endpoint: one request is one refresh tick.
//!
//! Every request re-fetches the full event snapshot and recomputes the three
//! chart specs from scratch; no state survives between ticks. A database
//! failure degrades to empty charts (the snapshot fetch fails closed), so
//! the dashboard keeps rendering and the next tick acts as the retry.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use phasedash_core::{
    aggregate, assign_colors, average_minutes, filter_and_group, flatten, DateSelector,
    PhaseEvent, PHASE_PALETTE,
};
use phasedash_db::repositories::PhaseEventRepo;

use crate::charts::{self, BarChartSpec, TimelineSpec};
use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// Number of views the dashboard cycles through (bar charts, Gantt).
pub const VIEW_COUNT: u32 = 2;

/// Wire value of the "no date filter" dropdown option.
const ALL_OPTION: &str = "all";

// ---------------------------------------------------------------------------
// Request / payload types
// ---------------------------------------------------------------------------

/// Query parameters for the dashboard endpoint.
#[derive(Debug, Deserialize)]
pub struct DashboardQuery {
    /// `"all"` or a `YYYY-MM-DD` date. Defaults to `"all"`.
    pub date: Option<String>,
}

/// Everything one refresh tick delivers to the frontend.
#[derive(Debug, Serialize)]
pub struct DashboardPayload {
    /// Dropdown options: `"all"` first, then every distinct date in the data.
    pub date_options: Vec<String>,
    /// Client-side auto-refresh cadence.
    pub refresh_interval_ms: u64,
    /// How many views the client cycles through.
    pub view_count: u32,
    pub avg_duration_bar: BarChartSpec,
    pub phase_count_bar: BarChartSpec,
    pub timeline: TimelineSpec,
}

// ---------------------------------------------------------------------------
// Handler
// ---------------------------------------------------------------------------

/// GET /dashboard
///
/// Fetch the current event snapshot and build all chart payloads for the
/// selected date. An invalid `date` parameter is a 400; a database failure
/// is not an error (empty charts, options containing only `"all"`).
pub async fn get_dashboard(
    State(state): State<AppState>,
    Query(params): Query<DashboardQuery>,
) -> AppResult<impl IntoResponse> {
    let selector = DateSelector::parse(params.date.as_deref().unwrap_or(ALL_OPTION))?;

    let snapshot = PhaseEventRepo::snapshot(&state.pool).await;
    let events: Vec<PhaseEvent> = snapshot.events.into_iter().map(Into::into).collect();

    let payload = build_dashboard_payload(
        &events,
        &snapshot.dates,
        selector,
        state.config.refresh_interval_secs,
    );

    Ok(Json(DataResponse { data: payload }))
}

// ---------------------------------------------------------------------------
// Payload assembly
// ---------------------------------------------------------------------------

/// Run the full aggregation pipeline and assemble the tick payload.
///
/// Pure function of its inputs: filter/group, aggregate, average, flatten,
/// assign colors, build chart specs. Extracted from the handler so the whole
/// pipeline is testable without a database or a server.
pub fn build_dashboard_payload(
    events: &[PhaseEvent],
    dates: &[NaiveDate],
    selector: DateSelector,
    refresh_interval_secs: u64,
) -> DashboardPayload {
    let timeline = filter_and_group(events, selector);
    let stats = aggregate(&timeline);
    let averages = average_minutes(&stats);
    let intervals = flatten(&timeline);
    let colors = assign_colors(stats.phases(), &PHASE_PALETTE);

    let mut date_options = Vec::with_capacity(dates.len() + 1);
    date_options.push(ALL_OPTION.to_string());
    date_options.extend(dates.iter().map(NaiveDate::to_string));

    DashboardPayload {
        date_options,
        refresh_interval_ms: refresh_interval_secs * 1000,
        view_count: VIEW_COUNT,
        avg_duration_bar: charts::avg_duration_bar(&averages, &colors),
        phase_count_bar: charts::phase_count_bar(&stats.counts, &colors),
        timeline: charts::timeline_chart(&intervals, &colors),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;
    use phasedash_core::PHASE_PALETTE;

    fn ts(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
    }

    fn sample_events() -> Vec<PhaseEvent> {
        vec![
            PhaseEvent::new("E1", ts("2024-04-01 08:00:00"), "Start"),
            PhaseEvent::new("E1", ts("2024-04-01 08:10:00"), "Middle"),
            PhaseEvent::new("E1", ts("2024-04-01 08:25:00"), "End"),
        ]
    }

    fn sample_dates() -> Vec<NaiveDate> {
        vec![NaiveDate::from_ymd_opt(2024, 4, 1).unwrap()]
    }

    #[test]
    fn payload_for_sample_scenario() {
        let payload =
            build_dashboard_payload(&sample_events(), &sample_dates(), DateSelector::All, 15);

        assert_eq!(payload.date_options, vec!["all", "2024-04-01"]);
        assert_eq!(payload.refresh_interval_ms, 15_000);
        assert_eq!(payload.view_count, VIEW_COUNT);

        // Averages: Start 10 min, Middle 15 min; End dangles.
        let avg = &payload.avg_duration_bar.bars;
        assert_eq!(avg.len(), 2);
        assert_eq!(avg[0].label, "Start");
        assert_eq!(avg[0].value, 10.0);
        assert_eq!(avg[1].label, "Middle");
        assert_eq!(avg[1].value, 15.0);

        // Counts mirror the same discovery order.
        let counts = &payload.phase_count_bar.bars;
        assert_eq!(counts[0].label, "Start");
        assert_eq!(counts[0].value, 1.0);

        // Timeline: one bar per entry, last one zero-width.
        let bars = &payload.timeline.bars;
        assert_eq!(bars.len(), 3);
        assert_eq!(bars[2].phase, "End");
        assert_eq!(bars[2].start, bars[2].finish);

        // Colors follow discovery order; dangling "End" gets the fallback.
        assert_eq!(bars[0].color, PHASE_PALETTE[0]);
        assert_eq!(bars[1].color, PHASE_PALETTE[1]);
        assert_eq!(bars[2].color, phasedash_core::FALLBACK_COLOR);
    }

    #[test]
    fn empty_snapshot_degrades_to_empty_charts() {
        let payload = build_dashboard_payload(&[], &[], DateSelector::All, 15);

        assert_eq!(payload.date_options, vec!["all"]);
        assert!(payload.avg_duration_bar.bars.is_empty());
        assert!(payload.phase_count_bar.bars.is_empty());
        assert!(payload.timeline.bars.is_empty());
    }

    #[test]
    fn date_selector_filters_the_payload() {
        let mut events = sample_events();
        events.push(PhaseEvent::new("E2", ts("2024-04-02 09:00:00"), "Start"));
        let dates = vec![
            NaiveDate::from_ymd_opt(2024, 4, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 4, 2).unwrap(),
        ];

        let other_day = DateSelector::Day(NaiveDate::from_ymd_opt(2024, 4, 2).unwrap());
        let payload = build_dashboard_payload(&events, &dates, other_day, 15);

        // Only E2's lone event survives the filter: no pairs, one interval.
        assert!(payload.avg_duration_bar.bars.is_empty());
        assert_eq!(payload.timeline.bars.len(), 1);
        assert_eq!(payload.timeline.bars[0].target_id, "E2");

        // The dropdown always lists every date in the data, not just the
        // selected one.
        assert_eq!(payload.date_options, vec!["all", "2024-04-01", "2024-04-02"]);
    }

    #[test]
    fn payload_is_identical_across_ticks_for_unchanged_data() {
        let first =
            build_dashboard_payload(&sample_events(), &sample_dates(), DateSelector::All, 15);
        let second =
            build_dashboard_payload(&sample_events(), &sample_dates(), DateSelector::All, 15);

        let a = serde_json::to_value(&first).unwrap();
        let b = serde_json::to_value(&second).unwrap();
        assert_eq!(a, b);
    }
}
