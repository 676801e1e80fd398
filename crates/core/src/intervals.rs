//! Flattening grouped timelines into explicit intervals for Gantt rendering.

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::timeline::GroupedTimeline;

/// One phase occurrence as a renderable timeline bar.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Interval {
    pub phase: String,
    pub start: NaiveDateTime,
    pub finish: NaiveDateTime,
    pub target_id: String,
}

/// Emit one [`Interval`] per bucket entry.
///
/// An entry's finish is the next entry's timestamp; the last entry of a
/// bucket closes at its own start time, producing a zero-width interval.
/// That is deliberate policy for an unterminated phase, not a bug. Emission
/// order is the timeline's walk order (target asc, date asc, index asc) and
/// is therefore deterministic.
pub fn flatten(timeline: &GroupedTimeline) -> Vec<Interval> {
    let mut intervals = Vec::new();

    for (target_id, dates) in timeline {
        for entries in dates.values() {
            for (i, entry) in entries.iter().enumerate() {
                let finish = entries
                    .get(i + 1)
                    .map_or(entry.timestamp, |next| next.timestamp);
                intervals.push(Interval {
                    phase: entry.phase.clone(),
                    start: entry.timestamp,
                    finish,
                    target_id: target_id.clone(),
                });
            }
        }
    }

    intervals
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timeline::{filter_and_group, DateSelector, PhaseEvent};
    use chrono::NaiveDateTime;

    fn ts(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
    }

    fn timeline(rows: &[(&str, &str, &str)]) -> GroupedTimeline {
        let events: Vec<PhaseEvent> = rows
            .iter()
            .map(|(target, timestamp, phase)| PhaseEvent::new(*target, ts(timestamp), *phase))
            .collect();
        filter_and_group(&events, DateSelector::All)
    }

    #[test]
    fn empty_timeline_yields_no_intervals() {
        assert!(flatten(&GroupedTimeline::new()).is_empty());
    }

    #[test]
    fn one_interval_per_entry() {
        let intervals = flatten(&timeline(&[
            ("E1", "2024-04-01 08:00:00", "Start"),
            ("E1", "2024-04-01 08:10:00", "Middle"),
            ("E1", "2024-04-01 08:25:00", "End"),
        ]));
        assert_eq!(intervals.len(), 3);
    }

    #[test]
    fn finish_is_next_entry_start() {
        let intervals = flatten(&timeline(&[
            ("E1", "2024-04-01 08:00:00", "Start"),
            ("E1", "2024-04-01 08:10:00", "Middle"),
            ("E1", "2024-04-01 08:25:00", "End"),
        ]));

        assert_eq!(intervals[0].phase, "Start");
        assert_eq!(intervals[0].start, ts("2024-04-01 08:00:00"));
        assert_eq!(intervals[0].finish, ts("2024-04-01 08:10:00"));
        assert_eq!(intervals[1].phase, "Middle");
        assert_eq!(intervals[1].finish, ts("2024-04-01 08:25:00"));
    }

    #[test]
    fn last_interval_is_zero_width() {
        let intervals = flatten(&timeline(&[
            ("E1", "2024-04-01 08:00:00", "Start"),
            ("E1", "2024-04-01 08:10:00", "End"),
        ]));

        let last = intervals.last().unwrap();
        assert_eq!(last.phase, "End");
        assert_eq!(last.start, last.finish);
    }

    #[test]
    fn intervals_carry_their_target_id() {
        let intervals = flatten(&timeline(&[
            ("E1", "2024-04-01 08:00:00", "Start"),
            ("E2", "2024-04-01 09:00:00", "Start"),
        ]));

        let targets: Vec<&str> = intervals.iter().map(|i| i.target_id.as_str()).collect();
        assert_eq!(targets, vec!["E1", "E2"]);
    }

    #[test]
    fn emission_order_is_deterministic_walk_order() {
        let rows = [
            ("E2", "2024-04-02 08:00:00", "B"),
            ("E1", "2024-04-01 08:00:00", "A"),
            ("E1", "2024-04-02 08:00:00", "C"),
        ];
        let first = flatten(&timeline(&rows));
        let second = flatten(&timeline(&rows));
        assert_eq!(first, second);

        // Target asc, then date asc.
        let phases: Vec<&str> = first.iter().map(|i| i.phase.as_str()).collect();
        assert_eq!(phases, vec!["A", "C", "B"]);
    }
}
