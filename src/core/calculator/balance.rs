//! Worked time and balance of a single day.
//!
//! Punches are paired by position in the sorted sequence (0-1, 2-3, ...),
//! not by direction. A trailing unpaired punch contributes nothing.

use crate::models::clock_event::ClockEvent;
use chrono::{DateTime, Duration, FixedOffset};

/// One worked interval between two consecutive punches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkedInterval {
    pub start: DateTime<FixedOffset>,
    pub end: DateTime<FixedOffset>,
}

impl WorkedInterval {
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    pub fn minutes(&self) -> i64 {
        self.duration().num_minutes()
    }
}

/// Pair sorted events two at a time. `sorted` must be ascending by timestamp.
pub fn build_intervals(sorted: &[ClockEvent]) -> Vec<WorkedInterval> {
    sorted
        .chunks_exact(2)
        .map(|pair| WorkedInterval {
            start: pair[0].timestamp,
            end: pair[1].timestamp,
        })
        .collect()
}

/// Total worked minutes. Durations are summed first and truncated once, so
/// seconds spread over several pairs are not lost.
pub fn worked_minutes(sorted: &[ClockEvent]) -> i64 {
    build_intervals(sorted)
        .iter()
        .fold(Duration::zero(), |acc, i| acc + i.duration())
        .num_minutes()
}

pub fn calculate_balance(worked: i64, expected: i64) -> i64 {
    worked - expected
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::event_kind::EventKind;
    use crate::models::location::Coordinates;

    fn at(minute: i64, kind: EventKind) -> ClockEvent {
        let base = DateTime::parse_from_rfc3339("2025-03-10T08:00:00-03:00").unwrap();
        ClockEvent::new(kind, base + Duration::minutes(minute), Coordinates::new(0.0, 0.0), "")
    }

    #[test]
    fn pairs_by_position() {
        let evs = vec![
            at(0, EventKind::In),
            at(60, EventKind::Out),
            at(120, EventKind::In),
            at(200, EventKind::Out),
        ];
        assert_eq!(build_intervals(&evs).len(), 2);
        assert_eq!(worked_minutes(&evs), 140);
    }

    #[test]
    fn trailing_event_is_ignored() {
        let evs = vec![at(0, EventKind::In), at(60, EventKind::Out), at(120, EventKind::In)];
        assert_eq!(worked_minutes(&evs), 60);
    }

    #[test]
    fn direction_is_not_checked() {
        let evs = vec![at(0, EventKind::Out), at(45, EventKind::Out)];
        assert_eq!(worked_minutes(&evs), 45);
    }

    #[test]
    fn seconds_accumulate_across_pairs() {
        let base = DateTime::parse_from_rfc3339("2025-03-10T08:00:00-03:00").unwrap();
        let mk = |secs: i64| {
            ClockEvent::new(
                EventKind::In,
                base + Duration::seconds(secs),
                Coordinates::new(0.0, 0.0),
                "",
            )
        };
        // 30s + 30s = one full minute
        let evs = vec![mk(0), mk(30), mk(100), mk(130)];
        assert_eq!(worked_minutes(&evs), 1);
    }

    #[test]
    fn empty_day_worked_nothing() {
        assert_eq!(worked_minutes(&[]), 0);
        assert_eq!(calculate_balance(0, 540), -540);
    }
}
