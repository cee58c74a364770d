use crate::results::{Driver, TimeSelection};

/// Points awarded to the pool leader.
pub const MAX_EVENT_POINTS: i64 = 10_000;

/// Event points from an index-adjusted lap time.
///
/// The fastest driver in the pool scores exactly 10000; everyone else
/// scores `round(fastest / actual * 10000)`. A driver without a numeric
/// time scores 0.
pub fn index_points(fastest_index_time: f64, driver: &Driver, selection: TimeSelection) -> i64 {
    let actual = driver.index_time(selection).unwrap_or(f64::INFINITY);
    if actual == fastest_index_time {
        MAX_EVENT_POINTS
    } else {
        ((fastest_index_time / actual) * MAX_EVENT_POINTS as f64).round() as i64
    }
}

/// Season total under the "best N of M" rule: the plain sum for short
/// seasons, otherwise the sum of the `round(M/2) + 2` highest entries.
pub fn best_n_total(points: &[i64]) -> i64 {
    let events = points.len();
    if events < 4 {
        points.iter().sum()
    } else {
        let mut sorted = points.to_vec();
        sorted.sort_unstable_by(|a, b| b.cmp(a));
        sorted[..events_to_count(events)].iter().sum()
    }
}

/// How many events count toward the season total.
pub fn events_to_count(events: usize) -> usize {
    if events < 4 {
        events
    } else {
        ((events as f64) / 2.0).round() as usize + 2
    }
}

/// Minimum attended events for championship trophy eligibility,
/// `ceil(events / 2) + 2`.
pub fn attendance_cutoff(events: usize) -> usize {
    events.div_ceil(2) + 2
}
