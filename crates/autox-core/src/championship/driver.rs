use serde::{Deserialize, Serialize};

use crate::scoring::best_n_total;

/// One competitor's season record for one championship kind.
///
/// `points` holds one slot per event scored so far, chronological, with
/// 0 for a missed event. `total_points` is maintained under the
/// "best N of M" rule on every append.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChampionshipDriver {
    id: String,
    name: String,
    points: Vec<i64>,
    total_points: i64,
}

impl ChampionshipDriver {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            points: Vec::new(),
            total_points: 0,
        }
    }

    /// A brand-new driver joining an already-running season: leading
    /// zeros for every event they missed.
    pub fn with_missed_events(id: impl Into<String>, name: impl Into<String>, missed: usize) -> Self {
        let mut driver = Self::new(id, name);
        driver.points = vec![0; missed];
        driver
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn points(&self) -> &[i64] {
        &self.points
    }

    pub fn total_points(&self) -> i64 {
        self.total_points
    }

    pub fn event_count(&self) -> usize {
        self.points.len()
    }

    /// Events with a non-zero score. A zero entry is indistinguishable
    /// from absence in the standings exports, so it counts as a miss.
    pub fn attended_events(&self) -> usize {
        self.points.iter().filter(|p| **p != 0).count()
    }

    pub fn add_event(&mut self, event_points: i64) {
        self.points.push(event_points);
        self.total_points = best_n_total(&self.points);
    }
}

/// A class-championship entry; the season is scored within `car_class`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassChampionshipDriver {
    pub car_class: String,
    pub driver: ChampionshipDriver,
}
