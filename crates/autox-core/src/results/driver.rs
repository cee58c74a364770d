use serde::{Deserialize, Serialize};

use crate::results::LapTime;

/// Which day's runs govern a comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeSelection {
    Day1,
    Day2,
    Combined,
}

/// Normalized driver identity: lower-cased, trimmed full name.
///
/// A deliberately weak natural key. Name collisions and nickname
/// variants will merge records; this is the contract shared by the
/// timing exports and the championship standings, so it is kept as-is
/// and surfaced to operators instead of being silently disambiguated.
pub fn driver_id(name: &str) -> String {
    name.trim().to_lowercase()
}

/// One competitor's full record for one event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Driver {
    pub id: String,
    pub name: String,
    pub car_number: u32,
    pub car_class: String,
    pub car_description: String,
    pub region: String,
    pub rookie: bool,
    pub ladies_championship: bool,
    pub pax_multiplier: f64,
    pub day1_times: Vec<LapTime>,
    pub day2_times: Vec<LapTime>,
    /// Assigned after within-class sorting, 1-based.
    pub position: Option<u32>,
    /// Set when the source row claimed a best-run summary but reported
    /// zero runs on both days. The driver is retained so the operator
    /// can fix the export instead of losing the entry.
    pub error: bool,
}

impl Driver {
    /// Best lap of the selected range. DNS when the range has no runs.
    pub fn best_time(&self, selection: TimeSelection) -> LapTime {
        match selection {
            TimeSelection::Day1 => Self::best_of(&self.day1_times),
            TimeSelection::Day2 => Self::best_of(&self.day2_times),
            TimeSelection::Combined => self.combined(),
        }
    }

    /// Two-day total: best of day 1 combined with best of day 2.
    /// DNS unless both days have at least one run.
    pub fn combined(&self) -> LapTime {
        if self.day1_times.is_empty() || self.day2_times.is_empty() {
            LapTime::dns()
        } else {
            Self::best_of(&self.day1_times).combine(&Self::best_of(&self.day2_times))
        }
    }

    pub fn has_any_times(&self) -> bool {
        !self.day1_times.is_empty() || !self.day2_times.is_empty()
    }

    pub fn set_position(&mut self, position: u32) {
        self.position = Some(position);
    }

    /// Index-adjusted best time for the selected range.
    pub fn index_time(&self, selection: TimeSelection) -> Option<f64> {
        self.best_time(selection)
            .time()
            .map(|t| t * self.pax_multiplier)
    }

    /// Gap to a comparison lap, formatted for result tables. Empty when
    /// this driver holds the comparison time, `N/A` when either side
    /// has no numeric time.
    pub fn difference(&self, comparison: &LapTime, selection: TimeSelection) -> String {
        let own = self.best_time(selection);
        match (own.time(), comparison.time()) {
            (Some(own_time), Some(comparison_time)) => {
                if own_time == comparison_time {
                    String::new()
                } else {
                    format!("{:.3}", comparison_time - own_time)
                }
            }
            _ => "N/A".to_string(),
        }
    }

    /// Short operator-facing descriptor, e.g. `"Jane Doe (42 SS)"`.
    pub fn descriptor(&self) -> String {
        format!("{} ({} {})", self.name, self.car_number, self.car_class)
    }

    fn best_of(times: &[LapTime]) -> LapTime {
        times.iter().min().cloned().unwrap_or_else(LapTime::dns)
    }
}
