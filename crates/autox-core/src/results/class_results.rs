use serde::{Deserialize, Serialize};

use crate::results::{Driver, LapTime, TimeSelection};
use crate::scoring::flat_trophy_count;

/// One car class's full field for one event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassResults {
    pub car_class: String,
    pub trophy_count: u32,
    pub drivers: Vec<Driver>,
}

impl ClassResults {
    pub fn new(car_class: impl Into<String>) -> Self {
        Self {
            car_class: car_class.into(),
            trophy_count: 0,
            drivers: Vec::new(),
        }
    }

    pub fn add_driver(&mut self, driver: Driver) {
        self.drivers.push(driver);
    }

    pub fn len(&self) -> usize {
        self.drivers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.drivers.is_empty()
    }

    /// Sort the field by the governing selector, assign 1-based
    /// positions and the trophy count. Sorting is stable, so drivers
    /// without a numeric time keep their input order at the tail.
    pub fn finalize(&mut self, selection: TimeSelection) {
        self.drivers.sort_by_key(|driver| driver.best_time(selection));
        for (index, driver) in self.drivers.iter_mut().enumerate() {
            driver.set_position(index as u32 + 1);
        }
        self.trophy_count = flat_trophy_count(self.drivers.len());
    }

    pub fn best_in_class(&self, selection: TimeSelection) -> LapTime {
        self.drivers
            .first()
            .map(|d| d.best_time(selection))
            .unwrap_or_else(LapTime::dns)
    }
}
