use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::results::{ClassResults, Driver, TimeSelection};

/// All classes for one event, keyed by car-class code.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventResults {
    pub classes: BTreeMap<String, ClassResults>,
    /// The selector that governed ranking: day-1 best for single-day
    /// events, the two-day combined time otherwise.
    pub selection: TimeSelection,
}

impl EventResults {
    pub fn new(selection: TimeSelection) -> Self {
        Self {
            classes: BTreeMap::new(),
            selection,
        }
    }

    pub fn get(&self, car_class: &str) -> Option<&ClassResults> {
        self.classes.get(car_class)
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Every driver across all classes.
    pub fn drivers(&self) -> impl Iterator<Item = &Driver> {
        self.classes.values().flat_map(|class| class.drivers.iter())
    }

    /// Operator-facing descriptors of drivers found in an error state
    /// during import.
    pub fn drivers_in_error(&self) -> Vec<String> {
        self.drivers()
            .filter(|driver| driver.error)
            .map(|driver| driver.descriptor())
            .collect()
    }
}
