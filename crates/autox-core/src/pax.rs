//! PAX/index multiplier lookup.
//!
//! The multiplier table itself is maintained externally and revised
//! yearly; the engine only ever consumes it through [`PaxLookup`],
//! resolved once per parse call.

use std::collections::HashMap;

use tracing::warn;

/// Read-only collaborator mapping a car-class code to its index
/// multiplier.
pub trait PaxLookup {
    fn lookup(&self, car_class: &str) -> Option<f64>;
}

/// An in-memory multiplier table keyed by upper-cased class code.
#[derive(Debug, Clone, Default)]
pub struct PaxTable {
    multipliers: HashMap<String, f64>,
}

impl PaxTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, car_class: impl AsRef<str>, multiplier: f64) {
        self.multipliers
            .insert(car_class.as_ref().trim().to_uppercase(), multiplier);
    }

    /// Parse `class,multiplier` lines. Blank lines and `#` comments are
    /// skipped; malformed lines are reported and skipped.
    pub fn parse(text: &str) -> Self {
        let mut table = Self::new();
        for (number, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let mut parts = line.splitn(2, ',');
            let class = parts.next().unwrap_or_default().trim();
            let multiplier = parts.next().and_then(|m| m.trim().parse::<f64>().ok());
            match multiplier {
                Some(multiplier) if !class.is_empty() => table.insert(class, multiplier),
                _ => warn!(line = number + 1, "skipping malformed pax table line"),
            }
        }
        table
    }

    pub fn len(&self) -> usize {
        self.multipliers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.multipliers.is_empty()
    }
}

impl PaxLookup for PaxTable {
    fn lookup(&self, car_class: &str) -> Option<f64> {
        self.multipliers
            .get(&car_class.trim().to_uppercase())
            .copied()
    }
}
