//! Event result types.
//!
//! This module contains the value objects produced by one event parse:
//! - `LapTime`, `Penalty` - a single timed run or a derived best-of value
//! - `Driver` - one competitor's full record for one event
//! - `ClassResults` - one car class's field, ranked
//! - `EventResults` - all classes for one event

mod class_results;
mod driver;
mod event_results;
mod lap_time;

pub use class_results::*;
pub use driver::*;
pub use event_results::*;
pub use lap_time::*;
