//! Pure scoring rules.
//!
//! - `index_points` - index-adjusted event points against the fastest
//!   time in a pool
//! - trophy formulas for event fields and championship standings
//! - the "best N of M" season aggregate

mod points;
mod trophy;

pub use points::*;
pub use trophy::*;
