//! Season championship standings.
//!
//! This module decodes prior-standings exports, merges one event's
//! results into per-driver point histories, and recomputes season
//! totals:
//! - `ChampionshipKind` - Class, PAX, Novice, Ladies
//! - `ChampionshipDriver`, `ClassChampionshipDriver` - point histories
//! - `ClassStandings`, `IndexedStandings`, `ChampionshipResults`
//! - `ChampionshipResultsParser` - the per-kind merge

mod driver;
mod kind;
mod parser;
mod sheet;
mod standings;

pub use driver::*;
pub use kind::*;
pub use parser::*;
pub use sheet::*;
pub use standings::*;
