pub mod championship;
pub mod error;
pub mod export;
pub mod parser;
pub mod pax;
pub mod results;
pub mod scoring;

pub use championship::{
    decode_standings_sheet, ChampionshipDriver, ChampionshipKind, ChampionshipResults,
    ChampionshipResultsParser, ClassChampionshipDriver, ClassStandings, IndexedStandings,
    SheetGrid,
};
pub use error::{Error, Result};
pub use export::{
    export_class_results, export_class_standings, export_index_results, export_indexed_standings,
    format_class_standings_console, format_event_console, format_indexed_standings_console,
};
pub use parser::{parse_event, EventResultsParser};
pub use pax::{PaxLookup, PaxTable};
pub use results::{
    driver_id, ClassResults, Driver, EventResults, LapTime, Penalty, TimeSelection,
};
pub use scoring::{
    attendance_cutoff, best_n_total, class_championship_trophy_count, events_to_count,
    flat_trophy_count, index_points, indexed_trophy_eligible, MAX_EVENT_POINTS,
};
