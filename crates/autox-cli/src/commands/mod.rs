//! CLI command implementations.

pub mod champ;
pub mod event;

use std::path::Path;

use anyhow::{Context, Result};
use autox_core::{parse_event, EventResults, PaxTable};
use tracing::debug;

/// Load the PAX table when a file was given; an empty table otherwise,
/// which scores unindexed exports raw.
pub fn load_pax_table(path: Option<&Path>) -> Result<PaxTable> {
    match path {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading pax table {}", path.display()))?;
            Ok(PaxTable::parse(&text))
        }
        None => Ok(PaxTable::new()),
    }
}

/// Parse an event export from disk and surface import problems.
pub fn load_event(results: &Path, pax_file: Option<&Path>) -> Result<EventResults> {
    let pax = load_pax_table(pax_file)?;
    let bytes = std::fs::read(results)
        .with_context(|| format!("reading event export {}", results.display()))?;
    let event = parse_event(&bytes, &pax)
        .with_context(|| format!("parsing event export {}", results.display()))?;
    debug!(classes = event.len(), "event export parsed");

    for descriptor in event.drivers_in_error() {
        eprintln!("warning: {descriptor} reported a best run but no timed runs");
    }
    Ok(event)
}
