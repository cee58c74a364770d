//! Event command: score one raw export into ranked result tables.

use std::path::Path;

use anyhow::{Context, Result};
use autox_core::{export_class_results, export_index_results, format_event_console};

use crate::cli::EventFormat;
use crate::commands::load_event;

pub fn run(
    results: &Path,
    pax_file: Option<&Path>,
    output: Option<&Path>,
    format: EventFormat,
) -> Result<()> {
    let event = load_event(results, pax_file)?;
    eprintln!(
        "Scored {} drivers in {} classes",
        event.drivers().count(),
        event.len()
    );

    let content = match format {
        EventFormat::Table => format_event_console(&event),
        EventFormat::Class => export_class_results(&event)?,
        EventFormat::Index => export_index_results(&event)?,
        EventFormat::Json => serde_json::to_string_pretty(&event)?,
    };

    match output {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("writing {}", path.display()))?;
            eprintln!("Wrote {}", path.display());
        }
        None => print!("{content}"),
    }
    Ok(())
}
