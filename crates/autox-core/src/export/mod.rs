//! CSV renderings of event results and championship standings, in the
//! layout the club publishes.

mod championship;
mod console;
mod event;

pub use championship::*;
pub use console::*;
pub use event::*;

use crate::error::Result;

/// Serialize pre-built rows of uneven width to CSV text.
fn rows_to_csv(rows: &[Vec<String>]) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .flexible(true)
        .from_writer(Vec::new());
    for row in rows {
        writer.write_record(row)?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| std::io::Error::other(e.to_string()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
