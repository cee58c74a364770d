use std::io::Cursor;

use calamine::{Reader, Xls};
use tracing::debug;

use crate::error::{Error, Result};

/// A decoded standings sheet: rows of trimmed cell strings.
///
/// Keeping the grid as plain strings isolates the merge logic from the
/// spreadsheet library and lets tests build grids directly.
pub type SheetGrid = Vec<Vec<String>>;

/// Fewer rows than this cannot hold the org/title/header/data layout.
const MIN_SHEET_ROWS: usize = 5;

/// Columns that are not point entries: rank, driver, total, best-of note.
pub const NON_POINT_COLUMNS: usize = 4;

/// Decode a prior-standings workbook and pick its results sheet.
pub fn decode_standings_sheet(bytes: &[u8]) -> Result<SheetGrid> {
    let mut workbook = Xls::new(Cursor::new(bytes))?;
    let sheets: Vec<(String, SheetGrid)> = workbook
        .worksheets()
        .iter()
        .map(|(name, range)| {
            let grid = range
                .rows()
                .map(|row| row.iter().map(|cell| cell.to_string().trim().to_string()).collect())
                .collect();
            (name.clone(), grid)
        })
        .collect();
    select_standings_sheet(sheets)
}

/// Pick the results sheet: the last sheet in workbook order, skipping
/// "Calculations" scratch sheets and anything too short to hold the
/// org/title/header/data layout.
fn select_standings_sheet(sheets: Vec<(String, SheetGrid)>) -> Result<SheetGrid> {
    for (name, grid) in sheets.into_iter().rev() {
        if name.trim().to_lowercase() == "calculations" {
            continue;
        }
        if grid.len() >= MIN_SHEET_ROWS {
            debug!(sheet = %name, rows = grid.len(), "using standings sheet");
            return Ok(grid);
        }
        debug!(sheet = %name, "sheet too short, checking next");
    }

    Err(Error::NoUsableSheet(
        "no sheet outside 'Calculations' has enough rows".to_string(),
    ))
}

/// The fixed header block every standings sheet carries.
#[derive(Debug, Clone)]
pub struct SheetHeader {
    pub organization: String,
    pub year: u16,
    /// Index of the `Rank`/`Driver` column-header row.
    pub header_row: usize,
    /// Events already scored into this sheet.
    pub past_event_count: usize,
}

/// Read the org/title/header rows: row 0 is the organization, row 1 a
/// `"<year> ... Championship ..."` title, and some following row the
/// `Rank`/`Driver` column header whose width fixes the event count.
pub fn read_sheet_header(grid: &SheetGrid) -> Result<SheetHeader> {
    if grid.len() < MIN_SHEET_ROWS {
        return Err(Error::ChampionshipDecode(format!(
            "sheet has only {} rows",
            grid.len()
        )));
    }

    let organization = first_cell(&grid[0]).to_string();
    let title = first_cell(&grid[1]);
    let year = title
        .split_whitespace()
        .next()
        .and_then(|token| token.parse::<u16>().ok())
        .ok_or_else(|| {
            Error::ChampionshipDecode(format!("title row does not start with a year: {title:?}"))
        })?;

    let header_row = grid
        .iter()
        .position(|row| {
            row.iter().any(|c| c == "Rank") && row.iter().any(|c| c == "Driver")
        })
        .ok_or_else(|| {
            Error::ChampionshipDecode("no Rank/Driver header row found".to_string())
        })?;

    let width = grid[header_row].len();
    if width < NON_POINT_COLUMNS + 1 {
        return Err(Error::ChampionshipDecode(format!(
            "header row has only {width} columns"
        )));
    }

    Ok(SheetHeader {
        organization,
        year,
        header_row,
        past_event_count: width - NON_POINT_COLUMNS,
    })
}

/// Point cells may come through as integers or floats.
pub fn parse_points_cell(cell: &str) -> i64 {
    cell.parse::<i64>()
        .ok()
        .or_else(|| cell.parse::<f64>().ok().map(|f| f.round() as i64))
        .unwrap_or(0)
}

fn first_cell(row: &[String]) -> &str {
    row.first().map(String::as_str).unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(rows: &[&[&str]]) -> SheetGrid {
        rows.iter()
            .map(|row| row.iter().map(|cell| cell.to_string()).collect())
            .collect()
    }

    fn usable(marker: &str) -> SheetGrid {
        grid(&[
            &["Org"],
            &["2024 PAX Championship Standings"],
            &[""],
            &["Rank", "Driver", "Points", "Total", "Best"],
            &["1", marker, "10000", "10000", ""],
        ])
    }

    #[test]
    fn selection_takes_the_last_sheet_in_workbook_order() {
        // "Event 10" sorts before "Event 2" by name, but workbook order wins.
        let sheets = vec![
            ("Event 2".to_string(), usable("older")),
            ("Event 10".to_string(), usable("newest")),
        ];
        let picked = select_standings_sheet(sheets).unwrap();
        assert_eq!(picked[4][1], "newest");
    }

    #[test]
    fn selection_skips_calculations_sheets() {
        let sheets = vec![
            ("Event 1".to_string(), usable("standings")),
            ("Calculations".to_string(), usable("scratch")),
        ];
        let picked = select_standings_sheet(sheets).unwrap();
        assert_eq!(picked[4][1], "standings");
    }

    #[test]
    fn selection_falls_back_past_short_sheets() {
        let sheets = vec![
            ("Event 1".to_string(), usable("full")),
            ("Event 2".to_string(), grid(&[&["Org"], &["stub"]])),
        ];
        let picked = select_standings_sheet(sheets).unwrap();
        assert_eq!(picked[4][1], "full");
    }

    #[test]
    fn selection_errors_when_nothing_is_usable() {
        let sheets = vec![
            ("Calculations".to_string(), usable("scratch")),
            ("Event 1".to_string(), grid(&[&["Org"]])),
        ];
        assert!(select_standings_sheet(sheets).is_err());
    }

    #[test]
    fn header_extracts_org_year_and_event_count() {
        let sheet = grid(&[
            &["Northwest Region SCCA"],
            &["2024 PAX Championship Standings"],
            &[""],
            &["Rank", "Driver", "Points", "Points", "Points", "Total", "Best 3 of 5"],
            &["1", "Jane Doe", "10000", "9800", "9750", "29550", ""],
        ]);
        let header = read_sheet_header(&sheet).unwrap();
        assert_eq!(header.organization, "Northwest Region SCCA");
        assert_eq!(header.year, 2024);
        assert_eq!(header.header_row, 3);
        assert_eq!(header.past_event_count, 3);
    }

    #[test]
    fn header_rejects_short_sheets() {
        let sheet = grid(&[&["Org"], &["2024 Championship"]]);
        assert!(read_sheet_header(&sheet).is_err());
    }

    #[test]
    fn header_rejects_missing_year() {
        let sheet = grid(&[
            &["Org"],
            &["Championship without a year"],
            &[""],
            &["Rank", "Driver", "Points", "Total", "Best"],
            &[""],
        ]);
        assert!(read_sheet_header(&sheet).is_err());
    }

    #[test]
    fn point_cells_tolerate_floats_and_blanks() {
        assert_eq!(parse_points_cell("9500"), 9500);
        assert_eq!(parse_points_cell("9500.0"), 9500);
        assert_eq!(parse_points_cell(""), 0);
        assert_eq!(parse_points_cell("-"), 0);
    }
}
