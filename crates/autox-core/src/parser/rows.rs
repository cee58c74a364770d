use tracing::warn;

use crate::results::{LapTime, Penalty};

/// The run-block column header shared by every known export revision.
pub const RUNS_COLUMN: &str = "Runs (Time/Cones/Penalty)";

/// Fixed leading columns of a legacy single-day driver row:
/// trophy, rookie, position, number, name, car, region.
pub const LEGACY_PREFIX_WIDTH: usize = 7;

/// Run-slot capacity of the legacy single-day export.
pub const LEGACY_RUN_SLOTS: usize = 12;

/// Column geometry of the two-day (one row per driver) export,
/// resolved from the header row by name so column reordering between
/// minor revisions stays harmless.
#[derive(Debug, Clone)]
pub struct TwoDayColumns {
    pub class: usize,
    pub number: usize,
    pub first_name: usize,
    pub last_name: usize,
    pub year: Option<usize>,
    pub make: Option<usize>,
    pub model: Option<usize>,
    pub rookie: Option<usize>,
    pub ladies: Option<usize>,
    pub region: Option<usize>,
    pub best_run: Option<usize>,
    pub pax_index: Option<usize>,
    pub runs_day1: usize,
    pub runs_day2: usize,
    /// First cell of the repeating (time, cones, penalty) triples.
    pub first_run: usize,
}

impl TwoDayColumns {
    pub fn resolve(header: &[String]) -> Option<Self> {
        let find = |name: &str| header.iter().position(|cell| cell.trim() == name);
        Some(Self {
            class: find("Class")?,
            number: find("Number")?,
            first_name: find("First Name")?,
            last_name: find("Last Name")?,
            year: find("Car Year"),
            make: find("Car Make"),
            model: find("Car Model"),
            rookie: find("Rookie"),
            ladies: find("Ladies"),
            region: find("Region"),
            best_run: find("Best Run"),
            pax_index: find("Pax Index"),
            runs_day1: find("Runs Day1")?,
            runs_day2: find("Runs Day2")?,
            first_run: find(RUNS_COLUMN)?,
        })
    }
}

/// Which export revision a header row announces.
#[derive(Debug, Clone)]
pub enum ExportSignature {
    /// One row per driver, day-1/day-2 run blocks.
    TwoDay(TwoDayColumns),
    /// Class-sectioned rows, a single block of up to 12 runs.
    SingleDay,
}

impl ExportSignature {
    pub fn detect(header: &[String]) -> Option<Self> {
        if let Some(columns) = TwoDayColumns::resolve(header) {
            return Some(Self::TwoDay(columns));
        }
        let prefix: Vec<&str> = header.iter().take(4).map(|c| c.trim()).collect();
        if prefix == ["TR", "RK", "Pos", "Nbr"] {
            return Some(Self::SingleDay);
        }
        None
    }
}

/// The closed set of body-row shapes in the legacy single-day export,
/// resolved by first-cell content.
#[derive(Debug)]
pub enum LegacyRowShape<'r> {
    /// A display-only grouping such as `"Street Category"`.
    CategoryMarker,
    /// Starts a class section and carries that class's first driver.
    ClassHeader {
        car_class: String,
        driver_cells: &'r [String],
    },
    /// A follow-up driver in the current class section.
    Continuation { driver_cells: &'r [String] },
}

/// Literal first cell of legacy continuation rows.
const CONTINUATION_MARKER: &str = "Results";

pub fn classify_legacy_row(row: &[String]) -> Option<LegacyRowShape<'_>> {
    let meaningful: Vec<&String> = row.iter().filter(|cell| !cell.trim().is_empty()).collect();
    if meaningful.len() == 1 && meaningful[0].trim().ends_with("Category") {
        return Some(LegacyRowShape::CategoryMarker);
    }

    let first = row.first()?.trim();
    if first == CONTINUATION_MARKER {
        return Some(LegacyRowShape::Continuation {
            driver_cells: &row[1..],
        });
    }
    if first.parse::<f64>().is_err() && first.contains(" - ") {
        let car_class = first.split(" - ").next()?.trim().to_string();
        return Some(LegacyRowShape::ClassHeader {
            car_class,
            driver_cells: &row[1..],
        });
    }
    None
}

/// Decode the repeating (time, cones, penalty) triples of a run block.
///
/// Empty run slots (fewer runs taken than the row's capacity) are
/// skipped, not zero-filled. A slot that fails to parse is skipped with
/// a warning so one bad cell does not void a driver's day.
pub fn extract_run_triples(cells: &[String], max_slots: usize) -> Vec<LapTime> {
    let mut times = Vec::new();
    for slot in 0..max_slots {
        let first = 3 * slot;
        if first + 3 > cells.len() {
            break;
        }
        let [time_cell, cone_cell, penalty_cell] = [
            cells[first].trim(),
            cells[first + 1].trim(),
            cells[first + 2].trim(),
        ];
        if time_cell.is_empty() && penalty_cell.is_empty() {
            continue;
        }

        if let Some(penalty) = Penalty::from_code(penalty_cell) {
            times.push(LapTime::penalized(penalty));
            continue;
        }
        let raw = match time_cell.parse::<f64>() {
            Ok(raw) => raw,
            Err(_) => {
                warn!(slot, cell = %time_cell, "unparsable run time, skipping slot");
                continue;
            }
        };
        let cones = cone_cell.parse::<u32>().unwrap_or(0);
        times.push(LapTime::clean(raw, cones));
    }
    times
}
