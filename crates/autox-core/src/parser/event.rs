use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::parser::{
    classify_legacy_row, decode_export_bytes, extract_run_triples, ExportSignature,
    LegacyRowShape, TwoDayColumns, LEGACY_PREFIX_WIDTH, LEGACY_RUN_SLOTS,
};
use crate::pax::PaxLookup;
use crate::results::{driver_id, ClassResults, Driver, EventResults, TimeSelection};

/// Decodes a raw per-event timing export into ranked [`EventResults`].
///
/// The PAX table is an injected collaborator: the two-day export
/// carries its own multiplier column, the legacy export does not, and
/// either way the table is resolved once per parse call.
pub struct EventResultsParser<'p> {
    pax: &'p dyn PaxLookup,
}

/// Parse one event export.
pub fn parse_event(bytes: &[u8], pax: &dyn PaxLookup) -> Result<EventResults> {
    EventResultsParser::new(pax).parse(bytes)
}

impl<'p> EventResultsParser<'p> {
    pub fn new(pax: &'p dyn PaxLookup) -> Self {
        Self { pax }
    }

    pub fn parse(&self, bytes: &[u8]) -> Result<EventResults> {
        let text = decode_export_bytes(bytes);
        let records = read_records(&text)?;

        let (header_index, header) = records
            .iter()
            .enumerate()
            .find(|(_, row)| row.iter().any(|cell| !cell.is_empty()))
            .ok_or_else(|| Error::HeaderMismatch {
                found: String::new(),
            })?;

        let signature =
            ExportSignature::detect(header).ok_or_else(|| Error::HeaderMismatch {
                found: header.join(", "),
            })?;

        let body = &records[header_index + 1..];
        let first_body_row = header_index + 2; // 1-based file row numbers
        let drivers = match signature {
            ExportSignature::TwoDay(columns) => {
                self.parse_two_day(body, first_body_row, &columns)?
            }
            ExportSignature::SingleDay => self.parse_single_day(body, first_body_row)?,
        };

        Ok(assemble(drivers))
    }

    fn parse_two_day(
        &self,
        body: &[Vec<String>],
        first_row: usize,
        columns: &TwoDayColumns,
    ) -> Result<Vec<Driver>> {
        let mut drivers = Vec::new();
        for (offset, row) in body.iter().enumerate() {
            let row_number = first_row + offset;
            if row.iter().all(|cell| cell.is_empty()) {
                continue;
            }
            if row.len() < columns.first_run {
                return Err(Error::RowStructure {
                    row: row_number,
                    message: format!(
                        "expected at least {} columns, found {}",
                        columns.first_run,
                        row.len()
                    ),
                });
            }

            let car_class = row[columns.class].clone();
            if car_class.is_empty() {
                return Err(Error::RowStructure {
                    row: row_number,
                    message: "empty class cell".to_string(),
                });
            }
            let car_number = parse_car_number(&row[columns.number], row_number)?;

            let name = format!(
                "{} {}",
                row[columns.first_name].trim(),
                row[columns.last_name].trim()
            )
            .trim()
            .to_string();

            let runs_day1 = cell(row, Some(columns.runs_day1))
                .parse::<usize>()
                .unwrap_or(0);
            let runs_day2 = cell(row, Some(columns.runs_day2))
                .parse::<usize>()
                .unwrap_or(0);
            let run_cells = &row[columns.first_run.min(row.len())..];
            let day1_times = extract_run_triples(run_cells, runs_day1);
            let day2_start = (3 * runs_day1).min(run_cells.len());
            let day2_times = extract_run_triples(&run_cells[day2_start..], runs_day2);

            let best_run = cell(row, columns.best_run);
            let best_run_is_falsy = best_run
                .parse::<f64>()
                .map_or_else(|_| best_run.is_empty(), |value| value == 0.0);
            let error = day1_times.is_empty() && day2_times.is_empty() && !best_run_is_falsy;

            let driver = Driver {
                id: driver_id(&name),
                name,
                car_number,
                car_description: describe_car(
                    cell(row, columns.year),
                    cell(row, columns.make),
                    cell(row, columns.model),
                ),
                region: cell(row, columns.region).to_string(),
                rookie: flag_is_set(cell(row, columns.rookie)),
                ladies_championship: flag_is_set(cell(row, columns.ladies)),
                pax_multiplier: self.resolve_pax(&car_class, cell(row, columns.pax_index)),
                car_class,
                day1_times,
                day2_times,
                position: None,
                error,
            };

            if driver.has_any_times() || driver.error {
                drivers.push(driver);
            } else {
                warn!(driver = %driver.descriptor(), "dropping driver with no runs");
            }
        }
        Ok(drivers)
    }

    fn parse_single_day(&self, body: &[Vec<String>], first_row: usize) -> Result<Vec<Driver>> {
        let mut drivers = Vec::new();
        let mut current_class: Option<String> = None;

        for (offset, row) in body.iter().enumerate() {
            let row_number = first_row + offset;
            if row.iter().all(|cell| cell.is_empty()) {
                continue;
            }

            match classify_legacy_row(row) {
                Some(LegacyRowShape::CategoryMarker) => {
                    // Grouping for display only; classes below carry
                    // their own headers
                }
                Some(LegacyRowShape::ClassHeader {
                    car_class,
                    driver_cells,
                }) => {
                    current_class = Some(car_class.clone());
                    drivers.push(self.parse_legacy_driver(
                        &car_class,
                        driver_cells,
                        row_number,
                    )?);
                }
                Some(LegacyRowShape::Continuation { driver_cells }) => {
                    let car_class =
                        current_class
                            .clone()
                            .ok_or_else(|| Error::RowStructure {
                                row: row_number,
                                message: "continuation row before any class header".to_string(),
                            })?;
                    drivers.push(self.parse_legacy_driver(
                        &car_class,
                        driver_cells,
                        row_number,
                    )?);
                }
                None => {
                    return Err(Error::RowStructure {
                        row: row_number,
                        message: format!("unrecognized row shape: {:?}", row.first()),
                    });
                }
            }
        }

        // Legacy drivers without a single run carry no information
        drivers.retain(|driver| {
            if driver.has_any_times() {
                true
            } else {
                warn!(driver = %driver.descriptor(), "dropping driver with no runs");
                false
            }
        });
        Ok(drivers)
    }

    /// Legacy driver cells: trophy, rookie, position, number, name,
    /// car, region, then the run triples. Trophy and position are
    /// recomputed here, not trusted.
    fn parse_legacy_driver(
        &self,
        car_class: &str,
        cells: &[String],
        row_number: usize,
    ) -> Result<Driver> {
        if cells.len() < LEGACY_PREFIX_WIDTH {
            return Err(Error::RowStructure {
                row: row_number,
                message: format!(
                    "expected {} driver columns, found {}",
                    LEGACY_PREFIX_WIDTH,
                    cells.len()
                ),
            });
        }

        let car_number = parse_car_number(&cells[3], row_number)?;
        let name = cells[4].trim().to_string();
        let day1_times = extract_run_triples(&cells[LEGACY_PREFIX_WIDTH..], LEGACY_RUN_SLOTS);

        Ok(Driver {
            id: driver_id(&name),
            name,
            car_number,
            car_class: car_class.to_string(),
            car_description: cells[5].trim().to_string(),
            region: cells[6].trim().to_string(),
            rookie: cells[1].trim() == "R",
            ladies_championship: false,
            pax_multiplier: self.resolve_pax(car_class, ""),
            day1_times,
            day2_times: Vec::new(),
            position: None,
            error: false,
        })
    }

    fn resolve_pax(&self, car_class: &str, inline_cell: &str) -> f64 {
        if let Ok(multiplier) = inline_cell.parse::<f64>() {
            if multiplier > 0.0 {
                return multiplier;
            }
        }
        match self.pax.lookup(car_class) {
            Some(multiplier) => multiplier,
            None => {
                warn!(car_class, "no pax multiplier known, scoring raw");
                1.0
            }
        }
    }
}

fn read_records(text: &str) -> Result<Vec<Vec<String>>> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .has_headers(false)
        .from_reader(text.as_bytes());
    let mut records = Vec::new();
    for record in reader.records() {
        let record = record?;
        records.push(record.iter().map(|cell| cell.trim().to_string()).collect());
    }
    Ok(records)
}

fn assemble(drivers: Vec<Driver>) -> EventResults {
    let selection = if drivers.iter().any(|d| !d.day2_times.is_empty()) {
        TimeSelection::Combined
    } else {
        TimeSelection::Day1
    };

    let mut results = EventResults::new(selection);
    for driver in drivers {
        results
            .classes
            .entry(driver.car_class.clone())
            .or_insert_with(|| ClassResults::new(driver.car_class.clone()))
            .add_driver(driver);
    }

    // A class can register drivers who never run; those classes end up
    // empty once run-less drivers are dropped and must not appear
    results.classes.retain(|_, class| !class.is_empty());

    for class in results.classes.values_mut() {
        class.finalize(selection);
    }
    debug!(
        classes = results.len(),
        drivers = results.drivers().count(),
        ?selection,
        "event parsed"
    );
    results
}

fn cell<'r>(row: &'r [String], index: Option<usize>) -> &'r str {
    index.and_then(|i| row.get(i)).map(String::as_str).unwrap_or("")
}

fn parse_car_number(cell: &str, row_number: usize) -> Result<u32> {
    cell.trim().parse::<u32>().map_err(|_| Error::RowStructure {
        row: row_number,
        message: format!("car number is not numeric: {cell:?}"),
    })
}

fn describe_car(year: &str, make: &str, model: &str) -> String {
    let year = if year.is_empty() { "0" } else { year };
    let make = if make.is_empty() { "Unknown" } else { make };
    let model = if model.is_empty() { "Unknown" } else { model };
    format!("{year} {make} {model}")
}

fn flag_is_set(cell: &str) -> bool {
    cell.parse::<i64>().map(|v| v != 0).unwrap_or(false)
}
