use std::collections::{BTreeMap, BTreeSet, HashMap};

use tracing::{debug, warn};

use crate::championship::{
    decode_standings_sheet, parse_points_cell, read_sheet_header, ChampionshipDriver,
    ChampionshipKind, ChampionshipResults, ClassChampionshipDriver, ClassStandings,
    IndexedStandings, SheetGrid,
};
use crate::error::{Error, Result};
use crate::results::{driver_id, Driver, EventResults};
use crate::scoring::index_points;

/// Merges one event's results into the running season standings, one
/// championship kind at a time.
///
/// Each kind is processed independently: a standings file that fails to
/// decode is reported beside the kinds that succeeded, never aborting
/// the whole call.
pub struct ChampionshipResultsParser<'a> {
    event: &'a EventResults,
}

impl<'a> ChampionshipResultsParser<'a> {
    pub fn new(event: &'a EventResults) -> Self {
        Self { event }
    }

    pub fn parse(
        &self,
        prior: &BTreeMap<ChampionshipKind, Vec<u8>>,
        new_ladies: &[String],
    ) -> (ChampionshipResults, Vec<(ChampionshipKind, Error)>) {
        let mut results = ChampionshipResults::default();
        let mut errors = Vec::new();

        for (kind, bytes) in prior {
            debug!(kind = %kind, "merging championship standings");
            let outcome = decode_standings_sheet(bytes).and_then(|grid| match kind {
                ChampionshipKind::Class => {
                    self.merge_class(&grid).map(|s| results.class = Some(s))
                }
                ChampionshipKind::Pax => self
                    .merge_indexed(*kind, &grid, new_ladies)
                    .map(|s| results.pax = Some(s)),
                ChampionshipKind::Novice => self
                    .merge_indexed(*kind, &grid, new_ladies)
                    .map(|s| results.novice = Some(s)),
                ChampionshipKind::Ladies => self
                    .merge_indexed(*kind, &grid, new_ladies)
                    .map(|s| results.ladies = Some(s)),
            });
            if let Err(error) = outcome {
                warn!(kind = %kind, %error, "championship standings skipped");
                errors.push((*kind, error));
            }
        }

        (results, errors)
    }

    /// Class championships: one merge per car class, each against its
    /// own field and its own fastest index time.
    pub fn merge_class(&self, grid: &SheetGrid) -> Result<ClassStandings> {
        let header = read_sheet_header(grid)?;
        let history = parse_class_history(grid, header.past_event_count);

        let mut pools: HashMap<String, HashMap<String, &Driver>> = HashMap::new();
        for driver in self.eligible_drivers() {
            pools
                .entry(driver.car_class.clone())
                .or_default()
                .insert(driver.id.clone(), driver);
        }

        let empty_history = HashMap::new();
        let empty_pool = HashMap::new();
        let mut car_classes: BTreeSet<&String> = history.keys().collect();
        car_classes.extend(pools.keys());

        let mut classes = BTreeMap::new();
        for car_class in car_classes {
            let class_history = history.get(car_class).unwrap_or(&empty_history);
            let pool = pools.get(car_class).unwrap_or(&empty_pool);
            let merged = self
                .merge_pool(class_history, pool, header.past_event_count)
                .into_iter()
                .map(|driver| ClassChampionshipDriver {
                    car_class: car_class.clone(),
                    driver,
                })
                .collect();
            classes.insert(car_class.clone(), merged);
        }

        Ok(ClassStandings {
            year: header.year,
            organization: header.organization,
            classes,
        })
    }

    /// Flat championships: one pool, one fastest index time.
    pub fn merge_indexed(
        &self,
        kind: ChampionshipKind,
        grid: &SheetGrid,
        new_ladies: &[String],
    ) -> Result<IndexedStandings> {
        let header = read_sheet_header(grid)?;
        let history = parse_indexed_history(grid, header.header_row, header.past_event_count);

        let pool: HashMap<String, &Driver> = self
            .eligible_drivers()
            .filter(|driver| match kind {
                ChampionshipKind::Novice => driver.rookie,
                ChampionshipKind::Ladies => {
                    driver.ladies_championship
                        || new_ladies
                            .iter()
                            .any(|name| driver_id(name) == driver.id)
                        || history.contains_key(&driver.id)
                }
                _ => true,
            })
            .map(|driver| (driver.id.clone(), driver))
            .collect();

        let drivers = self.merge_pool(&history, &pool, header.past_event_count);

        Ok(IndexedStandings {
            year: header.year,
            organization: header.organization,
            drivers,
        })
    }

    /// Every driver eligible for championship scoring. The Fun class
    /// never scores points.
    fn eligible_drivers(&self) -> impl Iterator<Item = &Driver> {
        self.event
            .drivers()
            .filter(|driver| !is_fun_class(&driver.car_class))
    }

    /// The central merge: the union of historical drivers and this
    /// event's pool, each getting exactly one appended point entry.
    fn merge_pool(
        &self,
        history: &HashMap<String, ChampionshipDriver>,
        pool: &HashMap<String, &Driver>,
        past_event_count: usize,
    ) -> Vec<ChampionshipDriver> {
        let fastest = pool
            .values()
            .filter_map(|driver| driver.index_time(self.event.selection))
            .min_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        if fastest.is_none() && !pool.is_empty() {
            warn!("no driver in the pool set a numeric time; pool scores zero");
        }

        let mut ids: BTreeSet<&String> = history.keys().collect();
        ids.extend(pool.keys());

        let mut merged: Vec<ChampionshipDriver> = ids
            .into_iter()
            .map(|id| match (history.get(id), pool.get(id)) {
                (Some(past), Some(driver)) => {
                    let mut entry = past.clone();
                    entry.add_event(self.event_points(fastest, driver));
                    entry
                }
                (Some(past), None) => {
                    let mut entry = past.clone();
                    entry.add_event(0);
                    entry
                }
                (None, Some(driver)) => {
                    let mut entry = ChampionshipDriver::with_missed_events(
                        id.clone(),
                        driver.name.clone(),
                        past_event_count,
                    );
                    entry.add_event(self.event_points(fastest, driver));
                    entry
                }
                (None, None) => unreachable!("id comes from one of the two maps"),
            })
            .collect();

        merged.sort_by(|lhs, rhs| {
            rhs.total_points()
                .cmp(&lhs.total_points())
                .then_with(|| lhs.name().cmp(rhs.name()))
        });
        merged
    }

    fn event_points(&self, fastest: Option<f64>, driver: &Driver) -> i64 {
        fastest
            .map(|f| index_points(f, driver, self.event.selection))
            .unwrap_or(0)
    }
}

/// The always-ineligible exhibition class.
pub fn is_fun_class(car_class: &str) -> bool {
    car_class.trim().eq_ignore_ascii_case("fun") || car_class.trim().eq_ignore_ascii_case("fun class")
}

/// Flat-standings history: rows below the column header whose first
/// cell is a rank number.
fn parse_indexed_history(
    grid: &SheetGrid,
    header_row: usize,
    past_event_count: usize,
) -> HashMap<String, ChampionshipDriver> {
    let mut history = HashMap::new();
    for row in grid.iter().skip(header_row + 1) {
        if let Some((id, driver)) = parse_history_row(row, past_event_count) {
            history.insert(id, driver);
        }
    }
    history
}

/// Class-standings history: class-header rows switch the current class,
/// rank-numbered rows below them are drivers of that class.
fn parse_class_history(
    grid: &SheetGrid,
    past_event_count: usize,
) -> HashMap<String, HashMap<String, ChampionshipDriver>> {
    let mut history: HashMap<String, HashMap<String, ChampionshipDriver>> = HashMap::new();
    let mut current_class: Option<String> = None;

    for row in grid {
        if let Some(car_class) = parse_class_header_cell(row) {
            history.entry(car_class.clone()).or_default();
            current_class = Some(car_class);
            continue;
        }
        let Some(car_class) = &current_class else {
            // Org/title rows above the first class header
            continue;
        };
        if let Some((id, driver)) = parse_history_row(row, past_event_count) {
            history.entry(car_class.clone()).or_default().insert(id, driver);
        }
    }

    history
}

/// A class header cell reads `"SS - Super Street"` (some exports use an
/// en dash). Anything whose first cell starts with a rank number is a
/// driver row instead.
fn parse_class_header_cell(row: &[String]) -> Option<String> {
    let first = row.first()?.trim();
    if first.is_empty() || first.parse::<f64>().is_ok() {
        return None;
    }
    let delimiter = if first.contains(" - ") {
        " - "
    } else if first.contains(" – ") {
        " – "
    } else {
        return None;
    };
    first.split(delimiter).next().map(|s| s.trim().to_string())
}

/// `[rank, name, points_1..points_k, total, "best K of N"]`. Trailing
/// blank cells are tolerated; the points block is normalized to the
/// sheet's event count.
fn parse_history_row(row: &[String], past_event_count: usize) -> Option<(String, ChampionshipDriver)> {
    let rank = row.first()?;
    if rank.trim().parse::<u32>().is_err() {
        return None;
    }
    let name = row.get(1)?.trim();
    if name.is_empty() {
        return None;
    }

    let mut points: Vec<i64> = row
        .iter()
        .skip(2)
        .take(past_event_count)
        .map(|cell| parse_points_cell(cell))
        .collect();
    points.resize(past_event_count, 0);

    let id = driver_id(name);
    let mut driver = ChampionshipDriver::new(id.clone(), name);
    for p in points {
        driver.add_event(p);
    }
    Some((id, driver))
}
