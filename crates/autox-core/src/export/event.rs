use crate::error::Result;
use crate::export::rows_to_csv;
use crate::results::{Driver, EventResults};
use crate::scoring::{index_points, MAX_EVENT_POINTS};

/// Per-class event results, one section per class.
///
/// Each section opens with the class title and its trophy count, then
/// one row per driver in finishing order with every recorded run.
pub fn export_class_results(results: &EventResults) -> Result<String> {
    let mut rows: Vec<Vec<String>> = Vec::new();
    for class in results.classes.values() {
        rows.push(vec![format!(
            "{} (Trophies: {})",
            class.car_class, class.trophy_count
        )]);
        rows.push(
            ["Pos", "Nbr", "Driver", "Car", "Region", "Best", "Difference", "Runs"]
                .map(str::to_string)
                .to_vec(),
        );
        let best = class.best_in_class(results.selection);
        for driver in &class.drivers {
            rows.push(vec![
                position_cell(driver),
                driver.car_number.to_string(),
                driver.name.clone(),
                driver.car_description.clone(),
                driver.region.clone(),
                driver.best_time(results.selection).to_string(),
                driver.difference(&best, results.selection),
                all_runs(driver),
            ]);
        }
        rows.push(Vec::new());
    }
    rows_to_csv(&rows)
}

/// The event-wide index table: every driver across every class, ranked
/// by PAX-adjusted time, with the 10000-point event score alongside.
pub fn export_index_results(results: &EventResults) -> Result<String> {
    let mut drivers: Vec<&Driver> = results
        .drivers()
        .filter(|driver| driver.index_time(results.selection).is_some())
        .collect();
    drivers.sort_by(|a, b| {
        let a_time = a.index_time(results.selection);
        let b_time = b.index_time(results.selection);
        a_time
            .partial_cmp(&b_time)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.name.cmp(&b.name))
    });
    let fastest = drivers
        .first()
        .and_then(|driver| driver.index_time(results.selection));

    let mut rows: Vec<Vec<String>> = Vec::new();
    rows.push(
        ["Pos", "Driver", "Class", "Index Time", "Points"]
            .map(str::to_string)
            .to_vec(),
    );
    for (index, driver) in drivers.iter().enumerate() {
        let points = match fastest {
            Some(fastest) => index_points(fastest, driver, results.selection),
            None => MAX_EVENT_POINTS,
        };
        let index_time = driver
            .index_time(results.selection)
            .map(|t| format!("{t:.3}"))
            .unwrap_or_default();
        rows.push(vec![
            (index + 1).to_string(),
            driver.name.clone(),
            driver.car_class.clone(),
            index_time,
            points.to_string(),
        ]);
    }
    rows_to_csv(&rows)
}

fn position_cell(driver: &Driver) -> String {
    driver.position.map(|p| p.to_string()).unwrap_or_default()
}

fn all_runs(driver: &Driver) -> String {
    driver
        .day1_times
        .iter()
        .chain(driver.day2_times.iter())
        .map(|lap| lap.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}
