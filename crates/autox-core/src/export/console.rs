//! Console output formatting with colored display.

use std::fmt::Write as _;

use owo_colors::OwoColorize;

use crate::championship::{ChampionshipDriver, ChampionshipKind, ClassStandings, IndexedStandings};
use crate::results::{ClassResults, EventResults, TimeSelection};
use crate::scoring::{class_championship_trophy_count, indexed_trophy_eligible};

/// Format ranked event results for console display, one block per
/// class with trophy positions highlighted.
pub fn format_event_console(results: &EventResults) -> String {
    let mut output = String::new();
    for class in results.classes.values() {
        format_class_block(&mut output, class, results.selection);
        let _ = writeln!(output);
    }
    if !results.drivers_in_error().is_empty() {
        let _ = writeln!(output, "{}", "Drivers with import problems:".red().bold());
        for descriptor in results.drivers_in_error() {
            let _ = writeln!(output, "  {descriptor}");
        }
    }
    output
}

fn format_class_block(output: &mut String, class: &ClassResults, selection: TimeSelection) {
    let _ = writeln!(
        output,
        "{} {}",
        class.car_class.bold(),
        format!("({} trophies)", class.trophy_count).dimmed()
    );
    let best = class.best_in_class(selection);
    for driver in &class.drivers {
        let position = driver.position.unwrap_or(0);
        let trophy = position > 0 && u64::from(position) <= u64::from(class.trophy_count);
        let marker = if trophy { "T".green().to_string() } else { " ".to_string() };
        let time = driver.best_time(selection);
        let time_str = if time.time().is_some() {
            time.to_string()
        } else {
            time.to_string().red().to_string()
        };
        let _ = writeln!(
            output,
            "  {marker} {:>2}. {:<24} {:<26} {:>12} {:>8}",
            position,
            driver.name,
            driver.car_description,
            time_str,
            driver.difference(&best, selection)
        );
    }
}

/// Format a flat championship table, trophy-eligible rows highlighted.
pub fn format_indexed_standings_console(
    kind: ChampionshipKind,
    standings: &IndexedStandings,
) -> String {
    let mut output = String::new();
    let _ = writeln!(
        output,
        "{}",
        format!("{} {} Championship", standings.year, kind.name()).bold()
    );
    let _ = writeln!(output, "{}", standings.organization.dimmed());
    for (rank, driver) in standings.drivers.iter().enumerate() {
        format_standings_row(&mut output, driver, rank, indexed_trophy_eligible(driver, rank));
    }
    output
}

/// Format the class championship tables, one block per class.
pub fn format_class_standings_console(standings: &ClassStandings) -> String {
    let mut output = String::new();
    let _ = writeln!(
        output,
        "{}",
        format!("{} Class Championship", standings.year).bold()
    );
    let _ = writeln!(output, "{}", standings.organization.dimmed());
    for (car_class, drivers) in &standings.classes {
        let trophies = class_championship_trophy_count(drivers);
        let _ = writeln!(
            output,
            "{} {}",
            car_class.bold(),
            format!("({trophies} trophies)").dimmed()
        );
        for (rank, entry) in drivers.iter().enumerate() {
            format_standings_row(&mut output, &entry.driver, rank, (rank as u32) < trophies);
        }
    }
    output
}

fn format_standings_row(output: &mut String, driver: &ChampionshipDriver, rank: usize, trophy: bool) {
    let marker = if trophy { "T".green().to_string() } else { " ".to_string() };
    let _ = writeln!(
        output,
        "  {marker} {:>2}. {:<24} {:>7}",
        rank + 1,
        driver.name(),
        driver.total_points()
    );
}
