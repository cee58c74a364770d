use crate::championship::{
    ChampionshipDriver, ChampionshipKind, ClassStandings, IndexedStandings,
};
use crate::error::Result;
use crate::export::rows_to_csv;
use crate::scoring::{
    class_championship_trophy_count, events_to_count, indexed_trophy_eligible,
};

/// A flat (PAX/novice/ladies) championship table as publishable CSV.
pub fn export_indexed_standings(
    kind: ChampionshipKind,
    standings: &IndexedStandings,
) -> Result<String> {
    let events = standings
        .drivers
        .first()
        .map(ChampionshipDriver::event_count)
        .unwrap_or(0);

    let mut rows: Vec<Vec<String>> = Vec::new();
    rows.push(vec![standings.organization.clone()]);
    rows.push(vec![format!(
        "{} {} Championship",
        standings.year,
        kind.name()
    )]);
    rows.push(standings_header(events));
    for (rank, driver) in standings.drivers.iter().enumerate() {
        rows.push(standings_row(
            driver,
            rank,
            indexed_trophy_eligible(driver, rank),
        ));
    }
    rows_to_csv(&rows)
}

/// The class championship tables, one ranked section per car class.
pub fn export_class_standings(standings: &ClassStandings) -> Result<String> {
    let mut rows: Vec<Vec<String>> = Vec::new();
    rows.push(vec![standings.organization.clone()]);
    rows.push(vec![format!(
        "{} {} Championship",
        standings.year,
        ChampionshipKind::Class.name()
    )]);
    for (car_class, drivers) in &standings.classes {
        let trophies = class_championship_trophy_count(drivers);
        let events = drivers
            .first()
            .map(|d| d.driver.event_count())
            .unwrap_or(0);
        rows.push(Vec::new());
        rows.push(vec![format!("{car_class} (Trophies: {trophies})")]);
        rows.push(standings_header(events));
        for (rank, entry) in drivers.iter().enumerate() {
            rows.push(standings_row(
                &entry.driver,
                rank,
                (rank as u32) < trophies,
            ));
        }
    }
    rows_to_csv(&rows)
}

fn standings_header(events: usize) -> Vec<String> {
    let mut header = vec!["Trophy".to_string(), "Rank".to_string(), "Driver".to_string()];
    for event in 1..=events {
        header.push(format!("Event #{event}"));
    }
    header.push(format!("Best {} of {}", events_to_count(events), events));
    header
}

fn standings_row(driver: &ChampionshipDriver, rank: usize, trophy: bool) -> Vec<String> {
    let mut row = vec![
        if trophy { "T".to_string() } else { String::new() },
        (rank + 1).to_string(),
        driver.name().to_string(),
    ];
    row.extend(driver.points().iter().map(|p| p.to_string()));
    row.push(driver.total_points().to_string());
    row
}
