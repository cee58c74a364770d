use crate::championship::{ChampionshipDriver, ClassChampionshipDriver};
use crate::scoring::{attendance_cutoff, MAX_EVENT_POINTS};

/// Near-perfect event score used by the attendance override: a driver
/// averaging at least this many points per counted event is trophy
/// qualified regardless of field size.
const OVERRIDE_POINTS_PER_EVENT: i64 = 9_600;

/// Trophies for a flat field of `driver_count` entrants.
///
/// One trophy per three entrants in small fields, slowing to one per
/// four past ten entrants. Fields of one get none.
pub fn flat_trophy_count(driver_count: usize) -> u32 {
    if driver_count <= 1 {
        0
    } else if driver_count >= 10 {
        3 + ((driver_count as f64 - 9.0) / 4.0).ceil() as u32
    } else {
        ((driver_count as f64) / 3.0).ceil() as u32
    }
}

/// Trophies for one class's championship standings.
///
/// The field-size default is based on the average attendance across the
/// season. An attendance override then rewards strong, consistent
/// drivers even in small fields: anyone at or above 9600 points per
/// cutoff event with the minimum attendance is counted, and the larger
/// of the two figures wins.
pub fn class_championship_trophy_count(drivers: &[ClassChampionshipDriver]) -> u32 {
    let events = match drivers.first() {
        Some(first) => first.driver.event_count(),
        None => return 0,
    };
    if events == 0 {
        return 0;
    }

    let cutoff = attendance_cutoff(events);
    let attended_entries: usize = drivers
        .iter()
        .map(|d| d.driver.attended_events())
        .sum();
    let average_field = attended_entries as f64 / events as f64;
    let default = flat_trophy_count(average_field.round() as usize);

    let override_count = drivers
        .iter()
        .filter(|d| {
            d.driver.total_points() >= (cutoff as i64) * OVERRIDE_POINTS_PER_EVENT
                && d.driver.attended_events() >= cutoff
        })
        .count() as u32;

    default.max(override_count)
}

/// Trophy eligibility in a flat (PAX/novice/ladies) championship:
/// the top three ranks only, and only with minimum attendance.
///
/// The hard top-3 cap sits oddly next to the field-proportional class
/// rule, but both are long-standing; they are kept separate on purpose.
pub fn indexed_trophy_eligible(driver: &ChampionshipDriver, rank: usize) -> bool {
    rank < 3 && driver.attended_events() >= attendance_cutoff(driver.event_count())
}
