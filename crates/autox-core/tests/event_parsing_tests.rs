//! End-to-end parses of both event export revisions.
//!
//! Exports are synthesized as CSV text; byte-level decoding and the
//! row-shape details are covered by unit tests inside the crate.

use autox_core::{parse_event, Error, LapTime, PaxTable, Penalty, TimeSelection};

const TWO_DAY_HEADER: &str = "Class,Class Category,Class Name,Number,First Name,Last Name,\
Car Year,Car Make,Car Model,Car Color,Member #,Rookie,Ladies,DSQ,Region,Best Run,\
Pax Index,Pax Time,Runs Day1,Runs Day2,Runs (Time/Cones/Penalty),,";

const LEGACY_HEADER: &str = "TR,RK,Pos,Nbr,Driver,Car,Region,Runs (Time/Cones/Penalty),,";

fn pax_table() -> PaxTable {
    PaxTable::parse("SS,0.83\nCS,0.81\n")
}

mod two_day_tests {
    use super::*;

    #[test]
    fn parses_classes_ranks_and_runs() {
        let export = format!(
            "{TWO_DAY_HEADER}\n\
             SS,Street,Super Street,42,Jane,Doe,2020,Chevrolet,Corvette,Red,1001,0,1,0,WDC,45.123,0.83,37.452,2,0,45.123,0,,47.9,1,\n\
             SS,Street,Super Street,7,John,Doe,2019,Chevrolet,Corvette,Blue,1002,1,0,0,WDC,46.5,0.83,38.595,2,0,46.5,1,,50.0,0,DNF\n\
             CS,Street,C Street,11,Ada,Lovelace,1999,Mazda,Miata,White,1003,0,0,0,WDC,52.1,0.81,42.201,1,0,52.1,0,,,,\n"
        );
        let results = parse_event(export.as_bytes(), &pax_table()).unwrap();

        assert_eq!(results.selection, TimeSelection::Day1);
        assert_eq!(results.len(), 2);

        let ss = results.get("SS").unwrap();
        assert_eq!(ss.drivers[0].name, "Jane Doe");
        assert_eq!(ss.drivers[0].position, Some(1));
        assert_eq!(ss.drivers[0].day1_times.len(), 2);
        assert_eq!(
            ss.drivers[0].best_time(TimeSelection::Day1),
            LapTime::clean(45.123, 0)
        );
        assert_eq!(ss.drivers[1].name, "John Doe");
        assert!(ss.drivers[1].rookie);
        assert_eq!(ss.drivers[1].day1_times[1].penalty, Some(Penalty::Dnf));

        let cs = results.get("CS").unwrap();
        assert_eq!(cs.drivers[0].pax_multiplier, 0.81);
        assert_eq!(cs.drivers[0].car_description, "1999 Mazda Miata");
    }

    #[test]
    fn dnf_only_driver_ranks_last() {
        let export = format!(
            "{TWO_DAY_HEADER}\n\
             SS,Street,Super Street,42,Jane,Doe,2020,Chevrolet,Corvette,Red,1001,0,0,0,WDC,45.123,0.83,37.452,1,0,45.123,0,\n\
             SS,Street,Super Street,7,John,Doe,2019,Chevrolet,Corvette,Blue,1002,0,0,0,WDC,47.5,0.83,39.425,1,0,46.5,1,\n\
             SS,Street,Super Street,3,Ada,Lovelace,1999,Mazda,Miata,White,1003,0,0,0,WDC,,0.83,,1,0,,,DNF\n"
        );
        let results = parse_event(export.as_bytes(), &pax_table()).unwrap();

        let ss = results.get("SS").unwrap();
        assert_eq!(ss.len(), 3);
        assert_eq!(ss.trophy_count, 1);
        assert_eq!(ss.drivers[0].name, "Jane Doe");
        assert_eq!(ss.drivers[0].position, Some(1));
        assert_eq!(
            ss.drivers[1].best_time(TimeSelection::Day1).time(),
            Some(48.5)
        );
        assert_eq!(ss.drivers[1].position, Some(2));
        assert_eq!(ss.drivers[2].name, "Ada Lovelace");
        assert_eq!(
            ss.drivers[2].best_time(TimeSelection::Day1).penalty,
            Some(Penalty::Dnf)
        );
        assert_eq!(ss.drivers[2].position, Some(3));
    }

    #[test]
    fn day2_runs_switch_ranking_to_combined() {
        let export = format!(
            "{TWO_DAY_HEADER}\n\
             SS,Street,Super Street,42,Jane,Doe,2020,Chevrolet,Corvette,Red,1001,0,0,0,WDC,45.0,0.83,37.35,1,1,45.0,0,,46.0,0,\n\
             SS,Street,Super Street,7,John,Doe,2019,Chevrolet,Corvette,Blue,1002,0,0,0,WDC,44.0,0.83,36.52,1,0,44.0,0,,,,\n"
        );
        let results = parse_event(export.as_bytes(), &pax_table()).unwrap();

        assert_eq!(results.selection, TimeSelection::Combined);
        let ss = results.get("SS").unwrap();
        // Jane has both days (91.0 combined); John ran only day 1 and
        // has no combined time, so he sorts after her
        assert_eq!(ss.drivers[0].name, "Jane Doe");
        assert_eq!(ss.drivers[0].combined().time(), Some(91.0));
        assert_eq!(ss.drivers[1].combined(), LapTime::dns());
    }

    #[test]
    fn claimed_best_run_without_runs_flags_the_driver() {
        let export = format!(
            "{TWO_DAY_HEADER}\n\
             SS,Street,Super Street,42,Jane,Doe,2020,Chevrolet,Corvette,Red,1001,0,0,0,WDC,45.123,0.83,,0,0,,,\n\
             SS,Street,Super Street,7,John,Doe,2019,Chevrolet,Corvette,Blue,1002,0,0,0,WDC,46.5,0.83,38.595,1,0,46.5,1,\n"
        );
        let results = parse_event(export.as_bytes(), &pax_table()).unwrap();
        assert_eq!(results.drivers_in_error(), vec!["Jane Doe (42 SS)"]);
    }

    #[test]
    fn missing_pax_column_falls_back_to_the_table() {
        let export = "Class,Number,First Name,Last Name,Runs Day1,Runs Day2,Runs (Time/Cones/Penalty),,\n\
             SS,42,Jane,Doe,1,0,45.0,0,\n";
        let results = parse_event(export.as_bytes(), &pax_table()).unwrap();
        let driver = &results.get("SS").unwrap().drivers[0];
        assert_eq!(driver.pax_multiplier, 0.83);
    }

    #[test]
    fn unknown_header_is_a_header_mismatch() {
        let export = "Name,Time\nJane Doe,45.0\n";
        match parse_event(export.as_bytes(), &pax_table()) {
            Err(Error::HeaderMismatch { found }) => assert!(found.contains("Name")),
            other => panic!("expected a header mismatch, got {other:?}"),
        }
    }

    #[test]
    fn short_row_names_the_offending_row() {
        let export = format!("{TWO_DAY_HEADER}\nSS,Street\n");
        match parse_event(export.as_bytes(), &pax_table()) {
            Err(Error::RowStructure { row, .. }) => assert_eq!(row, 2),
            other => panic!("expected a row structure error, got {other:?}"),
        }
    }
}

mod legacy_tests {
    use super::*;

    #[test]
    fn parses_class_sections_with_continuations() {
        let export = format!(
            "{LEGACY_HEADER}\n\
             ,,Street Category,,,,,,,\n\
             SS - Super Street,T,,1,42,Jane Doe,2020 Chevrolet Corvette,WDC,45.123,0,,47.9,1,\n\
             Results,,R,2,7,John Doe,2019 Chevrolet Corvette,WDC,46.5,1,,50.0,0,DNF\n\
             CS - C Street,T,,1,11,Ada Lovelace,1999 Mazda Miata,WDC,52.1,0,\n"
        );
        let results = parse_event(export.as_bytes(), &pax_table()).unwrap();

        assert_eq!(results.selection, TimeSelection::Day1);
        let ss = results.get("SS").unwrap();
        assert_eq!(ss.len(), 2);
        assert_eq!(ss.drivers[0].name, "Jane Doe");
        assert_eq!(ss.drivers[0].car_number, 42);
        assert_eq!(
            ss.drivers[0].best_time(TimeSelection::Day1),
            LapTime::clean(45.123, 0)
        );
        assert!(ss.drivers[1].rookie);
        assert_eq!(ss.drivers[1].pax_multiplier, 0.83);
        assert_eq!(results.get("CS").unwrap().len(), 1);
    }

    #[test]
    fn continuation_before_a_class_header_is_rejected() {
        let export = format!(
            "{LEGACY_HEADER}\n\
             Results,,R,2,7,John Doe,2019 Chevrolet Corvette,WDC,46.5,1,\n"
        );
        match parse_event(export.as_bytes(), &pax_table()) {
            Err(Error::RowStructure { row, .. }) => assert_eq!(row, 2),
            other => panic!("expected a row structure error, got {other:?}"),
        }
    }

    #[test]
    fn trophies_follow_field_size() {
        let drivers: String = (1..=7)
            .map(|n| {
                format!(
                    "{},T,,{n},{n},Driver {n},Car,WDC,{}.0,0,\n",
                    if n == 1 { "SS - Super Street" } else { "Results" },
                    45 + n
                )
            })
            .collect();
        let export = format!("{LEGACY_HEADER}\n{drivers}");
        let results = parse_event(export.as_bytes(), &pax_table()).unwrap();
        assert_eq!(results.get("SS").unwrap().trophy_count, 3);
    }
}
