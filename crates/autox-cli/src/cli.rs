//! CLI argument definitions for autox.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "autox")]
#[command(about = "Autocross results and championship scoring", version)]
pub struct Args {
    /// PAX multiplier table (class,multiplier lines)
    #[arg(long, value_name = "FILE", env = "AUTOX_PAX_FILE", global = true)]
    pub pax_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Score a raw event export into ranked results
    Event {
        /// Event export file (CSV from the timing software)
        results: PathBuf,
        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Output format
        #[arg(short, long, value_enum, default_value = "table")]
        format: EventFormat,
    },
    /// Merge an event into the season championship standings
    Champ {
        /// Event export file (CSV from the timing software)
        results: PathBuf,
        /// Prior class championship standings (.xls)
        #[arg(long, value_name = "FILE")]
        class: Option<PathBuf>,
        /// Prior PAX championship standings (.xls)
        #[arg(long, value_name = "FILE")]
        pax: Option<PathBuf>,
        /// Prior novice championship standings (.xls)
        #[arg(long, value_name = "FILE")]
        novice: Option<PathBuf>,
        /// Prior ladies championship standings (.xls)
        #[arg(long, value_name = "FILE")]
        ladies: Option<PathBuf>,
        /// Driver newly entering the ladies championship (repeatable)
        #[arg(long = "new-lady", value_name = "NAME")]
        new_ladies: Vec<String>,
        /// Directory for the updated standings CSVs
        #[arg(short, long, default_value = ".")]
        output: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
pub enum EventFormat {
    /// Colored console tables
    Table,
    /// Per-class result tables (CSV)
    Class,
    /// Event-wide index (PAX) table
    Index,
    /// Full results as JSON
    Json,
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use clap::{CommandFactory, Parser};

    use super::*;

    #[test]
    fn command_definition_is_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn event_defaults_to_the_table_format() {
        let args = Args::try_parse_from(["autox", "event", "event.csv"]).unwrap();
        match args.command {
            Command::Event { results, output, format } => {
                assert_eq!(results, PathBuf::from("event.csv"));
                assert!(output.is_none());
                assert!(matches!(format, EventFormat::Table));
            }
            _ => panic!("expected the event command"),
        }
    }

    #[test]
    fn event_accepts_an_explicit_format() {
        let args =
            Args::try_parse_from(["autox", "event", "event.csv", "--format", "json"]).unwrap();
        match args.command {
            Command::Event { format, .. } => assert!(matches!(format, EventFormat::Json)),
            _ => panic!("expected the event command"),
        }
    }

    #[test]
    fn champ_collects_repeated_new_lady_flags() {
        let args = Args::try_parse_from([
            "autox",
            "champ",
            "event.csv",
            "--pax",
            "pax.xls",
            "--novice",
            "novice.xls",
            "--new-lady",
            "Jane Doe",
            "--new-lady",
            "Ada Lovelace",
        ])
        .unwrap();
        match args.command {
            Command::Champ { pax, novice, new_ladies, output, .. } => {
                assert_eq!(pax, Some(PathBuf::from("pax.xls")));
                assert_eq!(novice, Some(PathBuf::from("novice.xls")));
                assert_eq!(new_ladies, vec!["Jane Doe", "Ada Lovelace"]);
                assert_eq!(output, PathBuf::from("."));
            }
            _ => panic!("expected the champ command"),
        }
    }

    #[test]
    fn pax_file_is_accepted_after_the_subcommand() {
        let args =
            Args::try_parse_from(["autox", "event", "event.csv", "--pax-file", "pax.csv"]).unwrap();
        assert_eq!(args.pax_file, Some(PathBuf::from("pax.csv")));
    }

    #[test]
    fn event_requires_a_results_file() {
        assert!(Args::try_parse_from(["autox", "event"]).is_err());
    }
}
