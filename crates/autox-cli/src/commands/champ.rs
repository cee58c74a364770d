//! Champ command: merge one event into the season standings.

use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::{Context, Result};
use autox_core::{
    export_class_standings, export_indexed_standings, format_class_standings_console,
    format_indexed_standings_console, ChampionshipKind, ChampionshipResultsParser,
};
use chrono::Local;

use crate::commands::load_event;

pub struct ChampArgs {
    pub results: PathBuf,
    pub pax_file: Option<PathBuf>,
    pub class: Option<PathBuf>,
    pub pax: Option<PathBuf>,
    pub novice: Option<PathBuf>,
    pub ladies: Option<PathBuf>,
    pub new_ladies: Vec<String>,
    pub output: PathBuf,
}

pub fn run(args: ChampArgs) -> Result<()> {
    let event = load_event(&args.results, args.pax_file.as_deref())?;

    let mut prior = BTreeMap::new();
    for (kind, path) in [
        (ChampionshipKind::Class, &args.class),
        (ChampionshipKind::Pax, &args.pax),
        (ChampionshipKind::Novice, &args.novice),
        (ChampionshipKind::Ladies, &args.ladies),
    ] {
        if let Some(path) = path {
            let bytes = std::fs::read(path)
                .with_context(|| format!("reading standings {}", path.display()))?;
            prior.insert(kind, bytes);
        }
    }
    if prior.is_empty() {
        anyhow::bail!("no prior standings given; pass at least one of --class/--pax/--novice/--ladies");
    }

    let parser = ChampionshipResultsParser::new(&event);
    let (standings, errors) = parser.parse(&prior, &args.new_ladies);
    for (kind, error) in &errors {
        eprintln!("warning: {kind} standings skipped: {error}");
    }

    std::fs::create_dir_all(&args.output)
        .with_context(|| format!("creating {}", args.output.display()))?;

    let stamp = Local::now().format("%Y-%m-%d").to_string();
    let mut exported = 0usize;
    if let Some(class) = &standings.class {
        print!("{}", format_class_standings_console(class));
        write_csv("class", &stamp, &export_class_standings(class)?, &args, &mut exported)?;
    }
    for (kind, indexed) in [
        (ChampionshipKind::Pax, &standings.pax),
        (ChampionshipKind::Novice, &standings.novice),
        (ChampionshipKind::Ladies, &standings.ladies),
    ] {
        if let Some(indexed) = indexed {
            print!("{}", format_indexed_standings_console(kind, indexed));
            let name = kind.name().to_lowercase();
            write_csv(&name, &stamp, &export_indexed_standings(kind, indexed)?, &args, &mut exported)?;
        }
    }

    if exported == 0 {
        anyhow::bail!("every standings file failed to decode");
    }
    eprintln!("Updated {exported} championship(s)");
    Ok(())
}

fn write_csv(
    name: &str,
    stamp: &str,
    content: &str,
    args: &ChampArgs,
    exported: &mut usize,
) -> Result<()> {
    let path = args.output.join(format!("{stamp}_{name}_championship.csv"));
    std::fs::write(&path, content).with_context(|| format!("writing {}", path.display()))?;
    eprintln!("Wrote {}", path.display());
    *exported += 1;
    Ok(())
}
