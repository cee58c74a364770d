mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;
use cli::{Args, Command};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let args = Args::parse();

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("autox_cli=warn,autox_core=warn"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    match args.command {
        Command::Event {
            results,
            output,
            format,
        } => commands::event::run(&results, args.pax_file.as_deref(), output.as_deref(), format),
        Command::Champ {
            results,
            class,
            pax,
            novice,
            ladies,
            new_ladies,
            output,
        } => commands::champ::run(commands::champ::ChampArgs {
            results,
            pax_file: args.pax_file,
            class,
            pax,
            novice,
            ladies,
            new_ladies,
            output,
        }),
    }
}
