//! `pea`: prime and base editing analysis of amplicon reads.

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;
use log::info;

use crate::cli::{Cli, Command};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();
    info!("Logging set to {}", log_level);

    match &cli.command {
        Command::AlignMutations(args) => commands::align_mutations(args),
        Command::PrimeEditor(args) => commands::prime_editor(args),
        Command::BeStats(args) => commands::be_stats(args),
        Command::SplitAlign(args) => commands::split_align(args),
    }?;

    info!("Program end.");
    Ok(())
}
