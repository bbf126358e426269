//! Sarpa CLI: the `sarpa` command.

mod cli;
mod commands;
mod support;

use clap::Parser;
use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { input, json } => commands::validate::run(input, json),

        Commands::Rank {
            roster,
            kind,
            lat,
            lon,
            limit,
            config,
            json,
        } => commands::rank::run(commands::rank::Args {
            roster,
            kind,
            lat,
            lon,
            limit,
            config,
            json,
        }),

        Commands::Submit {
            input,
            roster,
            lat,
            lon,
            accuracy,
            config,
            json,
        } => commands::submit::run(commands::submit::Args {
            input,
            roster,
            lat,
            lon,
            accuracy,
            config,
            json,
        }),
    }
}
