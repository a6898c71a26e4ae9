//! Outbreak CLI - play or batch-run the epidemic management game.

// Allow print in the CLI binary
#![allow(clippy::print_stdout, clippy::print_stderr)]

mod cli;

use clap::{Parser, Subcommand};
use std::process::ExitCode;

/// Outbreak - a turn-based epidemic management game
#[derive(Parser, Debug)]
#[command(name = "outbreak")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Play interactively at the terminal
    Play {
        /// Random seed (default: random)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Skip the compartment chart after the game ends
        #[arg(long)]
        no_chart: bool,
    },

    /// Run a scripted game with a fixed policy and print the outcome
    Run {
        /// Total population (default: random in the game's range)
        #[arg(short, long)]
        population: Option<u64>,

        /// Random seed for the population draw (default: random)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Maximum weeks to simulate (default: 52)
        #[arg(short, long, default_value = "52")]
        weeks: u32,

        /// Distancing regime for the whole run: 0, 1, or 2
        #[arg(short, long, default_value = "0")]
        distancing: String,

        /// Wealth spent on contact tracing in week 1
        #[arg(short, long, default_value = "0")]
        tracing_budget: u64,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: cli::OutputFormat,

        /// Include the full weekly series in JSON output
        #[arg(long)]
        series: bool,
    },
}

fn main() -> ExitCode {
    let args = Args::parse();

    let result = match args.command {
        Commands::Play { seed, no_chart } => cli::play::execute(seed, no_chart),

        Commands::Run {
            population,
            seed,
            weeks,
            distancing,
            tracing_budget,
            format,
            series,
        } => cli::run::execute(population, seed, weeks, &distancing, tracing_budget, format, series),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
