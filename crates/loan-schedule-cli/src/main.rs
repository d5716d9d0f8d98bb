mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::schedule::{RateArgs, ScheduleArgs};

/// Fixed-principal loan amortization schedules
#[derive(Parser)]
#[command(
    name = "loansched",
    version,
    about = "Fixed-principal loan amortization schedules",
    long_about = "Computes the period-by-period amortization schedule of a fixed-term, \
                  fixed-principal loan with decimal precision: per-period interest \
                  accrual, principal and interest portions, and the running balance, \
                  including the terminal balloon repayment."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the full amortization schedule for a loan
    Schedule(ScheduleArgs),
    /// Normalize a nominal annual rate to a per-period rate
    Rate(RateArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Schedule(args) => commands::schedule::run_schedule(args),
        Commands::Rate(args) => commands::schedule::run_rate(args),
        Commands::Version => {
            println!("loansched {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
