mod commands;
mod input;
mod logging;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::schedule::ScheduleArgs;
use commands::scoring::{ModelArgs, ScoreArgs};
use commands::simulate::SimulateArgs;

/// SME credit simulator
#[derive(Parser)]
#[command(
    name = "csim",
    version,
    about = "SME credit simulator",
    long_about = "Scores an applicant's default risk with a decision tree fitted on seeded \
                  synthetic data, applies the approval policy and, when approved, prices \
                  the loan and builds its fixed-installment amortization schedule."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Log verbosity when RUST_LOG is unset (error, warn, info, debug, trace)
    #[arg(long, default_value = "warn", global = true)]
    log_level: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a full credit simulation: score, decide, price, schedule, contract
    Simulate(SimulateArgs),
    /// Default probability for one applicant
    Score(ScoreArgs),
    /// Fixed-installment amortization schedule
    Schedule(ScheduleArgs),
    /// Fit the risk model and describe the tree
    Model(ModelArgs),
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
    logging::init(&cli.log_level);

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Simulate(args) => commands::simulate::run_simulate(args),
        Commands::Score(args) => commands::scoring::run_score(args),
        Commands::Schedule(args) => commands::schedule::run_schedule(args),
        Commands::Model(args) => commands::scoring::run_model(args),
        Commands::Version => {
            println!("csim {}", env!("CARGO_PKG_VERSION"));
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
