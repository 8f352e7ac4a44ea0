mod commands;
mod history;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::audit::AuditArgs;
use commands::distribution::DistributionArgs;
use commands::history::HistoryArgs;
use commands::simulate::SimulateArgs;

/// Seller pricing calculations with decimal precision
#[derive(Parser)]
#[command(
    name = "precio",
    version,
    about = "Pricing and margin calculations for small sellers",
    long_about = "Derive a breakeven and an ideal selling price from unit cost, taxes, \
                  commission and overhead; audit an existing price for real profitability; \
                  break a price into its cost shares; and keep a bounded history of \
                  past calculations."
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
    /// Compute minimum and ideal selling prices for a product
    Simulate(SimulateArgs),
    /// Audit an already-chosen selling price for real profitability
    Audit(AuditArgs),
    /// Break a price into cost / tax / commission / overhead / profit shares
    Distribution(DistributionArgs),
    /// Browse and manage saved calculations
    History(HistoryArgs),
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
        Commands::Simulate(args) => commands::simulate::run_simulate(args),
        Commands::Audit(args) => commands::audit::run_audit(args),
        Commands::Distribution(args) => commands::distribution::run_distribution(args),
        Commands::History(args) => commands::history::run_history(args),
        Commands::Version => {
            println!("precio {}", env!("CARGO_PKG_VERSION"));
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
