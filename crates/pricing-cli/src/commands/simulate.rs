use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;
use std::path::PathBuf;

use pricing_core::pricing::calculate_pricing;
use pricing_core::types::ProductData;

use crate::commands::CostFlags;
use crate::history::{self, HistoryStore};
use crate::input;

/// Arguments for the forward pricing simulation
#[derive(Args)]
pub struct SimulateArgs {
    /// Product or service name
    #[arg(long)]
    pub name: Option<String>,

    #[command(flatten)]
    pub costs: CostFlags,

    /// Desired profit margin over breakeven, in percent
    #[arg(long)]
    pub margin: Option<Decimal>,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Save the calculation to the history store
    #[arg(long)]
    pub save: bool,

    /// History file location (defaults to ~/.precio/history.json)
    #[arg(long)]
    pub history_file: Option<PathBuf>,
}

pub fn run_simulate(args: SimulateArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let product: ProductData = match input::from_file_or_stdin(args.input.as_deref())? {
        Some(product) => product,
        None => ProductData {
            name: args.name.ok_or("--name is required (or provide --input)")?,
            costs: args.costs.to_cost_input()?,
            desired_margin_percent: args
                .margin
                .ok_or("--margin is required (or provide --input)")?,
        },
    };

    let analysis = calculate_pricing(&product)?;

    if args.save {
        let path = args
            .history_file
            .unwrap_or_else(history::default_history_path);
        let mut store = HistoryStore::open(&path)?;
        store.add(product, analysis.result.clone());
        store.save()?;
    }

    Ok(serde_json::to_value(analysis)?)
}
