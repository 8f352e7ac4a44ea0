use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use pricing_core::reverse::analyze_price;
use pricing_core::types::ReverseInput;

use crate::commands::CostFlags;
use crate::input;

/// Arguments for auditing an already-chosen selling price
#[derive(Args)]
pub struct AuditArgs {
    /// The price currently charged
    #[arg(long)]
    pub selling_price: Option<Decimal>,

    #[command(flatten)]
    pub costs: CostFlags,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_audit(args: AuditArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let reverse: ReverseInput = match input::from_file_or_stdin(args.input.as_deref())? {
        Some(reverse) => reverse,
        None => ReverseInput {
            selling_price: args
                .selling_price
                .ok_or("--selling-price is required (or provide --input)")?,
            costs: args.costs.to_cost_input()?,
        },
    };

    let analysis = analyze_price(&reverse)?;
    Ok(serde_json::to_value(analysis)?)
}
