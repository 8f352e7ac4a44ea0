use clap::Args;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;

use pricing_core::distribution::{cost_distribution, price_comparison};
use pricing_core::types::{CostInput, Money, Percent, ProductData};
use pricing_core::validate::validate_cost_input;
use pricing_core::PricingError;

use crate::commands::CostFlags;
use crate::input;

/// Arguments for the cost-share breakdown
#[derive(Args)]
pub struct DistributionArgs {
    /// Reference price to split. Defaults to the ideal price when
    /// --margin is given.
    #[arg(long)]
    pub price: Option<Decimal>,

    /// Desired margin in percent, used to derive the ideal price when
    /// --price is omitted
    #[arg(long)]
    pub margin: Option<Decimal>,

    #[command(flatten)]
    pub costs: CostFlags,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

/// File/stdin shape for the distribution command.
#[derive(Deserialize)]
struct DistributionRequest {
    #[serde(default)]
    reference_price: Option<Money>,
    #[serde(default)]
    desired_margin_percent: Option<Percent>,
    #[serde(flatten)]
    costs: CostInput,
}

pub fn run_distribution(args: DistributionArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let request: DistributionRequest = match input::from_file_or_stdin(args.input.as_deref())? {
        Some(request) => request,
        None => DistributionRequest {
            reference_price: args.price,
            desired_margin_percent: args.margin,
            costs: args.costs.to_cost_input()?,
        },
    };

    let errors = validate_cost_input(&request.costs);
    if !errors.is_empty() {
        return Err(PricingError::Validation { errors }.into());
    }

    // Explicit price wins; otherwise derive the ideal price from the
    // margin and include the min/ideal comparison alongside the shares.
    let (reference_price, comparison) = match (request.reference_price, request.desired_margin_percent)
    {
        (Some(price), _) => (price, None),
        (None, Some(margin)) => {
            let product = ProductData {
                name: "(unnamed)".to_string(),
                costs: request.costs.clone(),
                desired_margin_percent: margin,
            };
            let comparison = price_comparison(&product, None)?;
            (comparison.ideal, Some(comparison))
        }
        (None, None) => {
            return Err("--price is required (or --margin to use the ideal price)".into())
        }
    };

    let distribution = cost_distribution(&request.costs, reference_price)?;

    let mut value = serde_json::json!({
        "reference_price": reference_price,
        "distribution": distribution,
    });
    if let Some(comparison) = comparison {
        value["comparison"] = serde_json::to_value(comparison)?;
    }
    Ok(value)
}
