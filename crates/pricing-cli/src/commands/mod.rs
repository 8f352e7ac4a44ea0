pub mod audit;
pub mod distribution;
pub mod history;
pub mod simulate;

use clap::Args;
use rust_decimal::Decimal;

use pricing_core::types::{CostInput, TaxSpec};

/// Cost flags shared by every calculation command.
#[derive(Args)]
pub struct CostFlags {
    /// Unit cost of the product or service
    #[arg(long)]
    pub unit_cost: Option<Decimal>,

    /// Tax as a percentage of the selling price
    #[arg(long, conflicts_with = "tax_fixed")]
    pub tax_percent: Option<Decimal>,

    /// Tax as a fixed amount per sale
    #[arg(long)]
    pub tax_fixed: Option<Decimal>,

    /// Sales commission as a percentage of the selling price
    #[arg(long, default_value = "0")]
    pub commission: Decimal,

    /// Other fixed expenses per sale (packaging, shipping, fees)
    #[arg(long, default_value = "0")]
    pub other_expenses: Decimal,
}

impl CostFlags {
    /// Assemble the engine's cost input. Omitting both tax flags means no tax.
    pub fn to_cost_input(&self) -> Result<CostInput, Box<dyn std::error::Error>> {
        let taxes = match (self.tax_percent, self.tax_fixed) {
            (Some(pct), None) => TaxSpec::Percentage(pct),
            (None, Some(amount)) => TaxSpec::Fixed(amount),
            (None, None) => TaxSpec::Percentage(Decimal::ZERO),
            (Some(_), Some(_)) => {
                return Err("--tax-percent and --tax-fixed are mutually exclusive".into())
            }
        };

        Ok(CostInput {
            unit_cost: self
                .unit_cost
                .ok_or("--unit-cost is required (or provide --input)")?,
            taxes,
            sales_commission_percent: self.commission,
            other_expenses: self.other_expenses,
        })
    }
}
