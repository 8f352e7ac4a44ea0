//! Caller-facing input validation.
//!
//! Rules are collected as human-readable messages rather than failing on
//! the first problem, so a form or CLI can report everything at once. The
//! calculation entry points refuse to run while any message is present.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::types::{CostInput, Percent, ProductData, ReverseInput, TaxSpec};

const MAX_COMMISSION: Percent = dec!(100);

/// Validate the cost structure shared by the forward and reverse flows.
///
/// Also rejects the arithmetically impossible case where percentage tax
/// plus commission reaches 100% of the price, since breakeven is then
/// infinite or negative.
pub fn validate_cost_input(costs: &CostInput) -> Vec<String> {
    let mut errors = Vec::new();

    if costs.unit_cost < Decimal::ZERO {
        errors.push("Unit cost must be zero or positive".to_string());
    }

    if costs.taxes.value() < Decimal::ZERO {
        errors.push("Taxes must be zero or positive".to_string());
    }

    if costs.sales_commission_percent < Decimal::ZERO
        || costs.sales_commission_percent > MAX_COMMISSION
    {
        errors.push("Sales commission must be between 0% and 100%".to_string());
    }

    if costs.other_expenses < Decimal::ZERO {
        errors.push("Other expenses must be zero or positive".to_string());
    }

    let percentage_load = match costs.taxes {
        TaxSpec::Percentage(tax_pct) => tax_pct + costs.sales_commission_percent,
        TaxSpec::Fixed(_) => costs.sales_commission_percent,
    };
    if percentage_load >= MAX_COMMISSION {
        errors.push(
            "Combined percentage costs (taxes + commission) must stay below 100% of the price"
                .to_string(),
        );
    }

    errors
}

/// Validate a full forward-pricing request.
pub fn validate_product(product: &ProductData) -> Vec<String> {
    let mut errors = validate_cost_input(&product.costs);

    if product.name.trim().is_empty() {
        errors.insert(0, "Product name is required".to_string());
    }

    if product.desired_margin_percent < Decimal::ZERO {
        errors.push("Desired profit margin must be zero or positive".to_string());
    }

    errors
}

/// Validate a reverse-analysis request.
pub fn validate_reverse(input: &ReverseInput) -> Vec<String> {
    let mut errors = validate_cost_input(&input.costs);

    if input.selling_price <= Decimal::ZERO {
        errors.insert(0, "Selling price must be greater than zero".to_string());
    }

    errors
}
