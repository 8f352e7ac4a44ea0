//! Reverse margin analysis: audit a price the seller has already chosen.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::time::Instant;

use crate::costs::{commission_amount, tax_amount};
use crate::error::PricingError;
use crate::types::{
    round2, with_metadata, Analysis, Money, Percent, ReverseInput, ReverseSummary, Suggestion,
    SuggestionKind,
};
use crate::validate::validate_reverse;
use crate::PricingResult;

/// Margins below this (percent of total cost) earn a Warning verdict.
pub const LOW_MARGIN_THRESHOLD: Percent = dec!(10);

/// Markup over total costs recommended after a loss: 20% margin floor.
const LOSS_MARKUP: Decimal = dec!(1.20);

/// Markup over total costs recommended for a thin margin: 25%.
const LOW_MARGIN_MARKUP: Decimal = dec!(1.25);

/// What a chosen selling price actually earns once every cost is paid.
///
/// `margin_obtained_percent` is profit over total cost, not over price;
/// it is 0 when total costs are 0, so a free product sold at any price
/// reads as Good rather than dividing by zero.
pub fn analyze_price(input: &ReverseInput) -> PricingResult<Analysis<ReverseSummary>> {
    let start = Instant::now();

    let errors = validate_reverse(input);
    if !errors.is_empty() {
        return Err(PricingError::Validation { errors });
    }

    let tax = tax_amount(input.selling_price, &input.costs.taxes);
    let commission = commission_amount(input.selling_price, input.costs.sales_commission_percent);
    let total_costs = input.costs.unit_cost + tax + commission + input.costs.other_expenses;
    let real_profit = input.selling_price - total_costs;
    let margin_obtained = if total_costs > Decimal::ZERO {
        real_profit / total_costs * dec!(100)
    } else {
        Decimal::ZERO
    };

    let suggestion = suggest(real_profit, margin_obtained, total_costs);

    let summary = ReverseSummary {
        real_profit: round2(real_profit),
        margin_obtained_percent: round2(margin_obtained),
        tax_amount: round2(tax),
        commission_amount: round2(commission),
        total_costs: round2(total_costs),
        suggestion,
    };

    let elapsed = start.elapsed().as_micros() as u64;

    Ok(with_metadata(
        "Realized profit and cost-basis margin at the given selling price",
        input,
        Vec::new(),
        elapsed,
        summary,
    ))
}

/// Ordered verdict policy, first match wins:
/// loss, thin margin (below [`LOW_MARGIN_THRESHOLD`]), healthy.
///
/// Recommended prices are rounded **up to the next whole currency unit**
/// above the margin floor; a round number reads better on a price tag
/// than a two-decimal one.
pub fn suggest(real_profit: Money, margin_percent: Percent, total_costs: Money) -> Suggestion {
    if real_profit < Decimal::ZERO {
        return Suggestion {
            kind: SuggestionKind::Danger,
            message: "You are selling at a LOSS: the price does not cover total costs.".to_string(),
            recommended_price: Some((total_costs * LOSS_MARKUP).ceil()),
        };
    }

    if margin_percent < LOW_MARGIN_THRESHOLD {
        return Suggestion {
            kind: SuggestionKind::Warning,
            message: "Margin is very thin. Consider raising the price to a healthier level."
                .to_string(),
            recommended_price: Some((total_costs * LOW_MARGIN_MARKUP).ceil()),
        };
    }

    Suggestion {
        kind: SuggestionKind::Good,
        message: format!(
            "Healthy margin of {}%. Keep it up!",
            margin_percent.round_dp(1)
        ),
        recommended_price: None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
