//! Forward pricing engine: breakeven and margin-satisfying prices.
//!
//! The one numerically delicate spot is the fixed-tax case. The commission
//! is a percentage of the final price while the tax is a constant, so the
//! breakeven price appears on both sides of its own equation. We solve it
//! with a fixed-point iteration whose tolerance and cap are exported as
//! constants. The iteration is a linear contraction with ratio
//! `r = commission/100`, which makes the remaining distance to the fixed
//! point `step * r / (1 - r)` after each step; the loop stops once that
//! projected error is below one cent, so the result agrees with the
//! closed form `(unit_cost + tax + other) / (1 - commission/100)` within
//! one cent for any commission below 100%.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::time::Instant;

use crate::costs::{commission_amount, tax_amount};
use crate::error::PricingError;
use crate::types::{
    round2, with_metadata, Analysis, CostInput, Money, PricingSummary, ProductData, TaxSpec,
};
use crate::validate::validate_product;
use crate::PricingResult;

/// Convergence tolerance for the fixed-tax breakeven iteration: the
/// result is within one cent of the true fixed point.
pub const PRICE_TOLERANCE: Decimal = dec!(0.01);

/// Safety cap on breakeven iterations. Commissions up to 95% converge by
/// tolerance well before this; the cap only binds in the last few percent
/// before the 100% validation boundary.
pub const MAX_PRICE_ITERATIONS: u32 = 500;

const HUNDRED: Decimal = dec!(100);

/// Smallest price at which the sale neither earns nor loses money.
///
/// Percentage tax: tax and commission are both linear in the price, so
/// `P = (unit_cost + other) / (1 - (tax% + commission%)/100)`.
/// Fixed tax: solved by fixed-point iteration (see module docs).
///
/// Inputs where the percentage load reaches 100% are rejected by
/// [`crate::validate::validate_cost_input`] before this runs; if called
/// anyway the solver fails rather than returning a negative or infinite
/// price. Rounded to 2 decimal places at the end, not per iteration.
pub fn minimum_price(costs: &CostInput) -> PricingResult<Money> {
    let base = costs.unit_cost + costs.other_expenses;

    let price = match costs.taxes {
        TaxSpec::Percentage(tax_pct) => {
            let load = (tax_pct + costs.sales_commission_percent) / HUNDRED;
            let denominator = Decimal::ONE - load;
            if denominator <= Decimal::ZERO {
                return Err(PricingError::FinancialImpossibility(format!(
                    "percentage tax + commission consume {}% of the price; breakeven does not exist",
                    tax_pct + costs.sales_commission_percent
                )));
            }
            base / denominator
        }
        TaxSpec::Fixed(tax) => {
            if costs.sales_commission_percent >= HUNDRED {
                return Err(PricingError::FinancialImpossibility(format!(
                    "commission of {}% consumes the whole price; breakeven does not exist",
                    costs.sales_commission_percent
                )));
            }
            let fixed_costs = base + tax;
            let ratio = costs.sales_commission_percent / HUNDRED;
            let mut price = fixed_costs;
            for _ in 0..MAX_PRICE_ITERATIONS {
                let commission = commission_amount(price, costs.sales_commission_percent);
                let next = fixed_costs + commission;
                let step = (next - price).abs();
                price = next;
                // Remaining error of a linear contraction is step * r/(1-r).
                if step * ratio < PRICE_TOLERANCE * (Decimal::ONE - ratio) {
                    break;
                }
            }
            price
        }
    };

    Ok(round2(price))
}

/// Minimum price marked up by the desired margin, rounded to 2dp.
pub fn ideal_price(product: &ProductData) -> PricingResult<Money> {
    let minimum = minimum_price(&product.costs)?;
    Ok(round2(
        minimum * (Decimal::ONE + product.desired_margin_percent / HUNDRED),
    ))
}

/// Full forward pricing run: validate, solve for the minimum and ideal
/// prices, then recompute every cost component **at the ideal price**.
/// Tax and commission bases differ between the two prices, so nothing is
/// reused from the breakeven solve. Each monetary field is derived from
/// unrounded intermediates and rounded once.
pub fn calculate_pricing(product: &ProductData) -> PricingResult<Analysis<PricingSummary>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let errors = validate_product(product);
    if !errors.is_empty() {
        return Err(PricingError::Validation { errors });
    }

    let minimum = minimum_price(&product.costs)?;
    let ideal = round2(minimum * (Decimal::ONE + product.desired_margin_percent / HUNDRED));

    let tax = tax_amount(ideal, &product.costs.taxes);
    let commission = commission_amount(ideal, product.costs.sales_commission_percent);
    let total_costs = product.costs.unit_cost + tax + commission + product.costs.other_expenses;
    let gross_profit = ideal - product.costs.unit_cost;
    let net_profit = ideal - total_costs;

    if product.desired_margin_percent.is_zero() {
        warnings.push("Desired margin is 0%; the ideal price is the breakeven price.".into());
    }
    if let TaxSpec::Percentage(tax_pct) = product.costs.taxes {
        let load = tax_pct + product.costs.sales_commission_percent;
        if load >= dec!(90) {
            warnings.push(format!(
                "Percentage costs consume {load}% of the price; the breakeven price is extremely sensitive to small input changes."
            ));
        }
    }

    let summary = PricingSummary {
        minimum_price: minimum,
        ideal_price: ideal,
        tax_amount: round2(tax),
        commission_amount: round2(commission),
        total_costs: round2(total_costs),
        gross_profit: round2(gross_profit),
        net_profit: round2(net_profit),
    };

    let elapsed = start.elapsed().as_micros() as u64;

    Ok(with_metadata(
        "Breakeven solve plus desired-margin markup, costs recomputed at the ideal price",
        product,
        warnings,
        elapsed,
        summary,
    ))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CostInput;
    use rust_decimal_macros::dec;

    fn sample_product() -> ProductData {
        ProductData {
            name: "Handmade mug".to_string(),
            costs: CostInput {
                unit_cost: dec!(50),
                taxes: TaxSpec::Percentage(dec!(10)),
                sales_commission_percent: dec!(5),
                other_expenses: dec!(10),
            },
            desired_margin_percent: dec!(20),
        }
    }

    #[test]
    fn test_minimum_price_percentage_closed_form() {
        // (50 + 10) / (1 - 0.15) = 70.588... -> 70.59
        let price = minimum_price(&sample_product().costs).unwrap();
        assert_eq!(price, dec!(70.59));
    }

    #[test]
    fn test_minimum_price_fixed_tax_iteration() {
        // Closed form: (100 + 20) / (1 - 0.10) = 133.33...
        let costs = CostInput {
            unit_cost: dec!(100),
            taxes: TaxSpec::Fixed(dec!(20)),
            sales_commission_percent: dec!(10),
            other_expenses: dec!(0),
        };
        let price = minimum_price(&costs).unwrap();
        assert!(
            (price - dec!(133.33)).abs() <= dec!(0.01),
            "Expected ~133.33, got {price}"
        );
    }

    #[test]
    fn test_fixed_tax_matches_closed_form_across_commissions() {
        let mut pct = Decimal::ZERO;
        while pct <= dec!(95) {
            let costs = CostInput {
                unit_cost: dec!(80),
                taxes: TaxSpec::Fixed(dec!(12.50)),
                sales_commission_percent: pct,
                other_expenses: dec!(7.50),
            };
            let iterated = minimum_price(&costs).unwrap();
            let closed = round2(dec!(100) / (Decimal::ONE - pct / dec!(100)));
            assert!(
                (iterated - closed).abs() <= dec!(0.01),
                "commission {pct}%: iterated {iterated} vs closed form {closed}"
            );
            pct += dec!(5);
        }
    }

    #[test]
    fn test_fixed_tax_zero_commission_is_plain_sum() {
        let costs = CostInput {
            unit_cost: dec!(30),
            taxes: TaxSpec::Fixed(dec!(5)),
            sales_commission_percent: dec!(0),
            other_expenses: dec!(2),
        };
        assert_eq!(minimum_price(&costs).unwrap(), dec!(37));
    }

    #[test]
    fn test_percentage_load_at_100_fails() {
        let costs = CostInput {
            unit_cost: dec!(50),
            taxes: TaxSpec::Percentage(dec!(60)),
            sales_commission_percent: dec!(40),
            other_expenses: dec!(0),
        };
        match minimum_price(&costs) {
            Err(PricingError::FinancialImpossibility(_)) => {}
            other => panic!("Expected FinancialImpossibility, got {other:?}"),
        }
    }

    #[test]
    fn test_full_commission_with_fixed_tax_fails() {
        let costs = CostInput {
            unit_cost: dec!(50),
            taxes: TaxSpec::Fixed(dec!(5)),
            sales_commission_percent: dec!(100),
            other_expenses: dec!(0),
        };
        assert!(minimum_price(&costs).is_err());
    }

    #[test]
    fn test_ideal_at_least_minimum() {
        let product = sample_product();
        let minimum = minimum_price(&product.costs).unwrap();
        let ideal = ideal_price(&product).unwrap();
        assert!(ideal >= minimum);

        let mut flat = product.clone();
        flat.desired_margin_percent = Decimal::ZERO;
        assert_eq!(ideal_price(&flat).unwrap(), minimum);
    }

    #[test]
    fn test_reference_scenario() {
        // unitCost=50, tax=10%, commission=5%, other=10, margin=20%
        // minimum = 60/0.85 = 70.59, ideal = 70.59*1.2 = 84.71
        let result = calculate_pricing(&sample_product()).unwrap();
        let out = &result.result;

        assert_eq!(out.minimum_price, dec!(70.59));
        assert_eq!(out.ideal_price, dec!(84.71));
        assert_eq!(out.tax_amount, dec!(8.47));
        assert_eq!(out.commission_amount, dec!(4.24));
        assert_eq!(out.total_costs, dec!(72.71));
        assert_eq!(out.gross_profit, dec!(34.71));
        assert_eq!(out.net_profit, dec!(12.00));
    }

    #[test]
    fn test_costs_recomputed_at_ideal_price() {
        // tax_amount must be 10% of the ideal price, not of the minimum
        let result = calculate_pricing(&sample_product()).unwrap();
        let out = &result.result;
        assert_eq!(out.tax_amount, round2(out.ideal_price * dec!(0.10)));
    }

    #[test]
    fn test_validation_runs_before_solver() {
        let mut product = sample_product();
        product.name.clear();
        product.costs.unit_cost = dec!(-1);
        match calculate_pricing(&product) {
            Err(PricingError::Validation { errors }) => {
                assert_eq!(errors.len(), 2);
            }
            other => panic!("Expected Validation, got {other:?}"),
        }
    }

    #[test]
    fn test_zero_margin_warning() {
        let mut product = sample_product();
        product.desired_margin_percent = Decimal::ZERO;
        let result = calculate_pricing(&product).unwrap();
        assert!(result.warnings.iter().any(|w| w.contains("0%")));
    }

    #[test]
    fn test_high_percentage_load_warning() {
        let mut product = sample_product();
        product.costs.taxes = TaxSpec::Percentage(dec!(85));
        product.costs.sales_commission_percent = dec!(9);
        let result = calculate_pricing(&product).unwrap();
        assert!(result.warnings.iter().any(|w| w.contains("sensitive")));
    }
}
