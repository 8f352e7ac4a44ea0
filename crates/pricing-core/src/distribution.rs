//! Cost distribution: express a price's components as shares of the price.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::costs::{commission_amount, tax_amount};
use crate::error::PricingError;
use crate::pricing::{ideal_price, minimum_price};
use crate::types::{round2, CostDistribution, CostInput, Money, PriceComparison, ProductData};
use crate::PricingResult;

/// Break a reference price into unit cost, taxes, commission, other
/// expenses and the remaining profit, each as a percentage of that price.
///
/// The caller chooses the reference price (typically the ideal price);
/// nothing here assumes it equals the minimum or ideal price. The five
/// shares partition the price, so they sum to 100 up to rounding. Profit
/// share goes negative when the price is below breakeven.
pub fn cost_distribution(
    costs: &CostInput,
    reference_price: Money,
) -> PricingResult<CostDistribution> {
    if reference_price <= Decimal::ZERO {
        return Err(PricingError::DivisionByZero {
            context: "cost distribution reference price".to_string(),
        });
    }

    let tax = tax_amount(reference_price, &costs.taxes);
    let commission = commission_amount(reference_price, costs.sales_commission_percent);
    let total_costs = costs.unit_cost + tax + commission + costs.other_expenses;
    let profit = reference_price - total_costs;

    let share = |amount: Money| round2(amount / reference_price * dec!(100));

    Ok(CostDistribution {
        cost: share(costs.unit_cost),
        taxes: share(tax),
        commission: share(commission),
        other_expenses: share(costs.other_expenses),
        profit: share(profit),
    })
}

/// Minimum / ideal / optional current price, bundled for bar-style
/// comparison views.
pub fn price_comparison(
    product: &ProductData,
    current: Option<Money>,
) -> PricingResult<PriceComparison> {
    Ok(PriceComparison {
        minimum: minimum_price(&product.costs)?,
        ideal: ideal_price(product)?,
        current,
    })
}
