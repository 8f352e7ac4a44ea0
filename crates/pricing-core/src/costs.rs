use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::types::{Money, Percent, TaxSpec};

const HUNDRED: Decimal = dec!(100);

/// Tax due on a base amount. A percentage tax scales with the base; a
/// fixed tax is returned as-is, independent of it.
///
/// Negative values are a caller-validation concern, not enforced here.
pub fn tax_amount(base: Money, taxes: &TaxSpec) -> Money {
    match taxes {
        TaxSpec::Percentage(pct) => base * pct / HUNDRED,
        TaxSpec::Fixed(amount) => *amount,
    }
}

/// Sales commission due on a selling price.
pub fn commission_amount(price: Money, commission_percent: Percent) -> Money {
    price * commission_percent / HUNDRED
}
