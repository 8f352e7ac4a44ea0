use pricing_core::distribution::cost_distribution;
use pricing_core::pricing::{calculate_pricing, ideal_price, minimum_price};
use pricing_core::reverse::analyze_price;
use pricing_core::types::{CostInput, ProductData, ReverseInput, SuggestionKind, TaxSpec};
use pricing_core::PricingError;

use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn mug() -> ProductData {
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

// ===========================================================================
// Forward engine reference scenarios
// ===========================================================================

#[test]
fn test_percentage_tax_reference_scenario() {
    let out = calculate_pricing(&mug()).unwrap().result;

    assert_eq!(out.minimum_price, dec!(70.59));
    assert_eq!(out.ideal_price, dec!(84.71));
    assert_eq!(out.tax_amount, dec!(8.47));
    assert_eq!(out.commission_amount, dec!(4.24));
    assert_eq!(out.total_costs, dec!(72.71));
    assert_eq!(out.net_profit, dec!(12.00));
}

#[test]
fn test_fixed_tax_reference_scenario() {
    // unitCost=100, fixed tax 20, commission 10%, no other expenses:
    // breakeven is 120/0.9 = 133.33
    let costs = CostInput {
        unit_cost: dec!(100),
        taxes: TaxSpec::Fixed(dec!(20)),
        sales_commission_percent: dec!(10),
        other_expenses: dec!(0),
    };
    let minimum = minimum_price(&costs).unwrap();
    assert!(
        (minimum - dec!(133.33)).abs() <= dec!(0.01),
        "Expected ~133.33, got {minimum}"
    );
}

#[test]
fn test_ideal_never_below_minimum() {
    for margin in [dec!(0), dec!(5), dec!(20), dec!(100), dec!(350)] {
        let mut product = mug();
        product.desired_margin_percent = margin;
        let minimum = minimum_price(&product.costs).unwrap();
        let ideal = ideal_price(&product).unwrap();
        assert!(
            ideal >= minimum,
            "margin {margin}%: ideal {ideal} fell below minimum {minimum}"
        );
    }
}

// ===========================================================================
// Forward / reverse consistency
// ===========================================================================

#[test]
fn test_selling_at_ideal_price_earns_net_profit() {
    let product = mug();
    let forward = calculate_pricing(&product).unwrap().result;

    let reverse = analyze_price(&ReverseInput {
        selling_price: forward.ideal_price,
        costs: product.costs,
    })
    .unwrap()
    .result;

    assert!(
        (reverse.real_profit - forward.net_profit).abs() <= dec!(0.01),
        "Reverse profit {} vs forward net profit {}",
        reverse.real_profit,
        forward.net_profit
    );
    assert!((reverse.total_costs - forward.total_costs).abs() <= dec!(0.01));
}

#[test]
fn test_selling_at_ideal_price_realizes_desired_margin() {
    // Cost-basis margin equals the desired markup when no cost component
    // scales with the price: fixed tax, no commission.
    let product = ProductData {
        name: "Print run".to_string(),
        costs: CostInput {
            unit_cost: dec!(80),
            taxes: TaxSpec::Fixed(dec!(12)),
            sales_commission_percent: dec!(0),
            other_expenses: dec!(8),
        },
        desired_margin_percent: dec!(25),
    };
    let forward = calculate_pricing(&product).unwrap().result;

    let reverse = analyze_price(&ReverseInput {
        selling_price: forward.ideal_price,
        costs: product.costs,
    })
    .unwrap()
    .result;

    assert!(
        (reverse.margin_obtained_percent - product.desired_margin_percent).abs() <= dec!(0.05),
        "Expected ~25% margin, got {}",
        reverse.margin_obtained_percent
    );
}

#[test]
fn test_selling_at_minimum_price_breaks_even() {
    let product = mug();
    let minimum = minimum_price(&product.costs).unwrap();

    let reverse = analyze_price(&ReverseInput {
        selling_price: minimum,
        costs: product.costs,
    })
    .unwrap()
    .result;

    assert!(
        reverse.real_profit.abs() <= dec!(0.01),
        "Breakeven price should earn ~0, got {}",
        reverse.real_profit
    );
}

// ===========================================================================
// Suggestion policy
// ===========================================================================

#[test]
fn test_reverse_loss_reference_scenario() {
    // price 50, cost 60, nothing else: -10 profit, Danger, recommend 72
    let out = analyze_price(&ReverseInput {
        selling_price: dec!(50),
        costs: CostInput {
            unit_cost: dec!(60),
            taxes: TaxSpec::Fixed(dec!(0)),
            sales_commission_percent: dec!(0),
            other_expenses: dec!(0),
        },
    })
    .unwrap()
    .result;

    assert_eq!(out.real_profit, dec!(-10));
    assert_eq!(out.suggestion.kind, SuggestionKind::Danger);
    assert_eq!(out.suggestion.recommended_price, Some(dec!(72)));
}

#[test]
fn test_any_loss_is_danger() {
    // A barely-unprofitable price must stay Danger across tax kinds.
    for taxes in [TaxSpec::Percentage(dec!(10)), TaxSpec::Fixed(dec!(5))] {
        let costs = CostInput {
            unit_cost: dec!(40),
            taxes,
            sales_commission_percent: dec!(5),
            other_expenses: dec!(3),
        };
        let minimum = minimum_price(&costs).unwrap();
        let out = analyze_price(&ReverseInput {
            selling_price: minimum - dec!(1),
            costs,
        })
        .unwrap()
        .result;

        assert!(out.real_profit < Decimal::ZERO);
        assert_eq!(out.suggestion.kind, SuggestionKind::Danger);
    }
}

// ===========================================================================
// Cost distribution
// ===========================================================================

#[test]
fn test_distribution_partitions_any_price() {
    let costs = mug().costs;
    for price in [dec!(50), dec!(70.59), dec!(84.71), dec!(200)] {
        let d = cost_distribution(&costs, price).unwrap();
        let sum = d.cost + d.taxes + d.commission + d.other_expenses + d.profit;
        assert!(
            (sum - dec!(100)).abs() < dec!(0.1),
            "Distribution at {price} sums to {sum}"
        );
    }
}

// ===========================================================================
// Validation boundary
// ===========================================================================

#[test]
fn test_impossible_percentage_load_is_a_validation_error() {
    // The 100% load case is caught before the solver ever runs.
    let mut product = mug();
    product.costs.taxes = TaxSpec::Percentage(dec!(95));
    product.costs.sales_commission_percent = dec!(5);

    match calculate_pricing(&product) {
        Err(PricingError::Validation { errors }) => {
            assert!(errors.iter().any(|e| e.contains("Combined percentage")));
        }
        other => panic!("Expected Validation, got {other:?}"),
    }
}

#[test]
fn test_validation_collects_every_problem() {
    let product = ProductData {
        name: String::new(),
        costs: CostInput {
            unit_cost: dec!(-1),
            taxes: TaxSpec::Percentage(dec!(-5)),
            sales_commission_percent: dec!(120),
            other_expenses: dec!(-3),
        },
        desired_margin_percent: dec!(-10),
    };
    match calculate_pricing(&product) {
        Err(PricingError::Validation { errors }) => {
            assert!(errors.len() >= 5, "Expected all problems listed: {errors:?}");
        }
        other => panic!("Expected Validation, got {other:?}"),
    }
}

// ===========================================================================
// Envelope serialization
// ===========================================================================

#[test]
fn test_analysis_envelope_shape() {
    let analysis = calculate_pricing(&mug()).unwrap();
    let json = serde_json::to_value(&analysis).unwrap();

    assert!(json["methodology"].is_string());
    assert!(json["result"]["ideal_price"].is_string()); // serde-with-str decimals
    assert_eq!(json["assumptions"]["name"], "Handmade mug");
}
