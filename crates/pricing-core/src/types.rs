use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Percentage points (5 = 5%). The engine divides by 100 where needed.
pub type Percent = Decimal;

/// Round a monetary value to 2 decimal places, midpoint away from zero.
pub fn round2(value: Money) -> Money {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Tax on the selling price: either a percentage of the price or a flat
/// amount charged regardless of it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum TaxSpec {
    Percentage(Percent),
    Fixed(Money),
}

impl TaxSpec {
    pub fn value(&self) -> Decimal {
        match self {
            TaxSpec::Percentage(v) | TaxSpec::Fixed(v) => *v,
        }
    }
}

/// Per-unit cost structure shared by the forward and reverse calculators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostInput {
    pub unit_cost: Money,
    pub taxes: TaxSpec,
    pub sales_commission_percent: Percent,
    pub other_expenses: Money,
}

/// A named product plus the margin the seller wants on top of breakeven.
/// Identity and timestamps belong to the history store, not the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductData {
    pub name: String,
    #[serde(flatten)]
    pub costs: CostInput,
    pub desired_margin_percent: Percent,
}

/// Forward pricing output. Every field is rounded to 2 decimal places.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingSummary {
    /// Breakeven price: selling below this loses money.
    pub minimum_price: Money,
    /// Minimum price marked up by the desired margin.
    pub ideal_price: Money,
    /// Tax due at the ideal price.
    pub tax_amount: Money,
    /// Commission due at the ideal price.
    pub commission_amount: Money,
    /// unit cost + tax + commission + other expenses, at the ideal price.
    pub total_costs: Money,
    /// ideal price - unit cost
    pub gross_profit: Money,
    /// ideal price - total costs
    pub net_profit: Money,
}

/// Cost inputs plus a price the seller has already chosen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReverseInput {
    pub selling_price: Money,
    #[serde(flatten)]
    pub costs: CostInput,
}

/// What the chosen price actually earns, and what to do about it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReverseSummary {
    pub real_profit: Money,
    /// Profit as a percentage of total cost (not of price).
    pub margin_obtained_percent: Percent,
    pub tax_amount: Money,
    pub commission_amount: Money,
    pub total_costs: Money,
    pub suggestion: Suggestion,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionKind {
    Good,
    Warning,
    Danger,
}

impl std::fmt::Display for SuggestionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Good => "good",
            Self::Warning => "warning",
            Self::Danger => "danger",
        };
        write!(f, "{}", s)
    }
}

/// Actionable verdict on an audited price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    pub kind: SuggestionKind,
    pub message: String,
    /// Whole-currency-unit price to aim for instead, when the verdict
    /// is not Good.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommended_price: Option<Money>,
}

/// Each cost component (and profit) as a percentage of a reference price.
/// The five fields partition the price, so they sum to 100 up to rounding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostDistribution {
    pub cost: Percent,
    pub taxes: Percent,
    pub commission: Percent,
    pub other_expenses: Percent,
    pub profit: Percent,
}

/// Minimum / ideal / current price trio for bar-style comparisons.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceComparison {
    pub minimum: Money,
    pub ideal: Money,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current: Option<Money>,
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Analysis<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: AnalysisMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> Analysis<T> {
    Analysis {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: AnalysisMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}
