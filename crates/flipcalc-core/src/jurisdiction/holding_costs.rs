use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::types::{Money, Percent};

/// Per-state holding-cost factors for vacant/rehab properties.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateHoldingFactors {
    /// Vacancy insurance per $100k of purchase price, per month
    pub insurance_per_month_per_100k: Money,
    /// Annual property tax as a whole-number percent of purchase price
    pub tax_rate_percent: Percent,
}

/// Holding-cost factors by state. Unknown states fall back to the PA
/// baseline, the market the tables were calibrated against.
pub fn holding_factors(state: &str) -> StateHoldingFactors {
    let (insurance, tax) = match state {
        "NJ" => (dec!(10), dec!(2.4)),
        "NY" => (dec!(12), dec!(1.8)),
        "CA" => (dec!(6), dec!(0.73)),
        "TX" => (dec!(15), dec!(2.0)),
        "FL" => (dec!(18), dec!(0.98)),
        "IL" => (dec!(9), dec!(2.3)),
        "MD" => (dec!(8), dec!(1.1)),
        "VA" => (dec!(7), dec!(0.8)),
        "NC" => (dec!(9), dec!(0.84)),
        "SC" => (dec!(10), dec!(0.57)),
        "GA" => (dec!(8), dec!(0.91)),
        "OH" => (dec!(7), dec!(1.56)),
        "MI" => (dec!(8), dec!(1.78)),
        "AZ" => (dec!(7), dec!(0.62)),
        "NV" => (dec!(6), dec!(0.6)),
        // "PA" and anything unlisted
        _ => (dec!(8), dec!(1.5)),
    };
    StateHoldingFactors {
        insurance_per_month_per_100k: insurance,
        tax_rate_percent: tax,
    }
}

/// Rough monthly vacancy-insurance estimate, rounded to the dollar.
pub fn estimate_monthly_insurance(purchase_price: Money, state: &str) -> Money {
    let factors = holding_factors(state);
    (purchase_price / dec!(100000) * factors.insurance_per_month_per_100k)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// Rough monthly property-tax estimate, rounded to the dollar.
pub fn estimate_monthly_tax(purchase_price: Money, state: &str) -> Money {
    let factors = holding_factors(state);
    (purchase_price * factors.tax_rate_percent / dec!(100) / dec!(12))
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_pa_insurance_estimate() {
        // $130k at $8 per $100k per month => $10.40 => $10
        assert_eq!(estimate_monthly_insurance(dec!(130000), "PA"), dec!(10));
    }

    #[test]
    fn test_pa_tax_estimate() {
        // $130k * 1.5% / 12 = $162.50 => $163
        assert_eq!(estimate_monthly_tax(dec!(130000), "PA"), dec!(163));
    }

    #[test]
    fn test_unknown_state_uses_pa_baseline() {
        assert_eq!(holding_factors("ZZ"), holding_factors("PA"));
    }

    #[test]
    fn test_florida_insurance_is_highest() {
        let fl = holding_factors("FL");
        assert_eq!(fl.insurance_per_month_per_100k, dec!(18));
    }

    #[test]
    fn test_zero_price_estimates_zero() {
        assert_eq!(estimate_monthly_insurance(Decimal::ZERO, "PA"), Decimal::ZERO);
        assert_eq!(estimate_monthly_tax(Decimal::ZERO, "PA"), Decimal::ZERO);
    }
}
