use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::types::{Money, Percent};

const CONTINGENCY_LIGHT: Decimal = dec!(0.15);
const CONTINGENCY_HEAVY: Decimal = dec!(0.20);

/// Realism read on a rehab budget: unit economics, contingency sizing,
/// and the profit hit of a 20% overrun.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RehabBudgetAnalysis {
    pub per_sqft: Decimal,
    /// Budget as a whole-number percent of purchase price
    pub percent_of_purchase: Percent,
    pub warnings: Vec<String>,
    pub recommended_contingency_15: Money,
    pub recommended_contingency_20: Money,
    /// Profit reduction if the scope runs 20% over
    pub profit_impact_of_20_over: Money,
}

/// Analyze a rehab budget against the property. Returns None when the
/// budget or square footage is missing, since there is nothing to say yet.
pub fn analyze_rehab_budget(
    budget: Money,
    purchase_price: Money,
    sq_ft: Decimal,
) -> Option<RehabBudgetAnalysis> {
    if budget <= Decimal::ZERO || sq_ft <= Decimal::ZERO {
        return None;
    }

    let per_sqft = budget / sq_ft;
    let percent_of_purchase = if purchase_price > Decimal::ZERO {
        budget / purchase_price * dec!(100)
    } else {
        Decimal::ZERO
    };
    let contingency_15 = budget * CONTINGENCY_LIGHT;
    let contingency_20 = budget * CONTINGENCY_HEAVY;

    let mut warnings = Vec::new();

    if per_sqft < dec!(30) {
        warnings.push(format!(
            "${:.2}/sqft is cosmetic-only territory. Typical full rehab: $50-150/sqft",
            per_sqft
        ));
    }
    if per_sqft > dec!(150) {
        warnings.push(format!(
            "${:.2}/sqft is high-end. Verify scope aligns with ARV.",
            per_sqft
        ));
    }
    if purchase_price > Decimal::ZERO {
        if percent_of_purchase < dec!(10) {
            warnings.push(format!(
                "Rehab is {:.1}% of purchase. Typical range: 20-40%. Is this cosmetic-only?",
                percent_of_purchase
            ));
        }
        if percent_of_purchase > dec!(50) {
            warnings.push(format!(
                "Rehab is {:.1}% of purchase. High cost. Verify ARV justifies it.",
                percent_of_purchase
            ));
        }
    }

    Some(RehabBudgetAnalysis {
        per_sqft,
        percent_of_purchase,
        warnings,
        recommended_contingency_15: contingency_15,
        recommended_contingency_20: contingency_20,
        profit_impact_of_20_over: contingency_20,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_typical_budget_is_clean() {
        // $50k over 2000 sqft = $25/sqft... below the $30 floor, warns.
        // Use a fuller scope: $80k over 1600 sqft = $50/sqft, 40% of 200k.
        let analysis = analyze_rehab_budget(dec!(80000), dec!(200000), dec!(1600)).unwrap();
        assert_eq!(analysis.per_sqft, dec!(50));
        assert_eq!(analysis.percent_of_purchase, dec!(40));
        assert!(analysis.warnings.is_empty());
    }

    #[test]
    fn test_contingency_recommendations() {
        let analysis = analyze_rehab_budget(dec!(80000), dec!(200000), dec!(1600)).unwrap();
        assert_eq!(analysis.recommended_contingency_15, dec!(12000));
        assert_eq!(analysis.recommended_contingency_20, dec!(16000));
        assert_eq!(analysis.profit_impact_of_20_over, dec!(16000));
    }

    #[test]
    fn test_cosmetic_budget_warns() {
        let analysis = analyze_rehab_budget(dec!(20000), dec!(250000), dec!(2000)).unwrap();
        // $10/sqft and 8% of purchase both fire
        assert_eq!(analysis.warnings.len(), 2);
    }

    #[test]
    fn test_high_end_budget_warns() {
        let analysis = analyze_rehab_budget(dec!(320000), dec!(400000), dec!(2000)).unwrap();
        assert!(analysis
            .warnings
            .iter()
            .any(|w| w.contains("high-end")));
        assert!(analysis
            .warnings
            .iter()
            .any(|w| w.contains("High cost")));
    }

    #[test]
    fn test_missing_inputs_return_none() {
        assert!(analyze_rehab_budget(Decimal::ZERO, dec!(200000), dec!(2000)).is_none());
        assert!(analyze_rehab_budget(dec!(50000), dec!(200000), Decimal::ZERO).is_none());
    }

    #[test]
    fn test_zero_purchase_price_skips_percent_warnings() {
        let analysis = analyze_rehab_budget(dec!(80000), Decimal::ZERO, dec!(1600)).unwrap();
        assert_eq!(analysis.percent_of_purchase, Decimal::ZERO);
        assert!(analysis.warnings.is_empty());
    }
}
