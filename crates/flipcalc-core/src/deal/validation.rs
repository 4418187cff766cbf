use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::deal::DealRecord;

/// How severe a validation finding is. Errors mark inputs that make the
/// numbers meaningless; warnings mark inputs worth a second look. Neither
/// blocks computation: the engine clamps and keeps going so a half-edited
/// deal still produces a full result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    Error,
    Warning,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationIssue {
    pub field: String,
    pub message: String,
    pub severity: Severity,
}

fn issue(field: &str, message: String, severity: Severity) -> ValidationIssue {
    ValidationIssue {
        field: field.to_string(),
        message,
        severity,
    }
}

/// Sanity-check a deal record before underwriting. Purely advisory.
pub fn validate_deal(deal: &DealRecord) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    // --- Purchase price ---
    if deal.purchase_price <= Decimal::ZERO {
        issues.push(issue(
            "purchase_price",
            "Purchase price must be greater than $0".into(),
            Severity::Error,
        ));
    } else if deal.purchase_price < dec!(10000) {
        issues.push(issue(
            "purchase_price",
            "Purchase price under $10,000 is unrealistic for most markets".into(),
            Severity::Warning,
        ));
    } else if deal.purchase_price > dec!(10000000) {
        issues.push(issue(
            "purchase_price",
            "Purchase price exceeds $10M — verify this is intentional".into(),
            Severity::Warning,
        ));
    }

    // --- ARV ---
    if deal.arv <= Decimal::ZERO {
        issues.push(issue(
            "arv",
            "After Repair Value (ARV) must be greater than $0".into(),
            Severity::Error,
        ));
    } else if deal.purchase_price > Decimal::ZERO {
        if deal.arv < deal.purchase_price {
            issues.push(issue(
                "arv",
                "ARV is below purchase price — the property cannot lose value before rehab".into(),
                Severity::Error,
            ));
        } else {
            let appreciation =
                (deal.arv - deal.purchase_price) / deal.purchase_price * dec!(100);
            if appreciation < dec!(5) {
                issues.push(issue(
                    "arv",
                    format!(
                        "ARV appreciation is only {:.1}% — ensure the rehab is reflected in ARV",
                        appreciation
                    ),
                    Severity::Warning,
                ));
            } else if appreciation > dec!(100) {
                issues.push(issue(
                    "arv",
                    format!(
                        "ARV appreciation of {:.0}% is aggressive — verify comps support it",
                        appreciation
                    ),
                    Severity::Warning,
                ));
            }
        }
    }

    // --- Rehab budget ---
    if deal.rehab_budget < Decimal::ZERO {
        issues.push(issue(
            "rehab_budget",
            "Rehab budget cannot be negative".into(),
            Severity::Error,
        ));
    } else if deal.rehab_budget.is_zero() {
        issues.push(issue(
            "rehab_budget",
            "Rehab budget is $0 — wholesale or turnkey deals rarely pencil as flips".into(),
            Severity::Warning,
        ));
    }

    // Itemized scope should reconcile with the flat budget when present
    if !deal.rehab_line_items.is_empty() {
        let itemized = deal.itemized_rehab_total();
        if (itemized - deal.rehab_budget).abs() > dec!(0.01) {
            issues.push(issue(
                "rehab_line_items",
                format!(
                    "Itemized rehab scope ({itemized}) does not match the flat budget ({})",
                    deal.rehab_budget
                ),
                Severity::Warning,
            ));
        }
    }

    // --- Financing terms ---
    if deal.interest_rate < Decimal::ZERO {
        issues.push(issue(
            "interest_rate",
            "Interest rate cannot be negative".into(),
            Severity::Error,
        ));
    } else if deal.interest_rate > dec!(25) {
        issues.push(issue(
            "interest_rate",
            format!("{}% interest is above hard-money norms", deal.interest_rate),
            Severity::Warning,
        ));
    }

    if deal.origination_points > dec!(10) {
        issues.push(issue(
            "origination_points",
            format!("{} points is far above market", deal.origination_points),
            Severity::Warning,
        ));
    }

    // --- Holding period ---
    if deal.holding_period_months == 0 {
        issues.push(issue(
            "holding_period_months",
            "Holding period of 0 months means no carrying costs are modeled".into(),
            Severity::Warning,
        ));
    } else if deal.holding_period_months > 24 {
        issues.push(issue(
            "holding_period_months",
            "Holding period over 24 months is unusual for a flip".into(),
            Severity::Warning,
        ));
    }

    issues
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deal::RehabLineItem;

    fn workable_deal() -> DealRecord {
        DealRecord {
            purchase_price: dec!(130000),
            rehab_budget: dec!(50000),
            arv: dec!(220000),
            interest_rate: dec!(10.99),
            origination_points: dec!(2.0),
            holding_period_months: 6,
            ..DealRecord::default()
        }
    }

    #[test]
    fn test_workable_deal_is_clean() {
        assert!(validate_deal(&workable_deal()).is_empty());
    }

    #[test]
    fn test_zero_purchase_price_is_error() {
        let mut deal = workable_deal();
        deal.purchase_price = Decimal::ZERO;
        let issues = validate_deal(&deal);
        assert!(issues
            .iter()
            .any(|i| i.field == "purchase_price" && i.severity == Severity::Error));
    }

    #[test]
    fn test_arv_below_purchase_is_error() {
        let mut deal = workable_deal();
        deal.arv = dec!(100000);
        let issues = validate_deal(&deal);
        assert!(issues
            .iter()
            .any(|i| i.field == "arv" && i.severity == Severity::Error));
    }

    #[test]
    fn test_thin_appreciation_warns() {
        let mut deal = workable_deal();
        deal.arv = dec!(133000); // ~2.3% over purchase
        let issues = validate_deal(&deal);
        assert!(issues
            .iter()
            .any(|i| i.field == "arv" && i.severity == Severity::Warning));
    }

    #[test]
    fn test_itemized_mismatch_warns() {
        let mut deal = workable_deal();
        deal.rehab_line_items = vec![RehabLineItem {
            category: "Kitchen".into(),
            description: String::new(),
            amount: dec!(20000),
        }];
        let issues = validate_deal(&deal);
        assert!(issues.iter().any(|i| i.field == "rehab_line_items"));
    }

    #[test]
    fn test_issues_accumulate() {
        let mut deal = workable_deal();
        deal.purchase_price = Decimal::ZERO;
        deal.arv = Decimal::ZERO;
        deal.interest_rate = dec!(-1);
        let issues = validate_deal(&deal);
        assert!(issues.len() >= 3);
    }
}
