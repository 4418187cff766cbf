use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::deal::DealRecord;
use crate::lender::option::LenderOption;
use crate::types::Money;
use crate::underwriting::{evaluate, ResultsRecord};

/// A full re-underwrite under a lender's terms, plus the figures used to
/// rank lenders against the deal's baseline financing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LenderComparison {
    pub results: ResultsRecord,

    /// Loan amount the comparison figures are computed on (the override
    /// when the lender specifies one, the sized loan otherwise)
    pub comparison_loan_amount: Money,
    pub comparison_points_cost: Money,
    pub comparison_monthly_payment: Money,

    /// Points plus the lender's fixed and other fees
    pub lender_upfront_fees: Money,
    pub upfront_fees_delta: Money,
    pub monthly_payment_delta: Money,
    /// (upfront + monthly x hold) vs. baseline; ranks lenders
    /// holistically rather than by rate alone
    pub total_cost_over_hold_delta: Money,
}

/// Re-underwrite the deal under a lender's rate and points, then derive
/// comparison deltas against the baseline results.
///
/// Only `interest_rate` and `origination_points` are substituted into the
/// derived deal; the lender's ARV cap (when set) overrides the program cap
/// for the re-run, and a loan-to-cost ceiling clamps the sized loan after
/// the fact. The baseline is never mutated.
pub fn compare_lender(
    deal: &DealRecord,
    baseline: &ResultsRecord,
    lender: &LenderOption,
) -> LenderComparison {
    let mut overlay = deal.clone();
    overlay.interest_rate = lender.interest_rate;
    overlay.origination_points = lender.origination_points;

    let cap_override = lender.max_arv_percent.map(|p| pos(p) / dec!(100));
    let mut results = evaluate(&overlay, cap_override);

    // Loan-to-cost ceiling: clamp the sized loan and the figures derived
    // from it. Gap is recomputed on the purchase-price portion only.
    if let Some(max_ltc) = lender.max_loan_to_cost_percent {
        let purchase = pos(deal.purchase_price);
        let total_project_cost = purchase + pos(deal.rehab_budget);
        let ltc_cap = total_project_cost * pos(max_ltc) / dec!(100);

        if results.qualified_loan_amount > ltc_cap {
            results.qualified_loan_amount = ltc_cap;
            results.points_cost = ltc_cap * pos(lender.origination_points) / dec!(100);
            results.monthly_payment =
                ltc_cap * pos(lender.interest_rate) / dec!(100) / dec!(12);

            let financing_percent = deal.financing.effective_percent();
            let by_financing = purchase * financing_percent / dec!(100);
            let by_ltc = purchase * pos(max_ltc) / dec!(100);
            let purchase_loan_portion = by_financing.min(by_ltc);
            results.gap_amount = (purchase - purchase_loan_portion).max(Decimal::ZERO);
        }
    }

    let mut comparison_loan_amount = results.qualified_loan_amount;
    let mut comparison_points_cost = results.points_cost;
    let mut comparison_monthly_payment = results.monthly_payment;

    // A loan-amount override bypasses sizing entirely: points and the
    // interest-only payment come straight off the override amount.
    if lender.loan_amount_override > Decimal::ZERO {
        comparison_loan_amount = lender.loan_amount_override;
        comparison_points_cost =
            comparison_loan_amount * pos(lender.origination_points) / dec!(100);
        comparison_monthly_payment =
            comparison_loan_amount * pos(lender.interest_rate) / dec!(100) / dec!(12);
    }

    let lender_upfront_fees = comparison_points_cost
        + pos(lender.underwriting_fee)
        + pos(lender.processing_fee)
        + pos(lender.doc_prep_fee)
        + pos(lender.wire_fee)
        + pos(lender.other_fees);

    let baseline_upfront_fees = baseline.points_cost
        + baseline.underwriting_fee
        + baseline.processing_fee
        + baseline.doc_prep_fee
        + baseline.wire_fee
        + baseline.other_lender_fees;

    let hold_months = Decimal::from(deal.holding_period_months);

    let upfront_fees_delta = lender_upfront_fees - baseline_upfront_fees;
    let monthly_payment_delta = comparison_monthly_payment - baseline.monthly_payment;
    let total_cost_over_hold_delta = (lender_upfront_fees
        + comparison_monthly_payment * hold_months)
        - (baseline_upfront_fees + baseline.monthly_payment * hold_months);

    LenderComparison {
        results,
        comparison_loan_amount,
        comparison_points_cost,
        comparison_monthly_payment,
        lender_upfront_fees,
        upfront_fees_delta,
        monthly_payment_delta,
        total_cost_over_hold_delta,
    }
}

fn pos(value: Decimal) -> Decimal {
    value.max(Decimal::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample_deal() -> DealRecord {
        DealRecord {
            purchase_price: dec!(130000),
            rehab_budget: dec!(50000),
            arv: dec!(300000),
            interest_rate: dec!(10.99),
            origination_points: dec!(2.0),
            underwriting_fee: dec!(500),
            processing_fee: dec!(500),
            doc_prep_fee: dec!(1499),
            wire_fee: dec!(45),
            holding_period_months: 6,
            fico_score: 720,
            experience_level: 3,
            liquidity: dec!(100000),
            ..DealRecord::default()
        }
    }

    fn sample_lender() -> LenderOption {
        LenderOption {
            id: "ln-1".into(),
            lender_name: "Bridge Point Funding".into(),
            interest_rate: dec!(10.0),
            origination_points: dec!(2.0),
            underwriting_fee: dec!(995),
            processing_fee: dec!(395),
            doc_prep_fee: dec!(500),
            wire_fee: dec!(50),
            ..LenderOption::default()
        }
    }

    #[test]
    fn test_only_rate_and_points_are_substituted() {
        let deal = sample_deal();
        let baseline = evaluate(&deal, None);
        let cmp = compare_lender(&deal, &baseline, &sample_lender());

        // Same sizing inputs, same loan
        assert_eq!(
            cmp.results.qualified_loan_amount,
            baseline.qualified_loan_amount
        );
        // Different rate shows up in the payment
        let expected_payment =
            baseline.qualified_loan_amount * dec!(10.0) / dec!(100) / dec!(12);
        assert_eq!(cmp.comparison_monthly_payment, expected_payment);
    }

    #[test]
    fn test_loan_amount_override() {
        // 120k override at 10% / 2 points => $1,000/mo and $2,400 points
        let deal = sample_deal();
        let baseline = evaluate(&deal, None);
        let mut lender = sample_lender();
        lender.loan_amount_override = dec!(120000);

        let cmp = compare_lender(&deal, &baseline, &lender);
        assert_eq!(cmp.comparison_loan_amount, dec!(120000));
        assert_eq!(cmp.comparison_monthly_payment, dec!(1000));
        assert_eq!(cmp.comparison_points_cost, dec!(2400));
        assert_eq!(
            cmp.lender_upfront_fees,
            dec!(2400) + dec!(995) + dec!(395) + dec!(500) + dec!(50)
        );
    }

    #[test]
    fn test_lender_arv_cap_override() {
        let mut deal = sample_deal();
        deal.purchase_price = dec!(100000);
        deal.rehab_budget = dec!(30000);
        deal.arv = dec!(200000);
        let baseline = evaluate(&deal, None);

        let mut lender = sample_lender();
        lender.max_arv_percent = Some(dec!(60));

        let cmp = compare_lender(&deal, &baseline, &lender);
        // 60% of 200k = 120k beats the 130k cost-based request
        assert_eq!(cmp.results.qualified_loan_amount, dec!(120000));
        assert_eq!(baseline.qualified_loan_amount, dec!(130000));
    }

    #[test]
    fn test_loan_to_cost_ceiling_clamps() {
        let mut deal = sample_deal();
        deal.purchase_price = dec!(100000);
        deal.rehab_budget = dec!(30000);
        deal.arv = dec!(300000);
        let baseline = evaluate(&deal, None);

        let mut lender = sample_lender();
        lender.max_loan_to_cost_percent = Some(dec!(85));

        let cmp = compare_lender(&deal, &baseline, &lender);
        // 85% of 130k cost
        assert_eq!(cmp.results.qualified_loan_amount, dec!(110500));
        assert_eq!(
            cmp.results.points_cost,
            dec!(110500) * dec!(2.0) / dec!(100)
        );
        // gap on the purchase portion at 85% LTC
        assert_eq!(cmp.results.gap_amount, dec!(15000));
    }

    #[test]
    fn test_deltas_vs_baseline() {
        let deal = sample_deal();
        let baseline = evaluate(&deal, None);
        let lender = sample_lender();

        let cmp = compare_lender(&deal, &baseline, &lender);

        let baseline_upfront = baseline.points_cost
            + baseline.underwriting_fee
            + baseline.processing_fee
            + baseline.doc_prep_fee
            + baseline.wire_fee
            + baseline.other_lender_fees;

        assert_eq!(
            cmp.upfront_fees_delta,
            cmp.lender_upfront_fees - baseline_upfront
        );
        assert_eq!(
            cmp.monthly_payment_delta,
            cmp.comparison_monthly_payment - baseline.monthly_payment
        );
        let hold = dec!(6);
        assert_eq!(
            cmp.total_cost_over_hold_delta,
            (cmp.lender_upfront_fees + cmp.comparison_monthly_payment * hold)
                - (baseline_upfront + baseline.monthly_payment * hold)
        );
    }

    #[test]
    fn test_baseline_is_not_mutated() {
        let deal = sample_deal();
        let baseline = evaluate(&deal, None);
        let snapshot = baseline.clone();

        let mut lender = sample_lender();
        lender.loan_amount_override = dec!(90000);
        let _ = compare_lender(&deal, &baseline, &lender);

        assert_eq!(baseline, snapshot);
    }

    #[test]
    fn test_cheaper_lender_ranks_negative() {
        // Lower rate, no fixed fees: total cost over hold must come out
        // below the baseline
        let deal = sample_deal();
        let baseline = evaluate(&deal, None);
        let lender = LenderOption {
            interest_rate: dec!(8.0),
            origination_points: dec!(1.0),
            ..LenderOption::default()
        };

        let cmp = compare_lender(&deal, &baseline, &lender);
        assert!(cmp.total_cost_over_hold_delta < Decimal::ZERO);
    }
}
