use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use flipcalc_core::deal::{DealRecord, FinancingMode};
use flipcalc_core::lender::{compare_lender, LenderOption};
use flipcalc_core::sensitivity::{sweep_purchase_price, sweep_rehab_budget};
use flipcalc_core::underwriting::{evaluate, underwrite};

fn reference_deal() -> DealRecord {
    DealRecord {
        purchase_price: dec!(100000),
        rehab_budget: dec!(30000),
        arv: dec!(200000),
        financing: FinancingMode::Standard {
            percent: dec!(100),
        },
        interest_rate: dec!(10.0),
        origination_points: dec!(2.0),
        underwriting_fee: dec!(500),
        processing_fee: dec!(500),
        doc_prep_fee: dec!(1499),
        wire_fee: dec!(45),
        transfer_tax_rate: dec!(1.0),
        title_insurance_rate: dec!(0.70),
        holding_period_months: 6,
        monthly_electric: dec!(300),
        selling_commission_rate: dec!(5.0),
        selling_transfer_tax_rate: dec!(1.0),
        fico_score: 720,
        experience_level: 2,
        liquidity: dec!(60000),
        ..DealRecord::default()
    }
}

// ===========================================================================
// Reference scenarios
// ===========================================================================

#[test]
fn test_reference_loan_sizing() {
    // purchase 100k, rehab 30k, ARV 200k, 100% financing, 75% cap:
    // loan = min(130k, 150k) = 130k; max offer = 150k - 30k = 120k;
    // 70%-rule max = 140k - 30k = 110k, passes at 100k purchase
    let r = evaluate(&reference_deal(), None);

    assert_eq!(r.qualified_loan_amount, dec!(130000));
    assert_eq!(r.max_allowable_offer, dec!(120000));
    assert_eq!(r.seventy_rule_max_offer, dec!(110000));
    assert!(r.passes_70_rule);
    assert_eq!(r.gap_amount, Decimal::ZERO);
}

#[test]
fn test_reference_lender_override() {
    // loanAmountOverride 120k at 10% / 2 points:
    // monthly = 120000 * 0.10 / 12 = 1000; points = 2400
    let deal = reference_deal();
    let baseline = evaluate(&deal, None);

    let lender = LenderOption {
        id: "ref".into(),
        lender_name: "Reference Lender".into(),
        interest_rate: dec!(10.0),
        origination_points: dec!(2.0),
        underwriting_fee: dec!(995),
        processing_fee: dec!(395),
        doc_prep_fee: dec!(500),
        wire_fee: dec!(50),
        loan_amount_override: dec!(120000),
        ..LenderOption::default()
    };

    let cmp = compare_lender(&deal, &baseline, &lender);
    assert_eq!(cmp.comparison_loan_amount, dec!(120000));
    assert_eq!(cmp.comparison_monthly_payment, dec!(1000));
    assert_eq!(
        cmp.lender_upfront_fees,
        dec!(2400) + dec!(995) + dec!(395) + dec!(500) + dec!(50)
    );
}

#[test]
fn test_reference_purchase_sweep_labels() {
    // +10% on a 100k base price => 110k, "Over 10%"
    let deal = reference_deal();
    let baseline = evaluate(&deal, None);

    let rows = sweep_purchase_price(
        deal.purchase_price,
        baseline.net_profit,
        deal.arv,
        deal.rehab_budget,
        baseline.total_closing_costs,
        baseline.total_holding_costs,
        baseline.total_exit_costs,
        dec!(100),
        None,
    );

    let over10 = rows.iter().find(|r| r.percent_change == dec!(10)).unwrap();
    assert_eq!(over10.purchase_price, dec!(110000));
    assert_eq!(over10.label, "Over 10%");
}

// ===========================================================================
// Cross-module consistency
// ===========================================================================

#[test]
fn test_sweeps_reproduce_engine_baseline() {
    // The zero-perturbation row of both sweeps must reproduce the
    // engine's own profit from the baseline components it reports.
    let deal = reference_deal();
    let baseline = evaluate(&deal, None);

    let purchase_rows = sweep_purchase_price(
        deal.purchase_price,
        baseline.net_profit,
        deal.arv,
        deal.rehab_budget,
        baseline.total_closing_costs,
        baseline.total_holding_costs,
        baseline.total_exit_costs,
        dec!(100),
        None,
    );
    let at_price = purchase_rows.iter().find(|r| r.label == "At Price").unwrap();
    assert_eq!(at_price.profit, baseline.net_profit);
    assert_eq!(at_price.profit_change, Decimal::ZERO);

    let rehab_rows = sweep_rehab_budget(
        deal.rehab_budget,
        baseline.net_profit,
        deal.arv,
        deal.purchase_price,
        baseline.total_closing_costs,
        baseline.gap_amount,
        baseline.total_holding_costs,
        baseline.total_exit_costs,
        dec!(100),
        None,
    );
    let at_budget = rehab_rows.iter().find(|r| r.label == "At Budget").unwrap();
    assert_eq!(at_budget.profit, baseline.net_profit);
    assert_eq!(at_budget.profit_change, Decimal::ZERO);
}

#[test]
fn test_stored_deal_reproduces_results() {
    // Store, reload, recompute: identical record
    let deal = reference_deal();
    let first = evaluate(&deal, None);

    let stored = serde_json::to_string(&deal).unwrap();
    let reloaded: DealRecord = serde_json::from_str(&stored).unwrap();
    let second = evaluate(&reloaded, None);

    assert_eq!(first, second);

    // And the results record itself survives a round trip
    let results_json = serde_json::to_string(&first).unwrap();
    let results_back: flipcalc_core::underwriting::ResultsRecord =
        serde_json::from_str(&results_json).unwrap();
    assert_eq!(first, results_back);
}

#[test]
fn test_envelope_carries_engine_result() {
    let deal = reference_deal();
    let enveloped = underwrite(&deal);
    let raw = evaluate(&deal, None);
    assert_eq!(enveloped.result, raw);
}

#[test]
fn test_eligibility_reasons_all_surface() {
    let mut deal = reference_deal();
    deal.fico_score = 580;
    deal.liquidity = dec!(1000);
    deal.experience_level = -2;
    deal.purchase_price = dec!(140000); // over the 120k max offer

    let r = evaluate(&deal, None);
    assert!(!r.is_eligible);
    assert_eq!(r.eligibility_reasons.len(), 4);
}
