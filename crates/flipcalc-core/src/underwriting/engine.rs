use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::time::Instant;

use crate::deal::{validate_deal, DealRecord, ExitStrategy, FinancingMode, WorkBackwardBasis};
use crate::types::{with_metadata, ComputationOutput, Money, Percent, Rate};
use crate::underwriting::results::{ArvScenario, ResultsRecord};
use crate::underwriting::schedule::DrawSchedule;

/// Program default: loans are capped at 75% of ARV.
pub const DEFAULT_MAX_ARV_PERCENT: Rate = dec!(0.75);

const SEVENTY_PERCENT_RULE: Rate = dec!(0.70);
const ENDORSEMENT_FEE: Money = dec!(100);
const LIQUIDITY_FLOOR: Money = dec!(15000);
const REHAB_LIQUIDITY_BUFFER: Rate = dec!(0.15);
const MIN_FICO_SCORE: u32 = 650;
const DAYS_IN_YEAR: Decimal = dec!(365);
const INTEREST_DAY_COUNT: Decimal = dec!(360);

const ARV_SCENARIO_GRID: [Decimal; 5] = [
    dec!(-0.10),
    dec!(-0.05),
    dec!(0),
    dec!(0.05),
    dec!(0.10),
];

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Underwrite a rehab deal. Pure and total: identical input always yields
/// an identical record, degenerate numeric input is clamped rather than
/// rejected, and every zero-denominator ratio comes back as 0.
///
/// `max_arv_percent` overrides the program's 75% ARV cap (a fraction,
/// e.g. 0.70); lender overlays use this to re-run the engine under their
/// own cap.
pub fn evaluate(deal: &DealRecord, max_arv_percent: Option<Rate>) -> ResultsRecord {
    let cap_fraction = max_arv_percent.unwrap_or(DEFAULT_MAX_ARV_PERCENT).max(Decimal::ZERO);

    let purchase = pos(deal.purchase_price);
    let rehab = pos(deal.rehab_budget);
    let arv = pos(deal.arv);
    let interest_rate = pos(deal.interest_rate);
    let points = pos(deal.origination_points);
    let hold_months = deal.holding_period_months;

    // --- Stage 1: loan sizing ---
    let total_project_cost = purchase + rehab;
    let financing_percent = deal.financing.effective_percent();
    let loan_by_financing = total_project_cost * financing_percent / dec!(100);
    let max_loan_by_arv = arv * cap_fraction;
    let qualified_loan_amount = loan_by_financing.min(max_loan_by_arv);

    // Gap is the purchase-price shortfall only: rehab is always financed
    // through the holdback up to the qualified amount.
    let purchase_loan_portion =
        (purchase * financing_percent / dec!(100)).min(qualified_loan_amount);
    let gap_amount = (purchase - purchase_loan_portion).max(Decimal::ZERO);

    let holdback_amount = rehab.min(qualified_loan_amount);
    let initial_funded_amount = qualified_loan_amount - holdback_amount;

    let max_allowable_offer = max_loan_by_arv - rehab;
    let seventy_rule_max_offer = arv * SEVENTY_PERCENT_RULE - rehab;
    let passes_70_rule = purchase <= seventy_rule_max_offer;

    // --- Ratios ---
    let ltv = ratio_percent(qualified_loan_amount, pos(deal.as_is_value));
    let ltc = ratio_percent(qualified_loan_amount, total_project_cost);
    let ltarv = ratio_percent(qualified_loan_amount, arv);
    let requested_ltc = ratio_percent(loan_by_financing, total_project_cost);
    let requested_ltarv = ratio_percent(loan_by_financing, arv);

    let sq_ft = pos(deal.sq_ft);
    let purchase_price_per_sqft = ratio(purchase, sq_ft);
    let arv_per_sqft = ratio(arv, sq_ft);

    // --- Stage 2: fee aggregation ---
    let points_cost = qualified_loan_amount * points / dec!(100);
    let underwriting_fee = pos(deal.underwriting_fee);
    let processing_fee = pos(deal.processing_fee);
    let doc_prep_fee = pos(deal.doc_prep_fee);
    let wire_fee = pos(deal.wire_fee);
    let other_lender_fees = pos(deal.other_lender_fees);
    let total_lender_fees = points_cost
        + underwriting_fee
        + processing_fee
        + doc_prep_fee
        + wire_fee
        + other_lender_fees;

    let days_remaining_in_year = days_remaining(deal.closing_date);
    let proration_factor = Decimal::from(days_remaining_in_year) / DAYS_IN_YEAR;

    let transfer_tax_cost = purchase * pos(deal.transfer_tax_rate) / dec!(100);
    let title_insurance_cost = purchase * pos(deal.title_insurance_rate) / dec!(100);
    let cpl_fee = pos(deal.cpl_fee);
    let endorsements_cost = Decimal::from(deal.endorsements_count) * ENDORSEMENT_FEE;
    let legal_settlement_cost = pos(deal.legal_settlement_fees);
    let recording_cost = pos(deal.recording_fees);
    let total_settlement_agent_fees = pos(deal.settlement_doc_prep_fee)
        + pos(deal.settlement_overnight_fee)
        + pos(deal.settlement_wire_fee);
    let association_transfer_cost = pos(deal.association_transfer_fee);
    let association_prorated_dues = pos(deal.association_annual_dues) * proration_factor;
    let municipal_tax_prorated = pos(deal.municipal_tax_annual) * proration_factor;
    let school_tax_prorated = pos(deal.school_tax_annual) * proration_factor;
    let sewer_water_prorated = pos(deal.sewer_water_annual) * proration_factor;
    let inspection_cost = pos(deal.inspection_cost);
    let appraisal_cost = pos(deal.appraisal_cost);
    let insurance_premium_cost = pos(deal.closing_insurance_premium);

    let total_third_party_fees = transfer_tax_cost
        + title_insurance_cost
        + cpl_fee
        + endorsements_cost
        + legal_settlement_cost
        + recording_cost
        + total_settlement_agent_fees
        + association_transfer_cost
        + association_prorated_dues
        + municipal_tax_prorated
        + school_tax_prorated
        + sewer_water_prorated
        + inspection_cost
        + appraisal_cost
        + insurance_premium_cost;

    let total_closing_costs = total_lender_fees + total_third_party_fees;

    // --- Stage 3: credits ---
    let seller_concession_amount = purchase * pos(deal.seller_concession_rate) / dec!(100);
    let broker_split = pos(deal.buyer_agent_broker_split_rate).min(dec!(100));
    let buyer_agent_commission_credit = purchase * pos(deal.buyer_agent_commission_rate)
        / dec!(100)
        * (Decimal::ONE - broker_split / dec!(100));

    // --- Stage 4: cash to close ---
    // Credits reduce cash at the table, never the loan. A negative figure
    // is cash back to the borrower.
    let total_cash_to_close =
        total_closing_costs + gap_amount - seller_concession_amount - buyer_agent_commission_credit;

    let prepaid_costs = inspection_cost + appraisal_cost + pos(deal.earnest_money_deposit);

    let annual_interest = qualified_loan_amount * interest_rate / dec!(100);
    let per_diem_interest = annual_interest / INTEREST_DAY_COUNT;

    let liquidity_base =
        total_closing_costs + gap_amount + per_diem_interest - buyer_agent_commission_credit;
    let required_liquidity = (liquidity_base + rehab * REHAB_LIQUIDITY_BUFFER)
        .max(liquidity_base + LIQUIDITY_FLOOR);

    // --- Stage 5: holding costs ---
    let monthly_payment = annual_interest / dec!(12);
    let schedule = DrawSchedule::linear(initial_funded_amount, holdback_amount, hold_months);
    let payment_schedule = schedule.monthly_payments(interest_rate);
    let financing_interest: Money = payment_schedule.iter().copied().sum();

    let mut monthly_carry_cost =
        pos(deal.monthly_electric) + pos(deal.monthly_internet) + pos(deal.monthly_propane);
    if deal.include_monthly_insurance {
        monthly_carry_cost += pos(deal.monthly_insurance);
    }
    if deal.include_monthly_taxes {
        monthly_carry_cost += pos(deal.monthly_taxes);
    }
    if deal.include_yearly_water {
        monthly_carry_cost += pos(deal.yearly_water) / dec!(12);
    }
    if deal.include_yearly_dues {
        monthly_carry_cost += pos(deal.yearly_dues) / dec!(12);
    }

    let total_holding_costs =
        financing_interest + monthly_carry_cost * Decimal::from(hold_months);

    // --- Stage 6: exit costs ---
    let (total_exit_costs, refinance_loan_amount) = exit_costs_at(deal, arv);

    // --- Stage 7: profitability ---
    let total_buying_costs = total_closing_costs + gap_amount;
    let total_project_cost_basis =
        qualified_loan_amount + total_buying_costs + total_holding_costs + total_exit_costs;
    let net_profit = arv - total_project_cost_basis;
    let closing_table_profit = arv - (qualified_loan_amount + total_exit_costs);

    let total_cash_invested = gap_amount + total_closing_costs + total_holding_costs
        - seller_concession_amount
        - buyer_agent_commission_credit;

    let roi = ratio_percent(net_profit, total_cash_invested);
    let project_roi = ratio_percent(net_profit, total_project_cost_basis);
    let net_margin = ratio_percent(net_profit, arv);

    let recommended_max_offer = match deal.financing {
        FinancingMode::WorkBackward {
            basis: WorkBackwardBasis::Roi,
            target,
        } => work_backward_offer(
            arv,
            rehab,
            total_closing_costs,
            total_holding_costs,
            total_exit_costs,
            target,
        ),
        _ => max_allowable_offer,
    };

    // --- Seller-side settlement ---
    let seller_commission_cost = purchase * pos(deal.seller_agent_commission_rate) / dec!(100);
    let seller_transfer_tax_cost = purchase * pos(deal.seller_transfer_tax_rate) / dec!(100);
    let seller_total_cost_to_close = seller_commission_cost
        + seller_transfer_tax_cost
        + pos(deal.seller_misc_fees)
        + seller_concession_amount;
    let seller_net_proceeds = purchase
        - pos(deal.seller_mortgage_balance)
        - pos(deal.seller_line_of_credit_balance)
        - seller_total_cost_to_close;

    // --- Stage 8: eligibility ---
    // Accumulated, never short-circuited: every violated rule surfaces.
    let mut eligibility_reasons: Vec<String> = Vec::new();

    if deal.fico_score < MIN_FICO_SCORE {
        eligibility_reasons.push(format!("Credit score below {MIN_FICO_SCORE} minimum."));
    }
    let cap_percent = cap_fraction * dec!(100);
    if ltarv > cap_percent {
        eligibility_reasons.push(format!(
            "Loan-to-ARV exceeds {}% program limit.",
            cap_percent.normalize()
        ));
    }
    if purchase > Decimal::ZERO && purchase > max_allowable_offer {
        eligibility_reasons.push(format!(
            "Purchase price exceeds max allowable offer of ${}.",
            max_allowable_offer.round_dp(2)
        ));
    }
    if pos(deal.liquidity) < required_liquidity {
        eligibility_reasons.push(format!(
            "Insufficient liquidity. Need ${}.",
            required_liquidity.round_dp(2)
        ));
    }
    if deal.experience_level < 0 {
        eligibility_reasons.push("Experience cannot be negative.".to_string());
    }

    let is_eligible = eligibility_reasons.is_empty();

    // --- Stage 9: ARV scenario sweep ---
    // Loan, buying and holding costs are locked in by the time the resale
    // market moves; only the exit side re-prices with ARV.
    let baseline_fixed_costs = qualified_loan_amount + total_buying_costs + total_holding_costs;
    let arv_scenarios = ARV_SCENARIO_GRID
        .iter()
        .map(|&percent| {
            let sim_arv = arv * (Decimal::ONE + percent);
            let (sim_exit, _) = exit_costs_at(deal, sim_arv);
            let sim_profit = sim_arv - (baseline_fixed_costs + sim_exit);
            ArvScenario {
                label: arv_scenario_label(percent),
                arv: sim_arv,
                net_profit: sim_profit,
                difference: sim_profit - net_profit,
                closing_table_profit: sim_arv - (qualified_loan_amount + sim_exit),
            }
        })
        .collect();

    ResultsRecord {
        max_ltv_percent: cap_percent,
        max_loan_by_arv,
        loan_by_financing,
        qualified_loan_amount,
        initial_funded_amount,
        holdback_amount,
        gap_amount,
        max_allowable_offer,
        recommended_max_offer,
        seventy_rule_max_offer,
        passes_70_rule,

        ltv,
        ltc,
        ltarv,
        requested_ltc,
        requested_ltarv,

        purchase_price_per_sqft,
        arv_per_sqft,

        points_cost,
        underwriting_fee,
        processing_fee,
        doc_prep_fee,
        wire_fee,
        other_lender_fees,
        total_lender_fees,

        transfer_tax_cost,
        title_insurance_cost,
        cpl_fee,
        endorsements_cost,
        legal_settlement_cost,
        recording_cost,
        total_settlement_agent_fees,
        association_transfer_cost,
        association_prorated_dues,
        municipal_tax_prorated,
        school_tax_prorated,
        sewer_water_prorated,
        inspection_cost,
        appraisal_cost,
        insurance_premium_cost,
        days_remaining_in_year,
        total_third_party_fees,

        seller_concession_amount,
        buyer_agent_commission_credit,

        per_diem_interest,
        monthly_payment,
        payment_schedule,

        total_closing_costs,
        total_cash_to_close,
        prepaid_costs,
        required_liquidity,

        is_eligible,
        eligibility_reasons,

        monthly_carry_cost,
        total_holding_costs,
        total_exit_costs,
        refinance_loan_amount,

        net_profit,
        closing_table_profit,
        roi,
        project_roi,
        net_margin,
        total_project_cost_basis,
        total_cash_invested,
        total_buying_costs,

        arv_scenarios,

        seller_commission_cost,
        seller_transfer_tax_cost,
        seller_total_cost_to_close,
        seller_net_proceeds,
    }
}

/// Underwrite with the standard envelope: validation findings and
/// computation advisories as warnings, assumptions snapshot, metadata.
pub fn underwrite(deal: &DealRecord) -> ComputationOutput<ResultsRecord> {
    let start = Instant::now();

    let mut warnings: Vec<String> = validate_deal(deal)
        .into_iter()
        .map(|i| format!("{}: {}", i.field, i.message))
        .collect();

    let result = evaluate(deal, None);

    if result.total_cash_to_close < Decimal::ZERO {
        warnings.push(format!(
            "Cash to close is negative (${} back to borrower) — confirm credits with the settlement agent",
            (-result.total_cash_to_close).round_dp(2)
        ));
    }
    if result.net_profit < Decimal::ZERO {
        warnings.push("Deal loses money at the modeled ARV".to_string());
    }
    if result.gap_amount > Decimal::ZERO && !result.passes_70_rule {
        warnings.push("Deal fails the 70% rule and requires a funding gap".to_string());
    }

    let elapsed = start.elapsed().as_micros() as u64;

    with_metadata(
        "Fix-and-Flip Underwriting (Interest-Only, Linear Draw Schedule)",
        deal,
        warnings,
        elapsed,
        result,
    )
}

// ---------------------------------------------------------------------------
// Stage helpers
// ---------------------------------------------------------------------------

fn pos(value: Decimal) -> Decimal {
    value.max(Decimal::ZERO)
}

/// num / den, 0 when the denominator is not positive.
fn ratio(num: Decimal, den: Decimal) -> Decimal {
    if den <= Decimal::ZERO {
        Decimal::ZERO
    } else {
        num / den
    }
}

/// num / den as a whole-number percent, 0 when the denominator is not
/// positive.
fn ratio_percent(num: Decimal, den: Decimal) -> Percent {
    ratio(num, den) * dec!(100)
}

/// Inclusive days from the closing date through Dec 31 of the same year.
fn days_remaining(closing_date: Option<NaiveDate>) -> u32 {
    let Some(date) = closing_date else {
        return 0;
    };
    let Some(year_end) = NaiveDate::from_ymd_opt(date.year(), 12, 31) else {
        return 0;
    };
    let days = (year_end - date).num_days();
    if days < 0 {
        0
    } else {
        days as u32 + 1
    }
}

/// Exit costs and refinance loan amount at a given resale value.
fn exit_costs_at(deal: &DealRecord, arv: Money) -> (Money, Money) {
    match deal.exit_strategy {
        ExitStrategy::Sell => {
            let commission = arv * pos(deal.selling_commission_rate) / dec!(100);
            let transfer_tax = arv * pos(deal.selling_transfer_tax_rate) / dec!(100);
            (commission + transfer_tax, Decimal::ZERO)
        }
        ExitStrategy::Refinance => {
            let refi_loan = arv * pos(deal.refinance_ltv) / dec!(100);
            let refi_points = refi_loan * pos(deal.refinance_points) / dec!(100);
            (refi_points + pos(deal.refinance_fixed_fees), refi_loan)
        }
    }
}

/// Purchase price at which the project ROI hits the work-backward target,
/// assuming full financing below the ARV cap (closing, holding and exit
/// costs held at their baseline values, as in the sensitivity sweeps).
fn work_backward_offer(
    arv: Money,
    rehab: Money,
    closing_costs: Money,
    holding_costs: Money,
    exit_costs: Money,
    target_roi: Percent,
) -> Money {
    let growth = Decimal::ONE + target_roi / dec!(100);
    if growth <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    let basis_target = arv / growth;
    (basis_target - rehab - closing_costs - holding_costs - exit_costs).max(Decimal::ZERO)
}

fn arv_scenario_label(percent: Decimal) -> String {
    if percent.is_zero() {
        "Baseline".to_string()
    } else if percent > Decimal::ZERO {
        format!("ARV +{}%", (percent * dec!(100)).normalize())
    } else {
        format!("ARV -{}%", (percent.abs() * dec!(100)).normalize())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
