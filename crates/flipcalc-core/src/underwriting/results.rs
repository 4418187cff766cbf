use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{Money, Percent};

/// One row of the embedded ARV stress grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArvScenario {
    pub label: String,
    pub arv: Money,
    pub net_profit: Money,
    /// Profit delta against the zero-perturbation baseline
    pub difference: Money,
    pub closing_table_profit: Money,
}

/// Complete derived output of the underwriting engine.
///
/// Every field is always populated; consumers never need to null-check.
/// The record is a value: it is recomputed wholesale on every deal change
/// and never patched in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultsRecord {
    // --- Loan sizing ---
    /// Program ARV cap as a whole-number percent (75 = 75%)
    pub max_ltv_percent: Percent,
    /// ARV x cap: the ceiling the loan can never exceed
    pub max_loan_by_arv: Money,
    /// Total project cost x financing percent (the requested amount)
    pub loan_by_financing: Money,
    /// min(loan-by-financing, ARV cap)
    pub qualified_loan_amount: Money,
    /// Funded at closing: qualified loan minus the rehab holdback
    pub initial_funded_amount: Money,
    pub holdback_amount: Money,
    /// Purchase-price shortfall the borrower must bring as down payment
    pub gap_amount: Money,
    /// Highest purchase price that keeps full funding under the ARV cap
    pub max_allowable_offer: Money,
    /// Offer ceiling under the selected financing mode (ROI-target aware)
    pub recommended_max_offer: Money,
    /// ARV x 70% minus rehab budget
    pub seventy_rule_max_offer: Money,
    pub passes_70_rule: bool,

    // --- Ratios (whole-number percents, 0 when the denominator is 0) ---
    /// Qualified loan vs. as-is value
    pub ltv: Percent,
    /// Qualified loan vs. total project cost
    pub ltc: Percent,
    /// Qualified loan vs. ARV
    pub ltarv: Percent,
    /// Requested (uncapped) loan vs. total project cost
    pub requested_ltc: Percent,
    /// Requested (uncapped) loan vs. ARV
    pub requested_ltarv: Percent,

    // --- Per-unit metrics ---
    pub purchase_price_per_sqft: Decimal,
    pub arv_per_sqft: Decimal,

    // --- Lender fees ---
    pub points_cost: Money,
    pub underwriting_fee: Money,
    pub processing_fee: Money,
    pub doc_prep_fee: Money,
    pub wire_fee: Money,
    pub other_lender_fees: Money,
    pub total_lender_fees: Money,

    // --- Third-party / settlement fees ---
    pub transfer_tax_cost: Money,
    pub title_insurance_cost: Money,
    pub cpl_fee: Money,
    pub endorsements_cost: Money,
    pub legal_settlement_cost: Money,
    pub recording_cost: Money,
    pub total_settlement_agent_fees: Money,
    pub association_transfer_cost: Money,
    pub association_prorated_dues: Money,
    pub municipal_tax_prorated: Money,
    pub school_tax_prorated: Money,
    pub sewer_water_prorated: Money,
    pub inspection_cost: Money,
    pub appraisal_cost: Money,
    pub insurance_premium_cost: Money,
    /// Inclusive days from closing date to Dec 31; 0 when no date set
    pub days_remaining_in_year: u32,
    pub total_third_party_fees: Money,

    // --- Credits ---
    pub seller_concession_amount: Money,
    pub buyer_agent_commission_credit: Money,

    // --- Interest ---
    pub per_diem_interest: Money,
    /// Headline interest-only payment on the full qualified loan
    pub monthly_payment: Money,
    /// Per-month payments under the holdback draw schedule
    pub payment_schedule: Vec<Money>,

    // --- Totals ---
    pub total_closing_costs: Money,
    /// May be negative: cash back to the borrower at the table
    pub total_cash_to_close: Money,
    /// Inspection + appraisal + earnest deposit, paid before closing
    pub prepaid_costs: Money,
    pub required_liquidity: Money,

    // --- Eligibility ---
    pub is_eligible: bool,
    /// Every violated rule, in evaluation order; never short-circuited
    pub eligibility_reasons: Vec<String>,

    // --- Holding & exit ---
    /// Non-financing monthly carry (utilities plus toggled items)
    pub monthly_carry_cost: Money,
    pub total_holding_costs: Money,
    pub total_exit_costs: Money,
    /// Zero under a sale exit
    pub refinance_loan_amount: Money,

    // --- Profitability ---
    pub net_profit: Money,
    /// ARV minus loan payoff and exit costs: pre-holding-cost sanity figure
    pub closing_table_profit: Money,
    /// Cash-on-cash return, percent
    pub roi: Percent,
    /// Return on total project cost basis, percent
    pub project_roi: Percent,
    /// Net profit over ARV, percent
    pub net_margin: Percent,
    pub total_project_cost_basis: Money,
    pub total_cash_invested: Money,
    pub total_buying_costs: Money,

    // --- Scenarios ---
    pub arv_scenarios: Vec<ArvScenario>,

    // --- Seller side ---
    pub seller_commission_cost: Money,
    pub seller_transfer_tax_cost: Money,
    pub seller_total_cost_to_close: Money,
    pub seller_net_proceeds: Money,
}
