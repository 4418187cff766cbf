use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{Money, Percent};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoanType {
    #[default]
    HardMoney,
    Dscr,
    Bank,
    Private,
    Other,
}

/// An alternative financing profile to overlay on the current deal.
///
/// Carries terms and presentation metadata only, never property data.
/// A lender option is always evaluated against the caller's DealRecord.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LenderOption {
    pub id: String,
    pub lender_name: String,
    pub loan_type: LoanType,
    /// Whole-number percent, same convention as DealRecord
    pub interest_rate: Percent,
    pub origination_points: Percent,

    pub underwriting_fee: Money,
    pub processing_fee: Money,
    pub doc_prep_fee: Money,
    pub wire_fee: Money,
    pub other_fees: Money,

    /// When positive, bypasses loan sizing for the comparison figures
    pub loan_amount_override: Money,
    /// Lender's own ARV cap, whole-number percent (e.g. 70)
    pub max_arv_percent: Option<Percent>,
    /// Lender's loan-to-cost ceiling, whole-number percent
    pub max_loan_to_cost_percent: Option<Percent>,

    pub include_in_comparison: bool,
    pub notes: String,
}

impl Default for LenderOption {
    fn default() -> Self {
        LenderOption {
            id: String::new(),
            lender_name: String::new(),
            loan_type: LoanType::HardMoney,
            interest_rate: Decimal::ZERO,
            origination_points: Decimal::ZERO,
            underwriting_fee: Decimal::ZERO,
            processing_fee: Decimal::ZERO,
            doc_prep_fee: Decimal::ZERO,
            wire_fee: Decimal::ZERO,
            other_fees: Decimal::ZERO,
            loan_amount_override: Decimal::ZERO,
            max_arv_percent: None,
            max_loan_to_cost_percent: None,
            include_in_comparison: true,
            notes: String::new(),
        }
    }
}
