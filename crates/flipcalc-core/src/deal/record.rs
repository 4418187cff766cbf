use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::types::{Money, Percent};
use crate::FlipCalcResult;

// ---------------------------------------------------------------------------
// Enumerations
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PropertyType {
    #[default]
    Sfr,
    MultiFamily,
    MixedUse,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FoundationType {
    #[default]
    Basement,
    CrawlSpace,
    Slab,
    Other,
}

/// How the deal is disposed of at the end of the holding period.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExitStrategy {
    /// Flip: sell at ARV, pay commission and transfer tax on the sale
    #[default]
    Sell,
    /// BRRR: refinance at a fixed LTV, pay points and fixed refi fees
    Refinance,
}

/// Metric a work-backward financing target is expressed against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkBackwardBasis {
    Roi,
    Ltc,
}

/// Financing selection for the sizing stage, chosen once per deal.
///
/// `Standard` uses the program's advertised financing percentage,
/// `Custom` a negotiated one. `WorkBackward` sizes the loan at full
/// financing and lets the target drive the recommended maximum offer
/// instead (ROI basis), or sizes directly at the target (LTC basis).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum FinancingMode {
    Standard { percent: Percent },
    Custom { percent: Percent },
    WorkBackward { basis: WorkBackwardBasis, target: Percent },
}

impl Default for FinancingMode {
    fn default() -> Self {
        FinancingMode::Standard {
            percent: dec!(100),
        }
    }
}

impl FinancingMode {
    /// Effective financing percentage fed into loan sizing, clamped to
    /// [0, 100].
    pub fn effective_percent(&self) -> Percent {
        let pct = match self {
            FinancingMode::Standard { percent } => *percent,
            FinancingMode::Custom { percent } => *percent,
            FinancingMode::WorkBackward { basis, target } => match basis {
                WorkBackwardBasis::Ltc => *target,
                WorkBackwardBasis::Roi => dec!(100),
            },
        };
        pct.clamp(Decimal::ZERO, dec!(100))
    }
}

// ---------------------------------------------------------------------------
// Rehab line items
// ---------------------------------------------------------------------------

/// One itemized entry of the rehab scope (e.g. "Kitchen: cabinets, $8,500").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RehabLineItem {
    pub category: String,
    pub description: String,
    pub amount: Money,
}

// ---------------------------------------------------------------------------
// Deal record
// ---------------------------------------------------------------------------

/// Flat record of every parameter of a rehab deal. Pure data, no behavior
/// beyond small accessors; the underwriting engine derives everything else.
///
/// Monetary fields are non-negative unless explicitly a credit. Rate fields
/// are whole-number percentages (10.99 = 10.99%).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DealRecord {
    // --- Lender info ---
    pub lender_name: String,

    // --- Property ---
    pub address: String,
    pub state: String,
    pub zip_code: String,
    pub property_type: PropertyType,
    pub units: u32,
    pub sq_ft: Decimal,
    pub beds: u32,
    pub baths: Decimal,
    pub foundation_type: FoundationType,

    // --- Deal economics ---
    pub purchase_price: Money,
    pub as_is_value: Money,
    pub rehab_budget: Money,
    /// Itemized rehab scope; informational alongside the flat budget
    pub rehab_line_items: Vec<RehabLineItem>,
    /// After-Repair Value
    pub arv: Money,

    // --- Credits ---
    pub seller_concession_rate: Percent,
    pub earnest_money_deposit: Money,
    pub buyer_agent_commission_rate: Percent,
    /// Share of the buyer-agent commission retained by the broker
    pub buyer_agent_broker_split_rate: Percent,

    // --- Borrower profile ---
    pub fico_score: u32,
    /// Number of completed past deals
    pub experience_level: i32,
    /// Cash on hand evidenced for proof of funds
    pub liquidity: Money,

    // --- Financing ---
    pub financing: FinancingMode,
    pub interest_rate: Percent,
    pub origination_points: Percent,
    pub loan_term_months: u32,

    // --- Lender fee schedule ---
    pub underwriting_fee: Money,
    pub processing_fee: Money,
    pub doc_prep_fee: Money,
    pub wire_fee: Money,
    pub other_lender_fees: Money,

    // --- Closing ---
    pub closing_date: Option<NaiveDate>,

    // --- Third-party / settlement fee schedule ---
    pub transfer_tax_rate: Percent,
    pub title_insurance_rate: Percent,
    /// Closing Protection Letter flat fee
    pub cpl_fee: Money,
    /// Title endorsements, charged at $100 each
    pub endorsements_count: u32,
    pub legal_settlement_fees: Money,
    pub recording_fees: Money,
    pub settlement_doc_prep_fee: Money,
    pub settlement_overnight_fee: Money,
    pub settlement_wire_fee: Money,
    /// Community/HOA transfer charge collected at closing
    pub association_transfer_fee: Money,
    /// Annual association dues, prorated by days remaining in the year
    pub association_annual_dues: Money,
    /// Annual municipal tax, prorated by days remaining in the year
    pub municipal_tax_annual: Money,
    pub school_tax_annual: Money,
    pub sewer_water_annual: Money,
    pub inspection_cost: Money,
    pub appraisal_cost: Money,
    /// First-year hazard/builder's-risk premium collected at closing
    pub closing_insurance_premium: Money,

    // --- Holding assumptions ---
    pub holding_period_months: u32,
    pub monthly_electric: Money,
    pub monthly_internet: Money,
    pub monthly_propane: Money,
    pub monthly_insurance: Money,
    pub include_monthly_insurance: bool,
    pub monthly_taxes: Money,
    pub include_monthly_taxes: bool,
    pub yearly_water: Money,
    pub include_yearly_water: bool,
    pub yearly_dues: Money,
    pub include_yearly_dues: bool,

    // --- Exit assumptions ---
    pub exit_strategy: ExitStrategy,
    pub selling_commission_rate: Percent,
    pub selling_transfer_tax_rate: Percent,
    pub refinance_ltv: Percent,
    pub refinance_points: Percent,
    pub refinance_fixed_fees: Money,

    // --- Seller side ---
    pub seller_original_purchase_price: Money,
    pub seller_mortgage_balance: Money,
    pub seller_line_of_credit_balance: Money,
    pub seller_agent_commission_rate: Percent,
    pub seller_transfer_tax_rate: Percent,
    pub seller_misc_fees: Money,

    // --- Notes ---
    pub notes: String,
}

impl Default for DealRecord {
    fn default() -> Self {
        DealRecord {
            lender_name: String::new(),

            address: String::new(),
            state: "PA".to_string(),
            zip_code: String::new(),
            property_type: PropertyType::Sfr,
            units: 1,
            sq_ft: Decimal::ZERO,
            beds: 0,
            baths: Decimal::ZERO,
            foundation_type: FoundationType::Basement,

            purchase_price: Decimal::ZERO,
            as_is_value: Decimal::ZERO,
            rehab_budget: Decimal::ZERO,
            rehab_line_items: Vec::new(),
            arv: Decimal::ZERO,

            seller_concession_rate: Decimal::ZERO,
            earnest_money_deposit: Decimal::ZERO,
            buyer_agent_commission_rate: Decimal::ZERO,
            buyer_agent_broker_split_rate: Decimal::ZERO,

            fico_score: 0,
            experience_level: 0,
            liquidity: Decimal::ZERO,

            financing: FinancingMode::default(),
            interest_rate: Decimal::ZERO,
            origination_points: Decimal::ZERO,
            loan_term_months: 12,

            underwriting_fee: Decimal::ZERO,
            processing_fee: Decimal::ZERO,
            doc_prep_fee: Decimal::ZERO,
            wire_fee: Decimal::ZERO,
            other_lender_fees: Decimal::ZERO,

            closing_date: None,

            transfer_tax_rate: Decimal::ZERO,
            title_insurance_rate: Decimal::ZERO,
            cpl_fee: Decimal::ZERO,
            endorsements_count: 0,
            legal_settlement_fees: Decimal::ZERO,
            recording_fees: Decimal::ZERO,
            settlement_doc_prep_fee: Decimal::ZERO,
            settlement_overnight_fee: Decimal::ZERO,
            settlement_wire_fee: Decimal::ZERO,
            association_transfer_fee: Decimal::ZERO,
            association_annual_dues: Decimal::ZERO,
            municipal_tax_annual: Decimal::ZERO,
            school_tax_annual: Decimal::ZERO,
            sewer_water_annual: Decimal::ZERO,
            inspection_cost: Decimal::ZERO,
            appraisal_cost: Decimal::ZERO,
            closing_insurance_premium: Decimal::ZERO,

            holding_period_months: 6,
            monthly_electric: Decimal::ZERO,
            monthly_internet: Decimal::ZERO,
            monthly_propane: Decimal::ZERO,
            monthly_insurance: Decimal::ZERO,
            include_monthly_insurance: false,
            monthly_taxes: Decimal::ZERO,
            include_monthly_taxes: false,
            yearly_water: Decimal::ZERO,
            include_yearly_water: false,
            yearly_dues: Decimal::ZERO,
            include_yearly_dues: false,

            exit_strategy: ExitStrategy::Sell,
            selling_commission_rate: dec!(5.0),
            selling_transfer_tax_rate: dec!(1.0),
            refinance_ltv: dec!(80.0),
            refinance_points: dec!(2.0),
            refinance_fixed_fees: dec!(1795),

            seller_original_purchase_price: Decimal::ZERO,
            seller_mortgage_balance: Decimal::ZERO,
            seller_line_of_credit_balance: Decimal::ZERO,
            seller_agent_commission_rate: dec!(5.0),
            seller_transfer_tax_rate: dec!(1.0),
            seller_misc_fees: Decimal::ZERO,

            notes: String::new(),
        }
    }
}

impl DealRecord {
    /// Sum of the itemized rehab scope. Zero when no items are entered.
    pub fn itemized_rehab_total(&self) -> Money {
        self.rehab_line_items.iter().map(|li| li.amount).sum()
    }

    pub fn from_json(json: &str) -> FlipCalcResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> FlipCalcResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_financing_is_full_standard() {
        let deal = DealRecord::default();
        assert_eq!(deal.financing.effective_percent(), dec!(100));
    }

    #[test]
    fn test_effective_percent_clamps() {
        let over = FinancingMode::Custom {
            percent: dec!(130),
        };
        assert_eq!(over.effective_percent(), dec!(100));

        let under = FinancingMode::Standard {
            percent: dec!(-10),
        };
        assert_eq!(under.effective_percent(), Decimal::ZERO);
    }

    #[test]
    fn test_work_backward_ltc_uses_target() {
        let mode = FinancingMode::WorkBackward {
            basis: WorkBackwardBasis::Ltc,
            target: dec!(85),
        };
        assert_eq!(mode.effective_percent(), dec!(85));
    }

    #[test]
    fn test_work_backward_roi_sizes_at_full_financing() {
        let mode = FinancingMode::WorkBackward {
            basis: WorkBackwardBasis::Roi,
            target: dec!(20),
        };
        assert_eq!(mode.effective_percent(), dec!(100));
    }

    #[test]
    fn test_itemized_rehab_total() {
        let mut deal = DealRecord::default();
        deal.rehab_line_items = vec![
            RehabLineItem {
                category: "Kitchen".into(),
                description: "Cabinets and counters".into(),
                amount: dec!(8500),
            },
            RehabLineItem {
                category: "Roof".into(),
                description: "Full replacement".into(),
                amount: dec!(12000),
            },
        ];
        assert_eq!(deal.itemized_rehab_total(), dec!(20500));
    }

    #[test]
    fn test_json_round_trip_is_lossless() {
        let mut deal = DealRecord::default();
        deal.purchase_price = dec!(130000);
        deal.rehab_budget = dec!(50000);
        deal.arv = dec!(300000);
        deal.interest_rate = dec!(10.99);
        deal.closing_date = NaiveDate::from_ymd_opt(2025, 2, 28);

        let json = deal.to_json().unwrap();
        let reloaded = DealRecord::from_json(&json).unwrap();
        assert_eq!(deal, reloaded);
    }
}
