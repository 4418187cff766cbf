use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::types::{Money, Percent};

/// Closing-cost lookup entry for one state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateClosingCosts {
    /// Flat title-insurance estimate (PA deals should prefer the rate
    /// schedule in `title_rates`)
    pub title_insurance: Money,
    /// Closing Protection Letter fee
    pub cpl_fee: Money,
    /// Transfer tax as a whole-number percent
    pub transfer_tax_rate: Percent,
}

/// Closing-cost defaults by state. Immutable reference data; states not
/// listed return None.
pub fn state_costs(state: &str) -> Option<StateClosingCosts> {
    let (title_insurance, cpl_fee, transfer_tax_rate) = match state {
        "PA" => (dec!(1589.30), dec!(125), dec!(0)),
        "NJ" => (dec!(1200), dec!(125), dec!(0.5)),
        "NY" => (dec!(1400), dec!(150), dec!(0.5)),
        "CA" => (dec!(900), dec!(0), dec!(1.1)),
        "TX" => (dec!(600), dec!(0), dec!(0)),
        "FL" => (dec!(800), dec!(0), dec!(0)),
        "IL" => (dec!(1000), dec!(100), dec!(0.5)),
        "MD" => (dec!(1100), dec!(125), dec!(0.5)),
        "VA" => (dec!(950), dec!(0), dec!(0)),
        "NC" => (dec!(850), dec!(0), dec!(0.2)),
        "SC" => (dec!(800), dec!(0), dec!(0)),
        "GA" => (dec!(750), dec!(0), dec!(0.1)),
        "OH" => (dec!(900), dec!(0), dec!(0)),
        "MI" => (dec!(950), dec!(0), dec!(0)),
        "AZ" => (dec!(850), dec!(0), dec!(0.1)),
        "NV" => (dec!(900), dec!(0), dec!(0)),
        _ => return None,
    };
    Some(StateClosingCosts {
        title_insurance,
        cpl_fee,
        transfer_tax_rate,
    })
}
