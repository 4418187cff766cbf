pub mod purchase;
pub mod rehab;

pub use purchase::{sweep_purchase_price, PurchaseSensitivityScenario};
pub use rehab::{sweep_rehab_budget, RehabSensitivityScenario};

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::types::Rate;

/// Profit margin below which a scenario is flagged as thin.
pub const MARGIN_THRESHOLD: Decimal = dec!(15);

pub(crate) const DEFAULT_MAX_LTV: Rate = dec!(0.75);

/// Mechanical label for a perturbation row: "Over 10%", "Under 5%", or
/// the grid's zero-point label.
pub(crate) fn perturbation_label(percent: Decimal, zero_label: &str) -> String {
    if percent.is_zero() {
        zero_label.to_string()
    } else if percent > Decimal::ZERO {
        format!("Over {}%", (percent * dec!(100)).normalize())
    } else {
        format!("Under {}%", (percent.abs() * dec!(100)).normalize())
    }
}
