pub mod holding_costs;
pub mod state_costs;
pub mod title_rates;

pub use holding_costs::{
    estimate_monthly_insurance, estimate_monthly_tax, holding_factors, StateHoldingFactors,
};
pub use state_costs::{state_costs, StateClosingCosts};
pub use title_rates::pa_title_insurance;

use crate::deal::DealRecord;

/// Seed a deal's jurisdiction-driven fee fields from the state table.
///
/// Sets the CPL fee and transfer-tax rate; everything else on the deal is
/// left alone. Returns false (and changes nothing) for states not in the
/// table. This is a caller-side convenience; the underwriting engine
/// itself never consults the tables.
pub fn apply_state_defaults(deal: &mut DealRecord, state: &str) -> bool {
    let Some(costs) = state_costs(state) else {
        return false;
    };
    deal.state = state.to_string();
    deal.cpl_fee = costs.cpl_fee;
    deal.transfer_tax_rate = costs.transfer_tax_rate;
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_apply_known_state() {
        let mut deal = DealRecord::default();
        assert!(apply_state_defaults(&mut deal, "NJ"));
        assert_eq!(deal.state, "NJ");
        assert_eq!(deal.cpl_fee, dec!(125));
        assert_eq!(deal.transfer_tax_rate, dec!(0.5));
    }

    #[test]
    fn test_unknown_state_is_untouched() {
        let mut deal = DealRecord::default();
        let before = deal.clone();
        assert!(!apply_state_defaults(&mut deal, "ZZ"));
        assert_eq!(deal, before);
    }
}
