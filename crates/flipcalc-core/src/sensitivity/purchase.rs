use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::sensitivity::{perturbation_label, DEFAULT_MAX_LTV, MARGIN_THRESHOLD};
use crate::types::{Money, Percent, Rate};

const PURCHASE_GRID: [Decimal; 7] = [
    dec!(-0.05),
    dec!(-0.02),
    dec!(0),
    dec!(0.05),
    dec!(0.10),
    dec!(0.15),
    dec!(0.20),
];

/// How profit moves when the purchase price slips from the target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseSensitivityScenario {
    pub label: String,
    pub purchase_price: Money,
    /// Perturbation as a whole-number percent (-5 .. +20)
    pub percent_change: Percent,
    pub profit: Money,
    /// Delta vs. the zero-perturbation baseline
    pub profit_change: Money,
    /// Profit over ARV, whole-number percent
    pub margin: Percent,
    /// Margin under the 15% viability threshold
    pub is_below_threshold: bool,
}

/// Sweep the purchase price across the fixed grid, re-deriving loan, gap
/// and profit per point. Closing costs are held at the baseline: only
/// the gap reacts to the price move, the same simplification the rehab
/// sweep makes.
#[allow(clippy::too_many_arguments)]
pub fn sweep_purchase_price(
    base_purchase_price: Money,
    base_profit: Money,
    arv: Money,
    rehab_budget: Money,
    closing_costs: Money,
    holding_costs: Money,
    exit_costs: Money,
    financing_percent: Percent,
    max_ltv_percent: Option<Rate>,
) -> Vec<PurchaseSensitivityScenario> {
    let max_ltv = max_ltv_percent.unwrap_or(DEFAULT_MAX_LTV);
    let loan_by_ltv = arv * max_ltv;

    PURCHASE_GRID
        .iter()
        .map(|&percent| {
            let adjusted_price = base_purchase_price * (Decimal::ONE + percent);
            let adjusted_project_cost = adjusted_price + rehab_budget;

            let loan_by_financing = adjusted_project_cost * financing_percent / dec!(100);
            let adjusted_loan = loan_by_financing.min(loan_by_ltv);

            // Gap reacts to the purchase-price portion only, recomputed the
            // same way the sizing stage does it
            let purchase_loan_portion =
                (adjusted_price * financing_percent / dec!(100)).min(adjusted_loan);
            let adjusted_gap = (adjusted_price - purchase_loan_portion).max(Decimal::ZERO);

            let buying_costs = closing_costs + adjusted_gap;
            let cost_basis = adjusted_loan + buying_costs + holding_costs + exit_costs;
            let profit = arv - cost_basis;

            let margin = if arv > Decimal::ZERO {
                profit / arv * dec!(100)
            } else {
                Decimal::ZERO
            };

            PurchaseSensitivityScenario {
                label: perturbation_label(percent, "At Price"),
                purchase_price: adjusted_price,
                percent_change: percent * dec!(100),
                profit,
                profit_change: profit - base_profit,
                margin,
                is_below_threshold: margin < MARGIN_THRESHOLD,
            }
        })
        .collect()
}
