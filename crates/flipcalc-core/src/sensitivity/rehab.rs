use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::sensitivity::{perturbation_label, DEFAULT_MAX_LTV, MARGIN_THRESHOLD};
use crate::types::{Money, Percent, Rate};

const REHAB_GRID: [Decimal; 7] = [
    dec!(-0.20),
    dec!(-0.10),
    dec!(-0.05),
    dec!(0),
    dec!(0.10),
    dec!(0.20),
    dec!(0.30),
];

/// How profit moves when the rehab scope runs over or under budget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RehabSensitivityScenario {
    pub label: String,
    pub rehab_cost: Money,
    /// Perturbation as a whole-number percent (-20 .. +30)
    pub percent_change: Percent,
    pub profit: Money,
    pub profit_change: Money,
    pub margin: Percent,
    pub is_below_threshold: bool,
}

/// Sweep the rehab budget across the fixed grid. Purchase price, closing
/// costs and the gap are held fixed: rehab overruns change the financed
/// amount, not the down payment.
#[allow(clippy::too_many_arguments)]
pub fn sweep_rehab_budget(
    base_rehab_budget: Money,
    base_profit: Money,
    arv: Money,
    purchase_price: Money,
    closing_costs: Money,
    gap_amount: Money,
    holding_costs: Money,
    exit_costs: Money,
    financing_percent: Percent,
    max_ltv_percent: Option<Rate>,
) -> Vec<RehabSensitivityScenario> {
    let max_ltv = max_ltv_percent.unwrap_or(DEFAULT_MAX_LTV);
    let loan_by_ltv = arv * max_ltv;
    let buying_costs = closing_costs + gap_amount;

    REHAB_GRID
        .iter()
        .map(|&percent| {
            let adjusted_rehab = base_rehab_budget * (Decimal::ONE + percent);
            let adjusted_project_cost = purchase_price + adjusted_rehab;

            let loan_by_financing = adjusted_project_cost * financing_percent / dec!(100);
            let adjusted_loan = loan_by_financing.min(loan_by_ltv);

            let cost_basis = adjusted_loan + buying_costs + holding_costs + exit_costs;
            let profit = arv - cost_basis;

            let margin = if arv > Decimal::ZERO {
                profit / arv * dec!(100)
            } else {
                Decimal::ZERO
            };

            RehabSensitivityScenario {
                label: perturbation_label(percent, "At Budget"),
                rehab_cost: adjusted_rehab,
                percent_change: percent * dec!(100),
                profit,
                profit_change: profit - base_profit,
                margin,
                is_below_threshold: margin < MARGIN_THRESHOLD,
            }
        })
        .collect()
}
