use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use flipcalc_core::jurisdiction::{
    estimate_monthly_insurance, estimate_monthly_tax, holding_factors, pa_title_insurance,
    state_costs,
};

/// Arguments for state default lookup
#[derive(Args)]
pub struct StateDefaultsArgs {
    /// Two-letter state code, e.g. PA
    #[arg(long)]
    pub state: String,

    /// Purchase price for holding-cost estimates
    #[arg(long)]
    pub purchase_price: Option<Decimal>,

    /// Rehab budget, used with --purchase-price for the PA title schedule
    #[arg(long)]
    pub rehab_budget: Option<Decimal>,
}

pub fn run_state_defaults(args: StateDefaultsArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let state = args.state.to_uppercase();
    let costs = state_costs(&state)
        .ok_or_else(|| format!("No closing-cost table for state '{state}'"))?;

    let mut out = serde_json::json!({
        "state": state,
        "closing_costs": costs,
        "holding_factors": holding_factors(&state),
    });

    if let Some(price) = args.purchase_price {
        out["monthly_insurance_estimate"] =
            serde_json::to_value(estimate_monthly_insurance(price, &state))?;
        out["monthly_tax_estimate"] = serde_json::to_value(estimate_monthly_tax(price, &state))?;

        if state == "PA" {
            let total_loan = price + args.rehab_budget.unwrap_or(Decimal::ZERO);
            out["pa_title_insurance"] = serde_json::to_value(pa_title_insurance(total_loan))?;
        }
    }

    Ok(out)
}
