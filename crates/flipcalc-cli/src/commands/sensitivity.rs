use clap::Args;
use serde_json::Value;

use flipcalc_core::deal::DealRecord;
use flipcalc_core::sensitivity::{sweep_purchase_price, sweep_rehab_budget};
use flipcalc_core::underwriting;

use crate::input;

/// Arguments for the purchase-price sweep
#[derive(Args)]
pub struct SensitivityPurchaseArgs {
    /// Path to JSON input file (a DealRecord)
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for the rehab-budget sweep
#[derive(Args)]
pub struct SensitivityRehabArgs {
    /// Path to JSON input file (a DealRecord)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_sensitivity_purchase(
    args: SensitivityPurchaseArgs,
) -> Result<Value, Box<dyn std::error::Error>> {
    let deal: DealRecord = input::load(args.input.as_deref(), "purchase sensitivity")?;
    let baseline = underwriting::evaluate(&deal, None);

    let rows = sweep_purchase_price(
        deal.purchase_price,
        baseline.net_profit,
        deal.arv,
        deal.rehab_budget,
        baseline.total_closing_costs,
        baseline.total_holding_costs,
        baseline.total_exit_costs,
        deal.financing.effective_percent(),
        None,
    );

    Ok(serde_json::json!({
        "base_profit": baseline.net_profit,
        "results": rows,
    }))
}

pub fn run_sensitivity_rehab(
    args: SensitivityRehabArgs,
) -> Result<Value, Box<dyn std::error::Error>> {
    let deal: DealRecord = input::load(args.input.as_deref(), "rehab sensitivity")?;
    let baseline = underwriting::evaluate(&deal, None);

    let rows = sweep_rehab_budget(
        deal.rehab_budget,
        baseline.net_profit,
        deal.arv,
        deal.purchase_price,
        baseline.total_closing_costs,
        baseline.gap_amount,
        baseline.total_holding_costs,
        baseline.total_exit_costs,
        deal.financing.effective_percent(),
        None,
    );

    Ok(serde_json::json!({
        "base_profit": baseline.net_profit,
        "results": rows,
    }))
}
