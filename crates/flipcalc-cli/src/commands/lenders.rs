use clap::Args;
use serde::Deserialize;
use serde_json::Value;

use flipcalc_core::deal::DealRecord;
use flipcalc_core::lender::{compare_lender, LenderOption};
use flipcalc_core::underwriting;

use crate::input;

/// Arguments for lender comparison
#[derive(Args)]
pub struct CompareLendersArgs {
    /// Path to JSON input file ({ "deal": ..., "lenders": [...] })
    #[arg(long)]
    pub input: Option<String>,

    /// Include lenders whose include_in_comparison flag is off
    #[arg(long)]
    pub all: bool,
}

#[derive(Deserialize)]
struct CompareLendersInput {
    deal: DealRecord,
    lenders: Vec<LenderOption>,
}

pub fn run_compare_lenders(
    args: CompareLendersArgs,
) -> Result<Value, Box<dyn std::error::Error>> {
    let req: CompareLendersInput = input::load(args.input.as_deref(), "lender comparison")?;

    if req.lenders.is_empty() {
        return Err("At least one lender option is required".into());
    }

    let baseline = underwriting::evaluate(&req.deal, None);

    let comparisons: Vec<Value> = req
        .lenders
        .iter()
        .filter(|l| args.all || l.include_in_comparison)
        .map(|lender| {
            let cmp = compare_lender(&req.deal, &baseline, lender);
            serde_json::json!({
                "lender_id": lender.id,
                "lender_name": lender.lender_name,
                "comparison_loan_amount": cmp.comparison_loan_amount,
                "comparison_points_cost": cmp.comparison_points_cost,
                "comparison_monthly_payment": cmp.comparison_monthly_payment,
                "lender_upfront_fees": cmp.lender_upfront_fees,
                "upfront_fees_delta": cmp.upfront_fees_delta,
                "monthly_payment_delta": cmp.monthly_payment_delta,
                "total_cost_over_hold_delta": cmp.total_cost_over_hold_delta,
                "net_profit": cmp.results.net_profit,
                "is_eligible": cmp.results.is_eligible,
            })
        })
        .collect();

    Ok(serde_json::json!({
        "baseline": baseline,
        "results": comparisons,
    }))
}
