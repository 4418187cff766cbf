use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use flipcalc_core::rehab::analyze_rehab_budget;

/// Arguments for rehab budget analysis
#[derive(Args)]
pub struct RehabAnalysisArgs {
    /// Rehab budget in dollars
    #[arg(long)]
    pub budget: Decimal,

    /// Purchase price in dollars
    #[arg(long)]
    pub purchase_price: Decimal,

    /// Above-grade square footage
    #[arg(long)]
    pub sq_ft: Decimal,
}

pub fn run_rehab_analysis(args: RehabAnalysisArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let analysis = analyze_rehab_budget(args.budget, args.purchase_price, args.sq_ft)
        .ok_or("Rehab analysis needs a positive budget and square footage")?;
    Ok(serde_json::to_value(analysis)?)
}
