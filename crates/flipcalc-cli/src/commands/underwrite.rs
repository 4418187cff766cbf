use clap::Args;
use serde_json::Value;

use flipcalc_core::deal::DealRecord;
use flipcalc_core::underwriting;

use crate::input;

/// Arguments for deal underwriting
#[derive(Args)]
pub struct UnderwriteArgs {
    /// Path to JSON input file (a DealRecord)
    #[arg(long)]
    pub input: Option<String>,

    /// Override the program's ARV cap, e.g. 0.70 for 70%
    #[arg(long)]
    pub max_arv_percent: Option<rust_decimal::Decimal>,
}

pub fn run_underwrite(args: UnderwriteArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let deal: DealRecord = input::load(args.input.as_deref(), "underwriting")?;

    // A cap override bypasses the envelope and returns the raw record;
    // the default path reports validation warnings alongside the result.
    let value = match args.max_arv_percent {
        Some(cap) => serde_json::to_value(underwriting::evaluate(&deal, Some(cap)))?,
        None => serde_json::to_value(underwriting::underwrite(&deal))?,
    };
    Ok(value)
}
