use clap::Args;
use serde_json::Value;

use flipcalc_core::time_value::{flip_irr, FlipIrrInputs};

use crate::input;

/// Arguments for flip IRR
#[derive(Args)]
pub struct FlipIrrArgs {
    /// Path to JSON input file (FlipIrrInputs)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_flip_irr(args: FlipIrrArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let inputs: FlipIrrInputs = input::load(args.input.as_deref(), "flip IRR")?;
    let irr = flip_irr(&inputs)?;
    Ok(serde_json::json!({
        "annual_irr": irr,
        "inputs": inputs,
    }))
}
