mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::irr::FlipIrrArgs;
use commands::jurisdiction::StateDefaultsArgs;
use commands::lenders::CompareLendersArgs;
use commands::rehab::RehabAnalysisArgs;
use commands::sensitivity::{SensitivityPurchaseArgs, SensitivityRehabArgs};
use commands::underwrite::UnderwriteArgs;

/// Deterministic fix-and-flip underwriting calculations
#[derive(Parser)]
#[command(
    name = "flipcalc",
    version,
    about = "Deterministic fix-and-flip underwriting calculations",
    long_about = "A CLI for underwriting residential rehab deals with decimal \
                  precision. Sizes the loan, itemizes closing costs, models \
                  holding and exit costs, checks program eligibility, and runs \
                  lender comparisons and sensitivity sweeps."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Underwrite a deal: full results record from a deal JSON
    Underwrite(UnderwriteArgs),
    /// Re-underwrite under each lender's terms and rank against baseline
    CompareLenders(CompareLendersArgs),
    /// Sweep the purchase price across the fixed perturbation grid
    SensitivityPurchase(SensitivityPurchaseArgs),
    /// Sweep the rehab budget across the fixed perturbation grid
    SensitivityRehab(SensitivityRehabArgs),
    /// Sanity-check a rehab budget ($/sqft, contingency sizing)
    RehabAnalysis(RehabAnalysisArgs),
    /// Look up per-state closing-cost and holding-cost defaults
    StateDefaults(StateDefaultsArgs),
    /// Annualized IRR for a flip cash-flow timeline
    FlipIrr(FlipIrrArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Underwrite(args) => commands::underwrite::run_underwrite(args),
        Commands::CompareLenders(args) => commands::lenders::run_compare_lenders(args),
        Commands::SensitivityPurchase(args) => {
            commands::sensitivity::run_sensitivity_purchase(args)
        }
        Commands::SensitivityRehab(args) => commands::sensitivity::run_sensitivity_rehab(args),
        Commands::RehabAnalysis(args) => commands::rehab::run_rehab_analysis(args),
        Commands::StateDefaults(args) => commands::jurisdiction::run_state_defaults(args),
        Commands::FlipIrr(args) => commands::irr::run_flip_irr(args),
        Commands::Version => {
            println!("flipcalc {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
