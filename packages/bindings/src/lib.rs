use napi::Result as NapiResult;
use napi_derive::napi;
use serde::Deserialize;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Underwriting
// ---------------------------------------------------------------------------

#[napi]
pub fn underwrite_deal(input_json: String) -> NapiResult<String> {
    let deal: flipcalc_core::deal::DealRecord =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = flipcalc_core::underwriting::underwrite(&deal);
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn evaluate_deal(input_json: String, max_arv_percent: Option<String>) -> NapiResult<String> {
    let deal: flipcalc_core::deal::DealRecord =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let cap = max_arv_percent
        .map(|s| s.parse::<rust_decimal::Decimal>())
        .transpose()
        .map_err(to_napi_error)?;
    let results = flipcalc_core::underwriting::evaluate(&deal, cap);
    serde_json::to_string(&results).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Lender comparison
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct CompareLenderInput {
    deal: flipcalc_core::deal::DealRecord,
    lender: flipcalc_core::lender::LenderOption,
}

#[napi]
pub fn compare_lender(input_json: String) -> NapiResult<String> {
    let input: CompareLenderInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let baseline = flipcalc_core::underwriting::evaluate(&input.deal, None);
    let comparison =
        flipcalc_core::lender::compare_lender(&input.deal, &baseline, &input.lender);
    serde_json::to_string(&comparison).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Sensitivity sweeps
// ---------------------------------------------------------------------------

#[napi]
pub fn sweep_purchase_price(input_json: String) -> NapiResult<String> {
    let deal: flipcalc_core::deal::DealRecord =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let baseline = flipcalc_core::underwriting::evaluate(&deal, None);
    let rows = flipcalc_core::sensitivity::sweep_purchase_price(
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
    serde_json::to_string(&rows).map_err(to_napi_error)
}

#[napi]
pub fn sweep_rehab_budget(input_json: String) -> NapiResult<String> {
    let deal: flipcalc_core::deal::DealRecord =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let baseline = flipcalc_core::underwriting::evaluate(&deal, None);
    let rows = flipcalc_core::sensitivity::sweep_rehab_budget(
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
    serde_json::to_string(&rows).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Rehab analysis
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct RehabAnalysisInput {
    budget: rust_decimal::Decimal,
    purchase_price: rust_decimal::Decimal,
    sq_ft: rust_decimal::Decimal,
}

#[napi]
pub fn analyze_rehab_budget(input_json: String) -> NapiResult<String> {
    let input: RehabAnalysisInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let analysis =
        flipcalc_core::rehab::analyze_rehab_budget(input.budget, input.purchase_price, input.sq_ft);
    serde_json::to_string(&analysis).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Jurisdiction tables
// ---------------------------------------------------------------------------

#[napi]
pub fn state_closing_costs(state: String) -> NapiResult<String> {
    let costs = flipcalc_core::jurisdiction::state_costs(&state);
    serde_json::to_string(&costs).map_err(to_napi_error)
}

#[napi]
pub fn pa_title_insurance(total_loan_amount: String) -> NapiResult<String> {
    let amount: rust_decimal::Decimal = total_loan_amount.parse().map_err(to_napi_error)?;
    let premium = flipcalc_core::jurisdiction::pa_title_insurance(amount);
    serde_json::to_string(&premium).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Time value
// ---------------------------------------------------------------------------

#[napi]
pub fn flip_irr(input_json: String) -> NapiResult<String> {
    let inputs: flipcalc_core::time_value::FlipIrrInputs =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let irr = flipcalc_core::time_value::flip_irr(&inputs).map_err(to_napi_error)?;
    serde_json::to_string(&irr).map_err(to_napi_error)
}
