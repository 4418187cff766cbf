use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::FlipCalcError;
use crate::types::{Money, Rate};
use crate::FlipCalcResult;

const CONVERGENCE_THRESHOLD: Decimal = dec!(0.0000001);
const MAX_IRR_ITERATIONS: u32 = 100;

/// A cash flow at a month offset. Month 0 is the closing table; amounts
/// are negative going out, positive coming in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonthlyCashFlow {
    pub month: u32,
    pub amount: Money,
}

/// Net Present Value at a monthly discount rate.
pub fn npv_monthly(monthly_rate: Rate, flows: &[MonthlyCashFlow]) -> FlipCalcResult<Money> {
    if monthly_rate <= dec!(-1) {
        return Err(FlipCalcError::InvalidInput {
            field: "monthly_rate".into(),
            reason: "Discount rate must be greater than -100%".into(),
        });
    }

    let one_plus_r = Decimal::ONE + monthly_rate;
    let mut result = Decimal::ZERO;

    for flow in flows {
        let discount = one_plus_r.powd(Decimal::from(flow.month));
        if discount.is_zero() {
            return Err(FlipCalcError::DivisionByZero {
                context: format!("NPV discount factor at month {}", flow.month),
            });
        }
        result += flow.amount / discount;
    }

    Ok(result)
}

/// Monthly Internal Rate of Return using Newton-Raphson.
pub fn irr_monthly(flows: &[MonthlyCashFlow], guess: Rate) -> FlipCalcResult<Rate> {
    if flows.len() < 2 {
        return Err(FlipCalcError::InsufficientData(
            "IRR requires at least 2 cash flows".into(),
        ));
    }

    let has_outflow = flows.iter().any(|f| f.amount < Decimal::ZERO);
    let has_inflow = flows.iter().any(|f| f.amount > Decimal::ZERO);
    if !has_outflow || !has_inflow {
        return Err(FlipCalcError::InsufficientData(
            "IRR requires both an outflow and an inflow".into(),
        ));
    }

    let mut rate = guess;

    for i in 0..MAX_IRR_ITERATIONS {
        let mut npv_val = Decimal::ZERO;
        let mut dnpv = Decimal::ZERO;
        let one_plus_r = Decimal::ONE + rate;

        if one_plus_r <= Decimal::ZERO {
            return Err(FlipCalcError::ConvergenceFailure {
                function: "IRR".into(),
                iterations: i,
                last_delta: rate,
            });
        }

        for flow in flows {
            let m = Decimal::from(flow.month);
            let discount = one_plus_r.powd(m);
            if discount.is_zero() {
                continue;
            }
            npv_val += flow.amount / discount;
            if flow.month > 0 {
                dnpv -= m * flow.amount / one_plus_r.powd(m + Decimal::ONE);
            }
        }

        if npv_val.abs() < CONVERGENCE_THRESHOLD {
            return Ok(rate);
        }

        if dnpv.is_zero() {
            return Err(FlipCalcError::ConvergenceFailure {
                function: "IRR".into(),
                iterations: i,
                last_delta: npv_val,
            });
        }

        rate -= npv_val / dnpv;

        // Guard against divergence
        if rate < dec!(-0.99) {
            rate = dec!(-0.99);
        } else if rate > dec!(10.0) {
            rate = dec!(10.0);
        }
    }

    Err(FlipCalcError::ConvergenceFailure {
        function: "IRR".into(),
        iterations: MAX_IRR_ITERATIONS,
        last_delta: npv_monthly(rate, flows).unwrap_or(Decimal::MAX),
    })
}

/// Annualize a monthly rate with monthly compounding.
pub fn annualize_monthly_rate(monthly_rate: Rate) -> Rate {
    (Decimal::ONE + monthly_rate).powd(dec!(12)) - Decimal::ONE
}

// ---------------------------------------------------------------------------
// Flip IRR
// ---------------------------------------------------------------------------

/// Cash-flow shape of a whole flip, month by month.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlipIrrInputs {
    /// Cash down at closing (gap / down payment)
    pub down_payment: Money,
    /// Acquisition closing costs and fees
    pub closing_costs_and_fees: Money,
    /// Rehab spending, treated as upfront
    pub rehab_budget: Money,
    /// Average monthly carrying cost over the hold
    pub monthly_holding_costs: Money,
    pub holding_months: u32,
    /// Gross sale price (ARV)
    pub sale_proceeds: Money,
    /// Commissions, transfer tax and other selling costs
    pub selling_costs: Money,
    /// Loan balance retired at sale
    pub loan_payoff: Money,
}

/// Annualized IRR for a flip: cash out at closing, carrying costs each
/// month, net proceeds in the exit month.
pub fn flip_irr(inputs: &FlipIrrInputs) -> FlipCalcResult<Rate> {
    let initial = -(inputs.down_payment + inputs.closing_costs_and_fees + inputs.rehab_budget);
    let net_sale = inputs.sale_proceeds - inputs.selling_costs - inputs.loan_payoff;

    let mut flows = Vec::with_capacity(inputs.holding_months as usize + 2);
    if !initial.is_zero() {
        flows.push(MonthlyCashFlow {
            month: 0,
            amount: initial,
        });
    }
    for month in 1..=inputs.holding_months {
        if !inputs.monthly_holding_costs.is_zero() {
            flows.push(MonthlyCashFlow {
                month,
                amount: -inputs.monthly_holding_costs,
            });
        }
    }
    if !net_sale.is_zero() {
        flows.push(MonthlyCashFlow {
            month: inputs.holding_months,
            amount: net_sale,
        });
    }

    let monthly = irr_monthly(&flows, dec!(0.02))?;
    Ok(annualize_monthly_rate(monthly))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
