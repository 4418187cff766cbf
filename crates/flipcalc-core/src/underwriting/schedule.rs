use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::types::{Money, Percent};

/// Outstanding-principal timeline for a rehab loan with a holdback.
///
/// Hard-money rehab loans fund the purchase portion at closing and hold
/// the rehab portion back, releasing it in draws as work completes. Until
/// the holdback is fully drawn, interest accrues only on what is
/// outstanding, so the per-month payment is a time series rather than a
/// constant.
///
/// The default schedule releases the holdback in equal draws at the start
/// of each holding month: during month `m` of `n`, outstanding principal
/// is `initial_funded + holdback * m / n`. A milestone-based schedule can
/// replace this constructor without touching the holding-cost stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawSchedule {
    /// Outstanding principal during each holding month, in order
    pub outstanding: Vec<Money>,
}

impl DrawSchedule {
    /// Linear draw release over `months` holding months.
    pub fn linear(initial_funded: Money, holdback: Money, months: u32) -> Self {
        let mut outstanding = Vec::with_capacity(months as usize);
        if months == 0 {
            return DrawSchedule { outstanding };
        }
        let month_count = Decimal::from(months);
        for m in 1..=months {
            let drawn = holdback * Decimal::from(m) / month_count;
            outstanding.push(initial_funded + drawn);
        }
        DrawSchedule { outstanding }
    }

    /// Interest-only payment for each holding month at the given annual
    /// rate (whole-number percent).
    pub fn monthly_payments(&self, annual_rate: Percent) -> Vec<Money> {
        let monthly_rate = annual_rate / dec!(100) / dec!(12);
        self.outstanding.iter().map(|p| p * monthly_rate).collect()
    }

    /// Total interest paid across the schedule.
    pub fn total_interest(&self, annual_rate: Percent) -> Money {
        self.monthly_payments(annual_rate).iter().copied().sum()
    }

    pub fn months(&self) -> u32 {
        self.outstanding.len() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_linear_release() {
        let schedule = DrawSchedule::linear(dec!(100000), dec!(30000), 3);
        assert_eq!(
            schedule.outstanding,
            vec![dec!(110000), dec!(120000), dec!(130000)]
        );
    }

    #[test]
    fn test_payments_grow_with_draws() {
        let schedule = DrawSchedule::linear(dec!(100000), dec!(30000), 3);
        // 12% annual => 1% monthly
        let payments = schedule.monthly_payments(dec!(12));
        assert_eq!(payments, vec![dec!(1100), dec!(1200), dec!(1300)]);
        assert_eq!(schedule.total_interest(dec!(12)), dec!(3600));
    }

    #[test]
    fn test_zero_holdback_is_constant() {
        let schedule = DrawSchedule::linear(dec!(120000), Decimal::ZERO, 6);
        assert!(schedule.outstanding.iter().all(|p| *p == dec!(120000)));
    }

    #[test]
    fn test_zero_months_is_empty() {
        let schedule = DrawSchedule::linear(dec!(120000), dec!(40000), 0);
        assert!(schedule.outstanding.is_empty());
        assert_eq!(schedule.total_interest(dec!(12)), Decimal::ZERO);
    }

    #[test]
    fn test_total_interest_at_least_initial_funded_interest() {
        let initial = dec!(80000);
        let schedule = DrawSchedule::linear(initial, dec!(40000), 6);
        let base_only = DrawSchedule::linear(initial, Decimal::ZERO, 6);
        assert!(schedule.total_interest(dec!(10)) >= base_only.total_interest(dec!(10)));
    }
}
