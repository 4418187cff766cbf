use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::types::Money;

// Pennsylvania all-inclusive sale-rate schedule, effective May 1, 2016.
// Flat to $30k, then per-started-$1,000 increments in two bands.
const BASE_RATE: Money = dec!(569.00);
const BAND_ONE_CEILING: Money = dec!(30000);
const BAND_ONE_INCREMENT: Money = dec!(7.41);
const BAND_TWO_FLOOR: Money = dec!(45000);
const BAND_TWO_BASE: Money = dec!(680.15);
const BAND_TWO_INCREMENT: Money = dec!(6.27);

/// Pennsylvania title-insurance premium for a sale transaction, keyed by
/// the total loan amount (purchase price + rehab budget).
pub fn pa_title_insurance(total_loan_amount: Money) -> Money {
    if total_loan_amount <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    if total_loan_amount <= BAND_ONE_CEILING {
        return BASE_RATE;
    }
    if total_loan_amount <= BAND_TWO_FLOOR {
        return BASE_RATE + thousands_over(total_loan_amount, BAND_ONE_CEILING) * BAND_ONE_INCREMENT;
    }
    BAND_TWO_BASE + thousands_over(total_loan_amount, BAND_TWO_FLOOR) * BAND_TWO_INCREMENT
}

/// Started $1,000 increments above `base`.
fn thousands_over(amount: Money, base: Money) -> Decimal {
    ((amount - base) / dec!(1000)).ceil()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_flat_band() {
        assert_eq!(pa_title_insurance(dec!(1)), dec!(569.00));
        assert_eq!(pa_title_insurance(dec!(30000)), dec!(569.00));
    }

    #[test]
    fn test_band_one_edges() {
        // One started increment past $30k
        assert_eq!(pa_title_insurance(dec!(30000.01)), dec!(576.41));
        assert_eq!(pa_title_insurance(dec!(31000)), dec!(576.41));
        // Top of band one
        assert_eq!(pa_title_insurance(dec!(45000)), dec!(680.15));
    }

    #[test]
    fn test_band_two_edges() {
        assert_eq!(pa_title_insurance(dec!(46000)), dec!(686.42));
        assert_eq!(pa_title_insurance(dec!(250000)), dec!(1965.50));
    }

    #[test]
    fn test_extension_above_250k() {
        // Schedule continues at $6.27 per started $1,000
        assert_eq!(pa_title_insurance(dec!(251000)), dec!(1971.77));
        assert_eq!(pa_title_insurance(dec!(300000)), dec!(1965.50) + dec!(6.27) * dec!(50));
    }

    #[test]
    fn test_zero_and_negative_are_zero() {
        assert_eq!(pa_title_insurance(Decimal::ZERO), Decimal::ZERO);
        assert_eq!(pa_title_insurance(dec!(-5)), Decimal::ZERO);
    }
}
