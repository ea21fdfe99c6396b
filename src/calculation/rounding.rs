//! Rounding rules for reported day counts.

use rust_decimal::{Decimal, RoundingStrategy};

/// Number of decimal places reported for every day count.
pub const DAY_PRECISION: u32 = 2;

/// Floors a day count to two decimal places.
///
/// Balances are only ever rounded down so an employee is never shown more
/// leave than they have earned.
///
/// # Example
///
/// ```
/// use leave_engine::calculation::floor_days;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// assert_eq!(floor_days(Decimal::from_str("8.3399").unwrap()).to_string(), "8.33");
/// assert_eq!(floor_days(Decimal::from(21)).to_string(), "21.00");
/// ```
pub fn floor_days(value: Decimal) -> Decimal {
    let mut floored =
        value.round_dp_with_strategy(DAY_PRECISION, RoundingStrategy::ToNegativeInfinity);
    floored.rescale(DAY_PRECISION);
    floored
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_floor_never_rounds_up() {
        assert_eq!(floor_days(dec("1.239")), dec("1.23"));
        assert_eq!(floor_days(dec("0.999")), dec("0.99"));
    }

    #[test]
    fn test_floor_repeating_fraction() {
        // 10 / 12 * 7 = 5.8333...
        let value = Decimal::from(10) / Decimal::from(12) * Decimal::from(7);
        assert_eq!(floor_days(value), dec("5.83"));
    }

    #[test]
    fn test_floor_pads_to_two_places() {
        assert_eq!(floor_days(dec("10.5")).to_string(), "10.50");
        assert_eq!(floor_days(Decimal::ZERO).to_string(), "0.00");
    }
}
