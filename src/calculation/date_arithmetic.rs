//! Calendar arithmetic used by the accrual and usage rules.
//!
//! Month spans deliberately ignore the day of the month: an employee who
//! joined on January 31 has one month of service on February 1. Balances
//! near a month boundary can therefore drift by one month's accrual.

use chrono::{Datelike, NaiveDate};

/// Returns the number of calendar months from `start` to `end`.
///
/// Computed as `(end.year - start.year) * 12 + (end.month - start.month)`,
/// clamped to zero when `end` is in an earlier month than `start`.
///
/// # Example
///
/// ```
/// use leave_engine::calculation::months_between;
/// use chrono::NaiveDate;
///
/// let start = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
/// let end = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();
/// assert_eq!(months_between(start, end), 1);
/// assert_eq!(months_between(end, start), 0);
/// ```
pub fn months_between(start: NaiveDate, end: NaiveDate) -> u32 {
    let months = (end.year() - start.year()) * 12 + (end.month() as i32 - start.month() as i32);
    u32::try_from(months).unwrap_or(0)
}

/// Returns the inclusive number of days between two dates.
///
/// The order of the arguments does not matter.
///
/// # Example
///
/// ```
/// use leave_engine::calculation::days_between;
/// use chrono::NaiveDate;
///
/// let start = NaiveDate::from_ymd_opt(2025, 1, 10).unwrap();
/// let end = NaiveDate::from_ymd_opt(2025, 1, 12).unwrap();
/// assert_eq!(days_between(start, end), 3);
/// assert_eq!(days_between(start, start), 1);
/// ```
pub fn days_between(start: NaiveDate, end: NaiveDate) -> u32 {
    let span = (end - start).num_days().unsigned_abs();
    u32::try_from(span).unwrap_or(u32::MAX).saturating_add(1)
}

/// Returns January 1 of the date's year.
pub fn year_start(date: NaiveDate) -> NaiveDate {
    date.with_ordinal0(0).unwrap_or(date)
}

/// Returns December 31 of the date's year.
pub fn year_end(date: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(date.year(), 12, 31).unwrap_or(date)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_year_bounds_at_the_edges_of_the_calendar() {
        assert_eq!(year_start(NaiveDate::MIN), NaiveDate::MIN);
        assert_eq!(year_end(NaiveDate::MAX), NaiveDate::MAX);
        assert_eq!(year_start(NaiveDate::MAX).ordinal(), 1);
    }

    #[test]
    fn test_months_between_same_month_is_zero() {
        assert_eq!(months_between(date(2025, 3, 1), date(2025, 3, 31)), 0);
    }

    #[test]
    fn test_months_between_across_years() {
        assert_eq!(months_between(date(2023, 11, 15), date(2025, 2, 1)), 15);
    }

    #[test]
    fn test_months_between_ignores_day_of_month() {
        // One day apart but in different months counts as a full month
        assert_eq!(months_between(date(2025, 1, 31), date(2025, 2, 1)), 1);
        // Almost two months apart still counts as one
        assert_eq!(months_between(date(2025, 1, 1), date(2025, 2, 28)), 1);
    }

    #[test]
    fn test_months_between_clamps_negative_to_zero() {
        assert_eq!(months_between(date(2025, 6, 1), date(2024, 6, 1)), 0);
    }

    #[test]
    fn test_days_between_is_inclusive() {
        assert_eq!(days_between(date(2025, 1, 1), date(2025, 1, 3)), 3);
        assert_eq!(days_between(date(2024, 12, 28), date(2025, 1, 3)), 7);
    }

    #[test]
    fn test_days_between_is_symmetric() {
        assert_eq!(
            days_between(date(2025, 5, 10), date(2025, 5, 1)),
            days_between(date(2025, 5, 1), date(2025, 5, 10))
        );
    }

    #[test]
    fn test_days_between_leap_year() {
        assert_eq!(days_between(date(2024, 2, 28), date(2024, 3, 1)), 3);
    }

    #[test]
    fn test_year_bounds() {
        assert_eq!(year_start(date(2025, 7, 19)), date(2025, 1, 1));
        assert_eq!(year_end(date(2025, 7, 19)), date(2025, 12, 31));
        assert_eq!(year_start(date(2024, 2, 29)), date(2024, 1, 1));
        assert_eq!(year_end(date(2024, 2, 29)), date(2024, 12, 31));
    }
}
