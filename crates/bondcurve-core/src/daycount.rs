//! Year-fraction convention.
//!
//! Bondcurve models exactly one day count: actual days divided by 365.25.
//! It is used to turn issue/maturity dates into a maturity in years and to
//! place each bond on the curve relative to the as-of date.

use crate::types::Date;

/// Days per year under the ACT/365.25 convention.
pub const DAYS_PER_YEAR: f64 = 365.25;

/// Year fraction between two dates (ACT/365.25).
///
/// Negative when `end` is before `start`.
///
/// # Example
///
/// ```rust
/// use bondcurve_core::{year_fraction, Date};
///
/// let start = Date::from_ymd(2024, 1, 1).unwrap();
/// let end = Date::from_ymd(2025, 1, 1).unwrap();
/// assert!((year_fraction(start, end) - 366.0 / 365.25).abs() < 1e-12);
/// ```
pub fn year_fraction(start: Date, end: Date) -> f64 {
    start.days_between(&end) as f64 / DAYS_PER_YEAR
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_four_year_span_is_whole() {
        let start = Date::from_ymd(2020, 3, 1).unwrap();
        let end = Date::from_ymd(2024, 3, 1).unwrap();

        // 1461 days = 4 * 365.25
        assert_relative_eq!(year_fraction(start, end), 4.0, epsilon = 1e-12);
    }

    #[test]
    fn test_reversed_dates_negative() {
        let start = Date::from_ymd(2030, 1, 1).unwrap();
        let end = Date::from_ymd(2029, 1, 1).unwrap();

        assert!(year_fraction(start, end) < 0.0);
    }
}
