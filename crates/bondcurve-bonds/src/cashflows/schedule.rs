//! Semi-annual cash flow schedule.
//!
//! A bond maturing in `T` years is modelled as `n = floor(2T)` half-year
//! periods. The schedule holds one entry for each period index `0..=n`:
//! every entry pays the half-year coupon and the last one also repays face
//! value. Amounts do not depend on the discount rate, so one schedule serves
//! NPV, yield and duration calculations alike.

use serde::{Deserialize, Serialize};

use crate::error::{BondError, BondResult};
use crate::instruments::Bond;

/// Longest maturity accepted when generating a schedule.
pub const MAX_MATURITY_YEARS: f64 = 1000.0;

/// A single undiscounted payment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CashFlow {
    /// Half-year period index, counted from 0.
    pub period: u32,
    /// Payment amount.
    pub amount: f64,
}

impl CashFlow {
    /// Time of the payment in years.
    pub fn time_years(&self) -> f64 {
        f64::from(self.period) / 2.0
    }

    /// Discount factor for this payment at a semi-annually compounded rate.
    ///
    /// The caller guarantees `rate > -2`.
    pub fn discount_factor(&self, rate: f64) -> f64 {
        (1.0 + rate / 2.0).powi(-(self.period as i32))
    }
}

/// Ordered, undiscounted payments of a bond.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashFlowSchedule {
    flows: Vec<CashFlow>,
}

impl CashFlowSchedule {
    /// Generates the schedule for the given terms.
    ///
    /// # Errors
    ///
    /// Returns `InvalidMaturity` when `maturity_years` is not positive (or is
    /// absurdly long), and `InvalidSpec` for a non-positive face value or a
    /// negative coupon.
    ///
    /// # Example
    ///
    /// ```rust
    /// use bondcurve_bonds::cashflows::CashFlowSchedule;
    ///
    /// let schedule = CashFlowSchedule::generate(1000.0, 0.05, 2.0).unwrap();
    /// let amounts: Vec<f64> = schedule.iter().map(|cf| cf.amount).collect();
    /// assert_eq!(amounts, vec![25.0, 25.0, 25.0, 25.0, 1025.0]);
    /// ```
    pub fn generate(face_value: f64, coupon_rate: f64, maturity_years: f64) -> BondResult<Self> {
        if !maturity_years.is_finite() || maturity_years <= 0.0 || maturity_years > MAX_MATURITY_YEARS
        {
            return Err(BondError::invalid_maturity(maturity_years));
        }
        if !face_value.is_finite() || face_value <= 0.0 {
            return Err(BondError::invalid_spec(format!(
                "face value must be positive, got {face_value}"
            )));
        }
        if !coupon_rate.is_finite() || coupon_rate < 0.0 {
            return Err(BondError::invalid_spec(format!(
                "coupon rate must be non-negative, got {coupon_rate}"
            )));
        }

        let periods = (maturity_years * 2.0).floor() as u32;
        let coupon = face_value * coupon_rate / 2.0;

        let flows = (0..=periods)
            .map(|period| CashFlow {
                period,
                amount: if period == periods {
                    coupon + face_value
                } else {
                    coupon
                },
            })
            .collect();

        Ok(Self { flows })
    }

    /// Generates the schedule of a bond.
    pub fn for_bond(bond: &Bond) -> BondResult<Self> {
        Self::generate(bond.face_value(), bond.coupon_rate(), bond.maturity_years())
    }

    /// Returns the cash flows.
    pub fn flows(&self) -> &[CashFlow] {
        &self.flows
    }

    /// Iterates over the cash flows in period order.
    pub fn iter(&self) -> std::slice::Iter<'_, CashFlow> {
        self.flows.iter()
    }

    /// Number of entries (`floor(2T) + 1`).
    pub fn len(&self) -> usize {
        self.flows.len()
    }

    /// Always false for a generated schedule.
    pub fn is_empty(&self) -> bool {
        self.flows.is_empty()
    }

    /// Index of the final period.
    pub fn final_period(&self) -> u32 {
        self.flows.last().map_or(0, |cf| cf.period)
    }

    /// Sum of the undiscounted amounts: the price at a zero yield.
    pub fn total_amount(&self) -> f64 {
        self.flows.iter().map(|cf| cf.amount).sum()
    }
}

impl<'a> IntoIterator for &'a CashFlowSchedule {
    type Item = &'a CashFlow;
    type IntoIter = std::slice::Iter<'a, CashFlow>;

    fn into_iter(self) -> Self::IntoIter {
        self.flows.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_ten_year_schedule() {
        let schedule = CashFlowSchedule::generate(1000.0, 0.05, 10.0).unwrap();

        assert_eq!(schedule.len(), 21);
        assert_eq!(schedule.final_period(), 20);
        assert!(schedule.flows()[..20].iter().all(|cf| cf.amount == 25.0));
        assert_relative_eq!(schedule.flows()[20].amount, 1025.0);
        assert_relative_eq!(schedule.total_amount(), 21.0 * 25.0 + 1000.0);
    }

    #[test]
    fn test_fractional_maturity_truncates() {
        // floor(2 * 2.9) = 5 periods
        let schedule = CashFlowSchedule::generate(100.0, 0.04, 2.9).unwrap();
        assert_eq!(schedule.len(), 6);
        assert_relative_eq!(schedule.flows()[5].time_years(), 2.5);
    }

    #[test]
    fn test_short_maturity_single_flow() {
        let schedule = CashFlowSchedule::generate(100.0, 0.06, 0.25).unwrap();
        assert_eq!(schedule.len(), 1);
        assert_relative_eq!(schedule.flows()[0].amount, 103.0);
    }

    #[test]
    fn test_zero_coupon() {
        let schedule = CashFlowSchedule::generate(100.0, 0.0, 1.0).unwrap();
        let amounts: Vec<f64> = schedule.iter().map(|cf| cf.amount).collect();
        assert_eq!(amounts, vec![0.0, 0.0, 100.0]);
    }

    #[test]
    fn test_invalid_maturity() {
        for years in [0.0, -1.0, f64::NAN, f64::INFINITY, 5000.0] {
            assert!(matches!(
                CashFlowSchedule::generate(1000.0, 0.05, years),
                Err(BondError::InvalidMaturity { .. })
            ));
        }
    }

    #[test]
    fn test_invalid_terms() {
        assert!(CashFlowSchedule::generate(0.0, 0.05, 1.0).is_err());
        assert!(CashFlowSchedule::generate(100.0, -0.05, 1.0).is_err());
    }

    #[test]
    fn test_discount_factor() {
        let cf = CashFlow {
            period: 2,
            amount: 100.0,
        };
        assert_relative_eq!(cf.discount_factor(0.04), 1.0 / 1.0404, epsilon = 1e-12);
        assert_relative_eq!(cf.time_years(), 1.0);
    }
}
