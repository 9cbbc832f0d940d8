//! Present value and yield-to-maturity.
//!
//! Rates are annual, compounded semi-annually: a flow in period `i` is
//! discounted by `(1 + r/2)^i`. The discount base must stay positive, so
//! every rate must satisfy `r > -2`.

mod yield_solver;

pub use yield_solver::{YieldResult, YieldSolver};

use crate::cashflows::CashFlow;
use crate::error::{BondError, BondResult};

/// Lowest rate for which semi-annual discounting is defined (exclusive).
pub const MIN_RATE: f64 = -2.0;

/// Net present value of the flows at `discount_rate`.
///
/// # Errors
///
/// Returns `OutOfRangeValue` when the rate is not finite or `<= -2`, or when
/// the resulting NPV is not finite.
///
/// # Example
///
/// ```rust
/// use bondcurve_bonds::cashflows::CashFlowSchedule;
/// use bondcurve_bonds::pricing::compute_npv;
///
/// let schedule = CashFlowSchedule::generate(100.0, 0.04, 1.0).unwrap();
/// // 2 + 2/1.02 + 102/1.02^2: par plus the undiscounted period-0 coupon
/// let npv = compute_npv(schedule.flows(), 0.04).unwrap();
/// assert!((npv - 102.0).abs() < 1e-9);
/// ```
pub fn compute_npv(flows: &[CashFlow], discount_rate: f64) -> BondResult<f64> {
    check_rate("discount rate", discount_rate)?;

    let npv = present_value(flows, discount_rate);
    if !npv.is_finite() {
        return Err(BondError::out_of_range("NPV", npv));
    }
    Ok(npv)
}

/// Rejects rates at which discounting is undefined.
pub(crate) fn check_rate(quantity: &'static str, rate: f64) -> BondResult<()> {
    if !rate.is_finite() || rate <= MIN_RATE {
        return Err(BondError::out_of_range(quantity, rate));
    }
    Ok(())
}

/// Unchecked present value; callers ensure `rate > -2`.
pub(crate) fn present_value(flows: &[CashFlow], rate: f64) -> f64 {
    flows.iter().map(|cf| cf.amount * cf.discount_factor(rate)).sum()
}

/// Derivative of [`present_value`] with respect to the rate.
///
/// `d/dr (1 + r/2)^-i = -(i/2) (1 + r/2)^-(i+1)`
pub(crate) fn present_value_derivative(flows: &[CashFlow], rate: f64) -> f64 {
    let base = 1.0 + rate / 2.0;
    flows
        .iter()
        .map(|cf| -cf.time_years() * cf.amount * cf.discount_factor(rate) / base)
        .sum()
}
