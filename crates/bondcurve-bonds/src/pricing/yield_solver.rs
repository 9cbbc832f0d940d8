//! Yield-to-maturity solver.
//!
//! Finds the semi-annually compounded rate at which the NPV of a schedule
//! equals a target price. The search first widens an initial bracket until
//! the pricing error changes sign, then runs Newton-Raphson on the analytic
//! price derivative, falling back to bisection whenever a Newton step would
//! leave the bracket.
//!
//! # Example
//!
//! ```rust
//! use bondcurve_bonds::cashflows::CashFlowSchedule;
//! use bondcurve_bonds::pricing::YieldSolver;
//!
//! let schedule = CashFlowSchedule::generate(100.0, 0.06, 5.0).unwrap();
//! let result = YieldSolver::new().solve(&schedule, 103.0).unwrap();
//! println!("YTM: {:.6}%", result.yield_value * 100.0);
//! ```

use bondcurve_math::solvers::{expand_bracket, newton_bisection, SolverConfig};
use bondcurve_math::MathError;

use crate::cashflows::CashFlowSchedule;
use crate::error::{BondError, BondResult};
use crate::pricing::{present_value, present_value_derivative, MIN_RATE};

/// Default initial search interval for the yield.
pub const DEFAULT_INITIAL_BRACKET: (f64, f64) = (-0.5, 5.0);

/// Default number of bracket expansions before giving up.
pub const DEFAULT_MAX_BRACKET_EXPANSIONS: u32 = 60;

/// Result of a yield calculation.
#[derive(Debug, Clone, Copy)]
pub struct YieldResult {
    /// The calculated yield (as a decimal, e.g., 0.05 for 5%).
    pub yield_value: f64,
    /// Number of iterations to converge.
    pub iterations: u32,
    /// Final pricing error (should be near zero).
    pub residual: f64,
}

/// Yield-to-maturity solver.
#[derive(Debug, Clone)]
pub struct YieldSolver {
    config: SolverConfig,
    initial_bracket: (f64, f64),
    max_bracket_expansions: u32,
}

impl Default for YieldSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl YieldSolver {
    /// Creates a new yield solver with default settings.
    ///
    /// Default yield tolerance: 1e-10
    /// Default price tolerance: 1e-8
    /// Default max iterations: 100
    /// Default initial bracket: [-0.5, 5.0]
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: SolverConfig::default(),
            initial_bracket: DEFAULT_INITIAL_BRACKET,
            max_bracket_expansions: DEFAULT_MAX_BRACKET_EXPANSIONS,
        }
    }

    /// Sets the tolerance on the yield.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.config = self.config.with_tolerance(tolerance);
        self
    }

    /// Sets the tolerance on the price.
    ///
    /// Targets below 1 scale it by the target, so that tiny prices are still
    /// matched to the same relative precision.
    #[must_use]
    pub fn with_price_tolerance(mut self, tolerance: f64) -> Self {
        self.config = self.config.with_function_tolerance(tolerance);
        self
    }

    /// Sets the maximum iterations.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.config = self.config.with_max_iterations(max_iterations);
        self
    }

    /// Sets the interval the bracket search starts from.
    #[must_use]
    pub fn with_initial_bracket(mut self, lo: f64, hi: f64) -> Self {
        self.initial_bracket = (lo, hi);
        self
    }

    /// Sets how many times the bracket may be widened.
    #[must_use]
    pub fn with_max_bracket_expansions(mut self, expansions: u32) -> Self {
        self.max_bracket_expansions = expansions;
        self
    }

    /// Returns the solver configuration.
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Returns the initial bracket.
    pub fn initial_bracket(&self) -> (f64, f64) {
        self.initial_bracket
    }

    /// Solves for the yield that reprices the schedule at `target_price`.
    ///
    /// # Errors
    ///
    /// Returns `YieldNotFound` when the target is not a positive finite
    /// price, when the schedule has a single flow (its value does not depend
    /// on the rate), when no sign change is found after widening the bracket
    /// (the price exceeds what any admissible rate can produce), or when the
    /// iteration cap is hit.
    pub fn solve(&self, schedule: &CashFlowSchedule, target_price: f64) -> BondResult<YieldResult> {
        if !target_price.is_finite() || target_price <= 0.0 {
            return Err(BondError::yield_not_found(
                target_price,
                "target price must be positive and finite",
            ));
        }
        if schedule.len() < 2 {
            return Err(BondError::yield_not_found(
                target_price,
                "a single cash flow at period 0 does not depend on the rate",
            ));
        }

        let flows = schedule.flows();
        let objective = |y: f64| present_value(flows, y) - target_price;
        let derivative = |y: f64| present_value_derivative(flows, y);

        let (lo, hi) = self.initial_bracket;
        let (lo, hi) = expand_bracket(
            &objective,
            lo,
            hi,
            Some(MIN_RATE),
            self.max_bracket_expansions,
        )
        .map_err(|e| Self::search_failed(target_price, &e))?;

        let config = self.price_config(target_price);
        let result = newton_bisection(objective, derivative, lo, hi, &config)
            .map_err(|e| Self::search_failed(target_price, &e))?;

        if !result.root.is_finite() || result.root <= MIN_RATE {
            return Err(BondError::out_of_range("yield to maturity", result.root));
        }

        log::debug!(
            "solved yield {:.10} for price {} in {} iterations (residual {:.2e})",
            result.root,
            target_price,
            result.iterations,
            result.residual
        );

        Ok(YieldResult {
            yield_value: result.root,
            iterations: result.iterations,
            residual: result.residual,
        })
    }

    fn price_config(&self, target_price: f64) -> SolverConfig {
        self.config
            .with_function_tolerance(self.config.function_tolerance * target_price.min(1.0))
    }

    fn search_failed(target_price: f64, error: &MathError) -> BondError {
        BondError::yield_not_found(target_price, error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::compute_npv;
    use approx::assert_relative_eq;

    #[test]
    fn test_round_trip_ten_year() {
        let schedule = CashFlowSchedule::generate(1000.0, 0.05, 10.0).unwrap();
        let price = compute_npv(schedule.flows(), 0.04).unwrap();

        let result = YieldSolver::new().solve(&schedule, price).unwrap();

        assert_relative_eq!(result.yield_value, 0.04, epsilon = 1e-8);
        assert!(result.iterations <= 100);
    }

    #[test]
    fn test_price_at_undiscounted_sum_gives_zero_yield() {
        let schedule = CashFlowSchedule::generate(100.0, 0.05, 4.0).unwrap();
        let result = YieldSolver::new()
            .solve(&schedule, schedule.total_amount())
            .unwrap();

        assert!(result.yield_value.abs() < 1e-8);
    }

    #[test]
    fn test_negative_yield_below_initial_bracket() {
        // Price far above the undiscounted sum needs a rate below -0.5
        let schedule = CashFlowSchedule::generate(100.0, 0.02, 5.0).unwrap();
        let price = compute_npv(schedule.flows(), -0.8).unwrap();

        let result = YieldSolver::new().solve(&schedule, price).unwrap();

        assert_relative_eq!(result.yield_value, -0.8, epsilon = 1e-8);
    }

    #[test]
    fn test_very_high_yield_expands_upwards() {
        let schedule = CashFlowSchedule::generate(100.0, 0.10, 3.0).unwrap();
        let price = compute_npv(schedule.flows(), 8.0).unwrap();

        let result = YieldSolver::new().solve(&schedule, price).unwrap();

        assert_relative_eq!(result.yield_value, 8.0, epsilon = 1e-6);
    }

    #[test]
    fn test_tiny_prices_round_trip() {
        let solver = YieldSolver::new();
        for (face, coupon, maturity, rate) in [
            (1.0, 0.0, 30.0, 1.0),
            (1.0, 0.0, 30.0, 0.5),
            (100.0, 0.0, 10.0, 3.0),
        ] {
            let schedule = CashFlowSchedule::generate(face, coupon, maturity).unwrap();
            let price = compute_npv(schedule.flows(), rate).unwrap();

            let result = solver.solve(&schedule, price).unwrap();

            assert_relative_eq!(result.yield_value, rate, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_huge_price_needs_lower_bracket_end() {
        let schedule = CashFlowSchedule::generate(1.0, 0.05, 100.0).unwrap();
        let price = compute_npv(schedule.flows(), -0.9).unwrap();

        let result = YieldSolver::new().solve(&schedule, price).unwrap();

        assert_relative_eq!(result.yield_value, -0.9, epsilon = 1e-6);
    }

    #[test]
    fn test_degenerate_prices() {
        let schedule = CashFlowSchedule::generate(100.0, 0.05, 2.0).unwrap();
        let solver = YieldSolver::new();

        for price in [0.0, -10.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                solver.solve(&schedule, price),
                Err(BondError::YieldNotFound { .. })
            ));
        }
    }

    #[test]
    fn test_price_below_period_zero_coupon_is_infeasible() {
        // The period-0 coupon is paid undiscounted, so no rate can push the
        // price below it.
        let schedule = CashFlowSchedule::generate(100.0, 0.10, 2.0).unwrap();
        assert!(matches!(
            YieldSolver::new()
                .with_max_bracket_expansions(10)
                .solve(&schedule, 4.0),
            Err(BondError::YieldNotFound { .. })
        ));
    }

    #[test]
    fn test_single_flow_rejected() {
        let schedule = CashFlowSchedule::generate(100.0, 0.05, 0.25).unwrap();
        assert!(matches!(
            YieldSolver::new().solve(&schedule, 102.5),
            Err(BondError::YieldNotFound { .. })
        ));
    }

    #[test]
    fn test_iteration_cap_reported() {
        let schedule = CashFlowSchedule::generate(1000.0, 0.05, 30.0).unwrap();
        let price = compute_npv(schedule.flows(), 0.0731).unwrap();

        let result = YieldSolver::new()
            .with_tolerance(0.0)
            .with_price_tolerance(0.0)
            .with_max_iterations(1)
            .solve(&schedule, price);

        assert!(matches!(result, Err(BondError::YieldNotFound { .. })));
    }
}
