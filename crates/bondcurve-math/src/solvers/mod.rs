//! Root-finding algorithms.
//!
//! - [`expand_bracket`]: widens an interval until the function changes sign
//! - [`newton_bisection`]: Newton-Raphson steps kept inside a bracket, with
//!   bisection whenever a Newton step would leave it or stalls
//!
//! The pair is what yield-to-maturity solving needs: the price/yield
//! relationship of a coupon bond is smooth and monotone, so Newton converges
//! in a handful of steps once a bracket is known, and the bisection fallback
//! guarantees termination for awkward prices.
//!
//! # Example: YTM Calculation
//!
//! ```rust
//! use bondcurve_math::solvers::{expand_bracket, newton_bisection, SolverConfig};
//!
//! // Bond: 5% annual coupon, 5 years, price 95
//! let price_fn = |y: f64| {
//!     let mut pv = 0.0;
//!     for t in 1..=5 {
//!         pv += 5.0 / (1.0 + y).powi(t);
//!     }
//!     pv += 100.0 / (1.0 + y).powi(5);
//!     pv - 95.0
//! };
//! let d_price_fn = |y: f64| {
//!     let mut dpv = 0.0;
//!     for t in 1..=5 {
//!         dpv -= f64::from(t) * 5.0 / (1.0 + y).powi(t + 1);
//!     }
//!     dpv - 5.0 * 100.0 / (1.0 + y).powi(6)
//! };
//!
//! let config = SolverConfig::default();
//! let (lo, hi) = expand_bracket(&price_fn, 0.0, 0.02, Some(-1.0), 20).unwrap();
//! let result = newton_bisection(price_fn, d_price_fn, lo, hi, &config).unwrap();
//! assert!(result.root > 0.05);
//! ```

mod bracket;
mod newton_bisection;

pub use bracket::expand_bracket;
pub use newton_bisection::newton_bisection;

/// Default tolerance on the root (step size).
pub const DEFAULT_TOLERANCE: f64 = 1e-10;

/// Default tolerance on the function value.
pub const DEFAULT_FUNCTION_TOLERANCE: f64 = 1e-8;

/// Default maximum iterations for root-finding algorithms.
pub const DEFAULT_MAX_ITERATIONS: u32 = 100;

/// Configuration for root-finding algorithms.
///
/// Iteration stops as soon as either tolerance is met.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverConfig {
    /// Convergence tolerance on the root (absolute step size).
    pub tolerance: f64,
    /// Convergence tolerance on `|f(x)|`.
    pub function_tolerance: f64,
    /// Maximum number of iterations.
    pub max_iterations: u32,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            function_tolerance: DEFAULT_FUNCTION_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

impl SolverConfig {
    /// Creates a new solver configuration.
    #[must_use]
    pub fn new(tolerance: f64, function_tolerance: f64, max_iterations: u32) -> Self {
        Self {
            tolerance,
            function_tolerance,
            max_iterations,
        }
    }

    /// Sets the root tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Sets the function-value tolerance.
    #[must_use]
    pub fn with_function_tolerance(mut self, function_tolerance: f64) -> Self {
        self.function_tolerance = function_tolerance;
        self
    }

    /// Sets the maximum iterations.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }
}

/// Result of a root-finding iteration.
#[derive(Debug, Clone, Copy)]
pub struct SolverResult {
    /// The root found.
    pub root: f64,
    /// Number of iterations used.
    pub iterations: u32,
    /// Final residual (function value at root).
    pub residual: f64,
}
