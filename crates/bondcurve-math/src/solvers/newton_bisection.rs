//! Safeguarded Newton-Raphson.
//!
//! Combines Newton-Raphson with bisection inside a bracket.

use crate::error::{MathError, MathResult};
use crate::solvers::{SolverConfig, SolverResult};

/// Safeguarded Newton-Raphson root finder.
///
/// Keeps a bracket `[a, b]` with `f(a) * f(b) <= 0` and takes a Newton step
/// from the current iterate whenever that step lands inside the bracket and
/// shrinks the previous step by at least half. Otherwise it bisects. The
/// bracket is tightened after every evaluation, so the iteration converges
/// for any continuous `f`, at Newton's quadratic rate near a simple root.
///
/// # Convergence
///
/// Stops when `|f(x)| <= config.function_tolerance` or the last step is
/// smaller than `config.tolerance`, whichever comes first, and gives up
/// after `config.max_iterations`.
///
/// # Arguments
///
/// * `f` - The function for which to find a root
/// * `df` - The derivative of the function
/// * `a` - One end of the bracket
/// * `b` - The other end of the bracket
/// * `config` - Solver configuration
///
/// # Example
///
/// ```rust
/// use bondcurve_math::solvers::{newton_bisection, SolverConfig};
///
/// let f = |x: f64| x * x * x - x - 2.0;
/// let df = |x: f64| 3.0 * x * x - 1.0;
///
/// let result = newton_bisection(f, df, 1.0, 2.0, &SolverConfig::default()).unwrap();
/// assert!(f(result.root).abs() < 1e-8);
/// ```
pub fn newton_bisection<F, DF>(
    f: F,
    df: DF,
    a: f64,
    b: f64,
    config: &SolverConfig,
) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
    DF: Fn(f64) -> f64,
{
    let lo = a.min(b);
    let hi = a.max(b);

    let f_lo = f(lo);
    let f_hi = f(hi);

    if !(f_lo.is_finite() && f_hi.is_finite()) {
        return Err(MathError::invalid_input(format!(
            "non-finite function value at bracket end: f({lo}) = {f_lo}, f({hi}) = {f_hi}"
        )));
    }

    if f_lo.abs() <= config.function_tolerance {
        return Ok(SolverResult {
            root: lo,
            iterations: 0,
            residual: f_lo,
        });
    }
    if f_hi.abs() <= config.function_tolerance {
        return Ok(SolverResult {
            root: hi,
            iterations: 0,
            residual: f_hi,
        });
    }

    if f_lo * f_hi > 0.0 {
        return Err(MathError::InvalidBracket {
            a: lo,
            b: hi,
            fa: f_lo,
            fb: f_hi,
        });
    }

    // Orient so that f(x_neg) < 0 < f(x_pos)
    let (mut x_neg, mut x_pos) = if f_lo < 0.0 { (lo, hi) } else { (hi, lo) };

    let mut x = 0.5 * (lo + hi);
    let mut step = hi - lo;
    let mut previous_step = step;
    let mut fx = f(x);
    let mut dfx = df(x);

    if !fx.is_finite() {
        return Err(MathError::invalid_input(format!(
            "non-finite function value at x = {x}"
        )));
    }
    if fx < 0.0 {
        x_neg = x;
    } else {
        x_pos = x;
    }

    for iteration in 1..=config.max_iterations {
        if fx.abs() <= config.function_tolerance {
            return Ok(SolverResult {
                root: x,
                iterations: iteration - 1,
                residual: fx,
            });
        }

        let leaves_bracket = ((x - x_pos) * dfx - fx) * ((x - x_neg) * dfx - fx) > 0.0;
        let too_slow = (2.0 * fx).abs() > (previous_step * dfx).abs();

        previous_step = step;
        if !dfx.is_finite() || dfx == 0.0 || leaves_bracket || too_slow {
            step = 0.5 * (x_pos - x_neg);
            x = x_neg + step;
        } else {
            step = fx / dfx;
            x -= step;
        }

        fx = f(x);

        if step.abs() < config.tolerance {
            return Ok(SolverResult {
                root: x,
                iterations: iteration,
                residual: fx,
            });
        }

        if !fx.is_finite() {
            return Err(MathError::invalid_input(format!(
                "non-finite function value at x = {x}"
            )));
        }

        dfx = df(x);
        if fx < 0.0 {
            x_neg = x;
        } else {
            x_pos = x;
        }
    }

    Err(MathError::convergence_failed(config.max_iterations, fx.abs()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    #[test]
    fn test_sqrt_2() {
        let f = |x: f64| x * x - 2.0;
        let df = |x: f64| 2.0 * x;

        let config = SolverConfig::default().with_function_tolerance(1e-14);
        let result = newton_bisection(f, df, 1.0, 2.0, &config).unwrap();

        assert_relative_eq!(result.root, std::f64::consts::SQRT_2, epsilon = 1e-10);
    }

    #[test]
    fn test_reversed_bracket() {
        let f = |x: f64| x * x - 2.0;
        let df = |x: f64| 2.0 * x;

        let config = SolverConfig::default().with_function_tolerance(1e-14);
        let result = newton_bisection(f, df, 2.0, 1.0, &config).unwrap();

        assert_relative_eq!(result.root, std::f64::consts::SQRT_2, epsilon = 1e-10);
    }

    #[test]
    fn test_invalid_bracket() {
        let f = |x: f64| x * x - 2.0;
        let df = |x: f64| 2.0 * x;

        let result = newton_bisection(f, df, 2.0, 3.0, &SolverConfig::default());
        assert!(matches!(result, Err(MathError::InvalidBracket { .. })));
    }

    #[test]
    fn test_root_at_endpoint() {
        let f = |x: f64| x - 1.0;
        let df = |_: f64| 1.0;

        let result = newton_bisection(f, df, 0.0, 1.0, &SolverConfig::default()).unwrap();

        assert_relative_eq!(result.root, 1.0);
        assert_eq!(result.iterations, 0);
    }

    #[test]
    fn test_bad_derivative_falls_back_to_bisection() {
        // Derivative deliberately wrong in sign: every Newton step would
        // leave the bracket, so only bisection steps are taken.
        let f = |x: f64| x * x * x - 2.0 * x - 5.0;
        let df = |_: f64| -1.0;

        let config = SolverConfig::default().with_function_tolerance(1e-12);
        let result = newton_bisection(f, df, 2.0, 3.0, &config).unwrap();

        assert!(f(result.root).abs() < 1e-8);
        assert!(result.iterations > 10);
    }

    #[test]
    fn test_zero_derivative_handled() {
        let f = |x: f64| x * x * x;
        let df = |x: f64| 3.0 * x * x;

        let result = newton_bisection(f, df, -1.0, 2.0, &SolverConfig::default()).unwrap();
        assert!(result.root.abs() < 1e-2);
    }

    #[test]
    fn test_iteration_cap() {
        let f = |x: f64| x - 0.3;
        let df = |_: f64| f64::NAN;
        let config = SolverConfig::new(1e-300, 0.0, 5);

        let result = newton_bisection(f, df, 0.0, 1.0, &config);
        assert!(matches!(
            result,
            Err(MathError::ConvergenceFailed { iterations: 5, .. })
        ));
    }

    proptest! {
        #[test]
        fn prop_finds_root_of_shifted_cubic(root in -5.0f64..5.0) {
            let f = |x: f64| (x - root).powi(3) + (x - root);
            let df = |x: f64| 3.0 * (x - root).powi(2) + 1.0;

            let config = SolverConfig::default().with_function_tolerance(1e-12);
            let result = newton_bisection(f, df, -10.0, 10.0, &config).unwrap();

            prop_assert!((result.root - root).abs() < 1e-9);
        }
    }
}
