//! Bracket expansion.

use crate::error::{MathError, MathResult};

/// Widens `[lo, hi]` until `f` changes sign across it.
///
/// Each expansion moves the endpoint whose `|f|` is smaller, since that is
/// the side the root lies towards for a monotone function. When the two
/// magnitudes are equal to within rounding the ends take turns. The upper end is
/// pushed out by the current width. The lower end moves halfway towards
/// `lower_limit` when one is given, so it never reaches a singularity such
/// as the `-2` yield of semi-annual discounting, and by the current width
/// otherwise. A non-finite `f` value counts as infinitely large and never
/// as a sign change.
///
/// # Errors
///
/// `MathError::InvalidInput` for a malformed interval, and
/// `MathError::BracketNotFound` when no sign change appears within
/// `max_expansions` expansions.
///
/// # Example
///
/// ```rust
/// use bondcurve_math::solvers::expand_bracket;
///
/// let f = |x: f64| x - 40.0;
/// let (lo, hi) = expand_bracket(f, 0.0, 1.0, None, 10).unwrap();
/// assert!(lo <= 40.0 && 40.0 <= hi);
/// ```
pub fn expand_bracket<F>(
    f: F,
    lo: f64,
    hi: f64,
    lower_limit: Option<f64>,
    max_expansions: u32,
) -> MathResult<(f64, f64)>
where
    F: Fn(f64) -> f64,
{
    if !(lo.is_finite() && hi.is_finite()) || lo >= hi {
        return Err(MathError::invalid_input(format!(
            "bracket must satisfy lo < hi, got [{lo}, {hi}]"
        )));
    }
    if let Some(limit) = lower_limit {
        if lo <= limit {
            return Err(MathError::invalid_input(format!(
                "lower bound {lo} is not above the limit {limit}"
            )));
        }
    }

    let mut lo = lo;
    let mut hi = hi;
    let mut f_lo = f(lo);
    let mut f_hi = f(hi);
    let mut widened_lower = false;

    for expansion in 0..=max_expansions {
        if f_lo.is_finite() && f_hi.is_finite() && f_lo * f_hi <= 0.0 {
            if expansion > 0 {
                log::debug!("bracket [{lo}, {hi}] found after {expansion} expansions");
            }
            return Ok((lo, hi));
        }

        if expansion == max_expansions {
            break;
        }

        let width = hi - lo;
        let (m_lo, m_hi) = (magnitude(f_lo), magnitude(f_hi));
        widened_lower = if tied(m_lo, m_hi) {
            !widened_lower
        } else {
            m_lo < m_hi
        };
        if widened_lower {
            lo = match lower_limit {
                Some(limit) => limit + (lo - limit) * 0.5,
                None => lo - width,
            };
            f_lo = f(lo);
        } else {
            hi += width;
            f_hi = f(hi);
        }
    }

    Err(MathError::BracketNotFound {
        lo,
        hi,
        expansions: max_expansions,
    })
}

/// Equal magnitudes, or finite ones a few ulps apart.
fn tied(a: f64, b: f64) -> bool {
    a == b || (a.is_finite() && b.is_finite() && (a - b).abs() <= 4.0 * f64::EPSILON * a.max(b))
}

fn magnitude(value: f64) -> f64 {
    if value.is_finite() {
        value.abs()
    } else {
        f64::INFINITY
    }
}
