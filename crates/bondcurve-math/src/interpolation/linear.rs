//! Linear interpolation.

use std::cmp::Ordering;

use crate::error::{MathError, MathResult};
use crate::interpolation::Interpolator;

/// Linear interpolation between data points.
///
/// The abscissae must be sorted ascending but may repeat. For a query `x`
/// the lower anchor is the *last* point with `xs[i] <= x` and the upper
/// anchor the *first* point with `xs[j] >= x`; when both share the same
/// abscissa the lower anchor's value is returned as is. Queries outside
/// `[xs[0], xs[n-1]]` are rejected.
///
/// # Example
///
/// ```rust
/// use bondcurve_math::interpolation::{Interpolator, LinearInterpolator};
///
/// let xs = vec![1.0, 2.0, 2.0, 5.0];
/// let ys = vec![0.03, 0.035, 0.036, 0.045];
///
/// let interp = LinearInterpolator::new(xs, ys).unwrap();
/// // Between (1.0, 0.03) and the first point at 2.0
/// assert!((interp.interpolate(1.5).unwrap() - 0.0325).abs() < 1e-12);
/// // Exactly at a repeated abscissa: the last of the repeats
/// assert!((interp.interpolate(2.0).unwrap() - 0.036).abs() < 1e-12);
/// assert!(interp.interpolate(6.0).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct LinearInterpolator {
    xs: Vec<f64>,
    ys: Vec<f64>,
}

impl LinearInterpolator {
    /// Creates a new linear interpolator.
    ///
    /// # Arguments
    ///
    /// * `xs` - X coordinates (sorted ascending, repeats allowed)
    /// * `ys` - Y coordinates
    ///
    /// # Errors
    ///
    /// Returns an error if there are no points, if lengths differ, or if any
    /// coordinate is not finite or the xs are out of order.
    pub fn new(xs: Vec<f64>, ys: Vec<f64>) -> MathResult<Self> {
        if xs.is_empty() {
            return Err(MathError::insufficient_data(1, 0));
        }
        if xs.len() != ys.len() {
            return Err(MathError::invalid_input(format!(
                "xs and ys must have same length: {} vs {}",
                xs.len(),
                ys.len()
            )));
        }
        if xs.iter().chain(ys.iter()).any(|v| !v.is_finite()) {
            return Err(MathError::invalid_input("coordinates must be finite"));
        }
        if xs.windows(2).any(|w| w[1] < w[0]) {
            return Err(MathError::invalid_input(
                "x values must be sorted in ascending order",
            ));
        }

        Ok(Self { xs, ys })
    }

    /// Indices of the lower and upper anchors for `x`, or `None` when `x`
    /// lies outside the data.
    pub fn bracket(&self, x: f64) -> Option<(usize, usize)> {
        if !x.is_finite() {
            return None;
        }
        // First index with xs[i] > x, and first index with xs[i] >= x
        let after = self
            .xs
            .partition_point(|xi| xi.partial_cmp(&x) != Some(Ordering::Greater));
        let upper = self
            .xs
            .partition_point(|xi| xi.partial_cmp(&x) == Some(Ordering::Less));

        if after == 0 || upper == self.xs.len() {
            return None;
        }
        Some((after - 1, upper))
    }
}

impl Interpolator for LinearInterpolator {
    fn interpolate(&self, x: f64) -> MathResult<f64> {
        let (lower, upper) = self
            .bracket(x)
            .ok_or(MathError::ExtrapolationNotAllowed {
                x,
                min: self.min_x(),
                max: self.max_x(),
            })?;

        let x0 = self.xs[lower];
        let x1 = self.xs[upper];
        let y0 = self.ys[lower];

        if x0 == x1 {
            return Ok(y0);
        }

        let slope = (self.ys[upper] - y0) / (x1 - x0);
        Ok(y0 + slope * (x - x0))
    }

    fn min_x(&self) -> f64 {
        self.xs[0]
    }

    fn max_x(&self) -> f64 {
        self.xs[self.xs.len() - 1]
    }
}
