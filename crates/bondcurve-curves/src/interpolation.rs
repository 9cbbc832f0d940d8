//! Tenor-grid interpolation of yield observations.
//!
//! Only bullet observations anchor the curve. For a tenor `t`, the lower
//! anchor is the last observation with maturity `<= t` and the upper anchor
//! the first with maturity `>= t`. When both sit at the same maturity the
//! lower anchor's yield is used as is; otherwise the yield is read off the
//! straight line between them. A tenor with no anchor on one side is out of
//! range.

use serde::{Deserialize, Serialize};

use bondcurve_math::interpolation::{Interpolator, LinearInterpolator};
use bondcurve_math::MathError;

use crate::error::{CurveError, CurveResult};
use crate::observation::{TenorPoint, YieldObservation};
use crate::tenor::{Tenor, TenorGrid};

/// Tenor points the data covers, plus the tenors it does not.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TenorTable {
    /// Interpolated points, in grid order.
    pub points: Vec<TenorPoint>,
    /// Grid tenors outside the span of the observations.
    pub out_of_range: Vec<Tenor>,
}

/// Interpolates every grid tenor.
///
/// # Errors
///
/// `InsufficientData` when no bullet observation exists, and
/// `TenorOutOfRange` for the first tenor below the shortest or above the
/// longest bullet maturity.
pub fn interpolate(
    observations: &[YieldObservation],
    grid: &TenorGrid,
) -> CurveResult<Vec<TenorPoint>> {
    let curve = anchor_curve(observations)?;
    grid.iter().map(|tenor| read_point(&curve, tenor)).collect()
}

/// Interpolates the grid tenors the observations cover.
///
/// Tenors outside the data are listed in [`TenorTable::out_of_range`]
/// instead of failing the call.
pub fn interpolate_available(
    observations: &[YieldObservation],
    grid: &TenorGrid,
) -> CurveResult<TenorTable> {
    let curve = anchor_curve(observations)?;

    let mut table = TenorTable::default();
    for tenor in grid.iter() {
        match read_point(&curve, tenor) {
            Ok(point) => table.points.push(point),
            Err(CurveError::TenorOutOfRange { .. }) => table.out_of_range.push(tenor.clone()),
            Err(e) => return Err(e),
        }
    }
    Ok(table)
}

fn anchor_curve(observations: &[YieldObservation]) -> CurveResult<LinearInterpolator> {
    let mut anchors: Vec<(f64, f64)> = observations
        .iter()
        .filter(|o| o.is_anchor())
        .map(|o| (o.maturity_years, o.yield_value))
        .collect();

    if anchors.is_empty() {
        return Err(CurveError::InsufficientData {
            required: 1,
            got: 0,
        });
    }

    // Stable, so equal maturities keep their order
    anchors.sort_by(|a, b| a.0.total_cmp(&b.0));
    let (xs, ys) = anchors.into_iter().unzip();

    LinearInterpolator::new(xs, ys).map_err(|e| CurveError::InterpolationError {
        reason: e.to_string(),
    })
}

fn read_point(curve: &LinearInterpolator, tenor: &Tenor) -> CurveResult<TenorPoint> {
    let t = tenor.in_years();
    let yield_value = curve.interpolate(t).map_err(|e| match e {
        MathError::ExtrapolationNotAllowed { x, min, max } => CurveError::TenorOutOfRange {
            requested: x,
            min,
            max,
        },
        other => CurveError::InterpolationError {
            reason: other.to_string(),
        },
    })?;

    Ok(TenorPoint {
        label: tenor.label().to_string(),
        tenor_years: t,
        yield_value,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use bondcurve_core::{Date, MaturityType};

    fn obs(id: &str, years: f64, yield_value: f64) -> YieldObservation {
        YieldObservation {
            bond_id: id.to_string(),
            maturity_date: Date::from_ymd(2030, 1, 1).unwrap(),
            maturity_years: years,
            yield_value,
            maturity_type: MaturityType::AtMaturity,
        }
    }

    fn grid(labels: &[&str]) -> TenorGrid {
        TenorGrid::from_labels(labels).unwrap()
    }

    #[test]
    fn test_exact_and_linear() {
        let observations = vec![obs("a", 1.0, 0.03), obs("b", 3.0, 0.04), obs("c", 10.0, 0.055)];

        let points = interpolate(&observations, &grid(&["1y", "2y", "3y", "5y", "10y"])).unwrap();

        assert_relative_eq!(points[0].yield_value, 0.03);
        assert_relative_eq!(points[1].yield_value, 0.035, epsilon = 1e-12);
        assert_relative_eq!(points[2].yield_value, 0.04);
        assert_relative_eq!(points[3].yield_value, 0.04 + 2.0 * 0.015 / 7.0, epsilon = 1e-12);
        assert_relative_eq!(points[4].yield_value, 0.055);
        assert_eq!(points[3].label, "5y");
    }

    #[test]
    fn test_out_of_range_is_error() {
        let observations = vec![obs("a", 0.4, 0.03), obs("b", 12.0, 0.05)];

        let below = interpolate(&observations, &grid(&["3m"]));
        assert!(matches!(
            below,
            Err(CurveError::TenorOutOfRange { requested, min, max })
                if requested == 0.25 && min == 0.4 && max == 12.0
        ));

        assert!(matches!(
            interpolate(&observations, &grid(&["1y", "20y"])),
            Err(CurveError::TenorOutOfRange { .. })
        ));
    }

    #[test]
    fn test_available_lists_missing_tenors() {
        let observations = vec![obs("a", 0.4, 0.03), obs("b", 12.0, 0.05)];

        let table = interpolate_available(&observations, &TenorGrid::standard()).unwrap();

        let covered: Vec<&str> = table.points.iter().map(|p| p.label.as_str()).collect();
        let missing: Vec<&str> = table.out_of_range.iter().map(Tenor::label).collect();
        assert_eq!(covered, vec!["6m", "1y", "2y", "3y", "5y", "7y", "10y"]);
        assert_eq!(missing, vec!["1m", "3m", "20y", "30y", "50y", "70y"]);
    }

    #[test]
    fn test_only_bullets_anchor() {
        let mut callable = obs("call", 5.0, 0.20);
        callable.maturity_type = MaturityType::Callable;
        let observations = vec![obs("a", 1.0, 0.03), callable, obs("b", 10.0, 0.048)];

        let points = interpolate(&observations, &grid(&["5y"])).unwrap();

        assert_relative_eq!(points[0].yield_value, 0.03 + 4.0 * 0.002, epsilon = 1e-12);
    }

    #[test]
    fn test_no_bullets() {
        let mut callable = obs("call", 5.0, 0.05);
        callable.maturity_type = MaturityType::Sinkable;

        assert!(matches!(
            interpolate(&[callable], &TenorGrid::standard()),
            Err(CurveError::InsufficientData { .. })
        ));
        assert!(interpolate(&[], &TenorGrid::standard()).is_err());
    }

    #[test]
    fn test_equal_maturities_use_last_at_or_below() {
        let observations = vec![
            obs("a", 1.0, 0.03),
            obs("b", 2.0, 0.032),
            obs("c", 2.0, 0.034),
            obs("d", 4.0, 0.04),
        ];

        let points = interpolate(&observations, &grid(&["2y", "3y"])).unwrap();

        assert_relative_eq!(points[0].yield_value, 0.034);
        assert_relative_eq!(points[1].yield_value, 0.037, epsilon = 1e-12);
    }
}
