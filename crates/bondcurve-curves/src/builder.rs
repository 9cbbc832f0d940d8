//! Yield curve construction from bond quotes.
//!
//! [`YieldCurveBuilder::build`] solves the yield of every quote and returns
//! the observations in ascending maturity order. What happens to a bond
//! whose yield cannot be solved is governed by [`FailurePolicy`]: it is
//! either skipped and recorded in [`CurveBuild::skipped`], or it aborts the
//! whole build.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use bondcurve_bonds::cashflows::CashFlowSchedule;
use bondcurve_bonds::{BondError, BondResult, BondValuationEngine};
use bondcurve_core::{year_fraction, Date};

use crate::error::{CurveError, CurveResult};
use crate::interpolation::{interpolate, interpolate_available, TenorTable};
use crate::observation::{BondQuote, TenorPoint, YieldObservation};
use crate::tenor::TenorGrid;

/// What to do with a bond whose yield cannot be solved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Exclude the bond, record it and log a warning.
    #[default]
    Skip,
    /// Fail the whole build with the first failing bond.
    Abort,
}

impl fmt::Display for FailurePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Skip => write!(f, "skip"),
            Self::Abort => write!(f, "abort"),
        }
    }
}

impl FromStr for FailurePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "skip" => Ok(Self::Skip),
            "abort" => Ok(Self::Abort),
            other => Err(format!("unknown failure policy '{other}' (expected skip or abort)")),
        }
    }
}

/// A bond left out of the curve.
#[derive(Debug, Clone)]
pub struct SkippedBond {
    /// Identifier of the bond.
    pub bond_id: String,
    /// Why its yield could not be solved.
    pub error: BondError,
}

/// Output of [`YieldCurveBuilder::build`].
#[derive(Debug, Clone, Default)]
pub struct CurveBuild {
    /// Solved yields in ascending maturity order.
    pub observations: Vec<YieldObservation>,
    /// Bonds excluded under [`FailurePolicy::Skip`], in input order.
    pub skipped: Vec<SkippedBond>,
}

impl CurveBuild {
    /// Strict interpolation onto a grid; see [`interpolate`].
    pub fn interpolate(&self, grid: &TenorGrid) -> CurveResult<Vec<TenorPoint>> {
        interpolate(&self.observations, grid)
    }

    /// Interpolation onto the part of a grid the data covers; see
    /// [`interpolate_available`].
    pub fn interpolate_available(&self, grid: &TenorGrid) -> CurveResult<TenorTable> {
        interpolate_available(&self.observations, grid)
    }
}

/// Builds yield observations from bond quotes.
#[derive(Debug, Clone)]
pub struct YieldCurveBuilder {
    engine: BondValuationEngine,
    face_value: f64,
    failure_policy: FailurePolicy,
    parallel: bool,
}

impl Default for YieldCurveBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl YieldCurveBuilder {
    /// Creates a builder: face value 100, skip failing bonds, price in parallel.
    #[must_use]
    pub fn new() -> Self {
        Self {
            engine: BondValuationEngine::default(),
            face_value: 100.0,
            failure_policy: FailurePolicy::Skip,
            parallel: true,
        }
    }

    /// Sets the valuation engine.
    #[must_use]
    pub fn with_engine(mut self, engine: BondValuationEngine) -> Self {
        self.engine = engine;
        self
    }

    /// Sets the face value the quotes' prices are scaled to.
    #[must_use]
    pub fn with_face_value(mut self, face_value: f64) -> Self {
        self.face_value = face_value;
        self
    }

    /// Sets the failure policy.
    #[must_use]
    pub fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }

    /// Enables or disables parallel pricing.
    #[must_use]
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Returns the failure policy.
    pub fn failure_policy(&self) -> FailurePolicy {
        self.failure_policy
    }

    /// Solves the yield of a single quote.
    ///
    /// The maturity is measured from `as_of` in ACT/365.25 years; a bond
    /// that has already matured fails with `InvalidMaturity`.
    pub fn observe(&self, quote: &BondQuote, as_of: Date) -> BondResult<YieldObservation> {
        let maturity_years = year_fraction(as_of, quote.maturity_date);
        let schedule = CashFlowSchedule::generate(self.face_value, quote.coupon_rate, maturity_years)?;
        let target_price = quote.ask_price / 100.0 * self.face_value;
        let yield_value = self.engine.solve_ytm(&schedule, target_price)?;

        Ok(YieldObservation {
            bond_id: quote.id.clone(),
            maturity_date: quote.maturity_date,
            maturity_years,
            yield_value,
            maturity_type: quote.maturity_type,
        })
    }

    /// Solves every quote and orders the results by maturity.
    ///
    /// Bonds with equal maturities keep their input order.
    ///
    /// # Errors
    ///
    /// Under [`FailurePolicy::Abort`], `BondFailed` for the first failing
    /// quote in input order. Under [`FailurePolicy::Skip`] the build itself
    /// does not fail.
    pub fn build(&self, quotes: &[BondQuote], as_of: Date) -> CurveResult<CurveBuild> {
        let results: Vec<BondResult<YieldObservation>> = if self.parallel {
            use rayon::prelude::*;
            quotes.par_iter().map(|q| self.observe(q, as_of)).collect()
        } else {
            quotes.iter().map(|q| self.observe(q, as_of)).collect()
        };

        let mut build = CurveBuild::default();
        for (quote, result) in quotes.iter().zip(results) {
            match result {
                Ok(observation) => build.observations.push(observation),
                Err(error) => match self.failure_policy {
                    FailurePolicy::Abort => return Err(CurveError::bond_failed(&quote.id, error)),
                    FailurePolicy::Skip => {
                        log::warn!("skipping bond {}: {error}", quote.id);
                        build.skipped.push(SkippedBond {
                            bond_id: quote.id.clone(),
                            error,
                        });
                    }
                },
            }
        }

        build
            .observations
            .sort_by(|a, b| a.maturity_years.total_cmp(&b.maturity_years));

        log::debug!(
            "curve build as of {as_of}: {} observations, {} skipped",
            build.observations.len(),
            build.skipped.len()
        );

        Ok(build)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use bondcurve_bonds::pricing::compute_npv;
    use bondcurve_core::MaturityType;

    fn as_of() -> Date {
        Date::from_ymd(2024, 1, 2).unwrap()
    }

    /// A quote priced at exactly `yield_value`.
    fn quote_at_yield(id: &str, coupon: f64, maturity: Date, yield_value: f64) -> BondQuote {
        let years = year_fraction(as_of(), maturity);
        let schedule = CashFlowSchedule::generate(100.0, coupon, years).unwrap();
        let price = compute_npv(schedule.flows(), yield_value).unwrap();
        BondQuote::new(id, coupon, maturity, price)
    }

    #[test]
    fn test_observe_recovers_yield() {
        let maturity = as_of().add_years(7).unwrap();
        let quote = quote_at_yield("7Y", 0.04, maturity, 0.052);

        let observation = YieldCurveBuilder::new().observe(&quote, as_of()).unwrap();

        assert_relative_eq!(observation.yield_value, 0.052, epsilon = 1e-8);
        assert_relative_eq!(
            observation.maturity_years,
            year_fraction(as_of(), maturity),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_face_value_scaling_does_not_change_yield() {
        let quote = quote_at_yield("5Y", 0.03, as_of().add_years(5).unwrap(), 0.045);

        let per_100 = YieldCurveBuilder::new().observe(&quote, as_of()).unwrap();
        let per_1000 = YieldCurveBuilder::new()
            .with_face_value(1000.0)
            .observe(&quote, as_of())
            .unwrap();

        assert_relative_eq!(per_100.yield_value, per_1000.yield_value, epsilon = 1e-9);
    }

    #[test]
    fn test_build_sorts_by_maturity_stably() {
        let d = |years| as_of().add_years(years).unwrap();
        let quotes = vec![
            quote_at_yield("10Y", 0.05, d(10), 0.050),
            quote_at_yield("2Y-A", 0.03, d(2), 0.030),
            quote_at_yield("5Y", 0.04, d(5), 0.040),
            quote_at_yield("2Y-B", 0.03, d(2), 0.031),
        ];

        for parallel in [true, false] {
            let build = YieldCurveBuilder::new()
                .with_parallel(parallel)
                .build(&quotes, as_of())
                .unwrap();

            let ids: Vec<&str> = build.observations.iter().map(|o| o.bond_id.as_str()).collect();
            assert_eq!(ids, vec!["2Y-A", "2Y-B", "5Y", "10Y"]);
            assert!(build.skipped.is_empty());
        }
    }

    #[test]
    fn test_skip_policy_records_failures() {
        let quotes = vec![
            quote_at_yield("OK", 0.04, as_of().add_years(5).unwrap(), 0.04),
            BondQuote::new("MATURED", 0.04, Date::from_ymd(2023, 6, 1).unwrap(), 99.0),
            BondQuote::new("BAD-PRICE", 0.04, as_of().add_years(3).unwrap(), -1.0),
        ];

        let build = YieldCurveBuilder::new().build(&quotes, as_of()).unwrap();

        assert_eq!(build.observations.len(), 1);
        assert_eq!(build.skipped.len(), 2);
        assert_eq!(build.skipped[0].bond_id, "MATURED");
        assert!(matches!(build.skipped[0].error, BondError::InvalidMaturity { .. }));
        assert!(matches!(build.skipped[1].error, BondError::YieldNotFound { .. }));
    }

    #[test]
    fn test_abort_policy_returns_first_failure() {
        let quotes = vec![
            quote_at_yield("OK", 0.04, as_of().add_years(5).unwrap(), 0.04),
            BondQuote::new("BAD-PRICE", 0.04, as_of().add_years(3).unwrap(), 0.0),
            BondQuote::new("MATURED", 0.04, Date::from_ymd(2023, 6, 1).unwrap(), 99.0),
        ];

        let result = YieldCurveBuilder::new()
            .with_failure_policy(FailurePolicy::Abort)
            .build(&quotes, as_of());

        match result {
            Err(CurveError::BondFailed { bond_id, source }) => {
                assert_eq!(bond_id, "BAD-PRICE");
                assert!(matches!(source, BondError::YieldNotFound { .. }));
            }
            other => panic!("expected BondFailed, got {other:?}"),
        }
    }

    #[test]
    fn test_non_bullet_bonds_are_observed() {
        let quote = quote_at_yield("CALL", 0.05, as_of().add_years(8).unwrap(), 0.06)
            .with_maturity_type(MaturityType::Callable);

        let build = YieldCurveBuilder::new().build(&[quote], as_of()).unwrap();

        assert_eq!(build.observations.len(), 1);
        assert!(!build.observations[0].is_anchor());
    }

    #[test]
    fn test_failure_policy_parse() {
        assert_eq!("Skip".parse::<FailurePolicy>().unwrap(), FailurePolicy::Skip);
        assert_eq!("abort".parse::<FailurePolicy>().unwrap(), FailurePolicy::Abort);
        assert!("retry".parse::<FailurePolicy>().is_err());
        assert_eq!(FailurePolicy::Abort.to_string(), "abort");
    }
}
