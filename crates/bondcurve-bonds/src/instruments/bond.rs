//! Fixed coupon bond with semi-annual payments.

use serde::{Deserialize, Serialize};

use bondcurve_core::{year_fraction, Date};

use crate::error::{BondError, BondResult};
use crate::types::BondType;
use crate::valuation::BondValuation;

/// Whether a bond carries a solved yield and NPV.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValuationState {
    /// No valuation attached.
    NotValued,
    /// NPV and yield-to-maturity are attached.
    Valued,
}

/// A fixed coupon bond.
///
/// Instances are immutable once built. Valuation results are attached by
/// producing a new bond with [`Bond::with_valuation`], so a single bond can
/// be shared across threads and valued at different rates concurrently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bond {
    bond_type: BondType,
    face_value: f64,
    coupon_rate: f64,
    issue_date: Date,
    maturity_date: Date,
    maturity_years: f64,
    yield_to_maturity: Option<f64>,
    npv: Option<f64>,
}

impl Bond {
    /// Returns a builder.
    #[must_use]
    pub fn builder() -> BondBuilder {
        BondBuilder::new()
    }

    /// Returns the bond type.
    pub fn bond_type(&self) -> BondType {
        self.bond_type
    }

    /// Returns the face value.
    pub fn face_value(&self) -> f64 {
        self.face_value
    }

    /// Returns the annual coupon rate as a decimal (0.05 = 5%).
    pub fn coupon_rate(&self) -> f64 {
        self.coupon_rate
    }

    /// Returns the coupon paid each half year.
    pub fn coupon_per_period(&self) -> f64 {
        self.face_value * self.coupon_rate / 2.0
    }

    /// Returns the issue date.
    pub fn issue_date(&self) -> Date {
        self.issue_date
    }

    /// Returns the maturity date.
    pub fn maturity_date(&self) -> Date {
        self.maturity_date
    }

    /// Returns the maturity in years.
    pub fn maturity_years(&self) -> f64 {
        self.maturity_years
    }

    /// Returns the attached yield-to-maturity, if valued.
    pub fn yield_to_maturity(&self) -> Option<f64> {
        self.yield_to_maturity
    }

    /// Returns the attached NPV, if valued.
    pub fn npv(&self) -> Option<f64> {
        self.npv
    }

    /// Returns the valuation state.
    pub fn state(&self) -> ValuationState {
        match (self.yield_to_maturity, self.npv) {
            (Some(_), Some(_)) => ValuationState::Valued,
            _ => ValuationState::NotValued,
        }
    }

    /// Returns a copy of this bond carrying the given valuation.
    #[must_use]
    pub fn with_valuation(&self, valuation: &BondValuation) -> Self {
        Self {
            yield_to_maturity: Some(valuation.ytm),
            npv: Some(valuation.npv),
            ..self.clone()
        }
    }

    /// Returns a copy of this bond without any attached valuation.
    #[must_use]
    pub fn invalidated(&self) -> Self {
        Self {
            yield_to_maturity: None,
            npv: None,
            ..self.clone()
        }
    }

    /// Spread of the attached yield over a risk-free rate.
    ///
    /// Reads the cached yield; fails if the bond has not been valued.
    pub fn spread_over(&self, risk_free_rate: f64) -> BondResult<f64> {
        let ytm = self
            .yield_to_maturity
            .ok_or_else(|| BondError::invalid_spec("bond has no solved yield-to-maturity"))?;
        crate::valuation::spread(ytm, risk_free_rate)
    }
}

/// Builder for [`Bond`].
///
/// Face value defaults to 100 and the bond type to corporate. When no
/// explicit maturity in years is given it is derived from the dates.
#[derive(Debug, Clone, Default)]
pub struct BondBuilder {
    bond_type: BondType,
    face_value: Option<f64>,
    coupon_rate: Option<f64>,
    issue_date: Option<Date>,
    maturity_date: Option<Date>,
    maturity_years: Option<f64>,
    yield_to_maturity: Option<f64>,
    npv: Option<f64>,
}

impl BondBuilder {
    /// Creates a new builder with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the bond type.
    #[must_use]
    pub fn bond_type(mut self, bond_type: BondType) -> Self {
        self.bond_type = bond_type;
        self
    }

    /// Sets the face value.
    #[must_use]
    pub fn face_value(mut self, value: f64) -> Self {
        self.face_value = Some(value);
        self
    }

    /// Sets the coupon rate (as decimal, 0.05 = 5%).
    #[must_use]
    pub fn coupon_rate(mut self, rate: f64) -> Self {
        self.coupon_rate = Some(rate);
        self
    }

    /// Sets the issue date.
    #[must_use]
    pub fn issue_date(mut self, date: Date) -> Self {
        self.issue_date = Some(date);
        self
    }

    /// Sets the maturity date.
    #[must_use]
    pub fn maturity_date(mut self, date: Date) -> Self {
        self.maturity_date = Some(date);
        self
    }

    /// Sets the maturity in years, overriding the value implied by the dates.
    #[must_use]
    pub fn maturity_years(mut self, years: f64) -> Self {
        self.maturity_years = Some(years);
        self
    }

    /// Attaches a previously computed yield-to-maturity.
    #[must_use]
    pub fn yield_to_maturity(mut self, ytm: f64) -> Self {
        self.yield_to_maturity = Some(ytm);
        self
    }

    /// Attaches a previously computed NPV.
    #[must_use]
    pub fn npv(mut self, npv: f64) -> Self {
        self.npv = Some(npv);
        self
    }

    /// Builds the bond.
    ///
    /// # Errors
    ///
    /// Returns `InvalidSpec` for a missing or non-positive face value, a
    /// missing or negative coupon, or missing dates; `InvalidMaturity` when
    /// the maturity date is not after the issue date or the maturity in
    /// years is not positive.
    pub fn build(self) -> BondResult<Bond> {
        let face_value = self.face_value.unwrap_or(100.0);
        if !face_value.is_finite() || face_value <= 0.0 {
            return Err(BondError::invalid_spec(format!(
                "face value must be positive, got {face_value}"
            )));
        }

        let coupon_rate = self
            .coupon_rate
            .ok_or_else(|| BondError::invalid_spec("coupon rate is required"))?;
        if !coupon_rate.is_finite() || coupon_rate < 0.0 {
            return Err(BondError::invalid_spec(format!(
                "coupon rate must be non-negative, got {coupon_rate}"
            )));
        }

        let issue_date = self
            .issue_date
            .ok_or_else(|| BondError::invalid_spec("issue date is required"))?;
        let maturity_date = self
            .maturity_date
            .ok_or_else(|| BondError::invalid_spec("maturity date is required"))?;

        let implied_years = year_fraction(issue_date, maturity_date);
        if implied_years <= 0.0 {
            return Err(BondError::invalid_maturity(implied_years));
        }

        let maturity_years = self.maturity_years.unwrap_or(implied_years);
        if !maturity_years.is_finite() || maturity_years <= 0.0 {
            return Err(BondError::invalid_maturity(maturity_years));
        }

        Ok(Bond {
            bond_type: self.bond_type,
            face_value,
            coupon_rate,
            issue_date,
            maturity_date,
            maturity_years,
            yield_to_maturity: self.yield_to_maturity,
            npv: self.npv,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    fn ten_year() -> BondBuilder {
        BondBuilder::new()
            .face_value(1000.0)
            .coupon_rate(0.05)
            .issue_date(date(2022, 7, 20))
            .maturity_date(date(2032, 7, 20))
    }

    #[test]
    fn test_build_derives_maturity_from_dates() {
        let bond = ten_year().build().unwrap();

        assert_relative_eq!(bond.maturity_years(), 3653.0 / 365.25, epsilon = 1e-12);
        assert_relative_eq!(bond.coupon_per_period(), 25.0);
        assert_eq!(bond.bond_type(), BondType::Corporate);
        assert_eq!(bond.state(), ValuationState::NotValued);
    }

    #[test]
    fn test_explicit_maturity_wins() {
        let bond = ten_year().maturity_years(10.0).build().unwrap();
        assert_relative_eq!(bond.maturity_years(), 10.0);
    }

    #[test]
    fn test_invalid_inputs() {
        assert!(matches!(
            ten_year().face_value(0.0).build(),
            Err(BondError::InvalidSpec { .. })
        ));
        assert!(matches!(
            ten_year().coupon_rate(-0.01).build(),
            Err(BondError::InvalidSpec { .. })
        ));
        assert!(matches!(
            ten_year().maturity_years(0.0).build(),
            Err(BondError::InvalidMaturity { .. })
        ));
        assert!(matches!(
            ten_year().maturity_date(date(2022, 7, 20)).build(),
            Err(BondError::InvalidMaturity { .. })
        ));
        assert!(BondBuilder::new().coupon_rate(0.05).build().is_err());
    }

    #[test]
    fn test_with_valuation_leaves_original_untouched() {
        let bond = ten_year().maturity_years(10.0).build().unwrap();
        let valuation = BondValuation {
            discount_rate: Some(0.04),
            npv: 1106.76,
            ytm: 0.04,
            duration: crate::risk::DurationResult {
                macaulay: 8.0,
                modified: 7.8,
                scaled_modified: 780.0,
            },
        };

        let valued = bond.with_valuation(&valuation);

        assert_eq!(bond.state(), ValuationState::NotValued);
        assert_eq!(valued.state(), ValuationState::Valued);
        assert_relative_eq!(valued.spread_over(0.03).unwrap(), 0.01, epsilon = 1e-12);
        assert!(bond.spread_over(0.03).is_err());
        assert_eq!(valued.invalidated().state(), ValuationState::NotValued);
    }
}
