//! Curve inputs and outputs.

use serde::{Deserialize, Serialize};

use bondcurve_core::{Date, MaturityType};

/// A quoted bond to place on the curve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BondQuote {
    /// Identifier used in reports and errors.
    pub id: String,
    /// Annual coupon rate as a decimal (0.0285 = 2.85%).
    pub coupon_rate: f64,
    /// Maturity date.
    pub maturity_date: Date,
    /// Ask price per 100 face value.
    pub ask_price: f64,
    /// Redemption profile.
    #[serde(default)]
    pub maturity_type: MaturityType,
}

impl BondQuote {
    /// Creates a quote for a bullet bond.
    #[must_use]
    pub fn new(id: impl Into<String>, coupon_rate: f64, maturity_date: Date, ask_price: f64) -> Self {
        Self {
            id: id.into(),
            coupon_rate,
            maturity_date,
            ask_price,
            maturity_type: MaturityType::AtMaturity,
        }
    }

    /// Sets the redemption profile.
    #[must_use]
    pub fn with_maturity_type(mut self, maturity_type: MaturityType) -> Self {
        self.maturity_type = maturity_type;
        self
    }
}

/// Solved yield of one bond.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YieldObservation {
    /// Identifier of the bond.
    pub bond_id: String,
    /// Maturity date.
    pub maturity_date: Date,
    /// Years from the as-of date to maturity (ACT/365.25).
    pub maturity_years: f64,
    /// Yield-to-maturity, semi-annually compounded.
    pub yield_value: f64,
    /// Redemption profile; only bullets anchor the curve.
    pub maturity_type: MaturityType,
}

impl YieldObservation {
    /// Whether this observation anchors the curve.
    pub fn is_anchor(&self) -> bool {
        self.maturity_type.is_bullet()
    }
}

/// Curve yield at one tenor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TenorPoint {
    /// Tenor label (`"5y"`).
    pub label: String,
    /// Tenor in years.
    pub tenor_years: f64,
    /// Interpolated yield.
    pub yield_value: f64,
}
