//! Pricing request and response contract.
//!
//! A [`PricingRequest`] carries a bond's terms together with the discount
//! rate to value it at and the risk-free rate to measure its spread against.
//! [`PricingService::price`] answers with four rounded decimals or a
//! [`PricingError`]; it never returns a partial or non-finite figure.

use rust_decimal::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

use bondcurve_core::Date;

use crate::error::{BondError, PricingError};
use crate::instruments::{Bond, BondBuilder};
use crate::types::BondType;
use crate::valuation::BondValuationEngine;

/// Default risk-free rate used when a request does not carry one.
pub const DEFAULT_RISK_FREE_RATE: f64 = 0.04;

/// Default number of decimal places in responses.
pub const DEFAULT_DECIMAL_PLACES: u32 = 4;

/// A request to value one bond.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingRequest {
    /// Issuer classification.
    #[serde(default)]
    pub bond_type: BondType,
    /// Face value.
    pub face_value: f64,
    /// Annual coupon rate as a decimal.
    pub coupon_rate: f64,
    /// Maturity in years.
    pub maturity: f64,
    /// Previously computed yield; superseded by the valuation.
    #[serde(default)]
    pub yield_to_maturity: Option<f64>,
    /// Previously computed NPV; superseded by the valuation.
    #[serde(default)]
    pub npv: Option<f64>,
    /// Issue date (`YYYY-MM-DD`, an ISO timestamp is accepted).
    #[serde(deserialize_with = "lenient_date")]
    pub issue_date: Date,
    /// Maturity date (`YYYY-MM-DD`, an ISO timestamp is accepted).
    #[serde(deserialize_with = "lenient_date")]
    pub maturity_date: Date,
    /// Semi-annually compounded discount rate.
    pub discount_rate: f64,
    /// Risk-free rate for the spread; the service default when absent.
    #[serde(default)]
    pub risk_free_rate: Option<f64>,
}

fn lenient_date<'de, D>(deserializer: D) -> Result<Date, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    Date::parse(&raw).map_err(serde::de::Error::custom)
}

impl PricingRequest {
    /// Builds the bond described by the request.
    ///
    /// Cached `yield_to_maturity` / `npv` values are not carried over: the
    /// request's discount rate invalidates them.
    pub fn to_bond(&self) -> Result<Bond, PricingError> {
        BondBuilder::new()
            .bond_type(self.bond_type)
            .face_value(self.face_value)
            .coupon_rate(self.coupon_rate)
            .issue_date(self.issue_date)
            .maturity_date(self.maturity_date)
            .maturity_years(self.maturity)
            .build()
            .map_err(|source| PricingError::InvalidBond { source })
    }
}

/// Result of a pricing request, rounded to the service's decimal places.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingResponse {
    /// Net present value at the requested discount rate.
    #[serde(rename = "NPV")]
    pub npv: Decimal,
    /// Yield-to-maturity solved from the NPV.
    #[serde(rename = "YTM")]
    pub ytm: Decimal,
    /// Yield spread over the risk-free rate.
    #[serde(rename = "Spread")]
    pub spread: Decimal,
    /// Modified duration ×100.
    #[serde(rename = "Duration")]
    pub duration: Decimal,
}

/// Prices [`PricingRequest`]s with a [`BondValuationEngine`].
#[derive(Debug, Clone)]
pub struct PricingService {
    engine: BondValuationEngine,
    default_risk_free_rate: f64,
    decimal_places: u32,
}

impl Default for PricingService {
    fn default() -> Self {
        Self::new(BondValuationEngine::default())
    }
}

impl PricingService {
    /// Creates a service around an engine.
    #[must_use]
    pub fn new(engine: BondValuationEngine) -> Self {
        Self {
            engine,
            default_risk_free_rate: DEFAULT_RISK_FREE_RATE,
            decimal_places: DEFAULT_DECIMAL_PLACES,
        }
    }

    /// Sets the risk-free rate used when a request omits one.
    #[must_use]
    pub fn with_default_risk_free_rate(mut self, rate: f64) -> Self {
        self.default_risk_free_rate = rate;
        self
    }

    /// Sets the number of decimal places in responses.
    #[must_use]
    pub fn with_decimal_places(mut self, places: u32) -> Self {
        self.decimal_places = places;
        self
    }

    /// Returns the engine.
    pub fn engine(&self) -> &BondValuationEngine {
        &self.engine
    }

    /// Values the requested bond.
    ///
    /// # Errors
    ///
    /// `InvalidBond` when the bond terms are malformed, `InvalidRequest`
    /// when a rate is not finite, and
    /// `ComputationFailed` when the engine cannot produce finite results.
    pub fn price(&self, request: &PricingRequest) -> Result<PricingResponse, PricingError> {
        let risk_free_rate = request
            .risk_free_rate
            .unwrap_or(self.default_risk_free_rate);
        if !request.discount_rate.is_finite() {
            return Err(PricingError::invalid_request(format!(
                "discount rate must be finite, got {}",
                request.discount_rate
            )));
        }
        if !risk_free_rate.is_finite() {
            return Err(PricingError::invalid_request(format!(
                "risk-free rate must be finite, got {risk_free_rate}"
            )));
        }

        if request.yield_to_maturity.is_some() || request.npv.is_some() {
            log::debug!("ignoring precomputed valuation in request; revaluing at the discount rate");
        }

        let bond = request.to_bond()?;
        let valuation = self.engine.value(&bond, request.discount_rate)?;
        let spread = valuation.spread(risk_free_rate)?;

        Ok(PricingResponse {
            npv: self.round("NPV", valuation.npv)?,
            ytm: self.round("YTM", valuation.ytm)?,
            spread: self.round("spread", spread)?,
            duration: self.round("duration", valuation.scaled_duration())?,
        })
    }

    fn round(&self, quantity: &'static str, value: f64) -> Result<Decimal, PricingError> {
        Decimal::from_f64(value)
            .map(|d| d.round_dp(self.decimal_places))
            .ok_or_else(|| BondError::out_of_range(quantity, value).into())
    }
}
