//! # Bondcurve Bonds
//!
//! Valuation of plain fixed-coupon bonds with semi-annual coupons.
//!
//! This crate provides:
//!
//! - **Instruments**: [`Bond`] and its validating [`BondBuilder`]
//! - **Cash Flows**: the semi-annual payment schedule of a bond
//! - **Pricing**: NPV at a discount rate and yield-to-maturity from a price
//! - **Risk**: Macaulay and modified duration
//! - **Valuation**: [`BondValuationEngine`], which ties the above together and
//!   returns an immutable [`BondValuation`]
//! - **Requests**: the [`PricingRequest`] / [`PricingResponse`] contract used by
//!   front ends
//!
//! ## Example
//!
//! ```rust
//! use bondcurve_bonds::prelude::*;
//! use bondcurve_core::Date;
//!
//! let bond = BondBuilder::new()
//!     .face_value(1000.0)
//!     .coupon_rate(0.05)
//!     .issue_date(Date::from_ymd(2022, 7, 20).unwrap())
//!     .maturity_date(Date::from_ymd(2032, 7, 17).unwrap())
//!     .maturity_years(10.0)
//!     .build()
//!     .unwrap();
//!
//! let engine = BondValuationEngine::default();
//! let valuation = engine.value(&bond, 0.04).unwrap();
//!
//! // The yield is re-derived from the NPV, not copied from the input rate
//! assert!((valuation.ytm - 0.04).abs() < 1e-8);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::float_cmp)]

pub mod cashflows;
pub mod error;
pub mod instruments;
pub mod pricing;
pub mod request;
pub mod risk;
pub mod types;
pub mod valuation;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::cashflows::{CashFlow, CashFlowSchedule};
    pub use crate::error::{BondError, BondResult, PricingError};
    pub use crate::instruments::{Bond, BondBuilder, ValuationState};
    pub use crate::pricing::{compute_npv, YieldResult, YieldSolver};
    pub use crate::request::{PricingRequest, PricingResponse, PricingService};
    pub use crate::risk::{compute_duration, DurationResult};
    pub use crate::types::BondType;
    pub use crate::valuation::{BondValuation, BondValuationEngine};
}

pub use error::{BondError, BondResult, PricingError};
pub use instruments::{Bond, BondBuilder};
pub use request::{PricingRequest, PricingResponse, PricingService};
pub use valuation::{BondValuation, BondValuationEngine};
