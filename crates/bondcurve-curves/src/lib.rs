//! # Bondcurve Curves
//!
//! Builds a piecewise-linear credit yield curve from a basket of quoted bonds.
//!
//! Each quote is turned into a [`YieldObservation`] by solving its
//! yield-to-maturity, the observations are ordered by maturity, and the
//! plain bullet ones are interpolated linearly onto a [`TenorGrid`]. Tenors
//! outside the span of the data are reported, never extrapolated.
//!
//! ## Example
//!
//! ```rust
//! use bondcurve_curves::prelude::*;
//! use bondcurve_core::Date;
//!
//! let as_of = Date::from_ymd(2024, 1, 2).unwrap();
//! let quotes = vec![
//!     BondQuote::new("A", 0.030, as_of.add_years(2).unwrap(), 98.0),
//!     BondQuote::new("B", 0.045, as_of.add_years(10).unwrap(), 95.0),
//! ];
//!
//! let build = YieldCurveBuilder::new().build(&quotes, as_of).unwrap();
//! let grid = TenorGrid::from_labels(&["3y", "5y", "10y"]).unwrap();
//! let points = interpolate(&build.observations, &grid).unwrap();
//! assert_eq!(points.len(), 3);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::float_cmp)]

pub mod builder;
pub mod error;
pub mod interpolation;
pub mod observation;
pub mod tenor;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::builder::{CurveBuild, FailurePolicy, SkippedBond, YieldCurveBuilder};
    pub use crate::error::{CurveError, CurveResult};
    pub use crate::interpolation::{interpolate, interpolate_available, TenorTable};
    pub use crate::observation::{BondQuote, TenorPoint, YieldObservation};
    pub use crate::tenor::{Tenor, TenorGrid, STANDARD_TENORS};
}

pub use builder::{CurveBuild, FailurePolicy, YieldCurveBuilder};
pub use error::{CurveError, CurveResult};
pub use interpolation::{interpolate, interpolate_available, TenorTable};
pub use observation::{BondQuote, TenorPoint, YieldObservation};
pub use tenor::{Tenor, TenorGrid};
