//! Bondcurve Configuration Layer
//!
//! TOML-backed settings for bond pricing and credit curve construction.
//!
//! # Features
//!
//! - **Pricing Configuration**: risk-free rate, response rounding, yield solver settings
//! - **Curve Configuration**: tenor grid, quote face value, failure policy, parallelism
//! - **Validation**: every violation is collected and reported at once
//!
//! # Example
//!
//! ```rust
//! use bondcurve_config::{BondcurveConfig, Validate};
//!
//! let config = BondcurveConfig::from_toml_str(
//!     r#"
//!     [pricing]
//!     risk_free_rate = 0.035
//!
//!     [curve]
//!     tenors = ["1y", "5y", "10y"]
//!     failure_policy = "abort"
//!     "#,
//! )
//! .unwrap();
//!
//! assert_eq!(config.pricing.decimal_places, 4);
//! assert_eq!(config.curve.grid().unwrap().len(), 3);
//! assert!(config.is_valid());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]

pub mod curve;
pub mod error;
pub mod pricing;
pub mod settings;

pub use curve::CurveConfig;
pub use error::{ConfigError, ConfigResult, Validate, ValidationError};
pub use pricing::{PricingConfig, SolverSettings};
pub use settings::BondcurveConfig;
