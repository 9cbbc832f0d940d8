//! CLI command implementations.

pub mod config;
pub mod curve;
pub mod price;

pub use config::ConfigArgs;
pub use curve::CurveArgs;
pub use price::PriceArgs;

use bondcurve_core::Date;

use crate::error::{CliError, CliResult};

/// Parses a date string in YYYY-MM-DD format. A trailing time part is ignored.
pub fn parse_date(s: &str) -> CliResult<Date> {
    Date::parse(s).map_err(|_| CliError::InvalidDate(s.to_string()))
}

/// Validates a semi-annually compounded rate.
pub fn validate_rate(name: &'static str, value: f64) -> CliResult<f64> {
    if !value.is_finite() || value <= -2.0 {
        return Err(CliError::InvalidRate { name, value });
    }
    Ok(value)
}
