//! Error types for curve operations.

use bondcurve_bonds::BondError;
use thiserror::Error;

/// A specialized Result type for curve operations.
pub type CurveResult<T> = Result<T, CurveError>;

/// Error types for curve operations.
#[derive(Error, Debug, Clone)]
pub enum CurveError {
    /// Requested tenor is outside the span of the observations.
    #[error("Tenor {requested:.4} out of range [{min:.4}, {max:.4}]")]
    TenorOutOfRange {
        /// The requested tenor in years.
        requested: f64,
        /// Shortest observed maturity.
        min: f64,
        /// Longest observed maturity.
        max: f64,
    },

    /// A tenor label could not be parsed.
    #[error("Invalid tenor '{tenor}': {reason}")]
    InvalidTenor {
        /// The offending label.
        tenor: String,
        /// Why it was rejected.
        reason: String,
    },

    /// Not enough observations to build a curve.
    #[error("Insufficient data: need at least {required} bullet observations, got {got}")]
    InsufficientData {
        /// Minimum required observations.
        required: usize,
        /// Observations available.
        got: usize,
    },

    /// A bond could not be turned into an observation.
    #[error("Bond {bond_id} failed: {source}")]
    BondFailed {
        /// Identifier of the bond.
        bond_id: String,
        /// Underlying valuation error.
        #[source]
        source: BondError,
    },

    /// Interpolation failed for a reason other than range.
    #[error("Interpolation error: {reason}")]
    InterpolationError {
        /// Description of the interpolation error.
        reason: String,
    },
}

impl CurveError {
    /// Creates an invalid tenor error.
    #[must_use]
    pub fn invalid_tenor(tenor: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidTenor {
            tenor: tenor.into(),
            reason: reason.into(),
        }
    }

    /// Creates a bond failure error.
    #[must_use]
    pub fn bond_failed(bond_id: impl Into<String>, source: BondError) -> Self {
        Self::BondFailed {
            bond_id: bond_id.into(),
            source,
        }
    }
}
