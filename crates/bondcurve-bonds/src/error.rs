//! Error types for bond operations.

use thiserror::Error;

/// A specialized Result type for bond operations.
pub type BondResult<T> = Result<T, BondError>;

/// Errors that can occur during bond operations.
#[derive(Error, Debug, Clone)]
pub enum BondError {
    /// Maturity is not strictly positive, so the bond has no coupon periods.
    #[error("Invalid maturity: {maturity_years} years (must be positive and finite)")]
    InvalidMaturity {
        /// The offending maturity in years.
        maturity_years: f64,
    },

    /// A rate or computed quantity is outside the domain where it is defined.
    #[error("Value out of range for {quantity}: {value}")]
    OutOfRangeValue {
        /// Name of the quantity.
        quantity: &'static str,
        /// The offending value.
        value: f64,
    },

    /// The yield solver could not find a rate reproducing the target price.
    #[error("No yield reproduces price {target_price}: {reason}")]
    YieldNotFound {
        /// Price the solver was asked to match.
        target_price: f64,
        /// Why the search failed.
        reason: String,
    },

    /// Invalid bond specification.
    #[error("Invalid bond specification: {reason}")]
    InvalidSpec {
        /// Description of what's invalid.
        reason: String,
    },
}

impl BondError {
    /// Creates an invalid maturity error.
    #[must_use]
    pub fn invalid_maturity(maturity_years: f64) -> Self {
        Self::InvalidMaturity { maturity_years }
    }

    /// Creates an out-of-range value error.
    #[must_use]
    pub fn out_of_range(quantity: &'static str, value: f64) -> Self {
        Self::OutOfRangeValue { quantity, value }
    }

    /// Creates a yield-not-found error.
    #[must_use]
    pub fn yield_not_found(target_price: f64, reason: impl Into<String>) -> Self {
        Self::YieldNotFound {
            target_price,
            reason: reason.into(),
        }
    }

    /// Creates an invalid specification error.
    #[must_use]
    pub fn invalid_spec(reason: impl Into<String>) -> Self {
        Self::InvalidSpec {
            reason: reason.into(),
        }
    }
}

/// Errors returned at the pricing request boundary.
///
/// Anything the engine rejects is reported as [`PricingError::ComputationFailed`]
/// so that callers never receive partial or non-finite numbers.
#[derive(Error, Debug, Clone)]
pub enum PricingError {
    /// The request itself is malformed.
    #[error("Invalid pricing request: {reason}")]
    InvalidRequest {
        /// Description of the problem.
        reason: String,
    },

    /// The request describes a bond that cannot be built.
    #[error("Invalid pricing request: {source}")]
    InvalidBond {
        /// Why the bond was rejected.
        #[source]
        source: BondError,
    },

    /// The valuation engine failed.
    #[error("Computation failed: {source}")]
    ComputationFailed {
        /// Underlying engine error.
        #[source]
        source: BondError,
    },
}

impl PricingError {
    /// Creates an invalid request error.
    #[must_use]
    pub fn invalid_request(reason: impl Into<String>) -> Self {
        Self::InvalidRequest {
            reason: reason.into(),
        }
    }
}

impl From<BondError> for PricingError {
    fn from(source: BondError) -> Self {
        Self::ComputationFailed { source }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = BondError::invalid_maturity(0.0);
        assert!(err.to_string().contains("0 years"));

        let err = BondError::yield_not_found(-5.0, "target price must be positive");
        assert!(err.to_string().contains("-5"));

        let err: PricingError = BondError::out_of_range("discount rate", -3.0).into();
        assert!(err.to_string().starts_with("Computation failed"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_invalid_bond_keeps_source() {
        let err = PricingError::InvalidBond {
            source: BondError::invalid_maturity(0.0),
        };
        assert!(err.to_string().starts_with("Invalid pricing request"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
