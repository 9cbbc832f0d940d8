//! Redemption profile of a bond.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

/// How a bond's principal is redeemed.
///
/// Only [`MaturityType::AtMaturity`] (plain bullet) bonds anchor a yield
/// curve; the other profiles are priced but excluded from interpolation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MaturityType {
    /// Bullet redemption at maturity.
    #[default]
    AtMaturity,
    /// Issuer may redeem early.
    Callable,
    /// Holder may put the bond back early.
    Putable,
    /// Principal amortises through a sinking fund.
    Sinkable,
    /// Perpetual or any other profile.
    Other,
}

impl MaturityType {
    /// Whether this is a plain bullet bond.
    #[must_use]
    pub fn is_bullet(self) -> bool {
        matches!(self, MaturityType::AtMaturity)
    }
}

impl fmt::Display for MaturityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            MaturityType::AtMaturity => "AT MATURITY",
            MaturityType::Callable => "CALLABLE",
            MaturityType::Putable => "PUTABLE",
            MaturityType::Sinkable => "SINKABLE",
            MaturityType::Other => "OTHER",
        };
        f.write_str(label)
    }
}

impl FromStr for MaturityType {
    type Err = CoreError;

    /// Parses data-vendor labels such as `AT MATURITY`, `CALLABLE` or
    /// `CALL/PUT`. Unknown labels map to [`MaturityType::Other`]; only an
    /// empty label is an error.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_uppercase().replace(['_', '-'], " ");
        match normalized.as_str() {
            "" => Err(CoreError::invalid_input("empty maturity type")),
            "AT MATURITY" | "BULLET" => Ok(MaturityType::AtMaturity),
            "CALLABLE" | "CALL" | "CALL/PUT" | "CALL/SINK" => Ok(MaturityType::Callable),
            "PUTABLE" | "PUT" | "PUTTABLE" => Ok(MaturityType::Putable),
            "SINKABLE" | "SINKING FUND" | "SINK" => Ok(MaturityType::Sinkable),
            _ => Ok(MaturityType::Other),
        }
    }
}
