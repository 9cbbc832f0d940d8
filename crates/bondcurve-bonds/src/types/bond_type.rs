//! Bond type classification.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::BondError;

/// Issuer classification of a bond.
///
/// Carried through pricing for reporting only: every type is valued with the
/// same semi-annual fixed-coupon model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BondType {
    /// Corporate bond
    #[default]
    #[serde(alias = "corporate", alias = "CORPORATE")]
    Corporate,
    /// Sovereign or treasury bond
    #[serde(alias = "government", alias = "GOVERNMENT")]
    Government,
    /// Agency debenture
    #[serde(alias = "agency", alias = "AGENCY")]
    Agency,
    /// Municipal bond
    #[serde(alias = "municipal", alias = "MUNICIPAL")]
    Municipal,
}

impl fmt::Display for BondType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Corporate => "Corporate",
            Self::Government => "Government",
            Self::Agency => "Agency",
            Self::Municipal => "Municipal",
        };
        write!(f, "{name}")
    }
}

impl FromStr for BondType {
    type Err = BondError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "corporate" | "corp" => Ok(Self::Corporate),
            "government" | "govt" | "treasury" => Ok(Self::Government),
            "agency" => Ok(Self::Agency),
            "municipal" | "muni" => Ok(Self::Municipal),
            other => Err(BondError::invalid_spec(format!("unknown bond type '{other}'"))),
        }
    }
}
