//! Top-level configuration file.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::curve::CurveConfig;
use crate::error::{ConfigError, ConfigResult, Validate, ValidationError};
use crate::pricing::PricingConfig;

/// Complete Bondcurve configuration.
///
/// Every section and field is optional in the file and falls back to its
/// default:
///
/// ```toml
/// [pricing]
/// risk_free_rate = 0.04
/// decimal_places = 4
///
/// [pricing.solver]
/// price_tolerance = 1e-8
/// yield_tolerance = 1e-10
/// max_iterations = 100
/// initial_bracket = [-0.5, 5.0]
/// max_bracket_expansions = 60
///
/// [curve]
/// tenors = ["1m", "3m", "6m", "1y", "2y", "3y", "5y", "7y", "10y", "20y", "30y", "50y", "70y"]
/// face_value = 100.0
/// failure_policy = "skip"
/// parallel = true
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BondcurveConfig {
    /// Pricing settings.
    #[serde(default)]
    pub pricing: PricingConfig,

    /// Curve construction settings.
    #[serde(default)]
    pub curve: CurveConfig,
}

impl BondcurveConfig {
    /// Loads and validates a configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses and validates configuration text.
    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate_or_error()?;
        Ok(config)
    }

    /// Renders the configuration as TOML.
    pub fn to_toml_string(&self) -> ConfigResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

impl Validate for BondcurveConfig {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors: Vec<ValidationError> = self
            .pricing
            .validate()
            .into_iter()
            .map(|e| e.nested("pricing"))
            .collect();
        errors.extend(self.curve.validate().into_iter().map(|e| e.nested("curve")));
        errors
    }
}
