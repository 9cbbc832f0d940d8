//! Curve construction configuration.

use serde::{Deserialize, Serialize};

use bondcurve_bonds::BondValuationEngine;
use bondcurve_curves::tenor::{Tenor, STANDARD_TENORS};
use bondcurve_curves::{CurveResult, FailurePolicy, TenorGrid, YieldCurveBuilder};

use crate::error::{Validate, ValidationError};

/// Settings for building a credit curve from bond quotes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurveConfig {
    /// Tenor labels the curve is read off at.
    #[serde(default = "default_tenors")]
    pub tenors: Vec<String>,

    /// Face value quote prices refer to.
    #[serde(default = "default_face_value")]
    pub face_value: f64,

    /// What to do with bonds whose yield cannot be solved.
    #[serde(default)]
    pub failure_policy: FailurePolicy,

    /// Price bonds in parallel.
    #[serde(default = "default_parallel")]
    pub parallel: bool,
}

fn default_tenors() -> Vec<String> {
    STANDARD_TENORS.iter().map(ToString::to_string).collect()
}

fn default_face_value() -> f64 {
    100.0
}

fn default_parallel() -> bool {
    true
}

impl Default for CurveConfig {
    fn default() -> Self {
        Self {
            tenors: default_tenors(),
            face_value: default_face_value(),
            failure_policy: FailurePolicy::default(),
            parallel: default_parallel(),
        }
    }
}

impl CurveConfig {
    /// The configured tenor grid.
    pub fn grid(&self) -> CurveResult<TenorGrid> {
        TenorGrid::from_labels(&self.tenors)
    }

    /// Curve builder using these settings and the given engine.
    pub fn builder(&self, engine: BondValuationEngine) -> YieldCurveBuilder {
        YieldCurveBuilder::new()
            .with_engine(engine)
            .with_face_value(self.face_value)
            .with_failure_policy(self.failure_policy)
            .with_parallel(self.parallel)
    }
}

impl Validate for CurveConfig {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if self.tenors.is_empty() {
            errors.push(ValidationError::new("tenors", "At least one tenor is required"));
        }

        for label in &self.tenors {
            if let Err(e) = label.parse::<Tenor>() {
                errors.push(ValidationError::new("tenors", e.to_string()));
            }
        }

        if !self.face_value.is_finite() || self.face_value <= 0.0 {
            errors.push(ValidationError::new(
                "face_value",
                format!("Face value {} must be positive", self.face_value),
            ));
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_grid_is_standard() {
        let config = CurveConfig::default();
        assert_eq!(config.grid().unwrap(), TenorGrid::standard());
        assert_eq!(config.failure_policy, FailurePolicy::Skip);
        assert!(config.is_valid());
    }

    #[test]
    fn test_builder_carries_policy() {
        let config = CurveConfig {
            failure_policy: FailurePolicy::Abort,
            ..CurveConfig::default()
        };
        let builder = config.builder(BondValuationEngine::default());
        assert_eq!(builder.failure_policy(), FailurePolicy::Abort);
    }

    #[test]
    fn test_invalid_curve_config() {
        let config = CurveConfig {
            tenors: vec!["1y".into(), "10q".into()],
            face_value: -100.0,
            ..CurveConfig::default()
        };

        let errors = config.validate();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].field, "tenors");
        assert!(errors[0].message.contains("10q"));
        assert_eq!(errors[1].field, "face_value");
    }
}
