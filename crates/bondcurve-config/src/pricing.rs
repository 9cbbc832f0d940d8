//! Pricing configuration.

use serde::{Deserialize, Serialize};

use bondcurve_bonds::pricing::YieldSolver;
use bondcurve_bonds::{BondValuationEngine, PricingService};

use crate::error::{Validate, ValidationError};

/// Largest supported number of decimal places in responses.
pub const MAX_DECIMAL_PLACES: u32 = 10;

/// Settings for bond pricing requests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingConfig {
    /// Risk-free rate used when a request does not carry one.
    #[serde(default = "default_risk_free_rate")]
    pub risk_free_rate: f64,

    /// Decimal places in pricing responses.
    #[serde(default = "default_decimal_places")]
    pub decimal_places: u32,

    /// Yield solver settings.
    #[serde(default)]
    pub solver: SolverSettings,
}

fn default_risk_free_rate() -> f64 {
    0.04
}

fn default_decimal_places() -> u32 {
    4
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            risk_free_rate: default_risk_free_rate(),
            decimal_places: default_decimal_places(),
            solver: SolverSettings::default(),
        }
    }
}

impl PricingConfig {
    /// Valuation engine using these solver settings.
    pub fn engine(&self) -> BondValuationEngine {
        BondValuationEngine::new(self.solver.yield_solver())
    }

    /// Pricing service using these settings.
    pub fn service(&self) -> PricingService {
        PricingService::new(self.engine())
            .with_default_risk_free_rate(self.risk_free_rate)
            .with_decimal_places(self.decimal_places)
    }
}

impl Validate for PricingConfig {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if !self.risk_free_rate.is_finite() || self.risk_free_rate <= -2.0 {
            errors.push(ValidationError::new(
                "risk_free_rate",
                format!("Risk-free rate {} must be finite and above -2", self.risk_free_rate),
            ));
        }

        if self.decimal_places > MAX_DECIMAL_PLACES {
            errors.push(ValidationError::new(
                "decimal_places",
                format!("Decimal places cannot exceed {MAX_DECIMAL_PLACES}"),
            ));
        }

        errors.extend(self.solver.validate().into_iter().map(|e| e.nested("solver")));
        errors
    }
}

/// Yield solver settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolverSettings {
    /// Convergence tolerance on the price.
    #[serde(default = "default_price_tolerance")]
    pub price_tolerance: f64,

    /// Convergence tolerance on the yield.
    #[serde(default = "default_yield_tolerance")]
    pub yield_tolerance: f64,

    /// Maximum Newton/bisection iterations.
    #[serde(default = "default_max_iterations")]
    pub max_iterations: u32,

    /// Interval the bracket search starts from.
    #[serde(default = "default_initial_bracket")]
    pub initial_bracket: [f64; 2],

    /// Maximum number of bracket expansions.
    #[serde(default = "default_max_bracket_expansions")]
    pub max_bracket_expansions: u32,
}

fn default_price_tolerance() -> f64 {
    1e-8
}

fn default_yield_tolerance() -> f64 {
    1e-10
}

fn default_max_iterations() -> u32 {
    100
}

fn default_initial_bracket() -> [f64; 2] {
    [-0.5, 5.0]
}

fn default_max_bracket_expansions() -> u32 {
    60
}

impl Default for SolverSettings {
    fn default() -> Self {
        Self {
            price_tolerance: default_price_tolerance(),
            yield_tolerance: default_yield_tolerance(),
            max_iterations: default_max_iterations(),
            initial_bracket: default_initial_bracket(),
            max_bracket_expansions: default_max_bracket_expansions(),
        }
    }
}

impl SolverSettings {
    /// Yield solver configured with these settings.
    pub fn yield_solver(&self) -> YieldSolver {
        let [lo, hi] = self.initial_bracket;
        YieldSolver::new()
            .with_price_tolerance(self.price_tolerance)
            .with_tolerance(self.yield_tolerance)
            .with_max_iterations(self.max_iterations)
            .with_initial_bracket(lo, hi)
            .with_max_bracket_expansions(self.max_bracket_expansions)
    }
}

impl Validate for SolverSettings {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        for (field, value) in [
            ("price_tolerance", self.price_tolerance),
            ("yield_tolerance", self.yield_tolerance),
        ] {
            if !value.is_finite() || value <= 0.0 {
                errors.push(ValidationError::new(
                    field,
                    format!("Tolerance {value} must be positive and finite"),
                ));
            }
        }

        if self.max_iterations == 0 {
            errors.push(ValidationError::new(
                "max_iterations",
                "Max iterations must be at least 1",
            ));
        }

        let [lo, hi] = self.initial_bracket;
        if !(lo.is_finite() && hi.is_finite() && -2.0 < lo && lo < hi) {
            errors.push(ValidationError::new(
                "initial_bracket",
                format!("Bracket [{lo}, {hi}] must satisfy -2 < lo < hi"),
            ));
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_defaults_valid() {
        let config = PricingConfig::default();
        assert!(config.is_valid());
        assert_relative_eq!(config.risk_free_rate, 0.04);
        assert_eq!(config.solver.initial_bracket, [-0.5, 5.0]);
    }

    #[test]
    fn test_solver_built_from_settings() {
        let settings = SolverSettings {
            max_iterations: 25,
            initial_bracket: [-0.1, 1.0],
            ..SolverSettings::default()
        };
        let solver = settings.yield_solver();

        assert_eq!(solver.config().max_iterations, 25);
        assert_relative_eq!(solver.config().function_tolerance, 1e-8);
        assert_relative_eq!(solver.config().tolerance, 1e-10);
        assert_eq!(solver.initial_bracket(), (-0.1, 1.0));
    }

    #[test]
    fn test_invalid_settings_collected() {
        let config = PricingConfig {
            decimal_places: 12,
            solver: SolverSettings {
                price_tolerance: 0.0,
                max_iterations: 0,
                initial_bracket: [-3.0, 1.0],
                ..SolverSettings::default()
            },
            ..PricingConfig::default()
        };

        let fields: Vec<String> = config.validate().into_iter().map(|e| e.field).collect();
        assert_eq!(
            fields,
            vec![
                "decimal_places",
                "solver.price_tolerance",
                "solver.max_iterations",
                "solver.initial_bracket"
            ]
        );
    }
}
