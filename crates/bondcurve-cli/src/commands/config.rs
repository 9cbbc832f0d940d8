//! Config command implementation.
//!
//! Shows the effective configuration or validates a configuration file.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use bondcurve_config::{BondcurveConfig, Validate};

use crate::cli::OutputFormat;
use crate::output::{print_output, print_success, KeyValue};

/// Arguments for the config command.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Configuration file to inspect instead of the active one
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// Only check that the configuration is valid
    #[arg(long)]
    pub validate: bool,
}

/// Executes the config command.
pub fn execute(args: ConfigArgs, active: &BondcurveConfig, format: OutputFormat) -> Result<()> {
    let loaded;
    let config = match &args.file {
        Some(path) => {
            loaded = BondcurveConfig::from_file(path)?;
            &loaded
        }
        None => active,
    };

    if args.validate {
        config.validate_or_error()?;
        let source = args
            .file
            .as_ref()
            .map_or_else(|| "Active configuration".to_string(), |p| p.display().to_string());
        print_success(&format!("{source} is valid"));
        return Ok(());
    }

    match format {
        OutputFormat::Table => print!("{}", config.to_toml_string()?),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(config)?),
        OutputFormat::Csv => print_output(&settings_rows(config), format)?,
    }

    Ok(())
}

fn settings_rows(config: &BondcurveConfig) -> Vec<KeyValue> {
    let solver = &config.pricing.solver;
    vec![
        KeyValue::new("pricing.risk_free_rate", config.pricing.risk_free_rate.to_string()),
        KeyValue::new("pricing.decimal_places", config.pricing.decimal_places.to_string()),
        KeyValue::new("pricing.solver.price_tolerance", solver.price_tolerance.to_string()),
        KeyValue::new("pricing.solver.yield_tolerance", solver.yield_tolerance.to_string()),
        KeyValue::new("pricing.solver.max_iterations", solver.max_iterations.to_string()),
        KeyValue::new(
            "pricing.solver.initial_bracket",
            format!("{} {}", solver.initial_bracket[0], solver.initial_bracket[1]),
        ),
        KeyValue::new(
            "pricing.solver.max_bracket_expansions",
            solver.max_bracket_expansions.to_string(),
        ),
        KeyValue::new("curve.tenors", config.curve.tenors.join(" ")),
        KeyValue::new("curve.face_value", config.curve.face_value.to_string()),
        KeyValue::new("curve.failure_policy", config.curve.failure_policy.to_string()),
        KeyValue::new("curve.parallel", config.curve.parallel.to_string()),
    ]
}
