//! Curve command implementation.
//!
//! Builds a credit yield curve from quoted bonds and reads it at a tenor grid.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;
use tracing::info;

use bondcurve_config::BondcurveConfig;
use bondcurve_core::Date;
use bondcurve_curves::prelude::SkippedBond;
use bondcurve_curves::{FailurePolicy, TenorGrid, TenorPoint, TenorTable, YieldObservation};

use crate::cli::OutputFormat;
use crate::commands::parse_date;
use crate::data::load_quotes;
use crate::output::{
    format_percent, print_header, print_output, print_success, print_table, print_warning,
};

/// Arguments for the curve command.
#[derive(Args, Debug)]
pub struct CurveArgs {
    /// CSV file of quoted bonds
    #[arg(short, long)]
    pub data: PathBuf,

    /// Valuation date (YYYY-MM-DD, defaults to today)
    #[arg(long)]
    pub as_of: Option<String>,

    /// Comma-separated tenors (e.g. 1y,2y,5y); overrides the configured grid
    #[arg(long, value_delimiter = ',')]
    pub tenors: Option<Vec<String>>,

    /// Handling of bonds whose yield cannot be solved (skip, abort)
    #[arg(long)]
    pub policy: Option<FailurePolicy>,

    /// Fail when a tenor lies outside the span of the bullet bonds
    #[arg(long)]
    pub strict: bool,
}

/// One solved bond for display.
#[derive(Debug, Clone, Serialize, Tabled)]
struct BondRow {
    #[tabled(rename = "Bond")]
    bond: String,
    #[tabled(rename = "Maturity")]
    maturity_date: String,
    #[tabled(rename = "Years")]
    #[serde(skip)]
    years_display: String,
    #[tabled(skip)]
    maturity_years: f64,
    #[tabled(rename = "Type")]
    maturity_type: String,
    #[tabled(rename = "Yield")]
    #[serde(skip)]
    yield_display: String,
    #[tabled(skip)]
    yield_value: f64,
}

impl From<&YieldObservation> for BondRow {
    fn from(obs: &YieldObservation) -> Self {
        Self {
            bond: obs.bond_id.clone(),
            maturity_date: obs.maturity_date.to_string(),
            years_display: format!("{:.4}", obs.maturity_years),
            maturity_years: obs.maturity_years,
            maturity_type: obs.maturity_type.to_string(),
            yield_display: format_percent(obs.yield_value),
            yield_value: obs.yield_value,
        }
    }
}

/// One curve point for display.
#[derive(Debug, Clone, Serialize, Tabled)]
struct TenorRow {
    #[tabled(rename = "Tenor")]
    tenor: String,
    #[tabled(rename = "Years")]
    tenor_years: f64,
    #[tabled(rename = "Yield")]
    #[serde(skip)]
    yield_display: String,
    #[tabled(skip)]
    yield_value: f64,
}

impl From<&TenorPoint> for TenorRow {
    fn from(point: &TenorPoint) -> Self {
        Self {
            tenor: point.label.clone(),
            tenor_years: point.tenor_years,
            yield_display: format_percent(point.yield_value),
            yield_value: point.yield_value,
        }
    }
}

#[derive(Debug, Serialize)]
struct SkippedRow {
    bond: String,
    reason: String,
}

impl From<&SkippedBond> for SkippedRow {
    fn from(skipped: &SkippedBond) -> Self {
        Self {
            bond: skipped.bond_id.clone(),
            reason: skipped.error.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
struct CurveReport {
    as_of: Date,
    bonds: Vec<BondRow>,
    curve: Vec<TenorRow>,
    out_of_range: Vec<String>,
    skipped: Vec<SkippedRow>,
}

/// Executes the curve command.
pub fn execute(args: CurveArgs, config: &BondcurveConfig, format: OutputFormat) -> Result<()> {
    let as_of = match &args.as_of {
        Some(s) => parse_date(s)?,
        None => Date::today(),
    };
    let grid = match &args.tenors {
        Some(labels) => TenorGrid::from_labels(labels.as_slice())?,
        None => config.curve.grid()?,
    };

    let quotes = load_quotes(&args.data)?;
    info!("building curve from {} quotes as of {as_of}", quotes.len());

    let mut builder = config.curve.builder(config.pricing.engine());
    if let Some(policy) = args.policy {
        builder = builder.with_failure_policy(policy);
    }
    let build = builder.build(&quotes, as_of)?;

    let table = if args.strict {
        TenorTable {
            points: build.interpolate(&grid)?,
            out_of_range: Vec::new(),
        }
    } else {
        build.interpolate_available(&grid)?
    };

    let report = CurveReport {
        as_of,
        bonds: build.observations.iter().map(BondRow::from).collect(),
        curve: table.points.iter().map(TenorRow::from).collect(),
        out_of_range: table.out_of_range.iter().map(ToString::to_string).collect(),
        skipped: build.skipped.iter().map(SkippedRow::from).collect(),
    };

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Csv => print_output(&report.curve, format)?,
        OutputFormat::Table => print_report(&report)?,
    }

    Ok(())
}

fn print_report(report: &CurveReport) -> Result<()> {
    print_header(&format!("Bond Yields as of {}", report.as_of));
    print_table(&report.bonds)?;

    print_header("Yield Curve");
    print_table(&report.curve)?;

    if !report.out_of_range.is_empty() {
        print_warning(&format!(
            "Tenors outside the bullet maturities: {}",
            report.out_of_range.join(", ")
        ));
    }
    for skipped in &report.skipped {
        print_warning(&format!("Skipped {}: {}", skipped.bond, skipped.reason));
    }
    if report.skipped.is_empty() && report.out_of_range.is_empty() {
        print_success(&format!("Curve built at {} tenors", report.curve.len()));
    }

    Ok(())
}
