//! Price command implementation.
//!
//! Values a fixed-coupon bond at a discount rate.

use anyhow::Result;
use clap::Args;
use tracing::info;

use bondcurve_bonds::prelude::BondType;
use bondcurve_bonds::PricingRequest;
use bondcurve_config::BondcurveConfig;
use bondcurve_core::year_fraction;

use crate::cli::OutputFormat;
use crate::commands::{parse_date, validate_rate};
use crate::output::{format_percent, print_header, print_output, print_single, KeyValue};

/// Arguments for the price command.
#[derive(Args, Debug)]
pub struct PriceArgs {
    /// Face value
    #[arg(long, default_value = "100")]
    pub face_value: f64,

    /// Annual coupon rate as a decimal (0.05 = 5%)
    #[arg(long)]
    pub coupon_rate: f64,

    /// Maturity in years (derived from the dates when omitted)
    #[arg(long)]
    pub maturity: Option<f64>,

    /// Issue date (YYYY-MM-DD)
    #[arg(long)]
    pub issue_date: String,

    /// Maturity date (YYYY-MM-DD)
    #[arg(long)]
    pub maturity_date: String,

    /// Semi-annually compounded discount rate as a decimal
    #[arg(long, allow_hyphen_values = true)]
    pub discount_rate: f64,

    /// Risk-free rate for the spread (configuration default when omitted)
    #[arg(long, allow_hyphen_values = true)]
    pub risk_free_rate: Option<f64>,

    /// Issuer classification (corporate, government, agency, municipal)
    #[arg(long, default_value = "corporate")]
    pub bond_type: BondType,
}

/// Executes the price command.
pub fn execute(args: PriceArgs, config: &BondcurveConfig, format: OutputFormat) -> Result<()> {
    let issue_date = parse_date(&args.issue_date)?;
    let maturity_date = parse_date(&args.maturity_date)?;
    let discount_rate = validate_rate("discount rate", args.discount_rate)?;
    let risk_free_rate = args
        .risk_free_rate
        .map(|rate| validate_rate("risk-free rate", rate))
        .transpose()?;
    let maturity = args
        .maturity
        .unwrap_or_else(|| year_fraction(issue_date, maturity_date));

    let request = PricingRequest {
        bond_type: args.bond_type,
        face_value: args.face_value,
        coupon_rate: args.coupon_rate,
        maturity,
        yield_to_maturity: None,
        npv: None,
        issue_date,
        maturity_date,
        discount_rate,
        risk_free_rate,
    };

    info!(
        "pricing {} bond: face {}, coupon {}, {} years at {}",
        request.bond_type, request.face_value, request.coupon_rate, maturity, discount_rate
    );

    let response = config.pricing.service().price(&request)?;

    if format != OutputFormat::Table {
        return print_single(&response, format);
    }

    print_header("Bond");
    let terms = vec![
        KeyValue::new("Type", request.bond_type.to_string()),
        KeyValue::new("Face Value", format!("{:.2}", request.face_value)),
        KeyValue::new("Coupon", format_percent(request.coupon_rate)),
        KeyValue::new("Issue Date", issue_date.to_string()),
        KeyValue::new("Maturity Date", maturity_date.to_string()),
        KeyValue::new("Maturity (years)", format!("{maturity:.4}")),
        KeyValue::new("Discount Rate", format_percent(discount_rate)),
    ];
    print_output(&terms, format)?;

    print_header("Valuation");
    let results = vec![
        KeyValue::new("NPV", response.npv.to_string()),
        KeyValue::new("YTM", response.ytm.to_string()),
        KeyValue::new("Spread", response.spread.to_string()),
        KeyValue::new("Duration (x100)", response.duration.to_string()),
    ];
    print_output(&results, format)?;

    Ok(())
}
