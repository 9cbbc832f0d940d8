//! Bondcurve CLI - bond valuation and credit curve construction.
//!
//! # Usage
//!
//! ```bash
//! # Value a bond at a discount rate
//! bondcurve price --face-value 1000 --coupon-rate 0.05 --maturity 10 \
//!     --issue-date 2022-07-20 --maturity-date 2032-07-17 --discount-rate 0.04
//!
//! # Build a credit curve from quoted bonds
//! bondcurve curve --data bond_data.csv --as-of 2024-01-02
//!
//! # Show the effective configuration
//! bondcurve config
//! ```

use anyhow::Result;
use clap::Parser;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use bondcurve_config::BondcurveConfig;

mod cli;
mod commands;
mod data;
mod error;
mod output;

use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    let config = match &cli.config {
        Some(path) => {
            debug!("loading configuration from {}", path.display());
            BondcurveConfig::from_file(path)?
        }
        None => BondcurveConfig::default(),
    };

    let format = cli.format;

    match cli.command {
        Commands::Price(args) => commands::price::execute(args, &config, format)?,
        Commands::Curve(args) => commands::curve::execute(args, &config, format)?,
        Commands::Config(args) => commands::config::execute(args, &config, format)?,
    }

    Ok(())
}

/// Logs go to stderr so that stdout carries only command output.
fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn,bondcurve=info",
        1 => "warn,bondcurve=debug",
        _ => "trace",
    };
    let filter = if verbose == 0 {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
    } else {
        EnvFilter::new(default)
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();
}
