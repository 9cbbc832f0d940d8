//! Bond quote files.
//!
//! Quotes come as CSV with vendor column names: `Cpn` (coupon in percent),
//! `Maturity` (`MM/DD/YYYY`, ISO dates also accepted), `Ask Price` (per 100)
//! and an optional `Maturity Type`. An identifier column (`ID`, `Security`,
//! `Ticker` or `Description`) is optional; other columns are ignored.

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::debug;

use bondcurve_core::{Date, MaturityType};
use bondcurve_curves::BondQuote;

use crate::error::CliError;

const VENDOR_DATE_FORMAT: &str = "%m/%d/%Y";

#[derive(Debug, Deserialize)]
struct QuoteRecord {
    #[serde(
        rename = "ID",
        alias = "Security",
        alias = "Ticker",
        alias = "Description",
        default
    )]
    id: Option<String>,
    #[serde(rename = "Cpn")]
    coupon_percent: f64,
    #[serde(rename = "Maturity")]
    maturity: String,
    #[serde(rename = "Ask Price")]
    ask_price: f64,
    #[serde(rename = "Maturity Type", default)]
    maturity_type: Option<String>,
}

/// Loads bond quotes from a CSV file.
pub fn load_quotes(path: &Path) -> Result<Vec<BondQuote>> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("Failed to open bond data file {}", path.display()))?;
    let quotes = read_quotes(file)?;
    if quotes.is_empty() {
        return Err(CliError::EmptyData(path.display().to_string()).into());
    }
    debug!("loaded {} quotes from {}", quotes.len(), path.display());
    Ok(quotes)
}

/// Reads bond quotes from CSV with a header row.
pub fn read_quotes<R: Read>(reader: R) -> Result<Vec<BondQuote>> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut quotes = Vec::new();

    for (index, record) in rdr.deserialize::<QuoteRecord>().enumerate() {
        // Header is line 1.
        let line = index as u64 + 2;
        let record = record.map_err(|e| CliError::InvalidData {
            line,
            message: e.to_string(),
        })?;
        quotes.push(to_quote(record, line)?);
    }

    Ok(quotes)
}

fn to_quote(record: QuoteRecord, line: u64) -> Result<BondQuote, CliError> {
    let maturity_date = Date::parse_with_format(&record.maturity, VENDOR_DATE_FORMAT)
        .or_else(|_| Date::parse(&record.maturity))
        .map_err(|_| CliError::InvalidData {
            line,
            message: format!("unrecognised maturity date '{}'", record.maturity),
        })?;

    let maturity_type = match record.maturity_type.as_deref().map(str::trim) {
        None | Some("") => MaturityType::AtMaturity,
        Some(label) => label.parse::<MaturityType>().map_err(|e| CliError::InvalidData {
            line,
            message: format!("{e}"),
        })?,
    };

    let id = record
        .id
        .filter(|id| !id.trim().is_empty())
        .unwrap_or_else(|| format!("{} {}", record.coupon_percent, record.maturity));

    Ok(BondQuote::new(id, record.coupon_percent / 100.0, maturity_date, record.ask_price)
        .with_maturity_type(maturity_type))
}
