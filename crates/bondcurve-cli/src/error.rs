//! CLI error types.

use thiserror::Error;

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid date format.
    #[error("Invalid date: {0}. Use YYYY-MM-DD.")]
    InvalidDate(String),

    /// A rate outside the range semi-annual discounting supports.
    #[error("Invalid {name}: {value}. Must be finite and above -2.")]
    InvalidRate {
        /// Argument name.
        name: &'static str,
        /// The value given.
        value: f64,
    },

    /// A malformed row in a bond data file.
    #[error("Invalid bond data at line {line}: {message}")]
    InvalidData {
        /// 1-based line number in the file.
        line: u64,
        /// What is wrong with the row.
        message: String,
    },

    /// A bond data file without usable rows.
    #[error("No bonds found in {0}")]
    EmptyData(String),
}

/// CLI result type.
pub type CliResult<T> = Result<T, CliError>;
