//! Curve tenors.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{CurveError, CurveResult};

/// Labels of the standard credit curve grid.
pub const STANDARD_TENORS: [&str; 13] = [
    "1m", "3m", "6m", "1y", "2y", "3y", "5y", "7y", "10y", "20y", "30y", "50y", "70y",
];

/// A point on the curve's time axis, such as `3m` or `10y`.
///
/// Months are converted to years as `n / 12`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tenor {
    label: String,
    years: f64,
}

impl Tenor {
    /// A tenor of `n` months.
    #[must_use]
    pub fn months(n: u32) -> Self {
        Self {
            label: format!("{n}m"),
            years: f64::from(n) / 12.0,
        }
    }

    /// A tenor of `n` years.
    #[must_use]
    pub fn years(n: u32) -> Self {
        Self {
            label: format!("{n}y"),
            years: f64::from(n),
        }
    }

    /// The normalised label (`"3m"`, `"10y"`).
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Length in years.
    pub fn in_years(&self) -> f64 {
        self.years
    }
}

impl fmt::Display for Tenor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

impl FromStr for Tenor {
    type Err = CurveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tenor = s.trim().to_ascii_uppercase();

        let (num_str, unit) = if let Some(n) = tenor.strip_suffix('M') {
            (n, 'M')
        } else if let Some(n) = tenor.strip_suffix('Y') {
            (n, 'Y')
        } else {
            return Err(CurveError::invalid_tenor(s, "expected a number followed by 'm' or 'y'"));
        };

        let num: u32 = num_str
            .parse()
            .map_err(|_| CurveError::invalid_tenor(s, format!("invalid tenor number '{num_str}'")))?;
        if num == 0 {
            return Err(CurveError::invalid_tenor(s, "tenor must be positive"));
        }

        Ok(match unit {
            'M' => Self::months(num),
            _ => Self::years(num),
        })
    }
}

/// Ordered set of tenors a curve is read off at.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TenorGrid {
    tenors: Vec<Tenor>,
}

impl Default for TenorGrid {
    fn default() -> Self {
        Self::standard()
    }
}

impl TenorGrid {
    /// The standard grid: 1m, 3m, 6m, 1y, 2y, 3y, 5y, 7y, 10y, 20y, 30y, 50y, 70y.
    #[must_use]
    pub fn standard() -> Self {
        let tenors = [1, 3, 6]
            .into_iter()
            .map(Tenor::months)
            .chain([1, 2, 3, 5, 7, 10, 20, 30, 50, 70].into_iter().map(Tenor::years))
            .collect();
        Self { tenors }
    }

    /// Builds a grid from labels, kept in the order given.
    pub fn from_labels<S: AsRef<str>>(labels: &[S]) -> CurveResult<Self> {
        let tenors = labels
            .iter()
            .map(|label| label.as_ref().parse())
            .collect::<CurveResult<Vec<Tenor>>>()?;
        Ok(Self { tenors })
    }

    /// Returns the tenors.
    pub fn tenors(&self) -> &[Tenor] {
        &self.tenors
    }

    /// Iterates over the tenors.
    pub fn iter(&self) -> std::slice::Iter<'_, Tenor> {
        self.tenors.iter()
    }

    /// Number of tenors.
    pub fn len(&self) -> usize {
        self.tenors.len()
    }

    /// Whether the grid is empty.
    pub fn is_empty(&self) -> bool {
        self.tenors.is_empty()
    }
}
