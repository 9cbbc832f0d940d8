//! # Bondcurve Core
//!
//! Foundational types shared by the Bondcurve crates:
//!
//! - **Types**: [`Date`] and [`MaturityType`]
//! - **Day count**: the single ACT/365.25 year-fraction convention used for
//!   maturities and curve tenors
//! - **Errors**: [`CoreError`]

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::doc_markdown)]

pub mod daycount;
pub mod error;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::daycount::{year_fraction, DAYS_PER_YEAR};
    pub use crate::error::{CoreError, CoreResult};
    pub use crate::types::{Date, MaturityType};
}

pub use daycount::{year_fraction, DAYS_PER_YEAR};
pub use error::{CoreError, CoreResult};
pub use types::{Date, MaturityType};
