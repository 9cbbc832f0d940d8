//! # Bondcurve Math
//!
//! Numerical building blocks for bond valuation and curve construction.
//!
//! - **Solvers**: bracket expansion and a safeguarded Newton/bisection root finder
//! - **Interpolation**: linear interpolation over sorted, possibly repeated abscissae
//!
//! Every routine is bounded: solvers stop at `max_iterations` and report
//! failure through [`MathError`] instead of looping or returning NaN.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::float_cmp)]
#![allow(clippy::many_single_char_names)]

pub mod error;
pub mod interpolation;
pub mod solvers;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{MathError, MathResult};
    pub use crate::interpolation::{Interpolator, LinearInterpolator};
    pub use crate::solvers::{expand_bracket, newton_bisection, SolverConfig, SolverResult};
}

pub use error::{MathError, MathResult};
