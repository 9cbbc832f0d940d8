//! Duration of a bond's cash flows.
//!
//! ## Formula
//!
//! ```text
//! D_mac = Σ (i/2) · PV_i / P        PV_i = CF_i / (1 + y/2)^i,  P = Σ PV_i
//! D_mod = D_mac / (1 + y/2)
//! ```
//!
//! Reported durations are additionally multiplied by 100
//! ([`DURATION_SCALE`]). The scaled figure is what pricing responses carry;
//! it is a presentation convention, not a unit.

use serde::{Deserialize, Serialize};

use crate::cashflows::CashFlowSchedule;
use crate::error::{BondError, BondResult};
use crate::pricing::check_rate;

/// Multiplier applied to modified duration in reported results.
pub const DURATION_SCALE: f64 = 100.0;

/// Duration calculation results.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DurationResult {
    /// Macaulay duration (in years).
    pub macaulay: f64,
    /// Modified duration (in years).
    pub modified: f64,
    /// Modified duration multiplied by [`DURATION_SCALE`].
    pub scaled_modified: f64,
}

/// Computes Macaulay and modified duration at the given yield.
///
/// # Errors
///
/// Returns `OutOfRangeValue` when the yield is outside `(-2, ∞)` or when the
/// present value is not a positive finite number.
pub fn compute_duration(schedule: &CashFlowSchedule, ytm: f64) -> BondResult<DurationResult> {
    check_rate("yield to maturity", ytm)?;

    let mut pv = 0.0;
    let mut weighted_time = 0.0;

    for cf in schedule {
        let discounted = cf.amount * cf.discount_factor(ytm);
        pv += discounted;
        weighted_time += cf.time_years() * discounted;
    }

    if !pv.is_finite() || pv <= 0.0 {
        return Err(BondError::out_of_range("present value", pv));
    }

    let macaulay = weighted_time / pv;
    let modified = macaulay / (1.0 + ytm / 2.0);
    let scaled_modified = modified * DURATION_SCALE;

    if !scaled_modified.is_finite() {
        return Err(BondError::out_of_range("duration", scaled_modified));
    }

    Ok(DurationResult {
        macaulay,
        modified,
        scaled_modified,
    })
}
