//! Bond valuation engine.
//!
//! [`BondValuationEngine::value`] runs the full chain for a bond and a
//! discount rate: cash flows, NPV at the rate, yield re-solved from that NPV,
//! and duration at the solved yield. The yield is deliberately re-derived
//! rather than copied from the input rate, so it doubles as a consistency
//! check of the pricing and solving code.

use serde::{Deserialize, Serialize};

use crate::cashflows::CashFlowSchedule;
use crate::error::{BondError, BondResult};
use crate::instruments::Bond;
use crate::pricing::{self, YieldSolver};
use crate::risk::{self, DurationResult};

/// Immutable result of valuing a bond.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BondValuation {
    /// Discount rate the NPV was computed at, or `None` when valued from a
    /// quoted price.
    pub discount_rate: Option<f64>,
    /// Net present value.
    pub npv: f64,
    /// Yield-to-maturity solved from the NPV.
    pub ytm: f64,
    /// Duration at the solved yield.
    pub duration: DurationResult,
}

impl BondValuation {
    /// Spread of the solved yield over a risk-free rate.
    pub fn spread(&self, risk_free_rate: f64) -> BondResult<f64> {
        spread(self.ytm, risk_free_rate)
    }

    /// Modified duration in the reported ×100 scale.
    pub fn scaled_duration(&self) -> f64 {
        self.duration.scaled_modified
    }
}

/// `ytm - risk_free_rate`, rejecting non-finite results.
pub(crate) fn spread(ytm: f64, risk_free_rate: f64) -> BondResult<f64> {
    let spread = ytm - risk_free_rate;
    if !spread.is_finite() {
        return Err(BondError::out_of_range("spread", spread));
    }
    Ok(spread)
}

/// Values fixed-coupon bonds.
///
/// Stateless apart from its solver settings; safe to share across threads.
#[derive(Debug, Clone, Default)]
pub struct BondValuationEngine {
    solver: YieldSolver,
}

impl BondValuationEngine {
    /// Creates an engine using the given yield solver.
    #[must_use]
    pub fn new(solver: YieldSolver) -> Self {
        Self { solver }
    }

    /// Returns the yield solver.
    pub fn solver(&self) -> &YieldSolver {
        &self.solver
    }

    /// NPV of a schedule at a semi-annually compounded discount rate.
    pub fn compute_npv(&self, schedule: &CashFlowSchedule, discount_rate: f64) -> BondResult<f64> {
        pricing::compute_npv(schedule.flows(), discount_rate)
    }

    /// Yield at which the schedule's NPV equals `target_price`.
    pub fn solve_ytm(&self, schedule: &CashFlowSchedule, target_price: f64) -> BondResult<f64> {
        self.solver
            .solve(schedule, target_price)
            .map(|result| result.yield_value)
    }

    /// Modified duration at `ytm`, in the reported ×100 scale.
    pub fn compute_duration(&self, schedule: &CashFlowSchedule, ytm: f64) -> BondResult<f64> {
        risk::compute_duration(schedule, ytm).map(|d| d.scaled_modified)
    }

    /// Yield spread over a risk-free rate.
    pub fn compute_spread(&self, ytm: f64, risk_free_rate: f64) -> BondResult<f64> {
        spread(ytm, risk_free_rate)
    }

    /// Values a bond at a discount rate.
    ///
    /// Computes the NPV at `discount_rate`, re-solves the yield from that
    /// NPV and measures duration at the solved yield.
    ///
    /// # Errors
    ///
    /// Propagates `InvalidMaturity`, `OutOfRangeValue` and `YieldNotFound`
    /// from the individual steps.
    pub fn value(&self, bond: &Bond, discount_rate: f64) -> BondResult<BondValuation> {
        let schedule = CashFlowSchedule::for_bond(bond)?;
        let npv = self.compute_npv(&schedule, discount_rate)?;
        let ytm = self.solve_ytm(&schedule, npv)?;
        let duration = risk::compute_duration(&schedule, ytm)?;

        log::debug!(
            "valued bond maturing {}: rate {discount_rate}, npv {npv:.6}, ytm {ytm:.10}",
            bond.maturity_date()
        );

        Ok(BondValuation {
            discount_rate: Some(discount_rate),
            npv,
            ytm,
            duration,
        })
    }

    /// Values a bond from a quoted price instead of a discount rate.
    ///
    /// The NPV of the result is the quoted price itself.
    pub fn value_at_price(&self, bond: &Bond, market_price: f64) -> BondResult<BondValuation> {
        let schedule = CashFlowSchedule::for_bond(bond)?;
        let ytm = self.solve_ytm(&schedule, market_price)?;
        let duration = risk::compute_duration(&schedule, ytm)?;

        Ok(BondValuation {
            discount_rate: None,
            npv: market_price,
            ytm,
            duration,
        })
    }

    /// Duration of a valued bond, read from its cached yield.
    pub fn duration_of(&self, bond: &Bond) -> BondResult<DurationResult> {
        let ytm = bond
            .yield_to_maturity()
            .ok_or_else(|| BondError::invalid_spec("bond has no solved yield-to-maturity"))?;
        let schedule = CashFlowSchedule::for_bond(bond)?;
        risk::compute_duration(&schedule, ytm)
    }
}
