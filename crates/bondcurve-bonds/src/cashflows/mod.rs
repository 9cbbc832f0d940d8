//! Cash flow generation.

mod schedule;

pub use schedule::{CashFlow, CashFlowSchedule, MAX_MATURITY_YEARS};
