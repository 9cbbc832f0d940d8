//! Domain types.

mod date;
mod maturity_type;

pub use date::Date;
pub use maturity_type::MaturityType;
