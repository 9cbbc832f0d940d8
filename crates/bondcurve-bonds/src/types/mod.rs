//! Bond classification types.

mod bond_type;

pub use bond_type::BondType;
