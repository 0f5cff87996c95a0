//! Core domain types and logic.

pub mod bill;
pub mod config_validation;
pub mod error;
pub mod fill;
pub mod metrics;
pub mod replay;
pub mod round_trip;
pub mod stats;
pub mod symbol;
pub mod trader;
pub mod wallet;
