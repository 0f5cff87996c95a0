//! Port traits implemented by adapters.

pub mod bill_store_port;
pub mod config_port;
pub mod exchange_port;
pub mod report_port;
pub mod signal_port;
