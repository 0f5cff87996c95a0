//! Concrete adapter implementations for ports.

pub mod csv_adapter;
pub mod file_config_adapter;
pub mod json_bill_adapter;
pub mod paper_exchange;
pub mod text_report_adapter;
