//! Configuration validation.
//!
//! Validates the `[replay]` section before a replay runs.

use crate::domain::error::LedgerError;
use crate::domain::replay::ReplayConfig;
use crate::domain::symbol::SymbolPair;
use crate::ports::config_port::ConfigPort;

const SECTION: &str = "replay";
pub const DEFAULT_BILL_ID: &str = "replay";

pub fn validate_replay_config(config: &dyn ConfigPort) -> Result<(), LedgerError> {
    build_replay_config(config).map(|_| ())
}

/// Validate and build a [`ReplayConfig`] from the `[replay]` section.
pub fn build_replay_config(config: &dyn ConfigPort) -> Result<ReplayConfig, LedgerError> {
    let pair = validate_symbol(config)?;
    let initial_funds = validate_initial_funds(config)?;
    let fee_pct = validate_fee_pct(config)?;
    let bill_id = config
        .get_string(SECTION, "bill_id")
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| DEFAULT_BILL_ID.to_string());

    Ok(ReplayConfig {
        pair,
        initial_funds,
        fee_pct,
        bill_id,
    })
}

fn validate_symbol(config: &dyn ConfigPort) -> Result<SymbolPair, LedgerError> {
    match config.get_string(SECTION, "symbol") {
        Some(s) if !s.trim().is_empty() => s.parse(),
        _ => Err(LedgerError::ConfigMissing {
            section: SECTION.to_string(),
            key: "symbol".to_string(),
        }),
    }
}

fn validate_initial_funds(config: &dyn ConfigPort) -> Result<f64, LedgerError> {
    let value = config.get_double(SECTION, "initial_funds", 0.0);
    if !value.is_finite() || value <= 0.0 {
        return Err(LedgerError::ConfigInvalid {
            section: SECTION.to_string(),
            key: "initial_funds".to_string(),
            reason: "initial_funds must be positive".to_string(),
        });
    }
    Ok(value)
}

fn validate_fee_pct(config: &dyn ConfigPort) -> Result<f64, LedgerError> {
    let value = config.get_double(SECTION, "fee_pct", 0.0);
    if !(0.0..100.0).contains(&value) {
        return Err(LedgerError::ConfigInvalid {
            section: SECTION.to_string(),
            key: "fee_pct".to_string(),
            reason: "fee_pct must be in [0, 100)".to_string(),
        });
    }
    Ok(value)
}
