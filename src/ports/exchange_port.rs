//! Order-execution port.
//!
//! Venues normalize their own order results into an [`OrderFill`]. Any
//! precision rounding, balance syncing or retry on insufficient balance is the
//! adapter's business; callers see either a fill or an error.

use async_trait::async_trait;

use crate::domain::error::LedgerError;
use crate::domain::fill::OrderFill;
use crate::domain::symbol::SymbolPair;

#[async_trait]
pub trait ExchangePort: Send + Sync {
    /// Spend up to `funds` of the quote asset buying the base asset.
    async fn market_open(&self, pair: &SymbolPair, funds: f64) -> Result<OrderFill, LedgerError>;

    /// Sell up to `assets` of the base asset for the quote asset.
    async fn market_close(&self, pair: &SymbolPair, assets: f64)
        -> Result<OrderFill, LedgerError>;
}
