//! Full-balance position executor.
//!
//! A [`FullTrader`] opens a position with the entire quote balance of its
//! wallet and closes it with the entire base balance, then reconciles the
//! wallet from the returned fill. The wallet is only touched after the venue
//! call succeeds, so a failed call leaves every balance unchanged.

use std::sync::Arc;

use tracing::{debug, info};

use super::error::LedgerError;
use super::fill::{OrderFill, TradeSnapshot};
use super::symbol::SymbolPair;
use super::wallet::Wallet;
use crate::ports::exchange_port::ExchangePort;

pub struct FullTrader {
    exchange: Arc<dyn ExchangePort>,
    wallet: Wallet,
}

impl FullTrader {
    pub fn new(exchange: Arc<dyn ExchangePort>, wallet: Wallet) -> Self {
        FullTrader { exchange, wallet }
    }

    pub fn wallet(&self) -> &Wallet {
        &self.wallet
    }

    pub fn into_wallet(self) -> Wallet {
        self.wallet
    }

    /// Quote balance, i.e. the funds available for the next open.
    pub fn funds(&self, pair: &SymbolPair) -> f64 {
        self.wallet.get(&pair.quote)
    }

    /// Base balance, i.e. the position size available for the next close.
    pub fn assets(&self, pair: &SymbolPair) -> f64 {
        self.wallet.get(&pair.base)
    }

    /// Quote balance plus the base balance marked at `price`.
    pub fn notional(&self, pair: &SymbolPair, price: f64) -> f64 {
        self.funds(pair) + self.assets(pair) * price
    }

    /// Wallet readings for `pair` at `time`, as recorded into a bill:
    /// notional funds at `price` and the base position size.
    pub fn snapshot(&self, pair: &SymbolPair, time: i64, price: f64) -> TradeSnapshot {
        TradeSnapshot {
            time,
            price,
            funds: self.notional(pair, price),
            assets: self.assets(pair),
        }
    }

    /// Buy the base asset with the whole quote balance.
    pub async fn market_open_full(&mut self, pair: &SymbolPair) -> Result<OrderFill, LedgerError> {
        let funds = self.funds(pair);
        debug!(%pair, funds, "opening full position");
        let fill = self.exchange.market_open(pair, funds).await?;

        self.wallet.send(&pair.quote, fill.cost);
        self.wallet.receive(&pair.base, fill.amount);
        self.pay_fees(&fill);

        info!(
            %pair,
            amount = fill.amount,
            cost = fill.cost,
            price = fill.price,
            "opened position"
        );
        Ok(fill)
    }

    /// Sell the whole base balance for the quote asset.
    pub async fn market_close_full(&mut self, pair: &SymbolPair) -> Result<OrderFill, LedgerError> {
        let assets = self.assets(pair);
        debug!(%pair, assets, "closing full position");
        let fill = self.exchange.market_close(pair, assets).await?;

        self.wallet.send(&pair.base, fill.amount);
        self.wallet.receive(&pair.quote, fill.cost);
        self.pay_fees(&fill);

        info!(
            %pair,
            amount = fill.amount,
            proceeds = fill.cost,
            price = fill.price,
            "closed position"
        );
        Ok(fill)
    }

    fn pay_fees(&mut self, fill: &OrderFill) {
        for fee in &fill.fees {
            self.wallet.send(&fee.currency, fee.cost);
        }
    }
}
