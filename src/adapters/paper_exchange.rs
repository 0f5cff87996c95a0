//! Simulated venue implementing [`ExchangePort`].
//!
//! Market orders fill completely at the current mark price. The fee is a
//! percentage of the received amount, charged in the received currency: base
//! on an open, quote on a close.

use std::sync::RwLock;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::error::LedgerError;
use crate::domain::fill::{Fee, OrderFill};
use crate::domain::symbol::SymbolPair;
use crate::ports::exchange_port::ExchangePort;

pub struct PaperExchange {
    price: RwLock<f64>,
    fee_pct: f64,
}

impl PaperExchange {
    pub fn new(fee_pct: f64) -> Self {
        PaperExchange {
            price: RwLock::new(0.0),
            fee_pct,
        }
    }

    pub fn set_price(&self, price: f64) {
        match self.price.write() {
            Ok(mut guard) => *guard = price,
            Err(poisoned) => *poisoned.into_inner() = price,
        }
    }

    pub fn price(&self) -> f64 {
        match self.price.read() {
            Ok(guard) => *guard,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }

    fn mark_price(&self, pair: &SymbolPair) -> Result<f64, LedgerError> {
        let price = self.price();
        if !price.is_finite() || price <= 0.0 {
            return Err(LedgerError::Execution {
                symbol: pair.to_string(),
                reason: format!("no valid mark price (got {price})"),
            });
        }
        Ok(price)
    }

    fn check_quantity(pair: &SymbolPair, what: &str, qty: f64) -> Result<(), LedgerError> {
        if !qty.is_finite() || qty < 0.0 {
            return Err(LedgerError::Execution {
                symbol: pair.to_string(),
                reason: format!("invalid {what} {qty}"),
            });
        }
        Ok(())
    }

    fn fee(&self, currency: &str, received: f64) -> Vec<Fee> {
        if self.fee_pct == 0.0 {
            return Vec::new();
        }
        vec![Fee {
            currency: currency.to_string(),
            cost: received * self.fee_pct / 100.0,
        }]
    }
}

#[async_trait]
impl ExchangePort for PaperExchange {
    async fn market_open(&self, pair: &SymbolPair, funds: f64) -> Result<OrderFill, LedgerError> {
        Self::check_quantity(pair, "funds", funds)?;
        let price = self.mark_price(pair)?;
        let amount = funds / price;
        let fill = OrderFill {
            amount,
            cost: funds,
            price,
            fees: self.fee(&pair.base, amount),
        };
        debug!(%pair, price, amount, "paper open filled");
        Ok(fill)
    }

    async fn market_close(
        &self,
        pair: &SymbolPair,
        assets: f64,
    ) -> Result<OrderFill, LedgerError> {
        Self::check_quantity(pair, "assets", assets)?;
        let price = self.mark_price(pair)?;
        let cost = assets * price;
        let fill = OrderFill {
            amount: assets,
            cost,
            price,
            fees: self.fee(&pair.quote, cost),
        };
        debug!(%pair, price, proceeds = cost, "paper close filled");
        Ok(fill)
    }
}
