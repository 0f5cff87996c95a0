#![allow(dead_code)]

use async_trait::async_trait;
use std::io::Write;
use std::sync::Mutex;
use tradeledger::domain::error::LedgerError;
use tradeledger::domain::fill::{OrderFill, TradeSnapshot};
use tradeledger::domain::replay::{Signal, SignalRow};
use tradeledger::domain::round_trip::RoundTrip;
use tradeledger::domain::symbol::SymbolPair;
use tradeledger::ports::exchange_port::ExchangePort;
use tradeledger::ports::signal_port::SignalPort;

pub const DAY_MS: i64 = 86_400_000;

/// Venue that fills at a fixed price with no fees and no slippage, and counts calls.
pub struct FixedPriceExchange {
    pub price: f64,
    pub calls: Mutex<usize>,
    pub fail_after: Option<usize>,
}

impl FixedPriceExchange {
    pub fn new(price: f64) -> Self {
        Self {
            price,
            calls: Mutex::new(0),
            fail_after: None,
        }
    }

    pub fn failing_after(price: f64, calls: usize) -> Self {
        Self {
            fail_after: Some(calls),
            ..Self::new(price)
        }
    }

    pub fn call_count(&self) -> usize {
        *self.calls.lock().unwrap()
    }

    fn tick(&self, pair: &SymbolPair) -> Result<(), LedgerError> {
        let mut calls = self.calls.lock().unwrap();
        if let Some(limit) = self.fail_after {
            if *calls >= limit {
                return Err(LedgerError::Execution {
                    symbol: pair.to_string(),
                    reason: "venue unavailable".into(),
                });
            }
        }
        *calls += 1;
        Ok(())
    }
}

#[async_trait]
impl ExchangePort for FixedPriceExchange {
    async fn market_open(&self, pair: &SymbolPair, funds: f64) -> Result<OrderFill, LedgerError> {
        self.tick(pair)?;
        Ok(OrderFill {
            amount: funds / self.price,
            cost: funds,
            price: self.price,
            fees: vec![],
        })
    }

    async fn market_close(
        &self,
        pair: &SymbolPair,
        assets: f64,
    ) -> Result<OrderFill, LedgerError> {
        self.tick(pair)?;
        Ok(OrderFill {
            amount: assets,
            cost: assets * self.price,
            price: self.price,
            fees: vec![],
        })
    }
}

pub struct StaticSignals(pub Vec<SignalRow>);

impl SignalPort for StaticSignals {
    fn fetch_signals(&self) -> Result<Vec<SignalRow>, LedgerError> {
        Ok(self.0.clone())
    }
}

pub fn pair() -> SymbolPair {
    SymbolPair::new("BTC", "USDT")
}

pub fn row(time: i64, price: f64, signal: Signal) -> SignalRow {
    SignalRow {
        time,
        price,
        signal,
    }
}

pub fn snap(time: i64, price: f64, funds: f64, assets: f64) -> TradeSnapshot {
    TradeSnapshot {
        time,
        price,
        funds,
        assets,
    }
}

/// Round trip starting from 100 funds with the given percentage return.
pub fn item_with_rate(rate: f64) -> RoundTrip {
    RoundTrip::new(snap(0, 1.0, 100.0, 100.0), snap(DAY_MS, 1.0, 100.0 + rate, 0.0))
}

pub fn write_temp(content: &str, suffix: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}
