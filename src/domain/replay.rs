//! Replay a stream of trade signals through a [`FullTrader`] and record the
//! resulting round trips into a bill.

use std::fmt;
use std::str::FromStr;

use tracing::{debug, info};

use super::bill::{Bill, BillRecorder};
use super::error::LedgerError;
use super::symbol::SymbolPair;
use super::trader::FullTrader;
use super::wallet::Wallet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    Buy,
    Sell,
    Hold,
}

impl FromStr for Signal {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "buy" | "open" | "long" => Ok(Signal::Buy),
            "sell" | "close" => Ok(Signal::Sell),
            "hold" | "" => Ok(Signal::Hold),
            other => Err(LedgerError::Data {
                reason: format!("unknown signal {other:?}"),
            }),
        }
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Signal::Buy => "buy",
            Signal::Sell => "sell",
            Signal::Hold => "hold",
        };
        f.write_str(s)
    }
}

/// One observation: epoch-millisecond time, market price and the action to take.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SignalRow {
    pub time: i64,
    pub price: f64,
    pub signal: Signal,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReplayConfig {
    pub pair: SymbolPair,
    pub initial_funds: f64,
    pub fee_pct: f64,
    pub bill_id: String,
}

impl ReplayConfig {
    /// Wallet holding `initial_funds` of the quote asset.
    pub fn initial_wallet(&self) -> Wallet {
        Wallet::with_balances([(self.pair.quote.clone(), self.initial_funds)])
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReplayResult {
    pub bill: Bill,
    pub wallet: Wallet,
    pub executed: usize,
    pub skipped: usize,
}

/// Drive `rows` through `trader`, recording every completed round trip.
///
/// `mark` is called with each row before any order is placed so the venue
/// can price the fill. A buy while a position is open, or a sell with none
/// open, is skipped without reaching the venue. The first venue error aborts
/// the replay.
pub async fn run_replay<F>(
    mut trader: FullTrader,
    pair: &SymbolPair,
    bill_id: &str,
    rows: &[SignalRow],
    mut mark: F,
) -> Result<ReplayResult, LedgerError>
where
    F: FnMut(&SignalRow),
{
    let mut recorder = BillRecorder::new(bill_id);
    let mut executed = 0;
    let mut skipped = 0;

    for row in rows {
        match row.signal {
            Signal::Hold => continue,
            Signal::Buy if recorder.is_open() => {
                debug!(time = row.time, "buy skipped: position already open");
                skipped += 1;
            }
            Signal::Sell if !recorder.is_open() => {
                debug!(time = row.time, "sell skipped: no open position");
                skipped += 1;
            }
            Signal::Buy => {
                mark(row);
                let fill = trader.market_open_full(pair).await?;
                recorder.record_buy(trader.snapshot(pair, row.time, fill.price));
                executed += 1;
            }
            Signal::Sell => {
                mark(row);
                let fill = trader.market_close_full(pair).await?;
                recorder.record_sell(trader.snapshot(pair, row.time, fill.price));
                executed += 1;
            }
        }
    }

    let bill = recorder.into_bill();
    info!(
        bill = bill.id(),
        round_trips = bill.len(),
        executed,
        skipped,
        "replay finished"
    );

    Ok(ReplayResult {
        bill,
        wallet: trader.into_wallet(),
        executed,
        skipped,
    })
}
