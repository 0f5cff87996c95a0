//! Fill records produced by an execution venue, and wallet snapshots taken at
//! the instant of a trade.

use serde::{Deserialize, Serialize};

/// A fee charged on a fill, debited from the wallet in `currency`.
#[derive(Debug, Clone, PartialEq)]
pub struct Fee {
    pub currency: String,
    pub cost: f64,
}

/// Normalized result of a market open or close.
///
/// For an open, `amount` is the base asset received and `cost` the quote spent.
/// For a close, `amount` is the base asset sold and `cost` the quote proceeds.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderFill {
    pub amount: f64,
    pub cost: f64,
    pub price: f64,
    pub fees: Vec<Fee>,
}

/// Wallet readings captured immediately after a buy or sell is applied.
///
/// `time` is epoch milliseconds; `funds` is the notional value of the pair
/// (quote balance plus base balance marked at `price`) and `assets` the base
/// balance at that moment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TradeSnapshot {
    pub time: i64,
    pub price: f64,
    pub funds: f64,
    pub assets: f64,
}
