//! Completed buy→sell round trips and the pairing state machine.

use serde::{Deserialize, Serialize};

use super::fill::TradeSnapshot;

pub const MS_PER_DAY: f64 = 86_400_000.0;

/// Substitute 1 for a zero (or NaN) divisor so ratios stay finite.
///
/// Negative divisors are used unchanged.
pub fn guard_divisor(value: f64) -> f64 {
    if value == 0.0 || value.is_nan() {
        1.0
    } else {
        value
    }
}

/// Fractional days between two epoch-millisecond timestamps.
///
/// Subtracts in `f64` so any pair of `i64` timestamps is accepted.
pub fn days_between(start_ms: i64, end_ms: i64) -> f64 {
    (end_ms as f64 - start_ms as f64) / MS_PER_DAY
}

/// One completed open→close cycle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoundTrip {
    pub buy: TradeSnapshot,
    pub sell: TradeSnapshot,
}

impl RoundTrip {
    pub fn new(buy: TradeSnapshot, sell: TradeSnapshot) -> Self {
        RoundTrip { buy, sell }
    }

    pub fn profit(&self) -> f64 {
        self.sell.funds - self.buy.funds
    }

    /// Profit as a percentage of the funds committed at the buy.
    pub fn profit_rate(&self) -> f64 {
        self.profit() / guard_divisor(self.buy.funds) * 100.0
    }

    /// Negative when the sell is timestamped before the buy.
    pub fn holding_days(&self) -> f64 {
        days_between(self.buy.time, self.sell.time)
    }

    pub fn is_profit(&self) -> bool {
        self.profit() > 0.0
    }
}

/// Pairing state of a recorder: either waiting for a buy, or holding the
/// pending buy until its sell arrives.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum RecorderState {
    #[default]
    Idle,
    AwaitingSell(TradeSnapshot),
}

impl RecorderState {
    pub fn is_open(&self) -> bool {
        matches!(self, RecorderState::AwaitingSell(_))
    }

    /// Accept a buy. Returns `false` (and keeps the pending buy) when already open.
    pub fn on_buy(&mut self, snapshot: TradeSnapshot) -> bool {
        match self {
            RecorderState::Idle => {
                *self = RecorderState::AwaitingSell(snapshot);
                true
            }
            RecorderState::AwaitingSell(_) => false,
        }
    }

    /// Accept a sell, emitting the completed round trip if a buy was pending.
    pub fn on_sell(&mut self, snapshot: TradeSnapshot) -> Option<RoundTrip> {
        match std::mem::take(self) {
            RecorderState::Idle => None,
            RecorderState::AwaitingSell(buy) => Some(RoundTrip::new(buy, snapshot)),
        }
    }
}
