//! Bills: ordered logs of completed round trips.
//!
//! [`BillRecorder`] is the append-only writer fed by buy/sell events.
//! [`Bill`] is an immutable snapshot of recorded items; slicing, filtering and
//! streak segmentation all produce new bills over copies of the same items.

use tracing::{debug, warn};

use super::fill::TradeSnapshot;
use super::round_trip::{guard_divisor, RecorderState, RoundTrip};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Bill {
    id: String,
    items: Vec<RoundTrip>,
}

impl Bill {
    pub fn new(id: impl Into<String>, items: Vec<RoundTrip>) -> Self {
        Bill {
            id: id.into(),
            items,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Same items under a different id.
    pub fn with_id(self, id: impl Into<String>) -> Self {
        Bill {
            id: id.into(),
            ..self
        }
    }

    pub fn items(&self) -> &[RoundTrip] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn first(&self) -> Option<&RoundTrip> {
        self.items.first()
    }

    pub fn last(&self) -> Option<&RoundTrip> {
        self.items.last()
    }

    pub fn profit_count(&self) -> usize {
        self.items.iter().filter(|item| item.is_profit()).count()
    }

    pub fn loss_count(&self) -> usize {
        self.items.len() - self.profit_count()
    }

    /// Funds at the first buy, 0 when empty.
    pub fn start_funds(&self) -> f64 {
        self.first().map(|item| item.buy.funds).unwrap_or(0.0)
    }

    /// Funds at the last sell, 0 when empty.
    pub fn end_funds(&self) -> f64 {
        self.last().map(|item| item.sell.funds).unwrap_or(0.0)
    }

    pub fn total_profit(&self) -> f64 {
        self.end_funds() - self.start_funds()
    }

    pub fn total_profit_rate(&self) -> f64 {
        self.total_profit() / guard_divisor(self.start_funds()) * 100.0
    }

    pub fn is_profit(&self) -> bool {
        self.total_profit() > 0.0
    }

    /// Items `start..end` as a new bill with id `{id}-{start}_{end-1}_items`.
    ///
    /// Out-of-range bounds are clamped to the item count.
    pub fn slice(&self, start: usize, end: usize) -> Bill {
        let end = end.min(self.items.len());
        let start = start.min(end);
        Bill::new(
            format!("{}-{}_{}_items", self.id, start, end as i64 - 1),
            self.items[start..end].to_vec(),
        )
    }

    /// Every profitable item, not necessarily contiguous.
    pub fn profit_sub_bill(&self) -> Bill {
        self.filtered("profit_items", |item| item.is_profit())
    }

    /// Every non-profitable item, not necessarily contiguous.
    pub fn loss_sub_bill(&self) -> Bill {
        self.filtered("loss_items", |item| !item.is_profit())
    }

    fn filtered(&self, suffix: &str, keep: impl Fn(&RoundTrip) -> bool) -> Bill {
        Bill::new(
            format!("{}-{}", self.id, suffix),
            self.items.iter().filter(|item| keep(item)).copied().collect(),
        )
    }

    /// Partition the items into maximal contiguous runs sharing the same
    /// `is_profit` sign. Runs are returned in order and cover every item once.
    pub fn sub_bills(&self) -> Vec<Bill> {
        let mut result = Vec::new();
        let mut start = 0;
        for index in 1..=self.items.len() {
            let at_end = index == self.items.len();
            if at_end || self.items[index].is_profit() != self.items[index - 1].is_profit() {
                result.push(self.slice(start, index));
                start = index;
            }
        }
        result
    }

    pub fn profit_sub_bills(&self) -> Vec<Bill> {
        self.sub_bills()
            .into_iter()
            .filter(|bill| bill.is_profit())
            .collect()
    }

    pub fn loss_sub_bills(&self) -> Vec<Bill> {
        self.sub_bills()
            .into_iter()
            .filter(|bill| !bill.is_profit())
            .collect()
    }

    /// Profit runs longer than one item.
    pub fn serial_profit_sub_bills(&self) -> Vec<Bill> {
        self.profit_sub_bills()
            .into_iter()
            .filter(|bill| bill.len() > 1)
            .collect()
    }

    /// Loss runs longer than one item.
    pub fn serial_loss_sub_bills(&self) -> Vec<Bill> {
        self.loss_sub_bills()
            .into_iter()
            .filter(|bill| bill.len() > 1)
            .collect()
    }

    /// Profit streaks, best total profit rate first.
    pub fn serial_profit_sub_bills_sorted(&self) -> Vec<Bill> {
        let mut result = self.serial_profit_sub_bills();
        result.sort_by(|a, b| b.total_profit_rate().total_cmp(&a.total_profit_rate()));
        result
    }

    /// Loss streaks, worst total profit rate first.
    pub fn serial_loss_sub_bills_sorted(&self) -> Vec<Bill> {
        let mut result = self.serial_loss_sub_bills();
        result.sort_by(|a, b| a.total_profit_rate().total_cmp(&b.total_profit_rate()));
        result
    }

    pub fn max_serial_profit_sub_bill(&self) -> Option<Bill> {
        self.serial_profit_sub_bills_sorted().into_iter().next()
    }

    pub fn max_serial_loss_sub_bill(&self) -> Option<Bill> {
        self.serial_loss_sub_bills_sorted().into_iter().next()
    }
}

/// Append-only recorder pairing buy and sell snapshots into round trips.
///
/// A buy while a buy is pending, or a sell with nothing pending, is ignored.
#[derive(Debug, Clone, Default)]
pub struct BillRecorder {
    id: String,
    state: RecorderState,
    items: Vec<RoundTrip>,
}

impl BillRecorder {
    pub fn new(id: impl Into<String>) -> Self {
        BillRecorder {
            id: id.into(),
            state: RecorderState::Idle,
            items: Vec::new(),
        }
    }

    pub fn is_open(&self) -> bool {
        self.state.is_open()
    }

    pub fn record_buy(&mut self, snapshot: TradeSnapshot) {
        if self.state.on_buy(snapshot) {
            debug!(bill = %self.id, time = snapshot.time, funds = snapshot.funds, "buy recorded");
        } else {
            debug!(bill = %self.id, time = snapshot.time, "buy ignored: sell pending");
        }
    }

    pub fn record_sell(&mut self, snapshot: TradeSnapshot) {
        match self.state.on_sell(snapshot) {
            Some(item) => {
                if item.sell.time < item.buy.time {
                    warn!(
                        bill = %self.id,
                        buy_time = item.buy.time,
                        sell_time = item.sell.time,
                        "sell timestamped before buy, holding period is negative"
                    );
                }
                debug!(bill = %self.id, profit = item.profit(), "round trip recorded");
                self.items.push(item);
            }
            None => debug!(bill = %self.id, time = snapshot.time, "sell ignored: no buy pending"),
        }
    }

    /// Snapshot of the completed items; a pending buy is not included.
    pub fn bill(&self) -> Bill {
        Bill::new(self.id.clone(), self.items.clone())
    }

    pub fn into_bill(self) -> Bill {
        Bill::new(self.id, self.items)
    }
}
