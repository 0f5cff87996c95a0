//! Performance metrics over a bill snapshot.
//!
//! Everything here is a pure function of a [`Bill`]'s items. Ratios use the
//! unit-divisor convention from [`guard_divisor`]: a zero denominator is
//! replaced by 1, so rates stay finite but are meaningless when the
//! underlying funds are legitimately zero.

use super::bill::Bill;
use super::round_trip::{days_between, guard_divisor, RoundTrip};
use super::stats::SeriesStats;

#[derive(Debug, Clone, PartialEq)]
pub struct BillMetrics {
    pub trades: usize,
    pub profit_count: usize,
    pub loss_count: usize,
    pub win_rate: f64,
    pub trading_days: f64,
    pub start_funds: f64,
    pub end_funds: f64,
    pub total_profit: f64,
    pub total_profit_rate: f64,
    pub hold_profit: f64,
    pub hold_profit_rate: f64,
    pub is_better: bool,
    pub better_rate_diff: f64,
    pub profit_stats: Option<SeriesStats>,
    pub profit_rate_stats: Option<SeriesStats>,
    pub holding_days_stats: Option<SeriesStats>,
}

impl BillMetrics {
    pub fn compute(bill: &Bill) -> Self {
        let total_profit = bill.total_profit();
        let total_profit_rate = bill.total_profit_rate();
        let hold_profit = hold_profit(bill);
        let hold_profit_rate = hold_profit_rate(bill);

        BillMetrics {
            trades: bill.len(),
            profit_count: bill.profit_count(),
            loss_count: bill.loss_count(),
            win_rate: win_rate(bill),
            trading_days: trading_days(bill),
            start_funds: bill.start_funds(),
            end_funds: bill.end_funds(),
            total_profit,
            total_profit_rate,
            hold_profit,
            hold_profit_rate,
            is_better: total_profit > hold_profit,
            better_rate_diff: total_profit_rate - hold_profit_rate,
            profit_stats: profit_stats(bill),
            profit_rate_stats: profit_rate_stats(bill),
            holding_days_stats: holding_days_stats(bill),
        }
    }
}

/// Percentage of items that closed in profit.
pub fn win_rate(bill: &Bill) -> f64 {
    bill.profit_count() as f64 / bill.len().max(1) as f64 * 100.0
}

/// Days between the first buy and the last sell.
pub fn trading_days(bill: &Bill) -> f64 {
    let start = bill.first().map(|item| item.buy.time).unwrap_or(0);
    let end = bill.last().map(|item| item.sell.time).unwrap_or(0);
    days_between(start, end)
}

/// Profit of buying at the first buy and holding until the last sell.
///
/// The first buy's asset quantity is valued at the last sell's funds-per-asset
/// ratio, then compared against the starting funds.
pub fn hold_profit(bill: &Bill) -> f64 {
    let start_buy_assets = bill.first().map(|item| item.buy.assets).unwrap_or(0.0);
    let end_sell_assets = bill.last().map(|item| item.sell.assets).unwrap_or(0.0);
    let hold_sell_funds = start_buy_assets * (bill.end_funds() / guard_divisor(end_sell_assets));
    hold_sell_funds - bill.start_funds()
}

pub fn hold_profit_rate(bill: &Bill) -> f64 {
    hold_profit(bill) / guard_divisor(bill.start_funds()) * 100.0
}

pub fn is_hold_profit(bill: &Bill) -> bool {
    hold_profit(bill) > 0.0
}

/// Whether trading beat buy-and-hold over the same span.
pub fn is_better(bill: &Bill) -> bool {
    bill.total_profit() > hold_profit(bill)
}

/// Percentage points by which trading beat buy-and-hold.
pub fn better_rate_diff(bill: &Bill) -> f64 {
    bill.total_profit_rate() - hold_profit_rate(bill)
}

pub fn profit_stats(bill: &Bill) -> Option<SeriesStats> {
    series_stats(bill, RoundTrip::profit)
}

pub fn profit_rate_stats(bill: &Bill) -> Option<SeriesStats> {
    series_stats(bill, RoundTrip::profit_rate)
}

pub fn holding_days_stats(bill: &Bill) -> Option<SeriesStats> {
    series_stats(bill, RoundTrip::holding_days)
}

fn series_stats(bill: &Bill, value: fn(&RoundTrip) -> f64) -> Option<SeriesStats> {
    let values: Vec<f64> = bill.items().iter().map(value).collect();
    SeriesStats::compute(&values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::fill::TradeSnapshot;
    use approx::assert_relative_eq;

    const DAY: i64 = 86_400_000;

    fn snap(time: i64, price: f64, funds: f64, assets: f64) -> TradeSnapshot {
        TradeSnapshot {
            time,
            price,
            funds,
            assets,
        }
    }

    fn item(buy_funds: f64, sell_funds: f64) -> RoundTrip {
        RoundTrip::new(snap(0, 1.0, buy_funds, 1.0), snap(DAY, 1.0, sell_funds, 0.0))
    }

    #[test]
    fn empty_bill_metrics() {
        let metrics = BillMetrics::compute(&Bill::new("e", vec![]));
        assert_eq!(metrics.trades, 0);
        assert_eq!(metrics.win_rate, 0.0);
        assert_eq!(metrics.trading_days, 0.0);
        assert_eq!(metrics.total_profit, 0.0);
        assert_eq!(metrics.total_profit_rate, 0.0);
        assert_eq!(metrics.hold_profit, 0.0);
        assert_eq!(metrics.hold_profit_rate, 0.0);
        assert!(!metrics.is_better);
        assert!(metrics.profit_stats.is_none());
        assert!(metrics.profit_rate_stats.is_none());
        assert!(metrics.holding_days_stats.is_none());
    }

    #[test]
    fn win_rate_six_of_ten() {
        let items = (0..10)
            .map(|i| if i < 6 { item(100.0, 110.0) } else { item(100.0, 90.0) })
            .collect();
        let bill = Bill::new("w", items);
        assert_relative_eq!(win_rate(&bill), 60.0);
    }

    #[test]
    fn trading_days_from_first_buy_to_last_sell() {
        let bill = Bill::new(
            "t",
            vec![
                RoundTrip::new(snap(DAY, 1.0, 1.0, 1.0), snap(2 * DAY, 1.0, 1.0, 0.0)),
                RoundTrip::new(snap(3 * DAY, 1.0, 1.0, 1.0), snap(DAY * 7 / 2, 1.0, 1.0, 0.0)),
            ],
        );
        assert_relative_eq!(trading_days(&bill), 2.5);
    }

    #[test]
    fn hold_benchmark_scales_first_assets_by_final_ratio() {
        // Bought 10 units for 1000 at 100; last sell left 1200 funds and 0 assets.
        // Holding: 10 * (1200 / 1) - 1000 = 11000.
        let bill = Bill::new(
            "h",
            vec![RoundTrip::new(
                snap(0, 100.0, 1000.0, 10.0),
                snap(DAY, 120.0, 1200.0, 0.0),
            )],
        );
        assert_relative_eq!(hold_profit(&bill), 11_000.0);
        assert_relative_eq!(hold_profit_rate(&bill), 1_100.0);
        assert!(is_hold_profit(&bill));
        assert!(!is_better(&bill));
        assert_relative_eq!(better_rate_diff(&bill), 20.0 - 1_100.0);
    }

    #[test]
    fn hold_benchmark_uses_sell_asset_ratio() {
        let bill = Bill::new(
            "h",
            vec![RoundTrip::new(
                snap(0, 100.0, 1000.0, 10.0),
                snap(DAY, 120.0, 1200.0, 4.0),
            )],
        );
        // 10 * (1200 / 4) - 1000 = 2000
        assert_relative_eq!(hold_profit(&bill), 2_000.0);
        assert!(!is_better(&bill));
    }

    #[test]
    fn stats_over_each_series() {
        let bill = Bill::new(
            "s",
            vec![
                RoundTrip::new(snap(0, 1.0, 100.0, 1.0), snap(DAY, 1.0, 110.0, 0.0)),
                RoundTrip::new(snap(0, 1.0, 100.0, 1.0), snap(3 * DAY, 1.0, 90.0, 0.0)),
            ],
        );
        let profit = profit_stats(&bill).unwrap();
        assert_relative_eq!(profit.min, -10.0, epsilon = 1e-9);
        assert_relative_eq!(profit.max, 10.0, epsilon = 1e-9);
        assert_relative_eq!(profit.avg, 0.0, epsilon = 1e-9);
        assert_relative_eq!(profit.var, 100.0, epsilon = 1e-9);
        assert_relative_eq!(profit.std, 10.0, epsilon = 1e-9);

        let rate = profit_rate_stats(&bill).unwrap();
        assert_relative_eq!(rate.min, -10.0, epsilon = 1e-9);
        assert_relative_eq!(rate.max, 10.0, epsilon = 1e-9);

        let days = holding_days_stats(&bill).unwrap();
        assert_relative_eq!(days.min, 1.0);
        assert_relative_eq!(days.avg, 2.0);
        assert_relative_eq!(days.max, 3.0);
        assert_relative_eq!(days.var, 1.0);
    }

    #[test]
    fn single_item_stats_degenerate() {
        let bill = Bill::new("one", vec![item(100.0, 105.0)]);
        let metrics = BillMetrics::compute(&bill);
        let days = metrics.holding_days_stats.unwrap();
        assert_relative_eq!(metrics.trading_days, 1.0);
        assert_relative_eq!(days.min, 1.0);
        assert_relative_eq!(days.max, 1.0);
        assert_relative_eq!(days.std, 0.0);
    }

    #[test]
    fn zero_start_funds_rates_stay_finite() {
        let bill = Bill::new("z", vec![item(0.0, 10.0)]);
        let metrics = BillMetrics::compute(&bill);
        assert_relative_eq!(metrics.total_profit_rate, 1_000.0);
        assert!(metrics.hold_profit_rate.is_finite());
    }
}
