//! Plain-text report adapter implementing [`ReportPort`].

use std::fmt::Write;

use chrono::DateTime;

use crate::domain::bill::Bill;
use crate::domain::error::LedgerError;
use crate::domain::metrics::BillMetrics;
use crate::domain::round_trip::RoundTrip;
use crate::domain::stats::SeriesStats;
use crate::ports::report_port::{ReportDetail, ReportPort};

#[derive(Debug, Default)]
pub struct TextReportAdapter;

impl TextReportAdapter {
    pub fn new() -> Self {
        TextReportAdapter
    }
}

fn format_time(ms: i64) -> String {
    DateTime::from_timestamp_millis(ms)
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| ms.to_string())
}

fn signed(value: f64) -> String {
    format!("{value:+.4}")
}

fn rate(value: f64) -> String {
    format!("{value:+.4}%")
}

fn summary_line(bill: &Bill, metrics: &BillMetrics) -> String {
    let period = match (bill.first(), bill.last()) {
        (Some(first), Some(last)) => format!(
            "{} ~ {}",
            format_time(first.buy.time),
            format_time(last.sell.time)
        ),
        _ => "-".to_string(),
    };
    format!(
        "[{}] {} profit {} rate {} trades {} win rate {:.4}% trading days {:.4} period {}",
        bill.id(),
        if bill.is_profit() { "PROFIT" } else { "LOSS" },
        signed(metrics.total_profit),
        rate(metrics.total_profit_rate),
        metrics.trades,
        metrics.win_rate,
        metrics.trading_days,
        period
    )
}

fn stats_line(label: &str, stats: Option<&SeriesStats>, fmt: fn(f64) -> String) -> String {
    match stats {
        Some(s) => format!(
            "{label}: min {} avg {} max {} std {:.4}",
            fmt(s.min),
            fmt(s.avg),
            fmt(s.max),
            s.std
        ),
        None => format!("{label}: no data"),
    }
}

fn item_block(out: &mut String, index: usize, item: &RoundTrip) -> std::fmt::Result {
    writeln!(
        out,
        "#{index} {} profit {} rate {} held {:.4} days",
        if item.is_profit() { "PROFIT" } else { "LOSS" },
        signed(item.profit()),
        rate(item.profit_rate()),
        item.holding_days()
    )?;
    writeln!(
        out,
        "  buy  {} price {:.4} funds {:.4} assets {:.4}",
        format_time(item.buy.time),
        item.buy.price,
        item.buy.funds,
        item.buy.assets
    )?;
    writeln!(
        out,
        "  sell {} price {:.4} funds {:.4} assets {:.4}",
        format_time(item.sell.time),
        item.sell.price,
        item.sell.funds,
        item.sell.assets
    )
}

fn render_into(out: &mut String, bill: &Bill, detail: ReportDetail) -> std::fmt::Result {
    let metrics = BillMetrics::compute(bill);
    writeln!(out, "{}", summary_line(bill, &metrics))?;
    if detail == ReportDetail::Summary {
        return Ok(());
    }

    writeln!(
        out,
        "start funds {:.4} end funds {:.4} profitable {} losing {}",
        metrics.start_funds, metrics.end_funds, metrics.profit_count, metrics.loss_count
    )?;
    writeln!(
        out,
        "vs hold: {} hold profit {} hold rate {} rate diff {}",
        if metrics.is_better { "BETTER" } else { "WORSE" },
        signed(metrics.hold_profit),
        rate(metrics.hold_profit_rate),
        rate(metrics.better_rate_diff)
    )?;
    writeln!(
        out,
        "{}",
        stats_line("profit", metrics.profit_stats.as_ref(), signed)
    )?;
    writeln!(
        out,
        "{}",
        stats_line("profit rate", metrics.profit_rate_stats.as_ref(), rate)
    )?;
    writeln!(
        out,
        "{}",
        stats_line("holding days", metrics.holding_days_stats.as_ref(), |v| {
            format!("{v:.4}")
        })
    )?;

    writeln!(out, "worst losing streak:")?;
    match bill.max_serial_loss_sub_bill() {
        Some(sub) => writeln!(out, "  {}", summary_line(&sub, &BillMetrics::compute(&sub)))?,
        None => writeln!(out, "  none")?,
    }
    writeln!(out, "best winning streak:")?;
    match bill.max_serial_profit_sub_bill() {
        Some(sub) => writeln!(out, "  {}", summary_line(&sub, &BillMetrics::compute(&sub)))?,
        None => writeln!(out, "  none")?,
    }

    if detail == ReportDetail::All {
        for (index, item) in bill.items().iter().enumerate() {
            writeln!(out)?;
            item_block(out, index, item)?;
        }
    }
    Ok(())
}

impl ReportPort for TextReportAdapter {
    fn render(&self, bill: &Bill, detail: ReportDetail) -> Result<String, LedgerError> {
        let mut out = String::new();
        render_into(&mut out, bill, detail).map_err(|e| LedgerError::Data {
            reason: format!("failed to render report: {e}"),
        })?;
        Ok(out)
    }
}
