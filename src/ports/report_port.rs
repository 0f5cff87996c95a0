//! Report generation port.

use crate::domain::bill::Bill;
use crate::domain::error::LedgerError;

/// How much of a bill a report covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportDetail {
    /// One headline line.
    #[default]
    Summary,
    /// Headline, funds, hold comparison, statistics and best/worst streaks.
    Detail,
    /// Detail plus every round trip.
    All,
}

pub trait ReportPort {
    fn render(&self, bill: &Bill, detail: ReportDetail) -> Result<String, LedgerError>;
}
