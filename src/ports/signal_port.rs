//! Signal source port.

use crate::domain::error::LedgerError;
use crate::domain::replay::SignalRow;

pub trait SignalPort {
    /// Every signal row, sorted by time.
    fn fetch_signals(&self) -> Result<Vec<SignalRow>, LedgerError>;
}
