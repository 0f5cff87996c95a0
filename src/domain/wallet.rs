//! Asset wallet ledger.
//!
//! Balances are tracked independently of the venue's own account state and are
//! mutated only through [`Wallet::send`] and [`Wallet::receive`]. Debits are not
//! clamped: a balance may go negative if the caller sends more than it holds.

use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Wallet {
    balances: BTreeMap<String, f64>,
}

impl Wallet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a wallet seeded with initial balances.
    pub fn with_balances<I, S>(balances: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        Wallet {
            balances: balances
                .into_iter()
                .map(|(symbol, amount)| (symbol.into(), amount))
                .collect(),
        }
    }

    /// Current balance of `symbol`, 0 if the symbol was never touched.
    pub fn get(&self, symbol: &str) -> f64 {
        self.balances.get(symbol).copied().unwrap_or(0.0)
    }

    pub fn send(&mut self, symbol: &str, amount: f64) {
        *self.balances.entry(symbol.to_string()).or_insert(0.0) -= amount;
    }

    pub fn receive(&mut self, symbol: &str, amount: f64) {
        *self.balances.entry(symbol.to_string()).or_insert(0.0) += amount;
    }

    /// Copy of every balance ever touched, keyed by symbol.
    pub fn snapshot(&self) -> BTreeMap<String, f64> {
        self.balances.clone()
    }
}
