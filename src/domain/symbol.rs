//! Symbol pair parsing (`BASE/QUOTE`).

use std::fmt;
use std::str::FromStr;

use super::error::LedgerError;

/// A trading pair such as `BTC/USDT`: `base` is the traded asset, `quote` the
/// currency it is priced and paid in.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SymbolPair {
    pub base: String,
    pub quote: String,
}

impl SymbolPair {
    pub fn new(base: impl Into<String>, quote: impl Into<String>) -> Self {
        SymbolPair {
            base: base.into(),
            quote: quote.into(),
        }
    }
}

impl FromStr for SymbolPair {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || LedgerError::InvalidSymbol {
            symbol: s.to_string(),
        };
        let (base, quote) = s.split_once('/').ok_or_else(invalid)?;
        let base = base.trim();
        let quote = quote.trim();
        if base.is_empty() || quote.is_empty() || quote.contains('/') {
            return Err(invalid());
        }
        Ok(SymbolPair::new(base.to_uppercase(), quote.to_uppercase()))
    }
}

impl fmt::Display for SymbolPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.base, self.quote)
    }
}
