//! JSON bill store.
//!
//! A bill is persisted as `{"id": ..., "items": [{"buy": {...}, "sell": {...}}, ...]}`
//! with items in recording order. Each snapshot carries `time` (epoch ms),
//! `price`, `funds` and `assets`.

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::domain::bill::Bill;
use crate::domain::error::LedgerError;
use crate::domain::round_trip::RoundTrip;
use crate::ports::bill_store_port::BillStorePort;

#[derive(Debug, Serialize, Deserialize)]
struct BillDocument {
    #[serde(default)]
    id: String,
    items: Vec<RoundTrip>,
}

pub struct JsonBillAdapter {
    path: PathBuf,
}

impl JsonBillAdapter {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn to_json(bill: &Bill) -> Result<String, LedgerError> {
        let doc = BillDocument {
            id: bill.id().to_string(),
            items: bill.items().to_vec(),
        };
        Ok(serde_json::to_string_pretty(&doc)?)
    }

    /// Accepts either a full document or a bare array of items.
    pub fn from_json(content: &str) -> Result<Bill, LedgerError> {
        let value: serde_json::Value = serde_json::from_str(content)?;
        let doc = if value.is_array() {
            BillDocument {
                id: String::new(),
                items: serde_json::from_value(value)?,
            }
        } else {
            serde_json::from_value(value)?
        };
        Ok(Bill::new(doc.id, doc.items))
    }
}

impl BillStorePort for JsonBillAdapter {
    fn save(&self, bill: &Bill) -> Result<(), LedgerError> {
        let json = Self::to_json(bill)?;
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, json)?;
        info!(path = %self.path.display(), items = bill.len(), "bill saved");
        Ok(())
    }

    fn load(&self) -> Result<Bill, LedgerError> {
        let content = fs::read_to_string(&self.path).map_err(|e| LedgerError::Data {
            reason: format!("failed to read {}: {}", self.path.display(), e),
        })?;
        Self::from_json(&content)
    }
}
