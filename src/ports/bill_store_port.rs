//! Bill persistence port.

use crate::domain::bill::Bill;
use crate::domain::error::LedgerError;

pub trait BillStorePort {
    fn save(&self, bill: &Bill) -> Result<(), LedgerError>;

    fn load(&self) -> Result<Bill, LedgerError>;
}
