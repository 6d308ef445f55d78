//! Wallet queries — balances are credited inside the completion transaction
//! (store/response.rs) and only read here, fresh per call.

use super::Store;
use crate::error::CoreResult;
use rusqlite::{params, OptionalExtension};

impl Store {
    /// Current balance; an account never credited reads as zero.
    pub fn wallet_balance(&self, owner_id: &str) -> CoreResult<f64> {
        let balance: Option<f64> = self
            .conn
            .query_row(
                "SELECT balance FROM wallet WHERE owner_id = ?1",
                params![owner_id],
                |row| row.get(0),
            )
            .optional()?;
        Ok(balance.unwrap_or(0.0))
    }

    /// Sum of all balances. Summary/reporting only.
    pub fn total_wallet_balance(&self) -> CoreResult<f64> {
        self.conn
            .query_row("SELECT COALESCE(SUM(balance), 0.0) FROM wallet", [], |row| {
                row.get(0)
            })
            .map_err(Into::into)
    }
}
