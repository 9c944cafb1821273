use serde::{Deserialize, Serialize};

use crate::transaction::{Transaction, TransactionKind};

/// Read model: cash-box totals derived from the ledger.
///
/// Recomputed from the full transaction list on every read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerTotals {
    pub inflow: i64,
    pub outflow: i64,
}

impl LedgerTotals {
    pub fn from_transactions(transactions: &[Transaction]) -> Self {
        transactions.iter().fold(Self::default(), |mut totals, t| {
            let units = t.amount.units();
            match t.kind {
                TransactionKind::Inflow => totals.inflow = totals.inflow.saturating_add(units),
                TransactionKind::Outflow => totals.outflow = totals.outflow.saturating_add(units),
            }
            totals
        })
    }

    /// Inflow minus outflow. Negative when the association has overspent.
    pub fn balance(&self) -> i64 {
        self.inflow.saturating_sub(self.outflow)
    }
}

/// The `limit` most recent transactions. The ledger is already newest-first.
pub fn recent_transactions(transactions: &[Transaction], limit: usize) -> &[Transaction] {
    &transactions[..transactions.len().min(limit)]
}
