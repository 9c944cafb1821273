use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use rukun_core::{Amount, DomainError, DomainResult, TransactionId};

/// Direction of money through the association's cash box.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionKind {
    /// Dues, donations.
    #[default]
    #[serde(rename = "Masuk")]
    Inflow,
    /// Operational spending.
    #[serde(rename = "Keluar")]
    Outflow,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Inflow => "Masuk",
            TransactionKind::Outflow => "Keluar",
        }
    }

    /// `+` or `-`, as shown in front of amounts in the ledger.
    pub fn sign(&self) -> char {
        match self {
            TransactionKind::Inflow => '+',
            TransactionKind::Outflow => '-',
        }
    }
}

impl core::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One ledger line (immutable once recorded).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,
    #[serde(rename = "tanggal")]
    pub date: NaiveDate,
    #[serde(rename = "tipe")]
    pub kind: TransactionKind,
    /// Positive amount in whole currency units.
    #[serde(rename = "jumlah")]
    pub amount: Amount,
    #[serde(rename = "keterangan")]
    pub note: String,
}

impl Transaction {
    /// Validate operator input and build a transaction recorded at `at`.
    ///
    /// `newest` is the id of the most recent transaction in the ledger; the
    /// new id is guaranteed to sort after it.
    pub fn record(
        kind: TransactionKind,
        amount: i64,
        note: impl Into<String>,
        at: DateTime<Utc>,
        newest: Option<&TransactionId>,
    ) -> DomainResult<Self> {
        let note = note.into();
        let amount = Amount::positive(amount)?;
        if note.trim().is_empty() {
            return Err(DomainError::validation("note is required"));
        }

        Ok(Self {
            id: TransactionId::generate(at, newest),
            date: at.date_naive(),
            kind,
            amount,
            note,
        })
    }

    /// Effect on the balance: positive for inflow, negative for outflow.
    pub fn signed_amount(&self) -> i64 {
        match self.kind {
            TransactionKind::Inflow => self.amount.units(),
            TransactionKind::Outflow => -self.amount.units(),
        }
    }
}
