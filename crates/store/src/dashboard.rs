//! Dashboard read model, derived from the registry on every read.

use serde::{Deserialize, Serialize};

use rukun_residents::{Resident, ResidentCounts, recent_residents};
use rukun_treasury::{CurrencyFormat, LedgerTotals, Transaction, recent_transactions};

use crate::registry::Registry;

/// How many residents and transactions the dashboard lists.
pub const RECENT_LIMIT: usize = 5;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub residents: ResidentCounts,
    pub total_deaths: usize,
    pub ledger: LedgerTotals,
}

impl DashboardSummary {
    pub fn from_registry(registry: &Registry) -> Self {
        Self {
            residents: ResidentCounts::from_residents(registry.residents()),
            total_deaths: registry.deaths().len(),
            ledger: LedgerTotals::from_transactions(registry.transactions()),
        }
    }

    pub fn total_residents(&self) -> usize {
        self.residents.total
    }

    pub fn permanent_residents(&self) -> usize {
        self.residents.permanent
    }

    pub fn total_inflow(&self) -> i64 {
        self.ledger.inflow
    }

    pub fn total_outflow(&self) -> i64 {
        self.ledger.outflow
    }

    pub fn balance(&self) -> i64 {
        self.ledger.balance()
    }

    pub fn balance_text(&self, currency: &CurrencyFormat) -> String {
        currency.format(self.balance())
    }
}

/// The dashboard's "latest" lists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecentActivity<'a> {
    /// Newest registration first.
    pub residents: Vec<&'a Resident>,
    /// Newest entry first.
    pub transactions: &'a [Transaction],
}

impl<'a> RecentActivity<'a> {
    pub fn from_registry(registry: &'a Registry, limit: usize) -> Self {
        Self {
            residents: recent_residents(registry.residents(), limit).collect(),
            transactions: recent_transactions(registry.transactions(), limit),
        }
    }
}
