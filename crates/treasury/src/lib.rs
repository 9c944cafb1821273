//! Treasury module (dues and expenses ledger).
//!
//! Pure domain logic only: no IO, no persistence concerns.

pub mod currency;
pub mod ledger;
pub mod transaction;

pub use currency::CurrencyFormat;
pub use ledger::{LedgerTotals, recent_transactions};
pub use transaction::{Transaction, TransactionKind};
