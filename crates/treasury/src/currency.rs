//! Currency text for balances and ledger amounts.

use serde::{Deserialize, Serialize};

use crate::transaction::TransactionKind;

/// Locale convention for rendering whole currency units.
///
/// Amounts carry no fractional digits, so only the symbol, its spacing and
/// the digit grouping vary between locales.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyFormat {
    pub symbol: String,
    /// Placed between the symbol and the digits (`None` renders them joined).
    pub symbol_separator: Option<char>,
    /// Thousands separator.
    pub group_separator: char,
}

impl CurrencyFormat {
    /// Indonesian Rupiah as rendered by the `id-ID` locale: `Rp 1.250.000`
    /// with a no-break space after the symbol.
    pub fn rupiah() -> Self {
        Self {
            symbol: "Rp".to_string(),
            symbol_separator: Some('\u{a0}'),
            group_separator: '.',
        }
    }

    /// Render `units`, with a leading `-` for negative values.
    pub fn format(&self, units: i64) -> String {
        let digits = self.group(units.unsigned_abs());
        let mut out = String::with_capacity(self.symbol.len() + digits.len() + 3);
        if units < 0 {
            out.push('-');
        }
        out.push_str(&self.symbol);
        if let Some(sep) = self.symbol_separator {
            out.push(sep);
        }
        out.push_str(&digits);
        out
    }

    /// Render a ledger amount with the sign of its direction: `+Rp 50.000`
    /// for inflow, `-Rp 40` for outflow.
    pub fn format_signed(&self, kind: TransactionKind, units: i64) -> String {
        let mut out = String::new();
        out.push(kind.sign());
        out.push_str(&self.format(units));
        out
    }

    fn group(&self, value: u64) -> String {
        let raw = value.to_string();
        let mut out = String::with_capacity(raw.len() + raw.len() / 3);
        for (i, c) in raw.chars().enumerate() {
            if i > 0 && (raw.len() - i) % 3 == 0 {
                out.push(self.group_separator);
            }
            out.push(c);
        }
        out
    }
}

impl Default for CurrencyFormat {
    fn default() -> Self {
        Self::rupiah()
    }
}
