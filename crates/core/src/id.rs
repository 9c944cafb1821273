//! Strongly-typed identifiers used across the domain.

use core::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Identifier of a treasury transaction.
///
/// Persisted as the decimal count of milliseconds since the Unix epoch at
/// creation time. Ids read back from storage are kept verbatim even when they
/// are not numeric.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionId(String);

impl TransactionId {
    /// Id derived from a creation timestamp.
    pub fn from_timestamp(at: DateTime<Utc>) -> Self {
        Self(at.timestamp_millis().to_string())
    }

    /// Generate an id for a transaction created at `at`, strictly greater
    /// than the newest existing numeric id.
    ///
    /// Two transactions recorded within the same millisecond would otherwise
    /// share an id.
    pub fn generate(at: DateTime<Utc>, newest: Option<&TransactionId>) -> Self {
        let candidate = at.timestamp_millis();
        match newest.and_then(TransactionId::as_millis) {
            Some(last) if candidate <= last => Self(last.saturating_add(1).to_string()),
            _ => Self(candidate.to_string()),
        }
    }

    /// Numeric value of the id, if it is a timestamp-derived id.
    pub fn as_millis(&self) -> Option<i64> {
        self.0.parse().ok()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for TransactionId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for TransactionId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().is_empty() {
            return Err(DomainError::invalid_id("TransactionId: empty"));
        }
        Ok(Self(s.to_string()))
    }
}
