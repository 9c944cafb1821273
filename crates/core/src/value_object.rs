//! Value objects: defined entirely by their attribute values, compared by
//! value, never mutated in place.

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{DomainError, DomainResult};

/// Whole currency units (the ledger does not track fractions).
///
/// Serialized as a bare JSON integer. Fractional numbers found in stored data
/// are rounded to the nearest unit on read.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Amount(i64);

impl Amount {
    pub const fn new(units: i64) -> Self {
        Self(units)
    }

    pub const fn units(self) -> i64 {
        self.0
    }

    /// Accept the amount only if it is strictly positive.
    pub fn positive(units: i64) -> DomainResult<Self> {
        if units <= 0 {
            return Err(DomainError::validation("amount must be positive"));
        }
        Ok(Self(units))
    }
}

impl core::fmt::Display for Amount {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(self.0)
    }
}

struct AmountVisitor;

impl<'de> Visitor<'de> for AmountVisitor {
    type Value = Amount;

    fn expecting(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("a number of currency units")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Amount, E> {
        Ok(Amount(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Amount, E> {
        i64::try_from(v)
            .map(Amount)
            .map_err(|_| E::custom(format!("amount {v} is out of range")))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Amount, E> {
        let rounded = v.round();
        if !rounded.is_finite() || rounded < i64::MIN as f64 || rounded > i64::MAX as f64 {
            return Err(E::custom(format!("amount {v} is out of range")));
        }
        Ok(Amount(rounded as i64))
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(AmountVisitor)
    }
}
