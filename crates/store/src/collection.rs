//! Collection codec: one JSON array per collection under a fixed key.
//!
//! The whole collection is rewritten on every change. There is no schema
//! version; field names and enum values are the wire format.

use core::str::FromStr;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{StoreError, StoreResult};
use crate::storage::KeyValueStorage;

/// The three independently persisted collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CollectionKey {
    Residents,
    Deaths,
    Transactions,
}

impl CollectionKey {
    /// Fixed storage key. Existing data was written under these names.
    pub fn storage_key(&self) -> &'static str {
        match self {
            CollectionKey::Residents => "data_warga",
            CollectionKey::Deaths => "data_kematian",
            CollectionKey::Transactions => "data_transaksi",
        }
    }

    /// Where an unreadable value is set aside before it can be overwritten.
    pub fn backup_key(&self) -> String {
        format!("{}.corrupt", self.storage_key())
    }
}

/// What to do when a stored collection cannot be decoded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RecoveryPolicy {
    /// Refuse to open the store.
    #[default]
    Fail,
    /// Start that collection empty after backing up the raw value.
    ResetToEmpty,
}

impl FromStr for RecoveryPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fail" => Ok(RecoveryPolicy::Fail),
            "reset" | "reset-to-empty" => Ok(RecoveryPolicy::ResetToEmpty),
            other => Err(format!("unknown recovery policy `{other}` (expected `fail` or `reset`)")),
        }
    }
}

pub fn encode<T: Serialize>(key: CollectionKey, items: &[T]) -> StoreResult<String> {
    serde_json::to_string(items).map_err(|source| StoreError::Encode {
        key: key.storage_key(),
        source,
    })
}

pub fn decode<T: DeserializeOwned>(key: CollectionKey, raw: &str) -> StoreResult<Vec<T>> {
    serde_json::from_str(raw).map_err(|source| StoreError::CorruptPersistedState {
        key: key.storage_key(),
        source,
    })
}

/// Load a collection, applying `policy` if the stored value is corrupt.
pub fn load<T, S>(storage: &mut S, key: CollectionKey, policy: RecoveryPolicy) -> StoreResult<Vec<T>>
where
    T: DeserializeOwned,
    S: KeyValueStorage,
{
    let Some(raw) = storage.get(key.storage_key())? else {
        tracing::debug!(key = key.storage_key(), "no stored value; starting empty");
        return Ok(Vec::new());
    };

    match decode(key, &raw) {
        Ok(items) => Ok(items),
        Err(err) => match policy {
            RecoveryPolicy::Fail => {
                tracing::error!(key = key.storage_key(), error = %err, "stored collection is corrupt");
                Err(err)
            }
            RecoveryPolicy::ResetToEmpty => {
                let backup = key.backup_key();
                storage.set(&backup, &raw)?;
                tracing::warn!(
                    key = key.storage_key(),
                    backup = %backup,
                    error = %err,
                    "stored collection is corrupt; starting empty"
                );
                Ok(Vec::new())
            }
        },
    }
}

/// Replace the stored value of a collection.
pub fn persist<T, S>(storage: &mut S, key: CollectionKey, items: &[T]) -> StoreResult<()>
where
    T: Serialize,
    S: KeyValueStorage,
{
    let raw = encode(key, items)?;
    storage.set(key.storage_key(), &raw)?;
    tracing::debug!(key = key.storage_key(), len = items.len(), "persisted collection");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use rukun_residents::{ResidencyStatus, Resident};

    fn ani() -> Resident {
        Resident::new("Ani", "111", ResidencyStatus::Permanent).unwrap()
    }

    #[test]
    fn missing_value_is_empty() {
        let mut storage = MemoryStorage::new();
        let residents: Vec<Resident> =
            load(&mut storage, CollectionKey::Residents, RecoveryPolicy::Fail).unwrap();
        assert!(residents.is_empty());
    }

    #[test]
    fn persist_then_load_returns_same_sequence() {
        let mut storage = MemoryStorage::new();
        let residents = vec![ani(), Resident::new("Budi", "222", ResidencyStatus::Contract).unwrap()];
        persist(&mut storage, CollectionKey::Residents, &residents).unwrap();

        let loaded: Vec<Resident> =
            load(&mut storage, CollectionKey::Residents, RecoveryPolicy::Fail).unwrap();
        assert_eq!(loaded, residents);
    }

    #[test]
    fn corrupt_value_fails_under_fail_policy() {
        let mut storage = MemoryStorage::new();
        storage.set("data_warga", "{not json").unwrap();

        let err = load::<Resident, _>(&mut storage, CollectionKey::Residents, RecoveryPolicy::Fail)
            .unwrap_err();
        assert!(matches!(err, StoreError::CorruptPersistedState { key: "data_warga", .. }));
    }

    #[test]
    fn wrong_shape_counts_as_corrupt() {
        let mut storage = MemoryStorage::new();
        storage.set("data_warga", "null").unwrap();
        assert!(
            load::<Resident, _>(&mut storage, CollectionKey::Residents, RecoveryPolicy::Fail)
                .unwrap_err()
                .is_corrupt_state()
        );
    }

    #[test]
    fn reset_policy_backs_up_raw_value() {
        let mut storage = MemoryStorage::new();
        storage.set("data_transaksi", "[{\"id\":1}]").unwrap();

        let loaded: Vec<rukun_treasury::Transaction> = load(
            &mut storage,
            CollectionKey::Transactions,
            RecoveryPolicy::ResetToEmpty,
        )
        .unwrap();

        assert!(loaded.is_empty());
        assert_eq!(
            storage.get("data_transaksi.corrupt").unwrap().as_deref(),
            Some("[{\"id\":1}]")
        );
        // The corrupt value stays in place until the next write replaces it.
        assert!(storage.get("data_transaksi").unwrap().is_some());
    }

    #[test]
    fn recovery_policy_parses_config_values() {
        assert_eq!("fail".parse::<RecoveryPolicy>(), Ok(RecoveryPolicy::Fail));
        assert_eq!(" Reset ".parse::<RecoveryPolicy>(), Ok(RecoveryPolicy::ResetToEmpty));
        assert!("ignore".parse::<RecoveryPolicy>().is_err());
    }
}
