use std::path::PathBuf;

use rukun_core::DomainError;
use thiserror::Error;

pub type StoreResult<T> = Result<T, StoreError>;

/// Failure of a storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage key `{0}` is not a valid file name")]
    InvalidKey(String),

    #[error("storage I/O failed at {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("storage lock poisoned")]
    Poisoned,
}

/// Errors surfaced by the registry store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Rejected input or stale confirmation; nothing was changed.
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// The value stored under `key` is not a well-formed collection.
    #[error("persisted state under `{key}` is corrupt: {source}")]
    CorruptPersistedState {
        key: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to encode `{key}`: {source}")]
    Encode {
        key: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// The backend failed; the in-memory state is unchanged.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl StoreError {
    pub fn is_validation(&self) -> bool {
        matches!(self, StoreError::Domain(e) if e.is_validation())
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, StoreError::Domain(DomainError::Conflict(_)))
    }

    pub fn is_corrupt_state(&self) -> bool {
        matches!(self, StoreError::CorruptPersistedState { .. })
    }
}
