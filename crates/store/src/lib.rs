//! `rukun-store`
//!
//! **Responsibility:** the registry store behind every view.
//!
//! This crate provides:
//! - Key/value storage backends (in-memory, directory of JSON files)
//! - Collection codec with an explicit recovery policy for unreadable data
//! - The `Registry` aggregate (residents, deaths, transactions)
//! - `RegistryStore`: validate → persist → apply → notify
//! - Two-step confirmation for destructive actions
//! - Form drafts, dashboard read model, active view selector

pub mod collection;
pub mod confirm;
pub mod dashboard;
pub mod error;
pub mod forms;
pub mod registry;
pub mod storage;
pub mod store;
pub mod view;

pub use collection::{CollectionKey, RecoveryPolicy};
pub use confirm::{DeathRegistration, PendingConfirmation};
pub use dashboard::{DashboardSummary, RECENT_LIMIT, RecentActivity};
pub use error::{StorageError, StoreError, StoreResult};
pub use forms::{DeathForm, ResidentForm, TransactionForm};
pub use registry::{
    AddDeathRecord, AddResident, AddTransaction, Registry, RegistryCommand, RegistryEvent,
    RemoveResident, RemoveResidentsByNationalId,
};
pub use storage::{FileStorage, KeyValueStorage, MemoryStorage};
pub use store::{RegistryStore, RegistryUpdate};
pub use view::ActiveView;
