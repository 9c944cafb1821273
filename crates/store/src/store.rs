use std::collections::BTreeSet;

use chrono::Utc;

use rukun_core::{Aggregate, AggregateRoot, DomainError};
use rukun_events::{Event, EventBus, EventEnvelope, InMemoryEventBus, Subscription};
use rukun_residents::{DeathRecord, ResidencyStatus, Resident};
use rukun_treasury::{Transaction, TransactionKind};

use crate::collection::{self, CollectionKey, RecoveryPolicy};
use crate::confirm::{DeathRegistration, PendingConfirmation};
use crate::dashboard::{DashboardSummary, RecentActivity};
use crate::error::StoreResult;
use crate::registry::{
    AddDeathRecord, AddResident, AddTransaction, Registry, RegistryCommand, RegistryEvent,
    RemoveResident, RemoveResidentsByNationalId,
};
use crate::storage::KeyValueStorage;

/// What subscribers receive: one envelope per applied event, numbered with
/// the registry version it produced.
pub type RegistryUpdate = EventEnvelope<RegistryEvent>;

const AGGREGATE_TYPE: &str = "registry";

/// Owns the registry and its storage; the only way to change either.
///
/// Every mutation runs to completion before returning:
///
/// 1. the command is validated against current state (`Registry::handle`),
/// 2. the events are applied to a copy of the state,
/// 3. each touched collection is written to storage in full,
/// 4. the copy replaces the live state,
/// 5. subscribers are notified.
///
/// A failure in steps 1 to 3 leaves the store exactly as it was.
///
/// Two stores over the same storage do not coordinate: the last one to
/// write a collection wins.
#[derive(Debug)]
pub struct RegistryStore<S> {
    registry: Registry,
    storage: S,
    bus: InMemoryEventBus<RegistryUpdate>,
}

impl<S: KeyValueStorage> RegistryStore<S> {
    /// Load all three collections from `storage`.
    pub fn open(mut storage: S, policy: RecoveryPolicy) -> StoreResult<Self> {
        let residents = collection::load(&mut storage, CollectionKey::Residents, policy)?;
        let deaths = collection::load(&mut storage, CollectionKey::Deaths, policy)?;
        let transactions = collection::load(&mut storage, CollectionKey::Transactions, policy)?;

        let registry = Registry::from_collections(residents, deaths, transactions);
        tracing::info!(
            residents = registry.residents().len(),
            deaths = registry.deaths().len(),
            transactions = registry.transactions().len(),
            ?policy,
            "registry store opened"
        );

        Ok(Self {
            registry,
            storage,
            bus: InMemoryEventBus::new(),
        })
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn residents(&self) -> &[Resident] {
        self.registry.residents()
    }

    pub fn deaths(&self) -> &[DeathRecord] {
        self.registry.deaths()
    }

    pub fn transactions(&self) -> &[Transaction] {
        self.registry.transactions()
    }

    pub fn version(&self) -> u64 {
        self.registry.version()
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn subscribe(&self) -> Subscription<RegistryUpdate> {
        self.bus.subscribe()
    }

    pub fn dashboard(&self) -> DashboardSummary {
        DashboardSummary::from_registry(&self.registry)
    }

    pub fn recent_activity(&self, limit: usize) -> RecentActivity<'_> {
        RecentActivity::from_registry(&self.registry, limit)
    }

    /// Validate, persist, apply and publish a command.
    ///
    /// Returns the applied events; empty when the command changed nothing.
    /// Removals only reach this through [`confirm`](Self::confirm).
    pub(crate) fn execute(&mut self, command: RegistryCommand) -> StoreResult<Vec<RegistryEvent>> {
        let events = match self.registry.handle(&command) {
            Ok(events) => events,
            Err(err) => {
                tracing::debug!(error = %err, "command rejected");
                return Err(err.into());
            }
        };
        if events.is_empty() {
            return Ok(events);
        }

        let mut next = self.registry.clone();
        for event in &events {
            next.apply(event);
        }

        let touched: BTreeSet<CollectionKey> = events.iter().map(RegistryEvent::collection).collect();
        for key in touched {
            match key {
                CollectionKey::Residents => {
                    collection::persist(&mut self.storage, key, next.residents())?
                }
                CollectionKey::Deaths => collection::persist(&mut self.storage, key, next.deaths())?,
                CollectionKey::Transactions => {
                    collection::persist(&mut self.storage, key, next.transactions())?
                }
            }
        }

        let base = self.registry.version();
        self.registry = next;

        for (offset, event) in events.iter().enumerate() {
            let sequence = base + offset as u64 + 1;
            tracing::info!(event_type = event.event_type(), version = sequence, "registry change applied");
            if let Err(err) = self
                .bus
                .publish(EventEnvelope::new(AGGREGATE_TYPE, sequence, event.clone()))
            {
                tracing::warn!(?err, "failed to notify subscribers");
            }
        }

        Ok(events)
    }

    /// Register a new resident at the end of the registry.
    pub fn add_resident(
        &mut self,
        name: impl Into<String>,
        national_id: impl Into<String>,
        status: ResidencyStatus,
    ) -> StoreResult<Resident> {
        let events = self.execute(RegistryCommand::AddResident(AddResident {
            name: name.into(),
            national_id: national_id.into(),
            status,
            occurred_at: Utc::now(),
        }))?;

        match events.into_iter().next() {
            Some(RegistryEvent::ResidentAdded { resident, .. }) => Ok(resident),
            _ => Err(DomainError::invariant("resident registration produced no resident").into()),
        }
    }

    /// Ask to remove the resident at `index`. Nothing happens until the
    /// returned confirmation is confirmed.
    pub fn request_resident_removal(&self, index: usize) -> StoreResult<PendingConfirmation> {
        let command = RegistryCommand::RemoveResident(RemoveResident {
            index,
            occurred_at: Utc::now(),
        });
        // Validate now so an out-of-range index is reported before prompting.
        let resident = match self.registry.handle(&command)?.into_iter().next() {
            Some(RegistryEvent::ResidentRemoved { resident, .. }) => resident,
            _ => return Err(DomainError::invariant("removal request produced no resident").into()),
        };
        Ok(PendingConfirmation::new(
            format!("Remove resident {} ({})?", resident.name, resident.national_id),
            command,
            self.version(),
        ))
    }

    /// Record a death, then ask whether to remove matching residents.
    pub fn add_death_record(
        &mut self,
        name: impl Into<String>,
        national_id: impl Into<String>,
        date_of_death: impl Into<String>,
        note: impl Into<String>,
    ) -> StoreResult<DeathRegistration> {
        let events = self.execute(RegistryCommand::AddDeathRecord(AddDeathRecord {
            name: name.into(),
            national_id: national_id.into(),
            date_of_death: date_of_death.into(),
            note: note.into(),
            occurred_at: Utc::now(),
        }))?;

        let record = match events.into_iter().next() {
            Some(RegistryEvent::DeathRecorded { record, .. }) => record,
            _ => return Err(DomainError::invariant("death registration produced no record").into()),
        };

        let matching_residents = self.registry.residents_with_national_id(&record.national_id);
        let removal = PendingConfirmation::new(
            format!(
                "Remove residents with national id {} from the active registry?",
                record.national_id
            ),
            RegistryCommand::RemoveResidentsByNationalId(RemoveResidentsByNationalId {
                national_id: record.national_id.clone(),
                occurred_at: Utc::now(),
            }),
            self.version(),
        );

        Ok(DeathRegistration {
            record,
            matching_residents,
            removal,
        })
    }

    /// Record a ledger entry dated today; it becomes the newest entry.
    pub fn add_transaction(
        &mut self,
        kind: TransactionKind,
        amount: i64,
        note: impl Into<String>,
    ) -> StoreResult<Transaction> {
        let events = self.execute(RegistryCommand::AddTransaction(AddTransaction {
            kind,
            amount,
            note: note.into(),
            occurred_at: Utc::now(),
        }))?;

        match events.into_iter().next() {
            Some(RegistryEvent::TransactionRecorded { transaction, .. }) => Ok(transaction),
            _ => Err(DomainError::invariant("ledger entry produced no transaction").into()),
        }
    }

    /// Carry out a confirmed action.
    ///
    /// Fails with a conflict if the registry changed since it was requested.
    pub fn confirm(&mut self, pending: PendingConfirmation) -> StoreResult<Vec<RegistryEvent>> {
        let (command, expected) = pending.into_parts();
        expected.check(self.version())?;
        self.execute(command)
    }

    /// Drop a declined action. State is left unchanged.
    pub fn cancel(&self, pending: PendingConfirmation) {
        tracing::debug!(prompt = pending.prompt(), "confirmation declined");
    }
}
