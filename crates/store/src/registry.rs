use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use rukun_core::{Aggregate, AggregateRoot, DomainError};
use rukun_events::Event;
use rukun_residents::{DeathRecord, ResidencyStatus, Resident, parse_death_date};
use rukun_treasury::{Transaction, TransactionKind};

use crate::collection::CollectionKey;

/// Aggregate root: the association's registry (residents, deaths, ledger).
///
/// `version` counts applied events since the store was opened; it is not
/// persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Registry {
    residents: Vec<Resident>,
    deaths: Vec<DeathRecord>,
    /// Newest first.
    transactions: Vec<Transaction>,
    version: u64,
}

impl Registry {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Rehydrate from persisted collections.
    pub fn from_collections(
        residents: Vec<Resident>,
        deaths: Vec<DeathRecord>,
        transactions: Vec<Transaction>,
    ) -> Self {
        Self {
            residents,
            deaths,
            transactions,
            version: 0,
        }
    }

    pub fn residents(&self) -> &[Resident] {
        &self.residents
    }

    pub fn deaths(&self) -> &[DeathRecord] {
        &self.deaths
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn residents_with_national_id(&self, national_id: &str) -> usize {
        self.residents
            .iter()
            .filter(|r| r.has_national_id(national_id))
            .count()
    }
}

impl AggregateRoot for Registry {
    fn version(&self) -> u64 {
        self.version
    }
}

/// Command: AddResident.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddResident {
    pub name: String,
    pub national_id: String,
    pub status: ResidencyStatus,
    pub occurred_at: DateTime<Utc>,
}

/// Command: RemoveResident (by position in the registry).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoveResident {
    pub index: usize,
    pub occurred_at: DateTime<Utc>,
}

/// Command: AddDeathRecord.
///
/// `date_of_death` is the raw form input; it is validated when handled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddDeathRecord {
    pub name: String,
    pub national_id: String,
    pub date_of_death: String,
    pub note: String,
    pub occurred_at: DateTime<Utc>,
}

/// Command: remove every resident whose national id matches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoveResidentsByNationalId {
    pub national_id: String,
    pub occurred_at: DateTime<Utc>,
}

/// Command: AddTransaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddTransaction {
    pub kind: TransactionKind,
    pub amount: i64,
    pub note: String,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RegistryCommand {
    AddResident(AddResident),
    RemoveResident(RemoveResident),
    AddDeathRecord(AddDeathRecord),
    RemoveResidentsByNationalId(RemoveResidentsByNationalId),
    AddTransaction(AddTransaction),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RegistryEvent {
    ResidentAdded {
        resident: Resident,
        occurred_at: DateTime<Utc>,
    },
    ResidentRemoved {
        index: usize,
        resident: Resident,
        occurred_at: DateTime<Utc>,
    },
    ResidentsRemovedByNationalId {
        national_id: String,
        removed: usize,
        occurred_at: DateTime<Utc>,
    },
    DeathRecorded {
        record: DeathRecord,
        occurred_at: DateTime<Utc>,
    },
    TransactionRecorded {
        transaction: Transaction,
        occurred_at: DateTime<Utc>,
    },
}

impl RegistryEvent {
    /// Collection whose stored value must be rewritten after this event.
    pub fn collection(&self) -> CollectionKey {
        match self {
            RegistryEvent::ResidentAdded { .. }
            | RegistryEvent::ResidentRemoved { .. }
            | RegistryEvent::ResidentsRemovedByNationalId { .. } => CollectionKey::Residents,
            RegistryEvent::DeathRecorded { .. } => CollectionKey::Deaths,
            RegistryEvent::TransactionRecorded { .. } => CollectionKey::Transactions,
        }
    }
}

impl Event for RegistryEvent {
    fn event_type(&self) -> &'static str {
        match self {
            RegistryEvent::ResidentAdded { .. } => "registry.resident.added",
            RegistryEvent::ResidentRemoved { .. } => "registry.resident.removed",
            RegistryEvent::ResidentsRemovedByNationalId { .. } => {
                "registry.resident.removed_by_national_id"
            }
            RegistryEvent::DeathRecorded { .. } => "registry.death.recorded",
            RegistryEvent::TransactionRecorded { .. } => "registry.transaction.recorded",
        }
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            RegistryEvent::ResidentAdded { occurred_at, .. }
            | RegistryEvent::ResidentRemoved { occurred_at, .. }
            | RegistryEvent::ResidentsRemovedByNationalId { occurred_at, .. }
            | RegistryEvent::DeathRecorded { occurred_at, .. }
            | RegistryEvent::TransactionRecorded { occurred_at, .. } => *occurred_at,
        }
    }
}

impl Aggregate for Registry {
    type Command = RegistryCommand;
    type Event = RegistryEvent;
    type Error = DomainError;

    fn apply(&mut self, event: &Self::Event) {
        match event {
            RegistryEvent::ResidentAdded { resident, .. } => {
                self.residents.push(resident.clone());
            }
            RegistryEvent::ResidentRemoved { index, .. } => {
                if *index < self.residents.len() {
                    self.residents.remove(*index);
                }
            }
            RegistryEvent::ResidentsRemovedByNationalId { national_id, .. } => {
                self.residents.retain(|r| !r.has_national_id(national_id));
            }
            RegistryEvent::DeathRecorded { record, .. } => {
                self.deaths.push(record.clone());
            }
            RegistryEvent::TransactionRecorded { transaction, .. } => {
                self.transactions.insert(0, transaction.clone());
            }
        }

        // Deterministic version tracking: +1 per applied event.
        self.version += 1;
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        match command {
            RegistryCommand::AddResident(cmd) => self.handle_add_resident(cmd),
            RegistryCommand::RemoveResident(cmd) => self.handle_remove_resident(cmd),
            RegistryCommand::AddDeathRecord(cmd) => self.handle_add_death(cmd),
            RegistryCommand::RemoveResidentsByNationalId(cmd) => self.handle_remove_by_id(cmd),
            RegistryCommand::AddTransaction(cmd) => self.handle_add_transaction(cmd),
        }
    }
}

impl Registry {
    fn handle_add_resident(&self, cmd: &AddResident) -> Result<Vec<RegistryEvent>, DomainError> {
        let resident = Resident::new(cmd.name.clone(), cmd.national_id.clone(), cmd.status)?;

        Ok(vec![RegistryEvent::ResidentAdded {
            resident,
            occurred_at: cmd.occurred_at,
        }])
    }

    fn handle_remove_resident(
        &self,
        cmd: &RemoveResident,
    ) -> Result<Vec<RegistryEvent>, DomainError> {
        let resident = self.residents.get(cmd.index).ok_or_else(|| {
            DomainError::validation(format!(
                "no resident at position {} (registry has {})",
                cmd.index,
                self.residents.len()
            ))
        })?;

        Ok(vec![RegistryEvent::ResidentRemoved {
            index: cmd.index,
            resident: resident.clone(),
            occurred_at: cmd.occurred_at,
        }])
    }

    fn handle_add_death(&self, cmd: &AddDeathRecord) -> Result<Vec<RegistryEvent>, DomainError> {
        if cmd.name.trim().is_empty() || cmd.national_id.trim().is_empty() {
            return Err(DomainError::validation(
                "name, national id and date of death are required",
            ));
        }
        let date = parse_death_date(&cmd.date_of_death)?;
        let record = DeathRecord::new(cmd.name.clone(), cmd.national_id.clone(), date, cmd.note.clone())?;

        Ok(vec![RegistryEvent::DeathRecorded {
            record,
            occurred_at: cmd.occurred_at,
        }])
    }

    fn handle_remove_by_id(
        &self,
        cmd: &RemoveResidentsByNationalId,
    ) -> Result<Vec<RegistryEvent>, DomainError> {
        let removed = self.residents_with_national_id(&cmd.national_id);
        if removed == 0 {
            return Ok(Vec::new());
        }

        Ok(vec![RegistryEvent::ResidentsRemovedByNationalId {
            national_id: cmd.national_id.clone(),
            removed,
            occurred_at: cmd.occurred_at,
        }])
    }

    fn handle_add_transaction(
        &self,
        cmd: &AddTransaction,
    ) -> Result<Vec<RegistryEvent>, DomainError> {
        let newest = self.transactions.first().map(|t| &t.id);
        let transaction =
            Transaction::record(cmd.kind, cmd.amount, cmd.note.clone(), cmd.occurred_at, newest)?;

        Ok(vec![RegistryEvent::TransactionRecorded {
            transaction,
            occurred_at: cmd.occurred_at,
        }])
    }
}
