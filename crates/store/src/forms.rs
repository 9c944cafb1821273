//! Form drafts: the operator's input between keystrokes and submit.
//!
//! A successful submit clears the fields the operator would retype next
//! time. A rejected submit leaves every field as it was so the input can be
//! corrected.

use rukun_residents::{ResidencyStatus, Resident};
use rukun_treasury::{Transaction, TransactionKind};

use crate::confirm::DeathRegistration;
use crate::error::StoreResult;
use crate::storage::KeyValueStorage;
use crate::store::RegistryStore;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResidentForm {
    pub name: String,
    pub national_id: String,
    pub status: ResidencyStatus,
}

impl ResidentForm {
    /// Register the resident. The status selection survives a successful
    /// submit.
    pub fn submit<S: KeyValueStorage>(
        &mut self,
        store: &mut RegistryStore<S>,
    ) -> StoreResult<Resident> {
        let resident = store.add_resident(self.name.clone(), self.national_id.clone(), self.status)?;
        self.name.clear();
        self.national_id.clear();
        Ok(resident)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeathForm {
    pub name: String,
    pub national_id: String,
    /// `YYYY-MM-DD`.
    pub date: String,
    pub note: String,
}

impl DeathForm {
    /// Record the death. The form is cleared as soon as the record is
    /// stored, whatever the operator later answers to the removal prompt.
    pub fn submit<S: KeyValueStorage>(
        &mut self,
        store: &mut RegistryStore<S>,
    ) -> StoreResult<DeathRegistration> {
        let registration = store.add_death_record(
            self.name.clone(),
            self.national_id.clone(),
            self.date.clone(),
            self.note.clone(),
        )?;
        *self = Self::default();
        Ok(registration)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionForm {
    pub kind: TransactionKind,
    pub amount: i64,
    pub note: String,
}

impl TransactionForm {
    /// Record the ledger entry. The direction selection survives a
    /// successful submit; amount resets to zero.
    pub fn submit<S: KeyValueStorage>(
        &mut self,
        store: &mut RegistryStore<S>,
    ) -> StoreResult<Transaction> {
        let transaction = store.add_transaction(self.kind, self.amount, self.note.clone())?;
        self.amount = 0;
        self.note.clear();
        Ok(transaction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collection::RecoveryPolicy;
    use crate::storage::MemoryStorage;

    fn open() -> RegistryStore<MemoryStorage> {
        RegistryStore::open(MemoryStorage::new(), RecoveryPolicy::Fail).unwrap()
    }

    #[test]
    fn resident_form_clears_name_and_id_but_keeps_status() {
        let mut store = open();
        let mut form = ResidentForm {
            name: "Budi".to_string(),
            national_id: "222".to_string(),
            status: ResidencyStatus::Contract,
        };

        form.submit(&mut store).unwrap();

        assert_eq!(
            form,
            ResidentForm {
                status: ResidencyStatus::Contract,
                ..ResidentForm::default()
            }
        );
        assert_eq!(store.residents().len(), 1);
    }

    #[test]
    fn rejected_resident_form_keeps_input() {
        let mut store = open();
        let mut form = ResidentForm {
            name: String::new(),
            national_id: "123".to_string(),
            status: ResidencyStatus::Permanent,
        };
        let before = form.clone();

        assert!(form.submit(&mut store).unwrap_err().is_validation());
        assert_eq!(form, before);
    }

    #[test]
    fn death_form_clears_even_if_removal_is_declined() {
        let mut store = open();
        store.add_resident("Ani", "111", ResidencyStatus::Permanent).unwrap();
        let mut form = DeathForm {
            name: "Ani".to_string(),
            national_id: "111".to_string(),
            date: "2024-01-05".to_string(),
            note: "Buried at TPU Jeruk Purut".to_string(),
        };

        let registration = form.submit(&mut store).unwrap();
        assert_eq!(registration.matching_residents, 1);
        store.cancel(registration.removal);

        assert_eq!(form, DeathForm::default());
        assert_eq!(store.residents().len(), 1);
        assert_eq!(store.deaths().len(), 1);
    }

    #[test]
    fn rejected_death_form_keeps_input() {
        let mut store = open();
        let mut form = DeathForm {
            name: "Ani".to_string(),
            national_id: "111".to_string(),
            date: String::new(),
            note: "note".to_string(),
        };
        let before = form.clone();

        assert!(form.submit(&mut store).unwrap_err().is_validation());
        assert_eq!(form, before);
        assert!(store.deaths().is_empty());
    }

    #[test]
    fn transaction_form_resets_amount_and_note() {
        let mut store = open();
        let mut form = TransactionForm {
            kind: TransactionKind::Outflow,
            amount: 25_000,
            note: "Night watch".to_string(),
        };

        let t = form.submit(&mut store).unwrap();
        assert_eq!(t.amount.units(), 25_000);
        assert_eq!(
            form,
            TransactionForm {
                kind: TransactionKind::Outflow,
                amount: 0,
                note: String::new(),
            }
        );
    }

    #[test]
    fn zero_amount_keeps_transaction_input() {
        let mut store = open();
        let mut form = TransactionForm {
            note: "Dues".to_string(),
            ..TransactionForm::default()
        };
        assert!(form.submit(&mut store).unwrap_err().is_validation());
        assert_eq!(form.note, "Dues");
        assert!(store.transactions().is_empty());
    }
}
