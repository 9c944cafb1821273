use proptest::prelude::*;

use rukun_residents::ResidencyStatus;
use rukun_store::{FileStorage, KeyValueStorage, MemoryStorage, RecoveryPolicy, RegistryStore};
use rukun_treasury::TransactionKind;

fn open(storage: MemoryStorage) -> RegistryStore<MemoryStorage> {
    RegistryStore::open(storage, RecoveryPolicy::Fail).expect("open store")
}

#[test]
fn monthly_dues_raise_inflow_and_balance() {
    let mut store = open(MemoryStorage::new());

    store
        .add_transaction(TransactionKind::Inflow, 50_000, "Monthly dues")
        .unwrap();

    let summary = store.dashboard();
    assert_eq!(summary.total_inflow(), 50_000);
    assert_eq!(summary.balance(), 50_000);
}

#[test]
fn confirmed_death_removes_resident() {
    let mut store = open(MemoryStorage::new());
    store
        .add_resident("Ani", "111", ResidencyStatus::Permanent)
        .unwrap();

    let registration = store.add_death_record("Ani", "111", "2024-01-05", "").unwrap();
    store.confirm(registration.removal).unwrap();

    assert!(store.residents().is_empty());
    assert_eq!(store.deaths().len(), 1);
    let record = &store.deaths()[0];
    assert_eq!(record.name, "Ani");
    assert_eq!(record.national_id, "111");
    assert_eq!(record.date_of_death.to_string(), "2024-01-05");
    assert_eq!(record.note, "");
}

#[test]
fn blank_name_is_rejected() {
    let mut store = open(MemoryStorage::new());

    let err = store
        .add_resident("", "123", ResidencyStatus::Permanent)
        .unwrap_err();

    assert!(err.is_validation());
    assert!(store.residents().is_empty());
}

#[test]
fn ledger_is_newest_first() {
    let mut store = open(MemoryStorage::new());

    store.add_transaction(TransactionKind::Inflow, 100, "Dues").unwrap();
    store.add_transaction(TransactionKind::Outflow, 40, "Bulbs").unwrap();

    assert_eq!(store.dashboard().balance(), 60);
    let ledger = store.transactions();
    assert_eq!(
        (ledger[0].kind, ledger[0].amount.units()),
        (TransactionKind::Outflow, 40)
    );
    assert_eq!(
        (ledger[1].kind, ledger[1].amount.units()),
        (TransactionKind::Inflow, 100)
    );
}

#[test]
fn death_confirmation_removes_every_resident_sharing_the_id() {
    let mut store = open(MemoryStorage::new());
    store.add_resident("Ani", "111", ResidencyStatus::Permanent).unwrap();
    store.add_resident("Ani (dup)", "111", ResidencyStatus::Contract).unwrap();
    store.add_resident("Budi", "222", ResidencyStatus::Permanent).unwrap();

    let registration = store.add_death_record("Ani", "111", "2024-01-05", "").unwrap();
    assert_eq!(registration.matching_residents, 2);
    store.confirm(registration.removal).unwrap();

    assert_eq!(store.residents().len(), 1);
    assert_eq!(store.residents()[0].national_id, "222");
}

#[test]
fn declined_death_confirmation_keeps_residents() {
    let mut store = open(MemoryStorage::new());
    store.add_resident("Ani", "111", ResidencyStatus::Permanent).unwrap();

    let registration = store.add_death_record("Ani", "111", "2024-01-05", "").unwrap();
    store.cancel(registration.removal);

    assert_eq!(store.residents().len(), 1);
    assert_eq!(store.deaths().len(), 1);
}

#[test]
fn reload_restores_every_collection() {
    let storage = MemoryStorage::new();
    let mut store = open(storage.clone());
    store.add_resident("Ani", "111", ResidencyStatus::Permanent).unwrap();
    store.add_resident("Budi", "222", ResidencyStatus::Contract).unwrap();
    store.add_death_record("Citra", "333", "2023-12-01", "Cemetery A").unwrap();
    store.add_transaction(TransactionKind::Inflow, 100, "Dues").unwrap();
    store.add_transaction(TransactionKind::Outflow, 40, "Bulbs").unwrap();

    let reloaded = open(storage);
    assert_eq!(reloaded.registry().residents(), store.residents());
    assert_eq!(reloaded.registry().deaths(), store.deaths());
    assert_eq!(reloaded.registry().transactions(), store.transactions());
    assert_eq!(reloaded.dashboard(), store.dashboard());
}

#[test]
fn legacy_stored_data_is_read_and_rewritten_byte_for_byte() {
    let residents = r#"[{"nama":"Ani","nik":"111","status":"Tetap"},{"nama":"Budi","nik":"222","status":"Kontrak"}]"#;
    let deaths = r#"[{"nama":"Citra","nik":"333","tanggal":"2023-12-01","keterangan":""}]"#;
    let transactions = r#"[{"id":"1704067200000","tanggal":"2024-01-01","tipe":"Masuk","jumlah":50000,"keterangan":"Iuran Bulanan Jan"}]"#;

    let mut storage = MemoryStorage::new();
    storage.set("data_warga", residents).unwrap();
    storage.set("data_kematian", deaths).unwrap();
    storage.set("data_transaksi", transactions).unwrap();

    let mut store = open(storage.clone());
    assert_eq!(store.dashboard().total_residents(), 2);
    assert_eq!(store.dashboard().permanent_residents(), 1);
    assert_eq!(store.dashboard().total_deaths, 1);
    assert_eq!(store.dashboard().balance(), 50_000);

    // Touch only the residents collection, then check both stored values.
    store.add_resident("Dewi", "444", ResidencyStatus::Permanent).unwrap();
    assert_eq!(
        storage.get("data_warga").unwrap().unwrap(),
        r#"[{"nama":"Ani","nik":"111","status":"Tetap"},{"nama":"Budi","nik":"222","status":"Kontrak"},{"nama":"Dewi","nik":"444","status":"Tetap"}]"#
    );
    assert_eq!(storage.get("data_transaksi").unwrap().unwrap(), transactions);
}

#[test]
fn corrupt_storage_fails_or_resets_per_policy() {
    let mut storage = MemoryStorage::new();
    storage.set("data_kematian", "[{\"nama\":").unwrap();
    storage
        .set("data_warga", r#"[{"nama":"Ani","nik":"111","status":"Tetap"}]"#)
        .unwrap();

    let err = RegistryStore::open(storage.clone(), RecoveryPolicy::Fail).unwrap_err();
    assert!(err.is_corrupt_state());

    let store = RegistryStore::open(storage.clone(), RecoveryPolicy::ResetToEmpty).unwrap();
    assert!(store.deaths().is_empty());
    assert_eq!(store.residents().len(), 1);
    assert_eq!(
        storage.get("data_kematian.corrupt").unwrap().as_deref(),
        Some("[{\"nama\":")
    );
}

#[test]
fn file_storage_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();

    {
        let storage = FileStorage::open(dir.path()).unwrap();
        let mut store = RegistryStore::open(storage, RecoveryPolicy::Fail).unwrap();
        store.add_resident("Ani", "111", ResidencyStatus::Permanent).unwrap();
        store.add_transaction(TransactionKind::Inflow, 75_000, "Donation").unwrap();
    }

    let storage = FileStorage::open(dir.path()).unwrap();
    let store = RegistryStore::open(storage, RecoveryPolicy::Fail).unwrap();
    assert_eq!(store.residents().len(), 1);
    assert_eq!(store.dashboard().balance(), 75_000);
    assert!(dir.path().join("data_transaksi.json").is_file());
}

fn status_strategy() -> impl Strategy<Value = ResidencyStatus> {
    prop_oneof![
        Just(ResidencyStatus::Permanent),
        Just(ResidencyStatus::Contract)
    ]
}

fn kind_strategy() -> impl Strategy<Value = TransactionKind> {
    prop_oneof![Just(TransactionKind::Inflow), Just(TransactionKind::Outflow)]
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 64,
        ..ProptestConfig::default()
    })]

    /// Property: a valid registration adds exactly one resident and nothing else.
    #[test]
    fn add_resident_increments_only_residents(
        existing in 0usize..5,
        name in "[A-Za-z][A-Za-z ]{0,20}",
        nik in "[0-9]{1,16}",
        status in status_strategy(),
    ) {
        let mut store = open(MemoryStorage::new());
        for i in 0..existing {
            store.add_resident(format!("R{i}"), i.to_string(), ResidencyStatus::Contract).unwrap();
        }
        store.add_transaction(TransactionKind::Inflow, 10, "seed").unwrap();
        let before = store.dashboard();
        let deaths_before = store.deaths().to_vec();
        let ledger_before = store.transactions().to_vec();

        store.add_resident(name, nik, status).unwrap();

        let after = store.dashboard();
        prop_assert_eq!(after.total_residents(), before.total_residents() + 1);
        prop_assert_eq!(store.deaths(), deaths_before.as_slice());
        prop_assert_eq!(store.transactions(), ledger_before.as_slice());
    }

    /// Property: balance moves by exactly the signed amount.
    #[test]
    fn balance_moves_by_signed_amount(
        seed in prop::collection::vec((kind_strategy(), 1i64..1_000_000), 0..5),
        kind in kind_strategy(),
        amount in 1i64..1_000_000,
    ) {
        let mut store = open(MemoryStorage::new());
        for (k, a) in seed {
            store.add_transaction(k, a, "seed").unwrap();
        }
        let before = store.dashboard().balance();

        store.add_transaction(kind, amount, "entry").unwrap();

        let expected = match kind {
            TransactionKind::Inflow => before + amount,
            TransactionKind::Outflow => before - amount,
        };
        prop_assert_eq!(store.dashboard().balance(), expected);
    }

    /// Property: non-positive amounts leave the ledger and storage untouched.
    #[test]
    fn non_positive_amount_changes_nothing(amount in -1_000_000i64..=0, kind in kind_strategy()) {
        let storage = MemoryStorage::new();
        let mut store = open(storage.clone());
        store.add_transaction(TransactionKind::Inflow, 5, "seed").unwrap();
        let stored_before = storage.get("data_transaksi").unwrap();

        let err = store.add_transaction(kind, amount, "entry").unwrap_err();

        prop_assert!(err.is_validation());
        prop_assert_eq!(store.transactions().len(), 1);
        prop_assert_eq!(storage.get("data_transaksi").unwrap(), stored_before);
    }

    /// Property: what is persisted reloads as the identical ordered sequence.
    #[test]
    fn persisted_collections_reload_identically(
        residents in prop::collection::vec(("[A-Za-z]{1,12}", "[0-9]{1,16}", status_strategy()), 0..8),
        entries in prop::collection::vec((kind_strategy(), 1i64..10_000_000, "[a-z ]{0,10}[a-z]"), 0..8),
    ) {
        let storage = MemoryStorage::new();
        let mut store = open(storage.clone());
        for (name, nik, status) in residents {
            store.add_resident(name, nik, status).unwrap();
        }
        for (kind, amount, note) in entries {
            store.add_transaction(kind, amount, note).unwrap();
        }

        let reloaded = open(storage);
        prop_assert_eq!(reloaded.residents(), store.residents());
        prop_assert_eq!(reloaded.transactions(), store.transactions());
    }
}
