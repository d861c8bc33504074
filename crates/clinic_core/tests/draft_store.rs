use clinic_core::db::open_db_in_memory;
use clinic_core::{
    DraftStore, DraftStoreConfig, DraftStoreError, KeyValueStorage, ManualClock, MemoryStorage,
    SqliteKvStorage, StorageError, StorageResult, StoredEntry,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::time::Duration;

const T0: i64 = 1_700_000_000_000;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
struct SolicitanteDraft {
    nombre: String,
    telefono: String,
    acepta_terminos: bool,
    beneficiarios: Vec<String>,
}

fn filled_draft() -> SolicitanteDraft {
    SolicitanteDraft {
        nombre: "María Pérez".to_string(),
        telefono: "555-0101".to_string(),
        acepta_terminos: true,
        beneficiarios: vec!["Lucía Pérez".to_string()],
    }
}

/// Draft whose encoder always fails, as a payload with a non-string map key would.
#[derive(Debug, Clone, PartialEq, Deserialize)]
struct UnencodableDraft {
    nombre: String,
}

impl Serialize for UnencodableDraft {
    fn serialize<S: serde::Serializer>(&self, _serializer: S) -> Result<S::Ok, S::Error> {
        Err(serde::ser::Error::custom("draft cannot be encoded"))
    }
}

struct FailingStorage;

impl KeyValueStorage for FailingStorage {
    fn get(&self, _key: &str) -> StorageResult<Option<String>> {
        Err(StorageError::Unavailable("quota exceeded".to_string()))
    }

    fn set(&self, _key: &str, _value: &str) -> StorageResult<()> {
        Err(StorageError::Unavailable("quota exceeded".to_string()))
    }

    fn remove(&self, _key: &str) -> StorageResult<()> {
        Err(StorageError::Unavailable("quota exceeded".to_string()))
    }
}

#[test]
fn save_then_load_returns_same_value() {
    let storage = MemoryStorage::new();
    let clock = ManualClock::new(T0);
    let store = DraftStore::open(
        DraftStoreConfig::new("solicitante-draft"),
        SolicitanteDraft::default(),
        &storage,
        &clock,
    );

    store.save(&filled_draft());
    assert_eq!(store.load(), filled_draft());
}

#[test]
fn expired_record_is_deleted_on_read() {
    let storage = MemoryStorage::new();
    let clock = ManualClock::new(T0);
    let store = DraftStore::open(
        DraftStoreConfig::new("caso-draft").with_ttl(Duration::from_millis(1000)),
        SolicitanteDraft::default(),
        &storage,
        &clock,
    );

    store.save(&filled_draft());
    clock.set(T0 + 999);
    assert_eq!(store.load(), filled_draft());

    clock.set(T0 + 1001);
    assert_eq!(store.load(), SolicitanteDraft::default());
    assert!(!storage.contains_key("caso-draft"));

    clock.set(T0 + 1002);
    assert_eq!(store.load(), SolicitanteDraft::default());
}

#[test]
fn never_ttl_keeps_old_drafts() {
    let storage = MemoryStorage::new();
    let clock = ManualClock::new(T0);
    let store = DraftStore::open(
        DraftStoreConfig::new("encuesta-draft").without_expiry(),
        SolicitanteDraft::default(),
        &storage,
        &clock,
    );

    store.save(&filled_draft());
    clock.advance(Duration::from_secs(365 * 24 * 60 * 60));
    assert_eq!(store.load(), filled_draft());
}

#[test]
fn autosave_skips_blank_objects() {
    let storage = MemoryStorage::new();
    let clock = ManualClock::new(T0);
    let mut store = DraftStore::open(
        DraftStoreConfig::new("beneficiario-draft"),
        json!({}),
        &storage,
        &clock,
    );

    store.set_value(json!({"a": "", "b": false}));
    assert!(storage.is_empty());
    assert_eq!(store.value(), &json!({"a": "", "b": false}));

    store.set_value(json!({"a": "x"}));
    assert!(storage.contains_key("beneficiario-draft"));
}

#[test]
fn autosave_disabled_requires_explicit_save() {
    let storage = MemoryStorage::new();
    let clock = ManualClock::new(T0);
    let mut store = DraftStore::open(
        DraftStoreConfig::new("usuario-draft").with_auto_save(false),
        SolicitanteDraft::default(),
        &storage,
        &clock,
    );

    store.set_value(filled_draft());
    assert!(storage.is_empty());

    store.save(store.value());
    assert!(storage.contains_key("usuario-draft"));
}

#[test]
fn update_value_derives_from_previous_value() {
    let storage = MemoryStorage::new();
    let clock = ManualClock::new(T0);
    let mut store = DraftStore::open(
        DraftStoreConfig::new("solicitante-draft"),
        SolicitanteDraft::default(),
        &storage,
        &clock,
    );

    store.update_value(|prev| SolicitanteDraft {
        nombre: "Ana".to_string(),
        ..prev.clone()
    });
    store.update_value(|prev| {
        let mut next = prev.clone();
        next.beneficiarios.push("Luis".to_string());
        next
    });

    assert_eq!(store.value().nombre, "Ana");
    assert_eq!(store.value().beneficiarios, vec!["Luis".to_string()]);
    assert_eq!(store.load(), store.value().clone());
}

#[test]
fn clear_resets_record_and_live_value() {
    let storage = MemoryStorage::new();
    let clock = ManualClock::new(T0);
    let mut store = DraftStore::open(
        DraftStoreConfig::new("caso-draft"),
        SolicitanteDraft::default(),
        &storage,
        &clock,
    );

    store.set_value(filled_draft());
    assert!(storage.contains_key("caso-draft"));

    store.clear();
    assert!(!storage.contains_key("caso-draft"));
    assert_eq!(store.value(), &SolicitanteDraft::default());
    assert_eq!(store.load(), SolicitanteDraft::default());

    store.clear();
    assert_eq!(store.value(), &SolicitanteDraft::default());
}

#[test]
fn open_restores_previous_session_draft() {
    let storage = MemoryStorage::new();
    let clock = ManualClock::new(T0);
    {
        let mut first = DraftStore::open(
            DraftStoreConfig::new("caso-draft"),
            SolicitanteDraft::default(),
            &storage,
            &clock,
        );
        first.set_value(filled_draft());
    }

    clock.advance(Duration::from_secs(60));
    let second = DraftStore::open(
        DraftStoreConfig::new("caso-draft"),
        SolicitanteDraft::default(),
        &storage,
        &clock,
    );
    assert_eq!(second.value(), &filled_draft());
}

#[test]
fn record_is_stamped_by_store_clock() {
    let storage = MemoryStorage::new();
    let clock = ManualClock::new(T0 + 42);
    let store = DraftStore::open(
        DraftStoreConfig::new("caso-draft"),
        SolicitanteDraft::default(),
        &storage,
        &clock,
    );

    store.save(&filled_draft());
    let raw = storage.get("caso-draft").unwrap().unwrap();
    let entry: StoredEntry<SolicitanteDraft> = serde_json::from_str(&raw).unwrap();
    assert_eq!(entry.saved_at_epoch_ms, T0 + 42);
    assert_eq!(entry.payload, filled_draft());

    let json: Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(json["savedAtEpochMs"], T0 + 42);
}

#[test]
fn corrupt_record_is_treated_as_absent() {
    let storage = MemoryStorage::new();
    storage.set("caso-draft", "{not json").unwrap();
    let clock = ManualClock::new(T0);

    let store = DraftStore::open(
        DraftStoreConfig::new("caso-draft"),
        SolicitanteDraft::default(),
        &storage,
        &clock,
    );
    assert_eq!(store.value(), &SolicitanteDraft::default());

    storage
        .set("caso-draft", r#"{"payload": 12, "savedAtEpochMs": 1}"#)
        .unwrap();
    assert_eq!(store.load(), SolicitanteDraft::default());
}

#[test]
fn keys_are_not_trimmed_between_stores() {
    let storage = MemoryStorage::new();
    let clock = ManualClock::new(T0);
    let mut a = DraftStore::open(DraftStoreConfig::new("draft"), json!({}), &storage, &clock);
    let b = DraftStore::open(DraftStoreConfig::new(" draft "), json!({}), &storage, &clock);

    a.set_value(json!({"nombre": "Ana"}));
    assert_eq!(b.load(), json!({}));
    assert_eq!(a.load(), json!({"nombre": "Ana"}));
    assert!(storage.contains_key("draft"));
    assert!(!storage.contains_key(" draft "));
}

#[test]
fn unencodable_value_skips_autosave() {
    let storage = MemoryStorage::new();
    let clock = ManualClock::new(T0);
    let mut store = DraftStore::open(
        DraftStoreConfig::new("caso-draft"),
        UnencodableDraft {
            nombre: String::new(),
        },
        &storage,
        &clock,
    );

    store.set_value(UnencodableDraft {
        nombre: "Ana".to_string(),
    });
    assert_eq!(store.value().nombre, "Ana");
    assert!(storage.is_empty());

    let err = store.try_save(store.value()).unwrap_err();
    assert!(matches!(err, DraftStoreError::Codec(_)));
}

#[test]
fn storage_failures_never_reach_the_caller() {
    let clock = ManualClock::new(T0);
    let mut store = DraftStore::open(
        DraftStoreConfig::new("caso-draft"),
        SolicitanteDraft::default(),
        FailingStorage,
        &clock,
    );

    assert_eq!(store.value(), &SolicitanteDraft::default());
    store.set_value(filled_draft());
    assert_eq!(store.value(), &filled_draft());
    store.clear();
    assert_eq!(store.load(), SolicitanteDraft::default());

    let err = store.try_save(&filled_draft()).unwrap_err();
    assert!(matches!(
        err,
        DraftStoreError::Storage(StorageError::Unavailable(_))
    ));
}

#[test]
fn sqlite_backed_store_persists_drafts() {
    let conn = open_db_in_memory().unwrap();
    let storage = SqliteKvStorage::try_new(&conn).unwrap();
    let clock = ManualClock::new(T0);

    let mut store = DraftStore::open(
        DraftStoreConfig::new("encuesta-socioeconomica"),
        json!({"ingresos": null, "vivienda": ""}),
        &storage,
        &clock,
    );
    store.set_value(json!({"ingresos": 1200, "vivienda": "propia"}));

    let reopened = DraftStore::open(
        DraftStoreConfig::new("encuesta-socioeconomica"),
        json!({"ingresos": null, "vivienda": ""}),
        &storage,
        &clock,
    );
    assert_eq!(
        reopened.value(),
        &json!({"ingresos": 1200, "vivienda": "propia"})
    );
}
