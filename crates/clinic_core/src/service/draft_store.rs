//! Expiring draft persistence for form state.
//!
//! # Responsibility
//! - Keep one live draft value per key and mirror it to durable storage.
//! - Restore drafts across reloads and drop stale ones on read.
//!
//! # Invariants
//! - Public read/write paths never surface storage or decoding failures;
//!   they are logged and treated as "no stored value".
//! - Autosave only fires for values that carry data (see [`has_data`]).
//! - Draft payloads are never written to logs, only keys and sizes.

use crate::clock::{Clock, SystemClock};
use crate::model::draft::{DraftTtl, StoredEntry};
use crate::repo::kv_repo::{KeyValueStorage, StorageError};
use log::{debug, info, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Duration;

/// Result type used by fallible draft store operations.
pub type DraftStoreResult<T> = Result<T, DraftStoreError>;

/// Errors from draft encode/decode and storage access.
#[derive(Debug)]
pub enum DraftStoreError {
    /// Underlying storage failure.
    Storage(StorageError),
    /// Draft could not be converted to or from its JSON record.
    Codec(serde_json::Error),
}

impl Display for DraftStoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Storage(err) => write!(f, "{err}"),
            Self::Codec(err) => write!(f, "invalid draft record: {err}"),
        }
    }
}

impl Error for DraftStoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Storage(err) => Some(err),
            Self::Codec(err) => Some(err),
        }
    }
}

impl From<StorageError> for DraftStoreError {
    fn from(value: StorageError) -> Self {
        Self::Storage(value)
    }
}

impl From<serde_json::Error> for DraftStoreError {
    fn from(value: serde_json::Error) -> Self {
        Self::Codec(value)
    }
}

/// Per-store configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftStoreConfig {
    /// Storage namespace; unique per draft form.
    pub key: String,
    pub ttl: DraftTtl,
    pub auto_save: bool,
}

impl DraftStoreConfig {
    /// Config with 7-day expiry and autosave enabled.
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ttl: DraftTtl::default(),
            auto_save: true,
        }
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = DraftTtl::After(ttl);
        self
    }

    pub fn without_expiry(mut self) -> Self {
        self.ttl = DraftTtl::Never;
        self
    }

    pub fn with_auto_save(mut self, auto_save: bool) -> Self {
        self.auto_save = auto_save;
        self
    }
}

/// Draft store bound to one key.
pub struct DraftStore<T, S, C = SystemClock> {
    config: DraftStoreConfig,
    initial_value: T,
    value: T,
    storage: S,
    clock: C,
}

impl<T, S> DraftStore<T, S, SystemClock>
where
    T: Serialize + DeserializeOwned + Clone,
    S: KeyValueStorage,
{
    /// Opens a store using the system clock.
    pub fn with_system_clock(config: DraftStoreConfig, initial_value: T, storage: S) -> Self {
        Self::open(config, initial_value, storage, SystemClock)
    }
}

impl<T, S, C> DraftStore<T, S, C>
where
    T: Serialize + DeserializeOwned + Clone,
    S: KeyValueStorage,
    C: Clock,
{
    /// Opens a store and seeds the live value from storage.
    pub fn open(config: DraftStoreConfig, initial_value: T, storage: S, clock: C) -> Self {
        let mut store = Self {
            config,
            value: initial_value.clone(),
            initial_value,
            storage,
            clock,
        };
        store.value = store.load();
        store
    }

    pub fn key(&self) -> &str {
        &self.config.key
    }

    pub fn config(&self) -> &DraftStoreConfig {
        &self.config
    }

    /// Current live value.
    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn initial_value(&self) -> &T {
        &self.initial_value
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Reads the persisted draft, falling back to the initial value.
    ///
    /// An expired record is deleted before the fallback is returned.
    pub fn load(&self) -> T {
        let entry = match self.read_entry() {
            Ok(Some(entry)) => entry,
            Ok(None) => return self.initial_value.clone(),
            Err(err) => {
                warn!(
                    "event=draft_load module=draft status=error key={} error={}",
                    self.config.key, err
                );
                return self.initial_value.clone();
            }
        };

        let now = self.clock.now_epoch_ms();
        if self.config.ttl.is_expired(entry.saved_at_epoch_ms, now) {
            info!(
                "event=draft_expire module=draft status=ok key={} age_ms={}",
                self.config.key,
                now.saturating_sub(entry.saved_at_epoch_ms)
            );
            self.remove_record("draft_expire");
            return self.initial_value.clone();
        }

        entry.payload
    }

    /// Re-reads storage into the live value.
    pub fn reload(&mut self) {
        self.value = self.load();
    }

    /// Persists `value`, logging instead of failing.
    pub fn save(&self, value: &T) {
        if let Err(err) = self.try_save(value) {
            warn!(
                "event=draft_save module=draft status=error key={} error={}",
                self.config.key, err
            );
        }
    }

    /// Persists `value` stamped with the current time.
    pub fn try_save(&self, value: &T) -> DraftStoreResult<()> {
        let entry = StoredEntry::new(value, self.clock.now_epoch_ms());
        let encoded = serde_json::to_string(&entry)?;
        self.storage.set(&self.config.key, &encoded)?;
        debug!(
            "event=draft_save module=draft status=ok key={} bytes={}",
            self.config.key,
            encoded.len()
        );
        Ok(())
    }

    /// Replaces the live value and autosaves it when it carries data.
    pub fn set_value(&mut self, next: T) {
        self.value = next;
        if self.config.auto_save && self.value_has_data() {
            self.save(&self.value);
        }
    }

    /// Derives the next live value from the previous one.
    pub fn update_value(&mut self, update: impl FnOnce(&T) -> T) {
        let next = update(&self.value);
        self.set_value(next);
    }

    /// Deletes the persisted draft and resets the live value.
    pub fn clear(&mut self) {
        self.remove_record("draft_clear");
        self.value = self.initial_value.clone();
    }

    fn value_has_data(&self) -> bool {
        match serde_json::to_value(&self.value) {
            Ok(json) => has_data(&json),
            Err(err) => {
                warn!(
                    "event=draft_save module=draft status=error key={} error={}",
                    self.config.key,
                    DraftStoreError::Codec(err)
                );
                false
            }
        }
    }

    fn read_entry(&self) -> DraftStoreResult<Option<StoredEntry<T>>> {
        match self.storage.get(&self.config.key)? {
            None => Ok(None),
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
        }
    }

    fn remove_record(&self, event: &str) {
        if let Err(err) = self.storage.remove(&self.config.key) {
            warn!(
                "event={} module=draft status=error key={} error={}",
                event, self.config.key, err
            );
        }
    }
}

/// Returns whether a JSON draft value carries user data.
///
/// - object: some property is not `""`, `false` or `null`
/// - array: non-empty
/// - string: non-blank after trim
/// - `null`: never
/// - anything else (numbers, booleans): always
pub fn has_data(value: &Value) -> bool {
    match value {
        Value::Object(fields) => fields.values().any(|field| {
            !matches!(field, Value::Null | Value::Bool(false))
                && field.as_str() != Some("")
        }),
        Value::Array(items) => !items.is_empty(),
        Value::String(text) => !text.trim().is_empty(),
        Value::Null => false,
        Value::Bool(_) | Value::Number(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::has_data;
    use serde_json::json;

    #[test]
    fn object_needs_one_meaningful_field() {
        assert!(!has_data(&json!({})));
        assert!(!has_data(&json!({"a": "", "b": false, "c": null})));
        assert!(has_data(&json!({"a": "x"})));
        assert!(has_data(&json!({"edad": 0})));
        assert!(has_data(&json!({"nested": {}})));
        assert!(has_data(&json!({"a": " "})));
    }

    #[test]
    fn sequences_and_strings() {
        assert!(!has_data(&json!([])));
        assert!(has_data(&json!([""])));
        assert!(!has_data(&json!("   ")));
        assert!(has_data(&json!(" x ")));
    }

    #[test]
    fn scalars_always_count() {
        assert!(has_data(&json!(0)));
        assert!(has_data(&json!(false)));
        assert!(!has_data(&json!(null)));
    }
}
