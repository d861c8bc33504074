//! Persisted draft record and expiry policy.
//!
//! # Responsibility
//! - Define the envelope written for every saved draft.
//! - Define the time-to-live policy applied on read.
//!
//! # Invariants
//! - `saved_at_epoch_ms` is set by the draft store at write time.
//! - Expiry is lazy: a record is only judged when it is read.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default draft lifetime: 7 days.
pub const DEFAULT_DRAFT_TTL: Duration = Duration::from_secs(7 * 24 * 60 * 60);

/// Stored draft envelope.
///
/// Serialized field names match drafts already written by the web client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredEntry<T> {
    pub payload: T,
    /// Unix epoch milliseconds of the last write.
    #[serde(rename = "savedAtEpochMs", alias = "saved_at_epoch_ms")]
    pub saved_at_epoch_ms: i64,
}

impl<T> StoredEntry<T> {
    pub fn new(payload: T, saved_at_epoch_ms: i64) -> Self {
        Self {
            payload,
            saved_at_epoch_ms,
        }
    }
}

/// Draft time-to-live policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftTtl {
    /// Record expires once its age reaches the duration.
    After(Duration),
    /// Record never expires.
    Never,
}

impl Default for DraftTtl {
    fn default() -> Self {
        Self::After(DEFAULT_DRAFT_TTL)
    }
}

impl DraftTtl {
    /// Returns whether a record saved at `saved_at_epoch_ms` is expired at `now_epoch_ms`.
    ///
    /// A record whose age equals the ttl is already expired.
    pub fn is_expired(self, saved_at_epoch_ms: i64, now_epoch_ms: i64) -> bool {
        match self {
            Self::Never => false,
            Self::After(ttl) => {
                let ttl_ms = i64::try_from(ttl.as_millis()).unwrap_or(i64::MAX);
                now_epoch_ms.saturating_sub(saved_at_epoch_ms) >= ttl_ms
            }
        }
    }
}
