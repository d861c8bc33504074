//! Core logic for the legal-aid clinic case-management client.
//! This crate owns catalog resolution and draft persistence invariants.

pub mod catalog;
pub mod clock;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use catalog::placeholder::PlaceholderRule;
pub use catalog::tree::{CatalogTree, BREADCRUMB_SEPARATOR, UNKNOWN_LABEL};
pub use clock::{Clock, ManualClock, SystemClock};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::category::{CategoryId, CategoryKind, CategoryNode};
pub use model::draft::{DraftTtl, StoredEntry, DEFAULT_DRAFT_TTL};
pub use repo::catalog_source::{
    parse_catalog_json, CatalogError, CatalogResult, CatalogSource, JsonCatalogSource,
    StaticCatalogSource,
};
pub use repo::kv_repo::{
    KeyValueStorage, MemoryStorage, SqliteKvStorage, StorageError, StorageResult,
};
pub use service::catalog_service::CatalogService;
pub use service::draft_store::{
    has_data, DraftStore, DraftStoreConfig, DraftStoreError, DraftStoreResult,
};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
