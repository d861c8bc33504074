//! Domain model shared by catalog lookups and draft persistence.
//!
//! # Responsibility
//! - Define the wire shapes consumed from the catalog service.
//! - Define the persisted record wrapping every saved draft.
//!
//! # Invariants
//! - Catalog nodes are immutable once loaded; a refetch rebuilds them.
//! - Draft timestamps are stamped by the store, never by callers.

pub mod category;
pub mod draft;
