//! Data access contracts for external collaborators.
//!
//! # Responsibility
//! - Model the catalog service fetch and durable key-value storage as traits.
//! - Isolate SQLite and payload decoding details from services.
//!
//! # Invariants
//! - Repository APIs return typed errors; they never panic on bad data.

pub mod catalog_source;
pub mod kv_repo;
