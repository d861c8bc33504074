//! Legal-matter catalog queries.
//!
//! # Responsibility
//! - Resolve catalog ids to labels, root Materia, and breadcrumb paths.
//! - Keep placeholder-label policy configurable per tree.
//!
//! # Invariants
//! - Queries are pure in-memory traversals; they never perform I/O.

pub mod placeholder;
pub mod tree;
