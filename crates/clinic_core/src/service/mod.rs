//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate catalog fetches and draft storage into use-case APIs.
//! - Keep UI-facing callers decoupled from storage and payload details.

pub mod catalog_service;
pub mod draft_store;
