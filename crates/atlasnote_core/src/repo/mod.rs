//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the key-value contract the note store persists through.
//! - Isolate SQLite details from service/business orchestration.
//!
//! # Invariants
//! - Repository APIs return semantic errors (`InvalidKey`, `WriteRejected`)
//!   in addition to DB transport errors.

pub mod kv_repo;
