//! Search, filter and highlight projections over the note collection.
//!
//! # Responsibility
//! - Derive display-ordered note views from category and text criteria.
//! - Locate match spans so renderers can mark them without core emitting
//!   markup.
//!
//! # Invariants
//! - Matching is a case-insensitive literal substring test everywhere.
//! - Views are recomputed from current state on every call.

pub mod filter;
pub mod highlight;
mod pattern;

pub use pattern::SearchPattern;
