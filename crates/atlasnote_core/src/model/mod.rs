//! Domain model for the note collection.
//!
//! # Responsibility
//! - Define the note record, identifier and category types used by core.
//! - Keep caller input (`NoteDraft`) separate from stored records (`Note`).
//!
//! # Invariants
//! - Every note is identified by a stable `NoteId`.
//! - Deletion is a hard delete; there are no tombstones.

pub mod note;
