//! Core use-case services.
//!
//! # Responsibility
//! - Own the in-memory note collection and orchestrate persistence.
//! - Keep UI/CLI layers decoupled from storage details.

pub mod clock;
pub mod note_store;
mod seed;
