//! Core domain logic for AtlasNote.
//! This crate is the single source of truth for note invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod search;
pub mod service;
pub mod snapshot;
pub mod view;

pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::note::{Category, CategoryParseError, Note, NoteDraft, NoteId, NoteValidationError};
pub use repo::kv_repo::{
    KeyValueStore, MemoryKeyValueStore, RepoError, RepoResult, SqliteKeyValueStore,
};
pub use search::filter::{run_query, CategoryFilter, NoteQuery};
pub use search::highlight::{
    find_highlights, highlight, highlight_with, HighlightMarker, HighlightSpan,
};
pub use service::clock::{Clock, ManualClock, SystemClock};
pub use service::note_store::{
    LoadOutcome, NoteStore, NoteStoreError, PersistenceError, StoreResult, WriteReport,
};
pub use snapshot::{
    decode_notes, encode_notes, ExportArtifact, SnapshotError, SnapshotResult, NOTES_STORAGE_KEY,
};
pub use view::age::format_relative_age;
pub use view::stats::NoteStats;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
