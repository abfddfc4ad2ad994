//! Serialized note document codec and export artifacts.
//!
//! # Responsibility
//! - Encode/decode the whole collection as one JSON document.
//! - Shape the dated export artifact.
//!
//! # Invariants
//! - Persistence and export share one document shape; only whitespace differs.
//! - Decoding rejects documents the write paths could never have produced
//!   (invalid notes, duplicate ids).
//!
//! # See also
//! - `service::note_store` for when documents are read and written.

use crate::model::note::{Note, NoteId, NoteValidationError};
use chrono::NaiveDate;
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Fixed key the collection is stored under.
pub const NOTES_STORAGE_KEY: &str = "atlasnote_notes";

const EXPORT_FILE_PREFIX: &str = "atlasnote-notes";

pub type SnapshotResult<T> = Result<T, SnapshotError>;

/// Document encode/decode failures.
#[derive(Debug)]
pub enum SnapshotError {
    Encode(serde_json::Error),
    /// Not valid JSON or not the expected shape.
    Decode(serde_json::Error),
    /// Element `index` decoded but violates note invariants.
    InvalidNote {
        index: usize,
        source: NoteValidationError,
    },
    DuplicateId(NoteId),
}

impl Display for SnapshotError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Encode(err) => write!(f, "failed to encode notes document: {err}"),
            Self::Decode(err) => write!(f, "malformed notes document: {err}"),
            Self::InvalidNote { index, source } => {
                write!(f, "invalid note at index {index}: {source}")
            }
            Self::DuplicateId(id) => write!(f, "duplicate note id `{id}` in document"),
        }
    }
}

impl Error for SnapshotError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Encode(err) | Self::Decode(err) => Some(err),
            Self::InvalidNote { source, .. } => Some(source),
            Self::DuplicateId(_) => None,
        }
    }
}

/// Downloadable export produced from the full collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    /// `atlasnote-notes-YYYY-MM-DD.json`.
    pub file_name: String,
    /// Pretty-printed document.
    pub contents: String,
    pub note_count: usize,
}

/// Encodes notes as the compact persistence document.
pub fn encode_notes(notes: &[Note]) -> SnapshotResult<String> {
    serde_json::to_string(notes).map_err(SnapshotError::Encode)
}

/// Decodes and validates a persistence or export document.
pub fn decode_notes(raw: &str) -> SnapshotResult<Vec<Note>> {
    let notes: Vec<Note> = serde_json::from_str(raw).map_err(SnapshotError::Decode)?;

    let mut seen = HashSet::with_capacity(notes.len());
    for (index, note) in notes.iter().enumerate() {
        note.validate()
            .map_err(|source| SnapshotError::InvalidNote { index, source })?;
        if !seen.insert(&note.id) {
            return Err(SnapshotError::DuplicateId(note.id.clone()));
        }
    }

    Ok(notes)
}

/// Builds the export artifact for `today`.
///
/// Returns `Ok(None)` when there is nothing to export.
pub fn build_export(notes: &[Note], today: NaiveDate) -> SnapshotResult<Option<ExportArtifact>> {
    if notes.is_empty() {
        return Ok(None);
    }

    let contents = serde_json::to_string_pretty(notes).map_err(SnapshotError::Encode)?;
    Ok(Some(ExportArtifact {
        file_name: export_file_name(today),
        contents,
        note_count: notes.len(),
    }))
}

/// Export file name for a given date.
pub fn export_file_name(today: NaiveDate) -> String {
    format!("{EXPORT_FILE_PREFIX}-{}.json", today.format("%Y-%m-%d"))
}
