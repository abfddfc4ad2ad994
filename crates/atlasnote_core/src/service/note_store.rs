//! Note collection use-case service.
//!
//! # Responsibility
//! - Own the in-memory note collection and enforce note invariants.
//! - Persist the whole collection as one document after every mutation.
//! - Serve filtered/sorted views, stats and export artifacts.
//!
//! # Invariants
//! - Note ids are unique within the collection.
//! - Stored order is insertion order, newest first; display order is derived
//!   per query and never cached.
//! - `edit_note` replaces all caller fields; `id` and `created_at` never change
//!   and `updated_at` never moves backwards.
//! - A failed persistence write never rolls back the in-memory change; it is
//!   reported through [`WriteReport::persist_error`].
//! - A malformed or unreadable stored document loads as an empty
//!   collection; loading never fails.

use crate::model::note::{Note, NoteDraft, NoteId, NoteValidationError};
use crate::repo::kv_repo::{KeyValueStore, RepoError};
use crate::search::filter::{run_query, CategoryFilter, NoteQuery};
use crate::service::clock::{Clock, SystemClock};
use crate::service::seed::demo_notes;
use crate::snapshot::{
    build_export, decode_notes, encode_notes, ExportArtifact, SnapshotError, SnapshotResult,
    NOTES_STORAGE_KEY,
};
use crate::view::stats::{compute_stats, NoteStats};
use chrono::NaiveDate;
use log::{error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StoreResult<T> = Result<T, NoteStoreError>;

/// Durability failure for a collection write or read.
#[derive(Debug)]
pub enum PersistenceError {
    /// Collection could not be serialized.
    Encode(SnapshotError),
    /// Backend read/write failed.
    Backend(RepoError),
}

impl Display for PersistenceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Encode(err) => write!(f, "{err}"),
            Self::Backend(err) => write!(f, "storage backend failed: {err}"),
        }
    }
}

impl Error for PersistenceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Encode(err) => Some(err),
            Self::Backend(err) => Some(err),
        }
    }
}

/// Service error for note use-cases.
#[derive(Debug)]
pub enum NoteStoreError {
    /// Title or content empty after trimming. Caller should re-prompt.
    Validation(NoteValidationError),
    /// Target note does not exist.
    NotFound(NoteId),
}

impl Display for NoteStoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "note not found: {id}"),
        }
    }
}

impl Error for NoteStoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::NotFound(_) => None,
        }
    }
}

impl From<NoteValidationError> for NoteStoreError {
    fn from(value: NoteValidationError) -> Self {
        Self::Validation(value)
    }
}

/// Result of a mutation that was applied in memory.
///
/// `persist_error` is set when the follow-up write failed; the in-memory
/// state still reflects the mutation.
#[derive(Debug)]
#[must_use]
pub struct WriteReport<T> {
    pub value: T,
    pub persist_error: Option<PersistenceError>,
}

impl<T> WriteReport<T> {
    /// Whether the mutation reached the backend.
    pub fn is_durable(&self) -> bool {
        self.persist_error.is_none()
    }

    /// Converts to a strict result for callers that treat unsaved changes as
    /// failures.
    pub fn into_result(self) -> Result<T, PersistenceError> {
        match self.persist_error {
            None => Ok(self.value),
            Some(err) => Err(err),
        }
    }
}

/// How the collection was initialized by [`NoteStore::load`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// A stored document was decoded.
    Loaded { count: usize },
    /// No document existed; demonstration notes were seeded.
    Seeded { count: usize, persisted: bool },
    /// A stored document was malformed; started empty.
    Recovered { reason: String },
    /// The backend read failed; started empty without seeding.
    Unreadable { reason: String },
}

/// Owner of the note collection.
pub struct NoteStore<S: KeyValueStore, C: Clock = SystemClock> {
    backend: S,
    clock: C,
    notes: Vec<Note>,
    load_outcome: LoadOutcome,
}

impl<S: KeyValueStore> NoteStore<S, SystemClock> {
    /// Loads the collection using the wall clock.
    pub fn open(backend: S) -> Self {
        Self::load(backend, SystemClock)
    }
}

impl<S: KeyValueStore, C: Clock> NoteStore<S, C> {
    /// Loads the collection from `backend`.
    ///
    /// Missing documents are seeded. Malformed documents and failed reads
    /// load empty; [`NoteStore::load_outcome`] tells them apart. The next
    /// mutation overwrites whatever is stored.
    pub fn load(backend: S, clock: C) -> Self {
        let raw = backend.get(NOTES_STORAGE_KEY);

        let mut store = Self {
            backend,
            clock,
            notes: Vec::new(),
            load_outcome: LoadOutcome::Loaded { count: 0 },
        };

        let outcome = match raw {
            Err(err) => {
                error!("event=store_load module=service status=error fallback=empty error={err}");
                LoadOutcome::Unreadable {
                    reason: PersistenceError::Backend(err).to_string(),
                }
            }
            Ok(None) => {
                store.notes = demo_notes(store.clock.now());
                let persisted = match store.persist() {
                    Ok(()) => true,
                    Err(err) => {
                        warn!("event=store_seed module=service status=warn error={err}");
                        false
                    }
                };
                LoadOutcome::Seeded {
                    count: store.notes.len(),
                    persisted,
                }
            }
            Ok(Some(raw)) => match decode_notes(&raw) {
                Ok(notes) => {
                    store.notes = notes;
                    LoadOutcome::Loaded {
                        count: store.notes.len(),
                    }
                }
                Err(err) => {
                    warn!(
                        "event=store_load module=service status=warn fallback=empty bytes={} error={err}",
                        raw.len()
                    );
                    LoadOutcome::Recovered {
                        reason: err.to_string(),
                    }
                }
            },
        };
        store.load_outcome = outcome;

        info!(
            "event=store_load module=service status=ok outcome={} total={}",
            outcome_label(&store.load_outcome),
            store.notes.len()
        );
        store
    }

    /// Creates a note from caller field values.
    ///
    /// # Errors
    /// - `Validation` when title or content is blank; nothing is created.
    pub fn add_note(&mut self, draft: NoteDraft) -> StoreResult<WriteReport<Note>> {
        let draft = draft.normalize().inspect_err(|err| {
            info!("event=note_add module=service status=rejected reason={err}");
        })?;

        let note = Note::from_draft(self.next_id(), draft, self.clock.now());
        self.notes.insert(0, note.clone());
        info!(
            "event=note_add module=service status=ok note_id={} total={}",
            note.id,
            self.notes.len()
        );
        Ok(self.persist_report("note_add", note))
    }

    /// Replaces title/content/category/pin of an existing note.
    ///
    /// # Errors
    /// - `NotFound` when `id` is absent (checked before validation).
    /// - `Validation` when title or content is blank; note is unchanged.
    pub fn edit_note(&mut self, id: &NoteId, draft: NoteDraft) -> StoreResult<WriteReport<Note>> {
        let index = self
            .position(id)
            .ok_or_else(|| NoteStoreError::NotFound(id.clone()))?;
        let draft = draft.normalize()?;
        let now = self.clock.now();

        let note = &mut self.notes[index];
        note.title = draft.title;
        note.content = draft.content;
        note.category = draft.category;
        note.is_pinned = draft.is_pinned;
        note.updated_at = now.max(note.updated_at);
        let updated = note.clone();

        info!("event=note_edit module=service status=ok note_id={id}");
        Ok(self.persist_report("note_edit", updated))
    }

    /// Removes the note with `id` if present; returns whether one was removed.
    ///
    /// The collection is persisted either way.
    pub fn delete_note(&mut self, id: &NoteId) -> WriteReport<bool> {
        let before = self.notes.len();
        self.notes.retain(|note| &note.id != id);
        let removed = self.notes.len() != before;
        info!("event=note_delete module=service status=ok note_id={id} removed={removed}");
        self.persist_report("note_delete", removed)
    }

    /// Empties the collection; returns how many notes were removed.
    pub fn clear_all(&mut self) -> WriteReport<usize> {
        let removed = self.notes.len();
        self.notes.clear();
        info!("event=note_clear module=service status=ok removed={removed}");
        self.persist_report("note_clear", removed)
    }

    /// Notes matching `category` and `search`, in display order.
    pub fn query(&self, category: CategoryFilter, search: &str) -> Vec<&Note> {
        run_query(&self.notes, &NoteQuery::new(category, search))
    }

    /// Statistics over the full collection.
    pub fn compute_stats(&self) -> NoteStats {
        compute_stats(&self.notes)
    }

    /// Export artifact for the full collection, or `None` when empty.
    pub fn export_snapshot(&self, today: NaiveDate) -> SnapshotResult<Option<ExportArtifact>> {
        let artifact = build_export(&self.notes, today)?;
        match &artifact {
            Some(artifact) => info!(
                "event=note_export module=service status=ok count={} bytes={}",
                artifact.note_count,
                artifact.contents.len()
            ),
            None => info!("event=note_export module=service status=empty"),
        }
        Ok(artifact)
    }

    pub fn get(&self, id: &NoteId) -> Option<&Note> {
        self.notes.iter().find(|note| &note.id == id)
    }

    /// Stored order (newest inserted first).
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn load_outcome(&self) -> &LoadOutcome {
        &self.load_outcome
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    /// Mutable backend access. Writes made here bypass the store.
    pub fn backend_mut(&mut self) -> &mut S {
        &mut self.backend
    }

    pub fn into_backend(self) -> S {
        self.backend
    }

    fn position(&self, id: &NoteId) -> Option<usize> {
        self.notes.iter().position(|note| &note.id == id)
    }

    fn next_id(&self) -> NoteId {
        loop {
            let candidate = NoteId::generate();
            if self.position(&candidate).is_none() {
                return candidate;
            }
        }
    }

    fn persist(&mut self) -> Result<(), PersistenceError> {
        let document = encode_notes(&self.notes).map_err(PersistenceError::Encode)?;
        self.backend
            .set(NOTES_STORAGE_KEY, &document)
            .map_err(PersistenceError::Backend)
    }

    fn persist_report<T>(&mut self, event: &'static str, value: T) -> WriteReport<T> {
        let persist_error = match self.persist() {
            Ok(()) => None,
            Err(err) => {
                warn!("event={event} module=service status=warn persisted=false error={err}");
                Some(err)
            }
        };
        WriteReport {
            value,
            persist_error,
        }
    }
}

fn outcome_label(outcome: &LoadOutcome) -> &'static str {
    match outcome {
        LoadOutcome::Loaded { .. } => "loaded",
        LoadOutcome::Seeded { .. } => "seeded",
        LoadOutcome::Recovered { .. } => "recovered",
        LoadOutcome::Unreadable { .. } => "unreadable",
    }
}
