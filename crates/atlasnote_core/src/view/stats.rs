//! Collection statistics.

use crate::model::note::{Category, Note};
use std::collections::BTreeMap;

/// Counts derived from the full collection, ignoring any active filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteStats {
    pub total: usize,
    pub pinned: usize,
    /// Only categories with at least one note appear.
    pub per_category: BTreeMap<Category, usize>,
}

pub fn compute_stats(notes: &[Note]) -> NoteStats {
    let mut stats = NoteStats {
        total: notes.len(),
        ..NoteStats::default()
    };
    for note in notes {
        if note.is_pinned {
            stats.pinned += 1;
        }
        *stats.per_category.entry(note.category).or_insert(0) += 1;
    }
    stats
}
