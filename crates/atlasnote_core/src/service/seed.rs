//! First-run demonstration notes.

use crate::model::note::{Category, Note, NoteDraft, NoteId};
use chrono::{DateTime, Duration, Utc};

const WELCOME_CONTENT: &str = "This is your first note! You can:

- Create new notes with categories
- Pin important notes to the top
- Search through your notes
- Filter by category
- Edit and delete notes
- Export all your notes

Try creating your own note next.";

const KICKOFF_CONTENT: &str = "Attendees: John, Sarah, Mike

Key points discussed:
- Project timeline: 3 months
- Budget approved: $50k
- Next meeting: Friday 2pm

Action items:
- Sarah: Create project plan
- Mike: Set up development environment
- John: Stakeholder communication";

const BOOKS_CONTENT: &str = "Books to read this year:

1. \"Atomic Habits\" by James Clear
2. \"The Design of Everyday Things\" by Don Norman
3. \"Sapiens\" by Yuval Noah Harari
4. \"Clean Code\" by Robert Martin

Currently reading: Atomic Habits (Chapter 3)";

/// Builds the three demonstration notes, backdated from `now`.
///
/// Order matches the stored collection: newest first.
pub(crate) fn demo_notes(now: DateTime<Utc>) -> Vec<Note> {
    [
        (
            NoteDraft::new("Welcome to AtlasNote!", WELCOME_CONTENT, Category::General)
                .pinned(true),
            0,
        ),
        (
            NoteDraft::new(
                "Meeting Notes - Project Kickoff",
                KICKOFF_CONTENT,
                Category::Work,
            ),
            1,
        ),
        (
            NoteDraft::new("Book Recommendations", BOOKS_CONTENT, Category::Personal),
            2,
        ),
    ]
    .into_iter()
    .map(|(draft, days_ago)| {
        Note::from_draft(NoteId::generate(), draft, now - Duration::days(days_ago))
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::demo_notes;
    use chrono::Utc;
    use std::collections::HashSet;

    #[test]
    fn demo_notes_are_valid_distinct_and_backdated() {
        let now = Utc::now();
        let notes = demo_notes(now);
        assert_eq!(notes.len(), 3);
        assert_eq!(notes.iter().filter(|note| note.is_pinned).count(), 1);

        let categories = notes.iter().map(|note| note.category).collect::<HashSet<_>>();
        assert_eq!(categories.len(), 3);
        let ids = notes.iter().map(|note| &note.id).collect::<HashSet<_>>();
        assert_eq!(ids.len(), 3);

        for note in &notes {
            note.validate().unwrap();
            assert!(note.created_at <= now);
        }
        assert!(notes[2].created_at < notes[1].created_at);
    }
}
