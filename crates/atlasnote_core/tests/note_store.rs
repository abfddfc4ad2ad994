use atlasnote_core::{
    decode_notes, find_highlights, format_relative_age, highlight, Category, CategoryFilter,
    ManualClock, MemoryKeyValueStore, Note, NoteDraft, NoteId, NoteStore, NoteStoreError,
    NoteValidationError, NOTES_STORAGE_KEY,
};
use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};

type TestStore<'c> = NoteStore<MemoryKeyValueStore, &'c ManualClock>;

fn start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 10, 14, 45, 0).unwrap()
}

fn empty_store(clock: &ManualClock) -> TestStore<'_> {
    let backend = MemoryKeyValueStore::with_entry(NOTES_STORAGE_KEY, "[]");
    NoteStore::load(backend, clock)
}

fn add(store: &mut TestStore<'_>, title: &str, category: Category, pinned: bool) -> Note {
    let report = store
        .add_note(NoteDraft::new(title, format!("{title} body"), category).pinned(pinned))
        .unwrap();
    assert!(report.is_durable());
    report.value
}

fn persisted(store: &TestStore<'_>) -> Vec<Note> {
    let raw = store.backend().raw(NOTES_STORAGE_KEY).unwrap();
    decode_notes(raw).unwrap()
}

#[test]
fn added_note_is_queryable_with_trimmed_values() {
    let clock = ManualClock::new(start());
    let mut store = empty_store(&clock);

    let created = store
        .add_note(NoteDraft::new("  Groceries ", "\n milk, eggs \t", Category::Personal))
        .unwrap()
        .value;

    let listed = store.query(CategoryFilter::All, "");
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, created.id);
    assert_eq!(listed[0].title, "Groceries");
    assert_eq!(listed[0].content, "milk, eggs");
    assert_eq!(listed[0].category, Category::Personal);
    assert!(!listed[0].is_pinned);
    assert_eq!(listed[0].created_at, start());
    assert_eq!(listed[0].updated_at, start());
    assert!(!listed[0].is_edited());
    assert_eq!(persisted(&store), vec![created]);
}

#[test]
fn blank_title_or_content_is_rejected_without_side_effects() {
    let clock = ManualClock::new(start());
    let mut store = empty_store(&clock);
    add(&mut store, "existing", Category::General, false);
    let before = store.backend().raw(NOTES_STORAGE_KEY).unwrap().to_string();

    for (title, content, expected) in [
        ("", "content", NoteValidationError::EmptyTitle),
        ("   ", "content", NoteValidationError::EmptyTitle),
        ("title", "", NoteValidationError::EmptyContent),
        ("title", " \n\t ", NoteValidationError::EmptyContent),
    ] {
        let err = store
            .add_note(NoteDraft::new(title, content, Category::Work))
            .unwrap_err();
        match err {
            NoteStoreError::Validation(actual) => assert_eq!(actual, expected),
            other => panic!("unexpected error: {other}"),
        }
    }

    assert_eq!(store.len(), 1);
    assert_eq!(store.backend().raw(NOTES_STORAGE_KEY).unwrap(), before);
}

#[test]
fn edit_preserves_identity_and_advances_updated_at() {
    let clock = ManualClock::new(start());
    let mut store = empty_store(&clock);
    let original = add(&mut store, "Draft", Category::General, false);

    clock.advance(Duration::minutes(5));
    let edited = store
        .edit_note(
            &original.id,
            NoteDraft::new(" Final ", " Done ", Category::Work).pinned(true),
        )
        .unwrap()
        .value;

    assert_eq!(edited.id, original.id);
    assert_eq!(edited.created_at, original.created_at);
    assert!(edited.updated_at >= original.updated_at);
    assert_eq!(edited.updated_at, start() + Duration::minutes(5));
    assert_eq!(edited.title, "Final");
    assert_eq!(edited.content, "Done");
    assert_eq!(edited.category, Category::Work);
    assert!(edited.is_pinned);
    assert!(edited.is_edited());
    assert_eq!(persisted(&store), vec![edited]);
}

#[test]
fn edit_unknown_id_is_not_found() {
    let clock = ManualClock::new(start());
    let mut store = empty_store(&clock);
    let missing = NoteId::from("does-not-exist");

    let err = store
        .edit_note(&missing, NoteDraft::new("t", "c", Category::General))
        .unwrap_err();
    assert!(matches!(err, NoteStoreError::NotFound(id) if id == missing));
}

#[test]
fn delete_removes_one_note_and_is_idempotent() {
    let clock = ManualClock::new(start());
    let mut store = empty_store(&clock);
    let keep = add(&mut store, "keep", Category::General, false);
    let target = add(&mut store, "target", Category::General, false);

    let first = store.delete_note(&target.id);
    assert!(first.is_durable());
    assert!(first.value);
    assert_eq!(store.len(), 1);
    assert_eq!(store.notes()[0].id, keep.id);

    let second = store.delete_note(&target.id);
    assert!(!second.value);
    assert_eq!(store.len(), 1);
    assert_eq!(persisted(&store), vec![keep]);
}

#[test]
fn query_orders_pinned_first_then_newest() {
    let clock = ManualClock::new(start());
    let mut store = empty_store(&clock);
    let a = add(&mut store, "A", Category::General, true);
    clock.advance(Duration::hours(1));
    let b = add(&mut store, "B", Category::General, false);
    clock.advance(Duration::hours(1));
    let c = add(&mut store, "C", Category::General, true);

    let ids = store
        .query(CategoryFilter::All, "")
        .into_iter()
        .map(|note| note.id.clone())
        .collect::<Vec<_>>();
    assert_eq!(ids, vec![c.id, a.id, b.id]);
}

#[test]
fn query_reflects_edits_immediately() {
    let clock = ManualClock::new(start());
    let mut store = empty_store(&clock);
    let older = add(&mut store, "older", Category::General, false);
    clock.advance(Duration::hours(1));
    let newer = add(&mut store, "newer", Category::General, false);
    assert_eq!(store.query(CategoryFilter::All, "")[0].id, newer.id);

    store
        .edit_note(
            &older.id,
            NoteDraft::new("older", "body", Category::General).pinned(true),
        )
        .unwrap()
        .into_result()
        .unwrap();
    assert_eq!(store.query(CategoryFilter::All, "")[0].id, older.id);
}

#[test]
fn search_is_case_insensitive_over_title_or_content() {
    let clock = ManualClock::new(start());
    let mut store = empty_store(&clock);
    let meeting = add(&mut store, "Meeting Notes", Category::Work, false);
    let recipe = store
        .add_note(NoteDraft::new("Dinner", "Keep NOTES on spice", Category::Personal))
        .unwrap()
        .value;
    add(&mut store, "Budget", Category::Work, false);

    let found = store.query(CategoryFilter::All, "notes");
    assert_eq!(found.len(), 2);
    assert!(found.iter().any(|note| note.id == meeting.id));
    assert!(found.iter().any(|note| note.id == recipe.id));

    let work_only = store.query(CategoryFilter::Only(Category::Work), "notes");
    assert_eq!(work_only.len(), 1);
    assert_eq!(work_only[0].id, meeting.id);

    assert!(store.query(CategoryFilter::All, "nothing like this").is_empty());
    assert_eq!(
        highlight(&meeting.title, "notes"),
        "Meeting [Notes]"
    );
}

#[test]
fn long_search_stays_case_insensitive() {
    let clock = ManualClock::new(start());
    let mut store = empty_store(&clock);
    let len = 30_000;
    let long = add(&mut store, &"a".repeat(len), Category::General, false);
    add(&mut store, "short", Category::General, false);

    let query = "A".repeat(len);
    let found = store.query(CategoryFilter::All, &query);
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, long.id);

    let spans = find_highlights(&long.title, &query);
    assert_eq!(spans.len(), 1);
    assert_eq!((spans[0].start, spans[0].end), (0, len));
}

#[test]
fn stats_count_totals_pins_and_used_categories() {
    let clock = ManualClock::new(start());
    let mut store = empty_store(&clock);
    add(&mut store, "w1", Category::Work, true);
    add(&mut store, "w2", Category::Work, false);
    add(&mut store, "p1", Category::Personal, false);

    let stats = store.compute_stats();
    assert_eq!(stats.total, 3);
    assert_eq!(stats.pinned, 1);
    assert_eq!(
        stats.per_category.into_iter().collect::<Vec<_>>(),
        vec![(Category::Work, 2), (Category::Personal, 1)]
    );
}

#[test]
fn clear_all_empties_collection_and_document() {
    let clock = ManualClock::new(start());
    let mut store = empty_store(&clock);
    add(&mut store, "one", Category::Work, false);
    add(&mut store, "two", Category::Work, true);

    let report = store.clear_all();
    assert!(report.is_durable());
    assert_eq!(report.value, 2);
    assert!(store.query(CategoryFilter::All, "").is_empty());
    assert!(store.is_empty());
    assert_eq!(store.backend().raw(NOTES_STORAGE_KEY), Some("[]"));
}

#[test]
fn export_covers_whole_collection_regardless_of_filters() {
    let clock = ManualClock::new(start());
    let mut store = empty_store(&clock);
    let today = NaiveDate::from_ymd_opt(2024, 5, 10).unwrap();
    assert!(store.export_snapshot(today).unwrap().is_none());

    add(&mut store, "work", Category::Work, false);
    add(&mut store, "home", Category::Personal, true);
    assert_eq!(store.query(CategoryFilter::Only(Category::Work), "").len(), 1);

    let artifact = store.export_snapshot(today).unwrap().unwrap();
    assert_eq!(artifact.file_name, "atlasnote-notes-2024-05-10.json");
    assert_eq!(artifact.note_count, 2);
    assert_eq!(decode_notes(&artifact.contents).unwrap(), store.notes().to_vec());
}

#[test]
fn relative_age_for_rendering_uses_injected_now() {
    let clock = ManualClock::new(start());
    let mut store = empty_store(&clock);
    let note = add(&mut store, "aging", Category::General, false);

    let now = note.created_at + Duration::hours(30);
    assert_eq!(format_relative_age(&note.created_at, &now), "Yesterday at 14:45");

    let now = note.created_at + Duration::days(10);
    assert_eq!(
        format_relative_age(&note.created_at, &now),
        "May 10, 2024, 14:45"
    );
}
