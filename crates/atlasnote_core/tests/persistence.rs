use atlasnote_core::db::{open_db, open_db_in_memory};
use atlasnote_core::{
    decode_notes, encode_notes, Category, CategoryFilter, KeyValueStore, LoadOutcome,
    ManualClock, MemoryKeyValueStore, NoteDraft, NoteStore, PersistenceError, RepoError,
    SqliteKeyValueStore, NOTES_STORAGE_KEY,
};
use chrono::{Duration, TimeZone, Utc};

#[test]
fn first_run_seeds_three_demo_notes_and_persists_them() {
    let now = Utc.with_ymd_and_hms(2024, 2, 1, 12, 0, 0).unwrap();
    let clock = ManualClock::new(now);
    let store = NoteStore::load(MemoryKeyValueStore::new(), &clock);

    assert_eq!(
        store.load_outcome(),
        &LoadOutcome::Seeded {
            count: 3,
            persisted: true
        }
    );
    let listed = store.query(CategoryFilter::All, "");
    assert_eq!(listed.len(), 3);
    assert!(listed[0].is_pinned);
    assert_eq!(listed[0].category, Category::General);
    assert_eq!(listed[1].category, Category::Work);
    assert_eq!(listed[1].created_at, now - Duration::days(1));
    assert_eq!(listed[2].category, Category::Personal);
    assert_eq!(listed[2].created_at, now - Duration::days(2));

    let stored = decode_notes(store.backend().raw(NOTES_STORAGE_KEY).unwrap()).unwrap();
    assert_eq!(stored, store.notes().to_vec());
}

#[test]
fn existing_empty_document_is_not_reseeded() {
    let backend = MemoryKeyValueStore::with_entry(NOTES_STORAGE_KEY, "[]");
    let store = NoteStore::open(backend);
    assert_eq!(store.load_outcome(), &LoadOutcome::Loaded { count: 0 });
    assert!(store.is_empty());
}

#[test]
fn corrupt_document_loads_empty_and_stays_until_next_write() {
    let backend = MemoryKeyValueStore::with_entry(NOTES_STORAGE_KEY, "{not json");
    let mut store = NoteStore::open(backend);

    assert!(matches!(store.load_outcome(), LoadOutcome::Recovered { .. }));
    assert!(store.is_empty());
    assert_eq!(store.backend().raw(NOTES_STORAGE_KEY), Some("{not json"));

    let created = store
        .add_note(NoteDraft::new("fresh", "start", Category::General))
        .unwrap()
        .value;
    let stored = decode_notes(store.backend().raw(NOTES_STORAGE_KEY).unwrap()).unwrap();
    assert_eq!(stored, vec![created]);
}

#[test]
fn document_with_invalid_note_is_treated_as_corrupt() {
    let raw = r#"[{"id":"1","title":"","content":"c","category":"work","isPinned":false,
        "createdAt":"2024-01-01T00:00:00Z","updatedAt":"2024-01-01T00:00:00Z"}]"#;
    let store = NoteStore::open(MemoryKeyValueStore::with_entry(NOTES_STORAGE_KEY, raw));
    match store.load_outcome() {
        LoadOutcome::Recovered { reason } => assert!(reason.contains("title")),
        other => panic!("unexpected outcome: {other:?}"),
    }
}

#[test]
fn backend_read_failure_starts_empty_and_stays_usable() {
    let mut backend = MemoryKeyValueStore::with_entry(NOTES_STORAGE_KEY, "[]");
    backend.set_fail_reads(true);
    let mut store = NoteStore::open(backend);

    match store.load_outcome() {
        LoadOutcome::Unreadable { reason } => assert!(reason.contains("read failed")),
        other => panic!("unexpected outcome: {other:?}"),
    }
    assert!(store.is_empty());
    assert_eq!(store.backend().raw(NOTES_STORAGE_KEY), Some("[]"));

    let report = store
        .add_note(NoteDraft::new("after outage", "still works", Category::Work))
        .unwrap();
    assert!(report.is_durable());
    assert_eq!(store.query(CategoryFilter::All, "outage").len(), 1);
    let stored = decode_notes(store.backend().raw(NOTES_STORAGE_KEY).unwrap()).unwrap();
    assert_eq!(stored, vec![report.value]);
}

#[test]
fn write_failure_keeps_in_memory_change_and_reports_it() {
    let clock = ManualClock::new(Utc::now());
    let backend = MemoryKeyValueStore::with_entry(NOTES_STORAGE_KEY, "[]");
    let mut store = NoteStore::load(backend, &clock);
    store.backend_mut().set_fail_writes(true);

    let report = store
        .add_note(NoteDraft::new("unsaved", "body", Category::Work))
        .unwrap();
    assert!(!report.is_durable());
    let created = report.value.clone();
    assert!(matches!(
        report.persist_error,
        Some(PersistenceError::Backend(RepoError::WriteRejected { .. }))
    ));

    assert_eq!(store.get(&created.id), Some(&created));
    assert_eq!(store.query(CategoryFilter::All, "unsaved").len(), 1);
    assert_eq!(store.backend().raw(NOTES_STORAGE_KEY), Some("[]"));

    let cleared = store.clear_all();
    assert!(cleared.into_result().is_err());
    assert!(store.is_empty());

    store.backend_mut().set_fail_writes(false);
    let report = store.delete_note(&created.id);
    assert!(report.is_durable());
    assert!(!report.value);
}

#[test]
fn seed_write_failure_still_yields_usable_store() {
    let mut backend = MemoryKeyValueStore::new();
    backend.set_fail_writes(true);
    let mut store = NoteStore::open(backend);

    assert_eq!(
        store.load_outcome(),
        &LoadOutcome::Seeded {
            count: 3,
            persisted: false
        }
    );
    store.backend_mut().set_fail_writes(false);
    let report = store
        .add_note(NoteDraft::new("next", "note", Category::Personal))
        .unwrap();
    assert!(report.is_durable());
    assert_eq!(store.len(), 4);
}

#[test]
fn collection_round_trips_through_document() {
    let clock = ManualClock::new(Utc.with_ymd_and_hms(2024, 8, 1, 7, 5, 9).unwrap());
    let backend = MemoryKeyValueStore::with_entry(NOTES_STORAGE_KEY, "[]");
    let mut store = NoteStore::load(backend, &clock);
    for (title, category, pinned) in [
        ("alpha", Category::Work, true),
        ("beta", Category::Personal, false),
        ("gamma \u{1F4CC}", Category::General, false),
    ] {
        store
            .add_note(NoteDraft::new(title, "line one\nline two", category).pinned(pinned))
            .unwrap()
            .into_result()
            .unwrap();
        clock.advance(Duration::milliseconds(1_234));
    }

    let encoded = encode_notes(store.notes()).unwrap();
    let decoded = decode_notes(&encoded).unwrap();
    assert_eq!(decoded, store.notes().to_vec());

    let reloaded = NoteStore::load(store.into_backend(), &clock);
    assert_eq!(reloaded.load_outcome(), &LoadOutcome::Loaded { count: 3 });
    assert_eq!(reloaded.notes(), decoded.as_slice());
}

#[test]
fn sqlite_backend_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.sqlite3");

    let created_id = {
        let conn = open_db(&path).unwrap();
        let backend = SqliteKeyValueStore::try_new(&conn).unwrap();
        let mut store = NoteStore::open(backend);
        assert!(matches!(store.load_outcome(), LoadOutcome::Seeded { .. }));
        let created = store
            .add_note(NoteDraft::new("Persisted", "across runs", Category::Work))
            .unwrap()
            .into_result()
            .unwrap();
        created.id
    };

    let conn = open_db(&path).unwrap();
    let backend = SqliteKeyValueStore::try_new(&conn).unwrap();
    let store = NoteStore::open(backend);
    assert_eq!(store.load_outcome(), &LoadOutcome::Loaded { count: 4 });
    let found = store.get(&created_id).unwrap();
    assert_eq!(found.title, "Persisted");
}

#[test]
fn sqlite_backend_persists_cleared_collection() {
    let conn = open_db_in_memory().unwrap();
    let backend = SqliteKeyValueStore::try_new(&conn).unwrap();
    let mut store = NoteStore::open(backend);
    store.clear_all().into_result().unwrap();

    let raw = store.backend().get(NOTES_STORAGE_KEY).unwrap();
    assert_eq!(raw.as_deref(), Some("[]"));
}
