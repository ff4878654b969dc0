use notedesk_core::{
    ItemDraft, ItemPatch, ItemStore, ItemType, MemoryItemStore, Priority, Status, StoreError,
    SubTask, TagRef, DEFAULT_TITLE,
};
use std::collections::HashSet;

fn tag(id: i64, name: &str) -> TagRef {
    TagRef {
        id,
        name: name.to_string(),
        color: "#4477aa".to_string(),
    }
}

#[test]
fn create_fills_documented_defaults() {
    let mut store = MemoryItemStore::new();
    let item = store.create(ItemDraft::default()).unwrap();

    assert_eq!(item.id, 1);
    assert_eq!(item.kind, ItemType::Task);
    assert_eq!(item.title, DEFAULT_TITLE);
    assert_eq!(item.content, "");
    assert!(item.tags.is_empty());
    assert_eq!(item.priority, Priority::Medium);
    assert_eq!(item.status, Status::Todo);
    assert_eq!(item.deadline, None);
    assert!(!item.is_pinned);
    assert_eq!(item.updated_at, item.created_at);
    assert_eq!(item.sub_tasks, None);
}

#[test]
fn create_and_get_roundtrip() {
    let mut store = MemoryItemStore::new();
    let created = store
        .create(ItemDraft::note("Css notes", "# Utilities\n`bg-blue-500`"))
        .unwrap();

    let loaded = store.get(created.id).unwrap().unwrap();
    assert_eq!(loaded, created);
    assert!(store.get(999).unwrap().is_none());
}

#[test]
fn created_ids_are_pairwise_distinct() {
    let mut store = MemoryItemStore::new();
    let mut seen = HashSet::new();
    for index in 0..40 {
        let draft = if index % 7 == 0 {
            ItemDraft {
                id: Some(100 + index),
                ..ItemDraft::default()
            }
        } else {
            ItemDraft::default()
        };
        let item = store.create(draft).unwrap();
        assert!(seen.insert(item.id), "id {} was reused", item.id);
    }
}

#[test]
fn explicit_id_is_honored_and_counter_advances_past_it() {
    let mut store = MemoryItemStore::new();
    let seeded = store
        .create(ItemDraft {
            id: Some(5),
            ..ItemDraft::default()
        })
        .unwrap();
    assert_eq!(seeded.id, 5);

    let next = store.create(ItemDraft::default()).unwrap();
    assert_eq!(next.id, 6);
}

#[test]
fn ids_are_not_reused_after_deletion() {
    let mut store = MemoryItemStore::new();
    let first = store.create(ItemDraft::task("a")).unwrap();
    store.delete(first.id).unwrap();

    let second = store.create(ItemDraft::task("b")).unwrap();
    assert_ne!(second.id, first.id);
}

#[test]
fn update_merges_supplied_fields_and_keeps_the_rest() {
    let mut store = MemoryItemStore::new();
    let created = store
        .create(ItemDraft {
            priority: Some(Priority::Low),
            deadline: Some(1_700_001_000_000),
            created_at: Some(1_700_000_000_000),
            ..ItemDraft::task("Draft report")
        })
        .unwrap();

    let patch = ItemPatch {
        title: Some("Final report".to_string()),
        status: Some(Status::Doing),
        ..ItemPatch::default()
    };
    let updated = store.update(created.id, &patch).unwrap().unwrap();

    assert_eq!(updated.title, "Final report");
    assert_eq!(updated.status, Status::Doing);
    assert_eq!(updated.priority, Priority::Low);
    assert_eq!(updated.deadline, Some(1_700_001_000_000));
    assert_eq!(updated.created_at, created.created_at);
    assert!(updated.updated_at >= created.updated_at);

    let loaded = store.get(created.id).unwrap().unwrap();
    assert_eq!(loaded, updated);
}

#[test]
fn repeated_update_is_idempotent_apart_from_updated_at() {
    let mut store = MemoryItemStore::new();
    let created = store.create(ItemDraft::task("x")).unwrap();

    let patch = ItemPatch {
        title: Some("renamed".to_string()),
        priority: Some(Priority::High),
        ..ItemPatch::default()
    };
    let once = store.update(created.id, &patch).unwrap().unwrap();
    let twice = store.update(created.id, &patch).unwrap().unwrap();

    assert_eq!(once.title, twice.title);
    assert_eq!(once.priority, twice.priority);
    assert_eq!(once.status, twice.status);
    assert_eq!(once.tags, twice.tags);
    assert_eq!(once.created_at, twice.created_at);
    assert!(twice.updated_at >= once.updated_at);
}

#[test]
fn update_unknown_id_is_a_silent_no_op() {
    let mut store = MemoryItemStore::new();
    let patch = ItemPatch {
        title: Some("Z".to_string()),
        ..ItemPatch::default()
    };

    let result = store.update(999, &patch).unwrap();
    assert!(result.is_none());
    assert!(store.is_empty());
}

#[test]
fn update_can_clear_the_deadline() {
    let mut store = MemoryItemStore::new();
    let created = store
        .create(ItemDraft {
            deadline: Some(1_700_002_000_000),
            ..ItemDraft::task("with deadline")
        })
        .unwrap();

    let patch = ItemPatch {
        deadline: Some(None),
        ..ItemPatch::default()
    };
    let updated = store.update(created.id, &patch).unwrap().unwrap();
    assert_eq!(updated.deadline, None);
}

#[test]
fn invalid_patch_is_rejected_and_leaves_the_item_unchanged() {
    let mut store = MemoryItemStore::new();
    let note = store.create(ItemDraft::note("plain", "body")).unwrap();

    let patch = ItemPatch {
        sub_tasks: Some(Some(vec![SubTask {
            id: 1,
            title: "not allowed on notes".to_string(),
            done: false,
        }])),
        ..ItemPatch::default()
    };
    let err = store.update(note.id, &patch).unwrap_err();
    assert!(matches!(err, StoreError::Validation(_)));

    let loaded = store.get(note.id).unwrap().unwrap();
    assert_eq!(loaded, note);
}

#[test]
fn delete_is_idempotent() {
    let mut store = MemoryItemStore::new();
    let item = store.create(ItemDraft::task("gone soon")).unwrap();

    assert!(store.delete(item.id).unwrap());
    assert!(!store.delete(item.id).unwrap());
    assert!(store.is_empty());
}

#[test]
fn batch_delete_reports_accurate_counts() {
    let mut store = MemoryItemStore::new();
    let a = store.create(ItemDraft::task("a")).unwrap();
    let b = store.create(ItemDraft::task("b")).unwrap();
    store.create(ItemDraft::task("kept")).unwrap();

    let outcome = store.batch_delete(&[a.id, b.id, 999]).unwrap();
    assert_eq!(outcome.requested, 3);
    assert_eq!(outcome.deleted, 2);
    assert_eq!(store.len(), 1);
}

#[test]
fn set_tags_replaces_associations() {
    let mut store = MemoryItemStore::new();
    let created = store
        .create(ItemDraft {
            tags: vec![tag(1, "study")],
            ..ItemDraft::note("tagged", "")
        })
        .unwrap();

    let updated = store
        .set_tags(created.id, vec![tag(2, "work"), tag(3, "project")])
        .unwrap()
        .unwrap();
    assert_eq!(updated.tags.len(), 2);
    assert_eq!(updated.tags[0].id, 2);

    assert!(store.set_tags(999, vec![tag(4, "x")]).unwrap().is_none());
}

#[test]
fn toggle_pin_flips_the_flag() {
    let mut store = MemoryItemStore::new();
    let created = store.create(ItemDraft::task("pin me")).unwrap();
    assert!(!created.is_pinned);

    let pinned = store.toggle_pin(created.id).unwrap().unwrap();
    assert!(pinned.is_pinned);

    let unpinned = store.toggle_pin(created.id).unwrap().unwrap();
    assert!(!unpinned.is_pinned);

    assert!(store.toggle_pin(999).unwrap().is_none());
}
