//! In-memory item store.
//!
//! # Responsibility
//! - Own the session's item collection and its identity counter.
//! - Serve freshly computed, owned views for every read.
//!
//! # Invariants
//! - The id counter is monotonic; ids are never reused after deletion,
//!   and it advances past every seeded id it observes.
//! - A failed validation leaves the collection byte-for-byte unchanged.
//! - Single logical writer: operations are synchronous and complete
//!   before the next one starts. A multi-threaded host wraps the whole
//!   store in one coarse lock.

use crate::model::draft::{ItemDraft, ItemPatch};
use crate::model::item::{Item, ItemId, ItemType, Priority, Status, TagRef, DEFAULT_TITLE};
use crate::search::{search_items, SearchHit, SearchQuery};
use crate::store::item_store::{
    BatchDelete, ItemListQuery, ItemStore, SortKey, SortOrder, StoreError, StoreResult,
};
use chrono::Utc;
use log::debug;
use std::cmp::Ordering;

/// Volatile store holding the whole collection for one session.
///
/// State is process-lifetime only; construct one instance and pass it by
/// reference to whichever layer needs it.
#[derive(Debug)]
pub struct MemoryItemStore {
    /// Newest creations sit at the head; views re-sort on every read.
    items: Vec<Item>,
    next_id: ItemId,
}

impl MemoryItemStore {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            next_id: 1,
        }
    }

    /// Builds a store seeded with existing items.
    ///
    /// Each seed is validated, duplicate ids are rejected, and the id
    /// counter starts past the highest seeded id.
    pub fn with_items(items: Vec<Item>) -> StoreResult<Self> {
        let mut next_id: ItemId = 1;
        for (index, item) in items.iter().enumerate() {
            item.validate()?;
            if items[..index].iter().any(|other| other.id == item.id) {
                return Err(StoreError::DuplicateId(item.id));
            }
            if item.id >= next_id {
                next_id = item.id + 1;
            }
        }
        Ok(Self { items, next_id })
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn now_ms() -> i64 {
        Utc::now().timestamp_millis()
    }

    fn contains(&self, id: ItemId) -> bool {
        self.items.iter().any(|item| item.id == id)
    }

    fn position(&self, id: ItemId) -> Option<usize> {
        self.items.iter().position(|item| item.id == id)
    }

    /// Allocates the item's identity.
    ///
    /// A positive seed is honored when no item holds it yet, and the
    /// counter advances past it so later allocations cannot collide.
    /// Everything else falls through to the counter.
    fn allocate_id(&mut self, seed: Option<ItemId>) -> ItemId {
        if let Some(id) = seed {
            if id >= 1 && !self.contains(id) {
                if id >= self.next_id {
                    self.next_id = id + 1;
                }
                return id;
            }
        }
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn commit_update(&mut self, index: usize, merged: Item) -> StoreResult<Option<Item>> {
        merged.validate()?;
        debug!(
            "event=item_update module=store id={} kind={}",
            merged.id,
            merged.kind.as_str()
        );
        self.items[index] = merged.clone();
        Ok(Some(merged))
    }
}

impl Default for MemoryItemStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ItemStore for MemoryItemStore {
    fn list(&self, kind: ItemType) -> StoreResult<Vec<Item>> {
        self.query(&ItemListQuery::of_kind(kind))
    }

    fn query(&self, query: &ItemListQuery) -> StoreResult<Vec<Item>> {
        let needle = query
            .text
            .as_deref()
            .map(|text| text.trim().to_lowercase())
            .filter(|text| !text.is_empty());

        let mut view: Vec<Item> = self
            .items
            .iter()
            .filter(|item| matches_query(item, query, needle.as_deref()))
            .cloned()
            .collect();

        view.sort_by(|a, b| compare_items(a, b, query.sort_by, query.order));
        Ok(view)
    }

    fn get(&self, id: ItemId) -> StoreResult<Option<Item>> {
        Ok(self.items.iter().find(|item| item.id == id).cloned())
    }

    fn search(&self, query: &SearchQuery) -> StoreResult<Vec<SearchHit>> {
        Ok(search_items(&self.items, query))
    }

    fn create(&mut self, draft: ItemDraft) -> StoreResult<Item> {
        let now = Self::now_ms();
        let id = self.allocate_id(draft.id);
        let created_at = draft.created_at.unwrap_or(now);

        let item = Item {
            id,
            kind: draft.kind.unwrap_or(ItemType::Task),
            title: draft.title.unwrap_or_else(|| DEFAULT_TITLE.to_string()),
            content: draft.content.unwrap_or_default(),
            tags: draft.tags,
            priority: draft.priority.unwrap_or(Priority::Medium),
            status: draft.status.unwrap_or(Status::Todo),
            deadline: draft.deadline,
            is_pinned: draft.is_pinned.unwrap_or(false),
            created_at,
            updated_at: created_at,
            sub_tasks: draft.sub_tasks,
        };
        item.validate()?;

        debug!(
            "event=item_create module=store id={} kind={}",
            item.id,
            item.kind.as_str()
        );
        // Head insertion keeps the physical order most-recent-first,
        // independent of the sort applied by views.
        self.items.insert(0, item.clone());
        Ok(item)
    }

    fn update(&mut self, id: ItemId, patch: &ItemPatch) -> StoreResult<Option<Item>> {
        let Some(index) = self.position(id) else {
            return Ok(None);
        };

        let mut merged = self.items[index].clone();
        if let Some(title) = &patch.title {
            merged.title = title.clone();
        }
        if let Some(content) = &patch.content {
            merged.content = content.clone();
        }
        if let Some(tags) = &patch.tags {
            merged.tags = tags.clone();
        }
        if let Some(priority) = patch.priority {
            merged.priority = priority;
        }
        if let Some(status) = patch.status {
            merged.status = status;
        }
        if let Some(deadline) = patch.deadline {
            merged.deadline = deadline;
        }
        if let Some(is_pinned) = patch.is_pinned {
            merged.is_pinned = is_pinned;
        }
        if let Some(sub_tasks) = &patch.sub_tasks {
            merged.sub_tasks = sub_tasks.clone();
        }
        merged.touch(Self::now_ms());

        self.commit_update(index, merged)
    }

    fn toggle_pin(&mut self, id: ItemId) -> StoreResult<Option<Item>> {
        let Some(index) = self.position(id) else {
            return Ok(None);
        };

        let mut merged = self.items[index].clone();
        merged.is_pinned = !merged.is_pinned;
        merged.touch(Self::now_ms());

        self.commit_update(index, merged)
    }

    fn set_tags(&mut self, id: ItemId, tags: Vec<TagRef>) -> StoreResult<Option<Item>> {
        let Some(index) = self.position(id) else {
            return Ok(None);
        };

        let mut merged = self.items[index].clone();
        merged.tags = tags;
        merged.touch(Self::now_ms());

        self.commit_update(index, merged)
    }

    fn delete(&mut self, id: ItemId) -> StoreResult<bool> {
        let Some(index) = self.position(id) else {
            return Ok(false);
        };

        let removed = self.items.remove(index);
        debug!(
            "event=item_delete module=store id={} kind={}",
            removed.id,
            removed.kind.as_str()
        );
        Ok(true)
    }

    fn batch_delete(&mut self, ids: &[ItemId]) -> StoreResult<BatchDelete> {
        let mut deleted = 0;
        for &id in ids {
            if self.delete(id)? {
                deleted += 1;
            }
        }
        Ok(BatchDelete {
            requested: ids.len(),
            deleted,
        })
    }
}

fn matches_query(item: &Item, query: &ItemListQuery, needle: Option<&str>) -> bool {
    if let Some(kind) = query.kind {
        if item.kind != kind {
            return false;
        }
    }
    if let Some(pinned) = query.pinned {
        if item.is_pinned != pinned {
            return false;
        }
    }
    if let Some(tag_id) = query.tag {
        if !item.tags.iter().any(|tag| tag.id == tag_id) {
            return false;
        }
    }
    if let Some(needle) = needle {
        let in_title = item.title.to_lowercase().contains(needle);
        let in_content = item.content.to_lowercase().contains(needle);
        if !in_title && !in_content {
            return false;
        }
    }
    true
}

/// Two-key view ordering: the pin partition is primary for every sort
/// key, the requested key orders within each partition, and `id`
/// descending breaks remaining ties so views are fully deterministic.
fn compare_items(a: &Item, b: &Item, sort_by: SortKey, order: SortOrder) -> Ordering {
    b.is_pinned
        .cmp(&a.is_pinned)
        .then_with(|| {
            let natural = match sort_by {
                SortKey::CreatedAt => a.created_at.cmp(&b.created_at),
                SortKey::UpdatedAt => a.updated_at.cmp(&b.updated_at),
                SortKey::Deadline => deadline_weight(a).cmp(&deadline_weight(b)),
                SortKey::Priority => a.priority.rank().cmp(&b.priority.rank()),
            };
            match order {
                SortOrder::Asc => natural,
                SortOrder::Desc => natural.reverse(),
            }
        })
        .then_with(|| b.id.cmp(&a.id))
}

fn deadline_weight(item: &Item) -> i64 {
    item.deadline.unwrap_or(i64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allocate_id_skips_occupied_seed() {
        let mut store = MemoryItemStore::new();
        let seeded = store
            .create(ItemDraft {
                id: Some(7),
                ..ItemDraft::default()
            })
            .unwrap();
        assert_eq!(seeded.id, 7);

        let clashing = store
            .create(ItemDraft {
                id: Some(7),
                ..ItemDraft::default()
            })
            .unwrap();
        assert_eq!(clashing.id, 8);
    }

    #[test]
    fn allocate_id_ignores_non_positive_seed() {
        let mut store = MemoryItemStore::new();
        let item = store
            .create(ItemDraft {
                id: Some(-3),
                ..ItemDraft::default()
            })
            .unwrap();
        assert_eq!(item.id, 1);
    }

    #[test]
    fn with_items_rejects_duplicate_ids() {
        let mut store = MemoryItemStore::new();
        let a = store.create(ItemDraft::task("a")).unwrap();
        let mut b = a.clone();
        b.title = "b".to_string();

        let err = MemoryItemStore::with_items(vec![a, b]).unwrap_err();
        assert!(matches!(err, StoreError::DuplicateId(1)));
    }
}
