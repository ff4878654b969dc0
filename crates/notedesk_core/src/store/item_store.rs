//! Item store contract.
//!
//! # Responsibility
//! - Define the operation surface shared by the in-memory store and any
//!   substituted backend (for example a REST-mapped store).
//! - Keep error semantics explicit: missing ids are quiet results,
//!   invalid field input is a typed rejection.
//!
//! # Invariants
//! - `update`/`delete` on an unknown id are no-ops, not faults.
//! - Every list/query result honors the pin-partition sort contract.

use crate::model::draft::{ItemDraft, ItemPatch};
use crate::model::item::{Item, ItemId, ItemType, ItemValidationError, TagRef};
use crate::search::{SearchHit, SearchQuery};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StoreResult<T> = Result<T, StoreError>;

/// Error surface of store operations.
#[derive(Debug)]
pub enum StoreError {
    /// Field-level validation failed; the collection was not touched.
    Validation(ItemValidationError),
    /// Seed data carried the same id twice.
    DuplicateId(ItemId),
    /// Transport or storage failure in a non-memory implementation.
    Backend(String),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::DuplicateId(id) => write!(f, "duplicate item id: {id}"),
            Self::Backend(message) => write!(f, "store backend failure: {message}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::DuplicateId(_) => None,
            Self::Backend(_) => None,
        }
    }
}

impl From<ItemValidationError> for StoreError {
    fn from(value: ItemValidationError) -> Self {
        Self::Validation(value)
    }
}

/// Sort key for list queries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortKey {
    #[default]
    CreatedAt,
    UpdatedAt,
    /// Items without a deadline sort as if infinitely far away.
    Deadline,
    /// Natural order is by urgency (`high` ranks above `none`).
    Priority,
}

/// Sort direction for list queries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

/// Options for listing items.
///
/// Defaults reproduce the canonical view: no filters, newest first.
/// The pin partition stays primary for every key and direction.
#[derive(Debug, Clone, Default)]
pub struct ItemListQuery {
    pub kind: Option<ItemType>,
    pub pinned: Option<bool>,
    /// Keep only items referencing this tag id.
    pub tag: Option<i64>,
    /// Case-insensitive title/content filter. Blank means no filter.
    pub text: Option<String>,
    pub sort_by: SortKey,
    pub order: SortOrder,
}

impl ItemListQuery {
    /// Query for the canonical per-kind view.
    pub fn of_kind(kind: ItemType) -> Self {
        Self {
            kind: Some(kind),
            ..Self::default()
        }
    }
}

/// Outcome counts of a batch delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchDelete {
    pub requested: usize,
    pub deleted: usize,
}

/// Store contract for item CRUD, views and search.
///
/// The in-memory implementation never fails outside validation; the
/// `Result` surface exists so a networked implementation can report
/// transport failures through the same seam.
pub trait ItemStore {
    /// Canonical view of one kind: pinned before unpinned, then
    /// `created_at` descending within each pin partition. Recomputed on
    /// every call; never cached.
    fn list(&self, kind: ItemType) -> StoreResult<Vec<Item>>;

    /// Filtered/sorted view. See [`ItemListQuery`].
    fn query(&self, query: &ItemListQuery) -> StoreResult<Vec<Item>>;

    /// Single item lookup. Unknown ids yield `Ok(None)`.
    fn get(&self, id: ItemId) -> StoreResult<Option<Item>>;

    /// Keyword search over title and content.
    fn search(&self, query: &SearchQuery) -> StoreResult<Vec<SearchHit>>;

    /// Creates an item, filling defaults for absent draft fields and
    /// allocating identity. Returns the fully materialized item.
    fn create(&mut self, draft: ItemDraft) -> StoreResult<Item>;

    /// Merges supplied patch fields onto the item and refreshes
    /// `updated_at`. Unknown ids yield `Ok(None)` and leave the store
    /// unchanged; an invalid merge result is rejected without commit.
    fn update(&mut self, id: ItemId, patch: &ItemPatch) -> StoreResult<Option<Item>>;

    /// Flips the pin flag. Unknown ids yield `Ok(None)`.
    fn toggle_pin(&mut self, id: ItemId) -> StoreResult<Option<Item>>;

    /// Replaces the item's tag associations. Unknown ids yield `Ok(None)`.
    fn set_tags(&mut self, id: ItemId, tags: Vec<TagRef>) -> StoreResult<Option<Item>>;

    /// Removes the item if present. Returns whether something was
    /// removed; deleting an unknown id is a quiet no-op.
    fn delete(&mut self, id: ItemId) -> StoreResult<bool>;

    /// Deletes each listed id, skipping absent ones.
    fn batch_delete(&mut self, ids: &[ItemId]) -> StoreResult<BatchDelete>;
}
