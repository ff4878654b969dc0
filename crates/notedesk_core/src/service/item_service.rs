//! Item use-case service.
//!
//! # Responsibility
//! - Provide the entry points a client UI calls: create task/note,
//!   toggle pin, replace tags, mark done, plus read passthroughs.
//! - Normalize tag input before it reaches the store.
//!
//! # Invariants
//! - Tag names are trimmed, lowercased and deduplicated by id; blank
//!   names are rejected before the store is touched.
//! - The service never bypasses store validation.

use crate::model::draft::{ItemDraft, ItemPatch};
use crate::model::item::{Item, ItemId, ItemType, Status, TagRef};
use crate::search::{SearchHit, SearchQuery};
use crate::store::item_store::{ItemListQuery, ItemStore, StoreError, StoreResult};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for item use-cases.
#[derive(Debug)]
pub enum ServiceError {
    /// Tag input carries a blank name.
    InvalidTag(String),
    /// Store-layer failure.
    Store(StoreError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidTag(value) => write!(f, "invalid tag name: `{value}`"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidTag(_) => None,
            Self::Store(err) => Some(err),
        }
    }
}

impl From<StoreError> for ServiceError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Use-case facade over any [`ItemStore`] implementation.
pub struct ItemService<S: ItemStore> {
    store: S,
}

impl<S: ItemStore> ItemService<S> {
    /// Creates a service using the provided store implementation.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Creates a task item. A blank title falls through to the store's
    /// placeholder default.
    pub fn create_task(&mut self, title: impl Into<String>) -> Result<Item, ServiceError> {
        let draft = ItemDraft {
            kind: Some(ItemType::Task),
            title: non_blank(title.into()),
            ..ItemDraft::default()
        };
        Ok(self.store.create(draft)?)
    }

    /// Creates a note item from a title and markdown body.
    pub fn create_note(
        &mut self,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> Result<Item, ServiceError> {
        let draft = ItemDraft {
            kind: Some(ItemType::Note),
            title: non_blank(title.into()),
            content: Some(content.into()),
            ..ItemDraft::default()
        };
        Ok(self.store.create(draft)?)
    }

    /// Replaces an item's tags with normalized input.
    ///
    /// # Contract
    /// - Names are trimmed and lowercased.
    /// - Duplicate tag ids collapse to their first occurrence.
    /// - A blank name rejects the whole call; the store stays untouched.
    pub fn replace_tags(
        &mut self,
        id: ItemId,
        tags: Vec<TagRef>,
    ) -> Result<Option<Item>, ServiceError> {
        let normalized = normalize_tags(tags)?;
        Ok(self.store.set_tags(id, normalized)?)
    }

    /// Flips an item's pin flag. Unknown ids yield `Ok(None)`.
    pub fn toggle_pin(&mut self, id: ItemId) -> Result<Option<Item>, ServiceError> {
        Ok(self.store.toggle_pin(id)?)
    }

    /// Moves an item's status to `done`. Unknown ids yield `Ok(None)`.
    pub fn mark_done(&mut self, id: ItemId) -> Result<Option<Item>, ServiceError> {
        Ok(self.store.update(id, &ItemPatch::status(Status::Done))?)
    }

    /// Canonical per-kind view passthrough.
    pub fn list(&self, kind: ItemType) -> StoreResult<Vec<Item>> {
        self.store.list(kind)
    }

    /// Filtered view passthrough.
    pub fn query(&self, query: &ItemListQuery) -> StoreResult<Vec<Item>> {
        self.store.query(query)
    }

    /// Single item passthrough.
    pub fn get(&self, id: ItemId) -> StoreResult<Option<Item>> {
        self.store.get(id)
    }

    /// Keyword search passthrough.
    pub fn search(&self, query: &SearchQuery) -> StoreResult<Vec<SearchHit>> {
        self.store.search(query)
    }
}

fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Normalizes and deduplicates tag references.
pub fn normalize_tags(tags: Vec<TagRef>) -> Result<Vec<TagRef>, ServiceError> {
    let mut normalized: Vec<TagRef> = Vec::with_capacity(tags.len());
    for tag in tags {
        let name = tag.name.trim().to_lowercase();
        if name.is_empty() {
            return Err(ServiceError::InvalidTag(tag.name));
        }
        if normalized.iter().any(|seen| seen.id == tag.id) {
            continue;
        }
        normalized.push(TagRef {
            id: tag.id,
            name,
            color: tag.color,
        });
    }
    Ok(normalized)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tag(id: i64, name: &str) -> TagRef {
        TagRef {
            id,
            name: name.to_string(),
            color: "#888888".to_string(),
        }
    }

    #[test]
    fn normalize_tags_trims_lowercases_and_dedupes() {
        let tags = vec![tag(1, "  Study "), tag(2, "WORK"), tag(1, "study")];
        let normalized = normalize_tags(tags).unwrap();
        assert_eq!(normalized.len(), 2);
        assert_eq!(normalized[0].name, "study");
        assert_eq!(normalized[1].name, "work");
    }

    #[test]
    fn normalize_tags_rejects_blank_name() {
        let err = normalize_tags(vec![tag(1, "   ")]).unwrap_err();
        assert!(matches!(err, ServiceError::InvalidTag(_)));
    }
}
