//! Creation and partial-update input shapes.
//!
//! # Responsibility
//! - Model the all-optional payloads accepted by store write operations.
//!
//! # Invariants
//! - `ItemPatch` carries no `id`, `kind` or `created_at` field, so those
//!   stay immutable by construction.

use crate::model::item::{ItemId, ItemType, Priority, Status, SubTask, TagRef};
use serde::{Deserialize, Serialize};

/// Creation input. Every field is optional; the store fills defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemDraft {
    /// Explicit identity seed. Honored when free, otherwise the store
    /// allocates from its counter.
    pub id: Option<ItemId>,
    #[serde(rename = "type")]
    pub kind: Option<ItemType>,
    pub title: Option<String>,
    pub content: Option<String>,
    pub tags: Vec<TagRef>,
    pub priority: Option<Priority>,
    pub status: Option<Status>,
    /// Unix epoch milliseconds.
    pub deadline: Option<i64>,
    #[serde(rename = "isPinned")]
    pub is_pinned: Option<bool>,
    /// Creation timestamp seed; defaults to the store's clock read.
    pub created_at: Option<i64>,
    #[serde(rename = "subTasks")]
    pub sub_tasks: Option<Vec<SubTask>>,
}

impl ItemDraft {
    /// Draft for a task with the given title.
    pub fn task(title: impl Into<String>) -> Self {
        Self {
            kind: Some(ItemType::Task),
            title: Some(title.into()),
            ..Self::default()
        }
    }

    /// Draft for a note with the given title and markdown body.
    pub fn note(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            kind: Some(ItemType::Note),
            title: Some(title.into()),
            content: Some(content.into()),
            ..Self::default()
        }
    }
}

/// Partial update. `None` fields are left unchanged by the merge.
///
/// The two nullable item fields use a second `Option` level so a patch
/// can distinguish "leave as is" (`None`) from "clear" (`Some(None)`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemPatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub tags: Option<Vec<TagRef>>,
    pub priority: Option<Priority>,
    pub status: Option<Status>,
    pub deadline: Option<Option<i64>>,
    pub is_pinned: Option<bool>,
    pub sub_tasks: Option<Option<Vec<SubTask>>>,
}

impl ItemPatch {
    /// Patch that only changes the workflow status.
    pub fn status(status: Status) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    /// Patch that only changes the pin flag.
    pub fn pinned(is_pinned: bool) -> Self {
        Self {
            is_pinned: Some(is_pinned),
            ..Self::default()
        }
    }
}
