//! Item domain model.
//!
//! # Responsibility
//! - Define the canonical record shared by the note and task features.
//! - Provide field-level validation for store write paths.
//!
//! # Invariants
//! - `id` is stable and never reused for another item.
//! - `created_at` never changes after creation; `updated_at >= created_at`.
//! - `sub_tasks` is only populated on task-typed items.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Stable identifier for every item in a store.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type ItemId = i64;

/// Title used when creation input supplies none.
pub const DEFAULT_TITLE: &str = "Untitled";

/// Category of an item.
///
/// A single record shape serves both categories; `kind` partitions the
/// collection and is immutable after creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemType {
    /// Actionable task with status/priority workflow metadata.
    Task,
    /// Free-form markdown note.
    Note,
}

impl ItemType {
    /// Stable wire/log spelling of this kind.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Task => "task",
            Self::Note => "note",
        }
    }

    /// Parses the wire spelling; unknown values are rejected with `None`.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "task" => Some(Self::Task),
            "note" => Some(Self::Note),
            _ => None,
        }
    }
}

/// Item priority level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    High,
    Medium,
    Low,
    /// Explicitly unprioritized.
    None,
}

impl Priority {
    /// Stable wire/log spelling of this priority.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
            Self::None => "none",
        }
    }

    /// Parses the wire spelling; unknown values are rejected with `None`.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "high" => Some(Self::High),
            "medium" => Some(Self::Medium),
            "low" => Some(Self::Low),
            "none" => Some(Self::None),
            _ => None,
        }
    }

    /// Ordering weight for priority sorting. Higher urgency ranks higher.
    pub fn rank(self) -> u8 {
        match self {
            Self::High => 3,
            Self::Medium => 2,
            Self::Low => 1,
            Self::None => 0,
        }
    }
}

/// Item workflow status.
///
/// The store enforces no transition graph: any status may follow any
/// other. A stricter workflow belongs in a validation layer above the
/// store, not here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Todo,
    Doing,
    Done,
}

impl Status {
    /// Stable wire/log spelling of this status.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Todo => "todo",
            Self::Doing => "doing",
            Self::Done => "done",
        }
    }

    /// Parses the wire spelling; unknown values are rejected with `None`.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "todo" => Some(Self::Todo),
            "doing" => Some(Self::Doing),
            "done" => Some(Self::Done),
            _ => None,
        }
    }
}

/// Reference to a tag owned by an external tag registry.
///
/// Items record associations only; the store never creates or deletes
/// tags, and deleting an item does not cascade to its tags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagRef {
    pub id: i64,
    pub name: String,
    pub color: String,
}

/// Checklist entry nested under a task-typed item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubTask {
    pub id: i64,
    pub title: String,
    pub done: bool,
}

/// Canonical record for note/task data.
///
/// Optional task-only fields keep one storage shape serving both
/// features without data copying.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Store-allocated, unique across the whole collection.
    pub id: ItemId,
    /// Serialized as `type` to match external schema naming.
    #[serde(rename = "type")]
    pub kind: ItemType,
    pub title: String,
    /// Markdown body.
    pub content: String,
    /// Ordered tag associations; referenced, not owned.
    pub tags: Vec<TagRef>,
    pub priority: Priority,
    pub status: Status,
    /// Unix epoch milliseconds.
    pub deadline: Option<i64>,
    /// Pinned items sort before unpinned items of the same kind.
    #[serde(rename = "isPinned")]
    pub is_pinned: bool,
    /// Unix epoch milliseconds, set once at creation.
    pub created_at: i64,
    /// Unix epoch milliseconds, refreshed on every mutation.
    pub updated_at: i64,
    /// Only meaningful when `kind == ItemType::Task`.
    #[serde(rename = "subTasks", default, skip_serializing_if = "Option::is_none")]
    pub sub_tasks: Option<Vec<SubTask>>,
}

impl Item {
    /// Refreshes `updated_at` for a mutation at `now_ms`.
    ///
    /// Clamped so `updated_at` never falls behind `created_at`, even when
    /// the item was seeded with a future creation timestamp.
    pub fn touch(&mut self, now_ms: i64) {
        self.updated_at = now_ms.max(self.created_at);
    }

    pub fn is_task(&self) -> bool {
        self.kind == ItemType::Task
    }

    pub fn is_note(&self) -> bool {
        self.kind == ItemType::Note
    }

    /// Checks field-level invariants.
    ///
    /// Store write paths call this before committing a create or a merged
    /// update, so an invalid input never reaches the collection.
    pub fn validate(&self) -> Result<(), ItemValidationError> {
        if self.updated_at < self.created_at {
            return Err(ItemValidationError::TimestampOrder {
                created_at: self.created_at,
                updated_at: self.updated_at,
            });
        }
        for tag in &self.tags {
            if tag.name.trim().is_empty() {
                return Err(ItemValidationError::EmptyTagName { tag_id: tag.id });
            }
        }
        if self.is_note() && self.sub_tasks.is_some() {
            return Err(ItemValidationError::SubTasksOnNote { id: self.id });
        }
        Ok(())
    }
}

/// Field-level validation failure for item write paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemValidationError {
    /// `updated_at` must not fall behind `created_at`.
    TimestampOrder { created_at: i64, updated_at: i64 },
    /// Tag references must carry a non-blank name.
    EmptyTagName { tag_id: i64 },
    /// Sub-tasks are a task-only projection.
    SubTasksOnNote { id: ItemId },
}

impl Display for ItemValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TimestampOrder {
                created_at,
                updated_at,
            } => write!(
                f,
                "updated_at {updated_at} is earlier than created_at {created_at}"
            ),
            Self::EmptyTagName { tag_id } => {
                write!(f, "tag {tag_id} has an empty name")
            }
            Self::SubTasksOnNote { id } => {
                write!(f, "item {id} is a note and cannot carry sub-tasks")
            }
        }
    }
}

impl Error for ItemValidationError {}
