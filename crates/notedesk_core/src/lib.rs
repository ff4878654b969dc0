//! Core domain logic for NoteDesk.
//! This crate is the single source of truth for the session's items.

pub mod logging;
pub mod model;
pub mod search;
pub mod service;
pub mod store;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::draft::{ItemDraft, ItemPatch};
pub use model::item::{
    Item, ItemId, ItemType, ItemValidationError, Priority, Status, SubTask, TagRef, DEFAULT_TITLE,
};
pub use search::{search_items, strip_markdown, SearchHit, SearchQuery};
pub use service::item_service::{ItemService, ServiceError};
pub use store::item_store::{
    BatchDelete, ItemListQuery, ItemStore, SortKey, SortOrder, StoreError, StoreResult,
};
pub use store::memory::MemoryItemStore;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
