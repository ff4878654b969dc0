//! Item store contract and in-memory implementation.
//!
//! # Responsibility
//! - Define the use-case oriented store contract the client layers call.
//! - Provide the volatile in-memory implementation that owns the
//!   session's collection.
//!
//! # Invariants
//! - Ids are unique across the collection and never reused.
//! - Absence of an id is an expected condition, never an error.
//! - Every returned view is freshly computed and owned by the caller.

pub mod item_store;
pub mod memory;
