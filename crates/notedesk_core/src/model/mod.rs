//! Unified domain model for note/task records.
//!
//! # Responsibility
//! - Define the canonical item shape shared by the note and task features.
//! - Keep one record type for both kinds so list/search/mutation logic is
//!   written once.
//!
//! # Invariants
//! - Every item is identified by a stable integer `ItemId`.
//! - `created_at` is set once; `updated_at` never falls behind it.

pub mod draft;
pub mod item;
