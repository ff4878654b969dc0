//! Use-case services.
//!
//! # Responsibility
//! - Orchestrate store calls into use-case level APIs.
//! - Keep UI layers decoupled from store details.

pub mod item_service;
