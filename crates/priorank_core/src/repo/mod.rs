//! Persistence contracts and SQLite implementation for session state.
//!
//! # Responsibility
//! - Define the narrow load/save boundary the core session depends on.
//! - Isolate SQL details from store/rating/view logic.
//!
//! # Invariants
//! - `save` writes the full snapshot atomically or not at all.
//! - `load` re-validates persisted state instead of masking corruption.

pub mod state_repo;
