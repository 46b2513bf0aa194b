//! Domain model for themes and their rankable items.
//!
//! # Responsibility
//! - Define the canonical data shapes shared by store, rating and view code.
//! - Own field-level validation so every layer can re-check invariants.
//!
//! # Invariants
//! - Item labels are 1..=100 characters after trimming.
//! - `plays == wins + losses` for every item.
//! - Ratings are finite.

pub mod item;
pub mod theme;
