//! Core ranking engine for priorank.
//!
//! Maintains named themes of short text items and derives a relative
//! ranking within each theme from repeated binary comparisons: a
//! low-play-biased matchup selector, an ELO-style rating engine, and an
//! invariant-checked store persisted through a narrow load/save boundary.
//! This crate is the single source of truth for business invariants; the
//! CLI is presentation glue.

pub mod db;
pub mod logging;
pub mod matchup;
pub mod model;
pub mod rating;
pub mod repo;
pub mod service;
pub mod store;
pub mod view;

pub use db::{open_db, open_db_in_memory};
pub use logging::{default_log_level, init_logging};
pub use matchup::{next_pair, next_pair_with_rng, Matchup, MatchupError, Verdict};
pub use model::item::{Item, ItemValidationError, BASELINE_RATING, MAX_LABEL_CHARS};
pub use model::theme::{Theme, ThemeValidationError};
pub use rating::{apply_result, expected_score, RatingError, K_FACTOR};
pub use repo::state_repo::{RepoError, RepoResult, SqliteStateRepository, StateRepository};
pub use service::session::{RankSession, SessionError, SessionResult};
pub use store::{RankStore, StoreError, StoreResult};
pub use view::{build_view, RankRow, ViewError, MAX_BAR_UNITS, MIN_BAR_UNITS};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
