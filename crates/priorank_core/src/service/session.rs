//! Ranking session orchestration.
//!
//! # Responsibility
//! - Own the hydrated state for one session: load at start, flush after
//!   every mutation, discard at end.
//! - Expose the narrow API the presentation layer calls into.
//!
//! # Invariants
//! - Read paths (`next_matchup`, `rankings`, listing) never write.
//! - Every mutating call flushes the full state before returning `Ok`.
//! - A verdict that is never recorded (user aborts the prompt) leaves the
//!   store untouched.

use crate::matchup::{self, Matchup, MatchupError, Verdict};
use crate::rating::{self, RatingError};
use crate::repo::state_repo::{RepoError, StateRepository};
use crate::store::{RankStore, StoreError};
use crate::view::{self, RankRow, ViewError};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type SessionResult<T> = Result<T, SessionError>;

/// Aggregated error type for session-level operations.
#[derive(Debug)]
pub enum SessionError {
    Store(StoreError),
    Repo(RepoError),
    Matchup(MatchupError),
    Rating(RatingError),
    View(ViewError),
}

impl Display for SessionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Store(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
            Self::Matchup(err) => write!(f, "{err}"),
            Self::Rating(err) => write!(f, "{err}"),
            Self::View(err) => write!(f, "{err}"),
        }
    }
}

impl Error for SessionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            Self::Repo(err) => Some(err),
            Self::Matchup(err) => Some(err),
            Self::Rating(err) => Some(err),
            Self::View(err) => Some(err),
        }
    }
}

impl From<StoreError> for SessionError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

impl From<RepoError> for SessionError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

impl From<MatchupError> for SessionError {
    fn from(value: MatchupError) -> Self {
        Self::Matchup(value)
    }
}

impl From<RatingError> for SessionError {
    fn from(value: RatingError) -> Self {
        Self::Rating(value)
    }
}

impl From<ViewError> for SessionError {
    fn from(value: ViewError) -> Self {
        Self::View(value)
    }
}

/// One ranking session over a hydrated state snapshot.
///
/// The session keeps the authoritative in-memory store and flushes it
/// through the repository after each mutating operation. If a flush fails
/// the in-memory mutation is kept and the error surfaced; the presentation
/// layer decides whether to retry or continue in-memory.
pub struct RankSession<R: StateRepository> {
    store: RankStore,
    repo: R,
}

impl<R: StateRepository> RankSession<R> {
    /// Hydrates a session from persisted state.
    ///
    /// A repository with no persisted themes yields an empty session.
    pub fn hydrate(repo: R) -> SessionResult<Self> {
        let store = repo.load()?;
        info!(
            "event=session_hydrate module=service status=ok themes={}",
            store.themes().len()
        );
        Ok(Self { store, repo })
    }

    /// Read-only access to the hydrated state.
    pub fn store(&self) -> &RankStore {
        &self.store
    }

    /// Theme names with item counts, in insertion order.
    pub fn theme_summaries(&self) -> Vec<(String, usize)> {
        self.store
            .themes()
            .iter()
            .map(|theme| (theme.name().to_string(), theme.len()))
            .collect()
    }

    pub fn create_theme(&mut self, name: &str) -> SessionResult<()> {
        self.store.create_theme(name)?;
        self.flush("create_theme")
    }

    pub fn remove_theme(&mut self, name: &str) -> SessionResult<()> {
        self.store.remove_theme(name)?;
        self.flush("remove_theme")
    }

    pub fn add_item(&mut self, theme: &str, label: &str) -> SessionResult<()> {
        self.store.add_item(theme, label)?;
        self.flush("add_item")
    }

    pub fn remove_item(&mut self, theme: &str, label: &str) -> SessionResult<()> {
        self.store.remove_item(theme, label)?;
        self.flush("remove_item")
    }

    /// Picks the next pair to present for a theme. Read-only.
    pub fn next_matchup(&self, theme: &str) -> SessionResult<Matchup> {
        let theme = self.store.theme(theme)?;
        Ok(matchup::next_pair(theme)?)
    }

    /// Records a decided comparison and flushes the updated ratings.
    ///
    /// Returns the number of rating points exchanged.
    pub fn record_verdict(
        &mut self,
        theme_name: &str,
        matchup: &Matchup,
        verdict: Verdict,
    ) -> SessionResult<f64> {
        let (winner, loser) = match verdict {
            Verdict::Left => (matchup.left.as_str(), matchup.right.as_str()),
            Verdict::Right => (matchup.right.as_str(), matchup.left.as_str()),
        };

        let theme = self.store.theme_mut(theme_name)?;
        let exchanged = rating::apply_result(theme, winner, loser)?;
        info!(
            "event=record_verdict module=service status=ok theme={theme_name} exchanged={exchanged:.2}"
        );
        self.flush("record_verdict")?;
        Ok(exchanged)
    }

    /// Builds the display-ready ranking for a theme. Read-only.
    pub fn rankings(&self, theme: &str) -> SessionResult<Vec<RankRow>> {
        let theme = self.store.theme(theme)?;
        Ok(view::build_view(theme)?)
    }

    fn flush(&self, operation: &str) -> SessionResult<()> {
        match self.repo.save(&self.store) {
            Ok(()) => Ok(()),
            Err(err) => {
                warn!("event=state_flush module=service status=error op={operation} error={err}");
                Err(err.into())
            }
        }
    }
}
