//! Matchup selection for comparison prompts.
//!
//! # Responsibility
//! - Pick the next pair of distinct items to present for a theme.
//!
//! # Invariants
//! - A theme with fewer than two items never produces a matchup.
//! - The two selected items are always distinct.
//!
//! Two-stage policy: the first participant is drawn uniformly from the items
//! tied for the lowest `plays` (so newly added items are not starved), the
//! second uniformly from everything else regardless of play count (so the
//! comparison mix stays varied). Left/right assignment is randomized per
//! call to avoid positional bias in the user's choices.

use crate::model::theme::Theme;
use rand::Rng;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// An ordered pair of distinct item labels to present to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matchup {
    pub left: String,
    pub right: String,
}

/// The user's binary choice between the two presented items.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Left,
    Right,
}

/// Selection failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchupError {
    /// The theme does not hold enough items to form a pair.
    InsufficientItems { available: usize },
}

impl Display for MatchupError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InsufficientItems { available } => write!(
                f,
                "need at least 2 items to pick a matchup, theme has {available}"
            ),
        }
    }
}

impl Error for MatchupError {}

/// Picks the next matchup using the process-wide RNG.
pub fn next_pair(theme: &Theme) -> Result<Matchup, MatchupError> {
    let mut rng = rand::rng();
    next_pair_with_rng(theme, &mut rng)
}

/// Picks the next matchup from an injected random source.
///
/// Tests pass a seeded RNG to assert exact selection outcomes.
pub fn next_pair_with_rng<R: Rng>(theme: &Theme, rng: &mut R) -> Result<Matchup, MatchupError> {
    let items = theme.items();
    if items.len() < 2 {
        return Err(MatchupError::InsufficientItems {
            available: items.len(),
        });
    }

    let min_plays = items.iter().map(|item| item.plays).min().unwrap_or(0);
    let low_play: Vec<usize> = items
        .iter()
        .enumerate()
        .filter(|(_, item)| item.plays == min_plays)
        .map(|(index, _)| index)
        .collect();
    let first = low_play[rng.random_range(0..low_play.len())];

    // Second pick is uniform over the rest, independent of play count.
    let rest: Vec<usize> = (0..items.len()).filter(|&index| index != first).collect();
    let second = rest[rng.random_range(0..rest.len())];

    let (left, right) = if rng.random::<f64>() < 0.5 {
        (first, second)
    } else {
        (second, first)
    };

    Ok(Matchup {
        left: items[left].label.clone(),
        right: items[right].label.clone(),
    })
}
