//! Item domain model.
//!
//! # Responsibility
//! - Represent one rankable entry: label plus rating and play statistics.
//! - Provide the validation used on user input and on persisted state.
//!
//! # Invariants
//! - `label` is non-empty and at most `MAX_LABEL_CHARS` characters post-trim.
//! - `plays == wins + losses` at all times.
//! - `rating` is finite; only the rating engine mutates it.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Rating every item starts from.
pub const BASELINE_RATING: f64 = 1000.0;

/// Maximum label length in characters, after trimming.
pub const MAX_LABEL_CHARS: usize = 100;

/// Validation failures for item fields and statistics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemValidationError {
    /// Label is empty after trimming leading/trailing whitespace.
    EmptyLabel,
    /// Label exceeds `MAX_LABEL_CHARS` after trimming.
    LabelTooLong { length: usize },
    /// Persisted statistics disagree with `plays == wins + losses`.
    StatsMismatch { wins: u64, losses: u64, plays: u64 },
    /// Rating is NaN or infinite.
    NonFiniteRating,
}

impl Display for ItemValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyLabel => write!(f, "item label cannot be empty"),
            Self::LabelTooLong { length } => write!(
                f,
                "item label is {length} characters, maximum is {MAX_LABEL_CHARS}"
            ),
            Self::StatsMismatch {
                wins,
                losses,
                plays,
            } => write!(
                f,
                "item statistics are inconsistent: plays={plays} but wins={wins} + losses={losses}"
            ),
            Self::NonFiniteRating => write!(f, "item rating must be a finite number"),
        }
    }
}

impl Error for ItemValidationError {}

/// One rankable entry within a theme.
///
/// Statistics are mutated exclusively through `apply_win`/`apply_loss`, which
/// keep `plays` derived from `wins + losses`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub label: String,
    pub rating: f64,
    pub wins: u64,
    pub losses: u64,
    pub plays: u64,
}

impl Item {
    /// Creates a fresh item at the baseline rating with zeroed statistics.
    ///
    /// The label is trimmed before validation, so `"  coffee  "` and
    /// `"coffee"` are the same item.
    pub fn new(label: &str) -> Result<Self, ItemValidationError> {
        let label = validate_label(label)?;
        Ok(Self {
            label,
            rating: BASELINE_RATING,
            wins: 0,
            losses: 0,
            plays: 0,
        })
    }

    /// Re-checks every item invariant.
    ///
    /// Used by hydration paths to reject invalid persisted state instead of
    /// masking it.
    pub fn validate(&self) -> Result<(), ItemValidationError> {
        validate_label(&self.label)?;
        if self.plays != self.wins + self.losses {
            return Err(ItemValidationError::StatsMismatch {
                wins: self.wins,
                losses: self.losses,
                plays: self.plays,
            });
        }
        if !self.rating.is_finite() {
            return Err(ItemValidationError::NonFiniteRating);
        }
        Ok(())
    }

    /// Records a won comparison: rating goes up by `delta`.
    pub(crate) fn apply_win(&mut self, delta: f64) {
        self.rating += delta;
        self.wins += 1;
        self.plays = self.wins + self.losses;
    }

    /// Records a lost comparison: rating goes down by `delta`.
    pub(crate) fn apply_loss(&mut self, delta: f64) {
        self.rating -= delta;
        self.losses += 1;
        self.plays = self.wins + self.losses;
    }
}

/// Trims and validates a label, returning the canonical form.
pub fn validate_label(label: &str) -> Result<String, ItemValidationError> {
    let trimmed = label.trim();
    if trimmed.is_empty() {
        return Err(ItemValidationError::EmptyLabel);
    }
    let length = trimmed.chars().count();
    if length > MAX_LABEL_CHARS {
        return Err(ItemValidationError::LabelTooLong { length });
    }
    Ok(trimmed.to_string())
}
