//! ELO rating updates for decided comparisons.
//!
//! # Responsibility
//! - Turn one binary verdict into a symmetric rating exchange between
//!   exactly the two compared items.
//!
//! # Invariants
//! - The exchange is zero-sum: winner gains exactly what the loser gives up.
//! - Both items are mutated atomically; any failure leaves the theme
//!   untouched.
//! - `plays` stays derived from `wins + losses` on both sides.

use crate::model::theme::Theme;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Fixed volatility constant; bounds the maximum swing per comparison.
pub const K_FACTOR: f64 = 32.0;

/// Rating engine contract violations.
///
/// These indicate a defect in the caller (a degenerate pair from the
/// selector, or a label the store no longer holds), not user error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RatingError {
    /// Winner and loser reference the same item.
    SameItem(String),
    /// A referenced label is not present in the theme.
    UnknownItem { theme: String, label: String },
}

impl Display for RatingError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SameItem(label) => {
                write!(f, "cannot record a comparison of `{label}` against itself")
            }
            Self::UnknownItem { theme, label } => {
                write!(f, "item `{label}` is not part of theme `{theme}`")
            }
        }
    }
}

impl Error for RatingError {}

/// Expected score of an item rated `rating` against `opponent`.
pub fn expected_score(rating: f64, opponent: f64) -> f64 {
    1.0 / (1.0 + 10f64.powf((opponent - rating) / 400.0))
}

/// Applies one decided comparison to a theme.
///
/// Returns the number of rating points exchanged. The winner gains the
/// points, the loser loses the same amount, and each side's win/loss
/// counter advances by one.
pub fn apply_result(theme: &mut Theme, winner: &str, loser: &str) -> Result<f64, RatingError> {
    if winner == loser {
        return Err(RatingError::SameItem(winner.to_string()));
    }

    // Resolve both ratings before touching anything so a missing item
    // cannot leave a half-applied update behind.
    let winner_rating = lookup_rating(theme, winner)?;
    let loser_rating = lookup_rating(theme, loser)?;

    let delta = K_FACTOR * (1.0 - expected_score(winner_rating, loser_rating));

    // Presence of both labels was established above, so neither branch can
    // leave a half-applied update behind.
    if let Some(item) = theme.item_mut(winner) {
        item.apply_win(delta);
    }
    if let Some(item) = theme.item_mut(loser) {
        item.apply_loss(delta);
    }

    Ok(delta)
}

fn lookup_rating(theme: &Theme, label: &str) -> Result<f64, RatingError> {
    theme
        .item(label)
        .map(|item| item.rating)
        .ok_or_else(|| RatingError::UnknownItem {
            theme: theme.name().to_string(),
            label: label.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::{apply_result, expected_score, RatingError, K_FACTOR};
    use crate::model::item::BASELINE_RATING;
    use crate::model::theme::Theme;
    use crate::store::RankStore;

    const EPSILON: f64 = 1e-9;

    fn books_theme() -> Theme {
        let mut store = RankStore::new();
        store.create_theme("books").unwrap();
        store.add_item("books", "A").unwrap();
        store.add_item("books", "B").unwrap();
        store.theme("books").unwrap().clone()
    }

    #[test]
    fn expected_score_is_half_at_equal_ratings() {
        assert!((expected_score(1000.0, 1000.0) - 0.5).abs() < EPSILON);
    }

    #[test]
    fn expected_score_favors_higher_rating() {
        let strong = expected_score(1200.0, 1000.0);
        let weak = expected_score(1000.0, 1200.0);
        assert!(strong > 0.5);
        assert!((strong + weak - 1.0).abs() < EPSILON);
    }

    #[test]
    fn first_result_between_fresh_items_moves_half_k() {
        let mut theme = books_theme();
        let delta = apply_result(&mut theme, "A", "B").unwrap();
        assert!((delta - K_FACTOR * 0.5).abs() < EPSILON);

        let a = theme.item("A").unwrap();
        let b = theme.item("B").unwrap();
        assert!((a.rating - (BASELINE_RATING + 16.0)).abs() < EPSILON);
        assert!((b.rating - (BASELINE_RATING - 16.0)).abs() < EPSILON);
        assert_eq!((a.wins, a.losses, a.plays), (1, 0, 1));
        assert_eq!((b.wins, b.losses, b.plays), (0, 1, 1));
    }

    #[test]
    fn exchange_is_zero_sum() {
        let mut theme = books_theme();
        for _ in 0..50 {
            let before: f64 = theme.items().iter().map(|item| item.rating).sum();
            apply_result(&mut theme, "A", "B").unwrap();
            let after: f64 = theme.items().iter().map(|item| item.rating).sum();
            assert!((before - after).abs() < EPSILON);
        }
    }

    #[test]
    fn repeated_wins_move_ratings_monotonically() {
        let mut theme = books_theme();
        let mut last_a = theme.item("A").unwrap().rating;
        let mut last_b = theme.item("B").unwrap().rating;
        for _ in 0..200 {
            apply_result(&mut theme, "A", "B").unwrap();
            let a = theme.item("A").unwrap().rating;
            let b = theme.item("B").unwrap().rating;
            assert!(a > last_a);
            assert!(b < last_b);
            assert!(a.is_finite() && b.is_finite());
            last_a = a;
            last_b = b;
        }
    }

    #[test]
    fn same_item_is_rejected_without_mutation() {
        let mut theme = books_theme();
        let before = theme.clone();
        let err = apply_result(&mut theme, "A", "A").unwrap_err();
        assert_eq!(err, RatingError::SameItem("A".to_string()));
        assert_eq!(theme, before);
    }

    #[test]
    fn unknown_item_is_rejected_without_mutation() {
        let mut theme = books_theme();
        let before = theme.clone();
        let err = apply_result(&mut theme, "A", "ghost").unwrap_err();
        assert!(matches!(err, RatingError::UnknownItem { .. }));
        assert_eq!(theme, before);

        // Unknown winner must not touch the loser either.
        let err = apply_result(&mut theme, "ghost", "B").unwrap_err();
        assert!(matches!(err, RatingError::UnknownItem { .. }));
        assert_eq!(theme, before);
    }
}
