//! Display-ready ranking views.
//!
//! # Responsibility
//! - Turn a theme snapshot into an ordered, render-friendly sequence.
//!
//! # Invariants
//! - Read-only: building a view never mutates the store.
//! - Rows are sorted by rating descending; exact ties keep insertion order,
//!   so repeated views of an unchanged theme are identical.

use crate::model::theme::Theme;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Bar length of the top-ranked item, in display units.
pub const MAX_BAR_UNITS: u32 = 20;

/// Minimum bar length; keeps low-rated items visible.
pub const MIN_BAR_UNITS: u32 = 1;

/// One row of a ranking view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankRow {
    pub label: String,
    pub rating: f64,
    pub wins: u64,
    pub losses: u64,
    pub plays: u64,
    /// Normalized visual magnitude, `MIN_BAR_UNITS..=MAX_BAR_UNITS`.
    pub bar_units: u32,
}

/// View construction failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewError {
    /// The theme holds no items, so there is nothing to rank.
    EmptyTheme(String),
}

impl Display for ViewError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTheme(name) => write!(f, "theme `{name}` has no items to rank"),
        }
    }
}

impl Error for ViewError {}

/// Builds the ranking view for a theme.
///
/// The top-ranked item sets the reference bar length; every other bar is
/// proportional to its rating relative to the top, clamped so it never
/// disappears. A non-positive top rating degenerates to minimum-width bars
/// below the top.
pub fn build_view(theme: &Theme) -> Result<Vec<RankRow>, ViewError> {
    if theme.is_empty() {
        return Err(ViewError::EmptyTheme(theme.name().to_string()));
    }

    let mut ordered: Vec<_> = theme.items().iter().collect();
    // sort_by is stable: equal ratings keep insertion order.
    ordered.sort_by(|a, b| b.rating.total_cmp(&a.rating));

    let top_rating = ordered[0].rating;
    let rows = ordered
        .into_iter()
        .enumerate()
        .map(|(rank, item)| {
            let bar_units = if rank == 0 {
                MAX_BAR_UNITS
            } else {
                scale_bar(item.rating, top_rating)
            };
            RankRow {
                label: item.label.clone(),
                rating: item.rating,
                wins: item.wins,
                losses: item.losses,
                plays: item.plays,
                bar_units,
            }
        })
        .collect();

    Ok(rows)
}

fn scale_bar(rating: f64, top_rating: f64) -> u32 {
    if top_rating <= 0.0 {
        return MIN_BAR_UNITS;
    }
    let scaled = (rating / top_rating * f64::from(MAX_BAR_UNITS)).round();
    scaled.clamp(f64::from(MIN_BAR_UNITS), f64::from(MAX_BAR_UNITS)) as u32
}
