//! Theme domain model.
//!
//! # Responsibility
//! - Hold one named, insertion-ordered collection of items.
//! - Keep item lookup by label in one place.
//!
//! # Invariants
//! - `name` is non-empty after trimming.
//! - Item labels are unique within a theme (case-sensitive, post-trim);
//!   enforced by the store mutators, re-checked on hydration.
//! - Insertion order of `items` is preserved; the view builder relies on it
//!   for stable tie-breaking.

use super::item::Item;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Validation failures for theme-level fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ThemeValidationError {
    /// Theme name is empty after trimming.
    EmptyName,
}

impl Display for ThemeValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "theme name cannot be empty"),
        }
    }
}

impl Error for ThemeValidationError {}

/// A named, independently ranked collection of items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    name: String,
    items: Vec<Item>,
}

impl Theme {
    /// Creates an empty theme with a trimmed, validated name.
    pub fn new(name: &str) -> Result<Self, ThemeValidationError> {
        let name = validate_theme_name(name)?;
        Ok(Self {
            name,
            items: Vec::new(),
        })
    }

    /// Rebuilds a theme from persisted parts without re-checking label
    /// uniqueness; hydration callers must validate via the store.
    pub(crate) fn from_parts(name: String, items: Vec<Item>) -> Self {
        Self { name, items }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Items in insertion order.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn item(&self, label: &str) -> Option<&Item> {
        self.items.iter().find(|item| item.label == label)
    }

    pub(crate) fn item_mut(&mut self, label: &str) -> Option<&mut Item> {
        self.items.iter_mut().find(|item| item.label == label)
    }

    pub fn contains(&self, label: &str) -> bool {
        self.item(label).is_some()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Appends an item; caller is responsible for the uniqueness check.
    pub(crate) fn push_item(&mut self, item: Item) {
        self.items.push(item);
    }

    /// Removes an item by label, returning whether it existed.
    pub(crate) fn remove_item(&mut self, label: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.label != label);
        self.items.len() != before
    }
}

/// Trims and validates a theme name, returning the canonical form.
pub fn validate_theme_name(name: &str) -> Result<String, ThemeValidationError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ThemeValidationError::EmptyName);
    }
    Ok(trimmed.to_string())
}
