//! Authoritative in-memory multi-theme state.
//!
//! # Responsibility
//! - Hold every theme for the session and enforce cross-item invariants on
//!   all mutations.
//! - Provide the hydration entry point used by the persistence layer.
//!
//! # Invariants
//! - Theme names are unique (case-sensitive, post-trim).
//! - Item labels are unique within their theme (case-sensitive, post-trim).
//! - Mutators validate before mutating; a failed operation leaves the store
//!   untouched.

use crate::model::item::{Item, ItemValidationError};
use crate::model::theme::{validate_theme_name, Theme, ThemeValidationError};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StoreResult<T> = Result<T, StoreError>;

/// Errors from store mutations and lookups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    InvalidName(ThemeValidationError),
    InvalidLabel(ItemValidationError),
    DuplicateTheme(String),
    DuplicateItem { theme: String, label: String },
    ThemeNotFound(String),
    ItemNotFound { theme: String, label: String },
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidName(err) => write!(f, "{err}"),
            Self::InvalidLabel(err) => write!(f, "{err}"),
            Self::DuplicateTheme(name) => write!(f, "theme `{name}` already exists"),
            Self::DuplicateItem { theme, label } => {
                write!(f, "item `{label}` already exists in theme `{theme}`")
            }
            Self::ThemeNotFound(name) => write!(f, "theme not found: `{name}`"),
            Self::ItemNotFound { theme, label } => {
                write!(f, "item `{label}` not found in theme `{theme}`")
            }
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidName(err) => Some(err),
            Self::InvalidLabel(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ThemeValidationError> for StoreError {
    fn from(value: ThemeValidationError) -> Self {
        Self::InvalidName(value)
    }
}

impl From<ItemValidationError> for StoreError {
    fn from(value: ItemValidationError) -> Self {
        Self::InvalidLabel(value)
    }
}

/// The full multi-theme session state.
///
/// One explicit state object, hydrated at session start and flushed after
/// every mutation; no implicit globals.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RankStore {
    themes: Vec<Theme>,
}

impl RankStore {
    /// Creates an empty store (a fresh session with no persisted state).
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a store from persisted themes, re-checking every invariant.
    ///
    /// Hydration must reject invalid persisted state instead of masking it:
    /// duplicate theme names, duplicate labels within a theme, and items
    /// that fail field validation are all errors.
    pub fn from_themes(themes: Vec<Theme>) -> StoreResult<Self> {
        let mut names = HashSet::new();
        for theme in &themes {
            validate_theme_name(theme.name())?;
            if !names.insert(theme.name().to_string()) {
                return Err(StoreError::DuplicateTheme(theme.name().to_string()));
            }
            let mut labels = HashSet::new();
            for item in theme.items() {
                item.validate()?;
                if !labels.insert(item.label.as_str()) {
                    return Err(StoreError::DuplicateItem {
                        theme: theme.name().to_string(),
                        label: item.label.clone(),
                    });
                }
            }
        }
        Ok(Self { themes })
    }

    /// Themes in insertion order.
    pub fn themes(&self) -> &[Theme] {
        &self.themes
    }

    pub fn theme(&self, name: &str) -> StoreResult<&Theme> {
        self.themes
            .iter()
            .find(|theme| theme.name() == name)
            .ok_or_else(|| StoreError::ThemeNotFound(name.to_string()))
    }

    pub(crate) fn theme_mut(&mut self, name: &str) -> StoreResult<&mut Theme> {
        self.themes
            .iter_mut()
            .find(|theme| theme.name() == name)
            .ok_or_else(|| StoreError::ThemeNotFound(name.to_string()))
    }

    /// Creates a new empty theme with a unique, validated name.
    pub fn create_theme(&mut self, name: &str) -> StoreResult<()> {
        let theme = Theme::new(name)?;
        if self.themes.iter().any(|t| t.name() == theme.name()) {
            return Err(StoreError::DuplicateTheme(theme.name().to_string()));
        }
        self.themes.push(theme);
        Ok(())
    }

    /// Removes a theme and all of its items.
    pub fn remove_theme(&mut self, name: &str) -> StoreResult<()> {
        let before = self.themes.len();
        self.themes.retain(|theme| theme.name() != name);
        if self.themes.len() == before {
            return Err(StoreError::ThemeNotFound(name.to_string()));
        }
        Ok(())
    }

    /// Adds a fresh item (baseline rating, zeroed stats) to a theme.
    pub fn add_item(&mut self, theme_name: &str, label: &str) -> StoreResult<()> {
        let item = Item::new(label)?;
        let theme = self.theme_mut(theme_name)?;
        if theme.contains(&item.label) {
            return Err(StoreError::DuplicateItem {
                theme: theme_name.to_string(),
                label: item.label,
            });
        }
        theme.push_item(item);
        Ok(())
    }

    /// Removes an item from a theme by label.
    pub fn remove_item(&mut self, theme_name: &str, label: &str) -> StoreResult<()> {
        let theme = self.theme_mut(theme_name)?;
        if !theme.remove_item(label) {
            return Err(StoreError::ItemNotFound {
                theme: theme_name.to_string(),
                label: label.to_string(),
            });
        }
        Ok(())
    }
}
