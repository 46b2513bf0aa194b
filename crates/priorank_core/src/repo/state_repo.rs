//! State repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Round-trip the full multi-theme state: every item field (label, rating,
//!   wins, losses, plays) and the insertion order on both levels.
//! - Treat an empty (just-migrated) database as an empty store, so a first
//!   session starts cleanly.
//!
//! # Invariants
//! - `save` replaces the whole snapshot inside one transaction.
//! - `load` runs the same invariant checks as in-memory mutation paths.

use crate::db::DbError;
use crate::model::item::Item;
use crate::model::theme::Theme;
use crate::store::{RankStore, StoreError};
use log::info;
use rusqlite::{params, Connection};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Persistence-layer errors.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    /// Persisted state violates a store invariant (hydration refused).
    Store(StoreError),
    /// A persisted row holds a value no valid session could have written.
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Store(err) => write!(f, "invalid persisted state: {err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted state: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Store(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<StoreError> for RepoError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Load/save boundary for the full session state.
///
/// The storage format is opaque to the rest of the core; swapping SQLite for
/// another backend only touches implementations of this trait.
pub trait StateRepository {
    fn load(&self) -> RepoResult<RankStore>;
    fn save(&self, store: &RankStore) -> RepoResult<()>;
}

/// SQLite-backed state repository.
pub struct SqliteStateRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteStateRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl StateRepository for SqliteStateRepository<'_> {
    fn load(&self) -> RepoResult<RankStore> {
        let mut theme_stmt =
            self.conn
                .prepare("SELECT name FROM themes ORDER BY position ASC, name ASC;")?;
        let mut item_stmt = self.conn.prepare(
            "SELECT label, rating, wins, losses, plays
             FROM items
             WHERE theme = ?1
             ORDER BY position ASC, label ASC;",
        )?;

        let mut themes = Vec::new();
        let mut theme_rows = theme_stmt.query([])?;
        while let Some(theme_row) = theme_rows.next()? {
            let name: String = theme_row.get("name")?;

            let mut items = Vec::new();
            let mut item_rows = item_stmt.query(params![name])?;
            while let Some(row) = item_rows.next()? {
                let label: String = row.get("label")?;
                let rating: f64 = row.get("rating")?;
                let wins = counter_from_row(row.get("wins")?, &name, &label, "wins")?;
                let losses = counter_from_row(row.get("losses")?, &name, &label, "losses")?;
                let plays = counter_from_row(row.get("plays")?, &name, &label, "plays")?;
                items.push(Item {
                    label,
                    rating,
                    wins,
                    losses,
                    plays,
                });
            }

            themes.push(Theme::from_parts(name, items));
        }

        // from_themes re-runs every store invariant on the hydrated data.
        let store = RankStore::from_themes(themes)?;
        info!(
            "event=state_load module=repo status=ok themes={}",
            store.themes().len()
        );
        Ok(store)
    }

    fn save(&self, store: &RankStore) -> RepoResult<()> {
        let tx = self.conn.unchecked_transaction()?;

        tx.execute("DELETE FROM items;", [])?;
        tx.execute("DELETE FROM themes;", [])?;

        {
            let mut theme_stmt =
                tx.prepare("INSERT INTO themes (name, position) VALUES (?1, ?2);")?;
            let mut item_stmt = tx.prepare(
                "INSERT INTO items (theme, label, rating, wins, losses, plays, position)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7);",
            )?;

            for (theme_position, theme) in store.themes().iter().enumerate() {
                theme_stmt.execute(params![theme.name(), theme_position as i64])?;
                for (item_position, item) in theme.items().iter().enumerate() {
                    item_stmt.execute(params![
                        theme.name(),
                        item.label,
                        item.rating,
                        item.wins as i64,
                        item.losses as i64,
                        item.plays as i64,
                        item_position as i64,
                    ])?;
                }
            }
        }

        tx.commit()?;
        info!(
            "event=state_save module=repo status=ok themes={}",
            store.themes().len()
        );
        Ok(())
    }
}

fn counter_from_row(value: i64, theme: &str, label: &str, column: &str) -> RepoResult<u64> {
    u64::try_from(value).map_err(|_| {
        RepoError::InvalidData(format!(
            "negative {column} value `{value}` for item `{label}` in theme `{theme}`"
        ))
    })
}
