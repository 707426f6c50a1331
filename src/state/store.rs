use rusqlite::{params, Connection, OptionalExtension};
use std::path::{Path, PathBuf};

use super::data::{PathParam, RecipeRow};
use crate::error::Result;

/// The RecipeStore owns the SQLite catalog database.
/// It holds one table of recipes and hands back raw rows; turning those rows
/// into `Recipe` values is the repository's job.
///
/// Every write is a single statement on an autocommit connection, so it is
/// durable by the time the call returns.
pub struct RecipeStore {
    conn: Connection,
    db_path: PathBuf,
}

impl RecipeStore {
    /// Open (or create) the catalog at `db_path` and make sure the schema exists.
    ///
    /// The parent directory is created if it is missing. Opening an existing
    /// catalog leaves its rows untouched.
    pub fn open(db_path: impl AsRef<Path>) -> Result<Self> {
        let db_path = db_path.as_ref().to_path_buf();

        // Ensure the parent directory exists
        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(&db_path)?;

        tracing::info!("📁 Database initialized at: {}", db_path.display());

        let store = RecipeStore { conn, db_path };
        store.initialize()?;

        Ok(store)
    }

    /// Open a private in-memory catalog with the same schema
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = RecipeStore {
            conn,
            db_path: PathBuf::from(":memory:"),
        };
        store.initialize()?;
        Ok(store)
    }

    /// Create the recipes table if it doesn't exist.
    /// Safe to run against a populated catalog.
    pub fn initialize(&self) -> Result<()> {
        // AUTOINCREMENT keeps ids monotonic: a deleted id is never handed out again
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS recipes (
                id              INTEGER PRIMARY KEY AUTOINCREMENT,
                title           TEXT NOT NULL,
                ingredients     TEXT,
                instructions    TEXT,
                image_path      TEXT
            )",
            [],
        )?;

        tracing::debug!("✅ Database schema initialized");

        Ok(())
    }

    /// Get the path to the database file
    pub fn path(&self) -> &PathBuf {
        &self.db_path
    }

    /// Get a count of recipes in the catalog
    pub fn count(&self) -> Result<i64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM recipes", [], |row| row.get(0))?;
        Ok(count)
    }

    /// Insert a new recipe row.
    /// Returns the id assigned by SQLite.
    pub fn insert(
        &self,
        title: &str,
        ingredients: &str,
        instructions: &str,
        image_path: Option<&Path>,
    ) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO recipes (title, ingredients, instructions, image_path)
             VALUES (?1, ?2, ?3, ?4)",
            params![title, ingredients, instructions, image_path.map(PathParam)],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    /// Get all rows in insertion order
    pub fn fetch_all(&self) -> Result<Vec<RecipeRow>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {} FROM recipes ORDER BY id",
            RecipeRow::COLUMNS
        ))?;

        let row_iter = stmt.query_map([], RecipeRow::from_row)?;

        let mut rows = Vec::new();
        for row in row_iter {
            rows.push(row?);
        }

        Ok(rows)
    }

    /// Primary-key lookup of a single row
    pub fn fetch_by_id(&self, id: i64) -> Result<Option<RecipeRow>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {} FROM recipes WHERE id = ?1",
            RecipeRow::COLUMNS
        ))?;

        let row = stmt.query_row([id], RecipeRow::from_row).optional()?;
        Ok(row)
    }

    /// Overwrite every column of the row with this id.
    /// Returns false when no such row exists (nothing is written).
    pub fn update(
        &self,
        id: i64,
        title: &str,
        ingredients: &str,
        instructions: &str,
        image_path: Option<&Path>,
    ) -> Result<bool> {
        let changed = self.conn.execute(
            "UPDATE recipes
             SET title = ?1, ingredients = ?2, instructions = ?3, image_path = ?4
             WHERE id = ?5",
            params![title, ingredients, instructions, image_path.map(PathParam), id],
        )?;
        Ok(changed > 0)
    }

    /// Remove the row with this id.
    /// Returns false when there was nothing to delete.
    pub fn delete(&self, id: i64) -> Result<bool> {
        let changed = self
            .conn
            .execute("DELETE FROM recipes WHERE id = ?1", params![id])?;
        Ok(changed > 0)
    }

    #[cfg(test)]
    pub(crate) fn connection(&self) -> &Connection {
        &self.conn
    }
}

// Implement Debug for better error messages
impl std::fmt::Debug for RecipeStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecipeStore")
            .field("db_path", &self.db_path)
            .finish()
    }
}
