/// Shared data structures for the application state
///
/// These structs represent the data model that flows between
/// the database layer, the session and the UI layer.
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use std::path::{Path, PathBuf};

/// A recipe as persisted in the catalog
///
/// A `Recipe` always has an `id`: it only exists once the store has assigned
/// one. Unsaved form content lives in [`RecipeForm`] instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recipe {
    /// Unique database ID, assigned by the store and never changed
    pub id: i64,
    /// Dish name, trimmed and never empty
    pub title: String,
    pub ingredients: String,
    pub instructions: String,
    /// Path to an image on disk (not validated)
    pub image_path: Option<PathBuf>,
}

/// Raw row from the `recipes` table
///
/// Column order for every SELECT that produces a `RecipeRow` is fixed:
/// `id, title, ingredients, instructions, image_path`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeRow {
    pub id: i64,
    pub title: String,
    pub ingredients: Option<String>,
    pub instructions: Option<String>,
    pub image_path: Option<PathBuf>,
}

impl RecipeRow {
    /// The column list matching [`RecipeRow::from_row`]
    pub const COLUMNS: &'static str = "id, title, ingredients, instructions, image_path";

    /// Decode a row selected with [`RecipeRow::COLUMNS`]
    pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(RecipeRow {
            id: row.get("id")?,
            title: row.get("title")?,
            ingredients: row.get("ingredients")?,
            instructions: row.get("instructions")?,
            image_path: row
                .get::<_, Option<StoredPath>>("image_path")?
                .map(|stored| stored.0),
        })
    }
}

/// Binds a filesystem path to the `image_path` column without loss.
///
/// UTF-8 paths are stored as TEXT. Anything else is stored as a BLOB of the
/// raw OS bytes on Unix; other platforms refuse to bind it.
pub struct PathParam<'a>(pub &'a Path);

impl ToSql for PathParam<'_> {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        if let Some(text) = self.0.to_str() {
            return Ok(ToSqlOutput::Borrowed(ValueRef::Text(text.as_bytes())));
        }
        path_blob(self.0).map(|bytes| ToSqlOutput::Borrowed(ValueRef::Blob(bytes)))
    }
}

#[cfg(unix)]
fn path_blob(path: &Path) -> rusqlite::Result<&[u8]> {
    use std::os::unix::ffi::OsStrExt;
    Ok(path.as_os_str().as_bytes())
}

#[cfg(not(unix))]
fn path_blob(path: &Path) -> rusqlite::Result<&[u8]> {
    Err(rusqlite::Error::ToSqlConversionFailure(Box::new(
        std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            format!("image path is not valid Unicode: {}", path.display()),
        ),
    )))
}

/// Reads back a path written through [`PathParam`]
pub struct StoredPath(pub PathBuf);

impl FromSql for StoredPath {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        match value {
            ValueRef::Text(bytes) | ValueRef::Blob(bytes) => path_from_bytes(bytes).map(StoredPath),
            _ => Err(FromSqlError::InvalidType),
        }
    }
}

#[cfg(unix)]
fn path_from_bytes(bytes: &[u8]) -> FromSqlResult<PathBuf> {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;
    Ok(PathBuf::from(OsStr::from_bytes(bytes)))
}

#[cfg(not(unix))]
fn path_from_bytes(bytes: &[u8]) -> FromSqlResult<PathBuf> {
    std::str::from_utf8(bytes)
        .map(PathBuf::from)
        .map_err(|err| FromSqlError::Other(Box::new(err)))
}

impl From<RecipeRow> for Recipe {
    fn from(row: RecipeRow) -> Self {
        Recipe {
            id: row.id,
            title: row.title,
            ingredients: row.ingredients.unwrap_or_default(),
            instructions: row.instructions.unwrap_or_default(),
            image_path: row.image_path,
        }
    }
}

/// Current contents of the recipe form
///
/// This is what the user has typed so far. Nothing here is trimmed or
/// validated until the session acts on it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecipeForm {
    pub title: String,
    pub ingredients: String,
    pub instructions: String,
    pub image_path: Option<PathBuf>,
}

impl RecipeForm {
    pub fn new(
        title: impl Into<String>,
        ingredients: impl Into<String>,
        instructions: impl Into<String>,
        image_path: Option<PathBuf>,
    ) -> Self {
        Self {
            title: title.into(),
            ingredients: ingredients.into(),
            instructions: instructions.into(),
            image_path,
        }
    }

    /// True when the title is empty after trimming
    pub fn has_blank_title(&self) -> bool {
        self.title.trim().is_empty()
    }

    /// Copy of the form with all text fields trimmed
    pub fn trimmed(&self) -> Self {
        Self {
            title: self.title.trim().to_string(),
            ingredients: self.ingredients.trim().to_string(),
            instructions: self.instructions.trim().to_string(),
            image_path: self.image_path.clone(),
        }
    }

    /// Build the persisted record for an existing id
    pub fn into_recipe(self, id: i64) -> Recipe {
        Recipe {
            id,
            title: self.title,
            ingredients: self.ingredients,
            instructions: self.instructions,
            image_path: self.image_path,
        }
    }
}

impl From<&Recipe> for RecipeForm {
    fn from(recipe: &Recipe) -> Self {
        Self {
            title: recipe.title.clone(),
            ingredients: recipe.ingredients.clone(),
            instructions: recipe.instructions.clone(),
            image_path: recipe.image_path.clone(),
        }
    }
}
