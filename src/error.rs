/// Error types for the recipe book
///
/// Storage failures are never swallowed below the GUI boundary; they bubble up
/// through `Result` to whoever invoked the repository.
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// The SQLite catalog could not be read or written
    #[error("storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The settings file exists but is not valid JSON for `Settings`
    #[error("invalid settings file {}: {source}", path.display())]
    Settings {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("could not determine a user data directory for the recipe database")]
    NoDataDir,

    #[error(transparent)]
    Gui(#[from] iced::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
