use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("dictionary {0} not installed")]
    UnknownLanguage(String),

    /// The documentation tree names a file the filesystem no longer has.
    #[error("[bug] Unable to read {}", path.display())]
    UnreadableSource {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("[bug] unable to locate \"{word}\" at offset {offset}")]
    Format { word: String, offset: usize },

    #[error("Dictionary error: {0}")]
    Dictionary(#[from] anyhow::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid documentation tree: {0}")]
    Json(#[from] serde_json::Error),
}
