use std::path::PathBuf;

use thiserror::Error;

/// Everything that can stop a run. Nothing here is retried.
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error on '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error in '{}': {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("'{}' has no '{column}' column", path.display())]
    MissingColumn { path: PathBuf, column: String },

    #[error("tokenizer rule '{pattern}' failed to compile: {reason}")]
    Pattern { pattern: String, reason: String },

    #[error("chart serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("publishing failed: {0}")]
    Publish(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn csv(path: impl Into<PathBuf>, source: csv::Error) -> Self {
        Error::Csv {
            path: path.into(),
            source,
        }
    }
}
