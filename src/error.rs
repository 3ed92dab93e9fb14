//! Error types for loading data and reading menu input.

use std::path::PathBuf;
use thiserror::Error;

/// Failure to load the sales document.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("the file {} does not exist", path.display())]
    FileMissing { path: PathBuf },

    #[error("the file {} is not well-formed JSON: {source}", path.display())]
    MalformedDocument {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("the file {} has no usable record list under {key:?}: {source}", path.display())]
    UnexpectedShape {
        path: PathBuf,
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("the file {} could not be read: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A menu entry that is not one of the listed options.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid option: {0:?}")]
pub struct InvalidMenuChoice(pub String);

/// A year prompt answered with something that is not an integer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid year: {0:?}")]
pub struct InvalidYear(pub String);
