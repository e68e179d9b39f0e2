//! Error types shared by every taglink stage

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while building the index, parsing inputs or writing outputs.
///
/// A lookup that simply misses is not represented here: resolvers return `Ok(None)` for that
/// and log a warning.
#[derive(Debug, Error)]
pub enum Error {
    /// A required input file does not exist.
    #[error("file not found: {}", path.display())]
    NotFound { path: PathBuf },

    /// An input could not be parsed (tag file XML, HTML page, layout file).
    #[error("failed to parse {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    /// An alias-qualified symbol (`ci::Foo`) that is not in the index.
    #[error("symbol not found in index: {symbol}")]
    MissingSymbol { symbol: String },

    /// A path argument that cannot be used for the requested operation.
    #[error("invalid path {}: {reason}", path.display())]
    InvalidPath { path: PathBuf, reason: String },

    /// Any other I/O failure while reading or writing.
    #[error("i/o error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl Error {
    /// Map an I/O error on `path`, turning `NotFound` into [`Error::NotFound`].
    pub fn io(path: impl AsRef<Path>, source: io::Error) -> Self {
        let path = path.as_ref().to_path_buf();
        if source.kind() == io::ErrorKind::NotFound {
            Error::NotFound { path }
        } else {
            Error::Io { path, source }
        }
    }

    pub fn parse(path: impl AsRef<Path>, message: impl Into<String>) -> Self {
        Error::Parse {
            path: path.as_ref().to_path_buf(),
            message: message.into(),
        }
    }
}
