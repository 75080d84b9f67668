//! Errors raised while loading or creating content objects

use std::fmt;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::domain::IdentifierError;

/// Which side of a file pairing a file belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileRole {
    Metadata,
    Content,
}

impl fmt::Display for FileRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileRole::Metadata => write!(f, "meta"),
            FileRole::Content => write!(f, "content"),
        }
    }
}

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Found {count} {role} files for '{key}'; expected 0 or 1")]
    AmbiguousPairing {
        key: String,
        role: FileRole,
        count: usize,
    },

    #[error("No data found for '{key}': {reason}")]
    MissingData { key: String, reason: String },

    #[error("The file '{}' appears to start with a metadata section (three or five dashes at the top) but it does not seem to be in the correct format", .path.display())]
    MalformedFrontMatter { path: PathBuf },

    #[error("Could not parse YAML metadata in '{}': {message}", .path.display())]
    MetadataFormat { path: PathBuf, message: String },

    #[error("Failed to read '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to write '{}': {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Could not decode '{}' as {encoding}", .path.display())]
    Encoding { path: PathBuf, encoding: String },

    #[error("{reason}")]
    InvalidIdentifier {
        identifier: String,
        reason: IdentifierError,
    },
}

impl SourceError {
    pub(crate) fn read(path: impl Into<PathBuf>, source: io::Error) -> Self {
        SourceError::Read {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn write(path: impl Into<PathBuf>, source: io::Error) -> Self {
        SourceError::Write {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, SourceError>;
