//! Identifier derivation for content objects
//!
//! An identifier is the logical address of an item or layout, independent of
//! the extension it happens to have on disk:
//!
//! - `index.html` → `/`
//! - `foo.html` → `/foo/`
//! - `foo/index.html` → `/foo/`
//! - `foo/bar.baz.html` → `/foo/bar/` (periods disallowed) or `/foo/bar.baz/` (allowed)
//!
//! Whether periods may appear in identifiers decides how much of a file name
//! counts as its extension. With periods disallowed, everything from the first
//! dot of the file name on is the extension; with periods allowed, only the
//! last dot-delimited suffix is.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum IdentifierError {
    #[error("Identifier '{0}' contains a period, which is not allowed when allow_periods_in_identifiers is off")]
    ContainsPeriod(String),

    #[error("Identifier '{0}' contains a '..' segment")]
    ParentSegment(String),
}

/// Splits a path into the part before its extension and the extension itself
/// (including the leading dot, or empty when there is none).
///
/// Only the last path component is considered. A dot must be followed by at
/// least one character to start an extension.
pub fn split_extension(path: &str, allow_periods: bool) -> (&str, &str) {
    let name_start = path.rfind('/').map_or(0, |i| i + 1);
    let name = &path[name_start..];

    let dot = if allow_periods {
        name.rfind('.')
    } else {
        name.find('.')
    };

    match dot {
        Some(i) if i + 1 < name.len() => path.split_at(name_start + i),
        _ => (path, ""),
    }
}

/// Returns the path with its identifier-relevant extension removed
pub fn strip_extension(path: &str, allow_periods: bool) -> &str {
    split_extension(path, allow_periods).0
}

/// Returns the extension of a path, including the leading dot
pub fn extension_of(path: &str, allow_periods: bool) -> &str {
    split_extension(path, allow_periods).1
}

/// Derives the identifier for a path relative to its source directory
///
/// A file named `index` or `index.<ext>` stands for its directory, whatever
/// the extension rule would strip from it.
pub fn identifier_for(relative_path: &str, allow_periods: bool) -> Identifier {
    let (dir, name) = match relative_path.rfind('/') {
        Some(i) => (&relative_path[..i], &relative_path[i + 1..]),
        None => ("", relative_path),
    };

    if is_index_name(name) {
        return Identifier::new(dir);
    }

    Identifier::new(strip_extension(relative_path, allow_periods))
}

fn is_index_name(name: &str) -> bool {
    match name.strip_prefix("index") {
        Some("") => true,
        Some(rest) => rest.len() > 1 && rest.starts_with('.'),
        None => false,
    }
}

/// Checks that an identifier can be written back to disk: it must stay inside
/// its directory, and its periods must not be read as an extension on the
/// next load
pub fn validate_for_creation(identifier: &str, allow_periods: bool) -> Result<(), IdentifierError> {
    if identifier.split('/').any(|s| s == "..") {
        return Err(IdentifierError::ParentSegment(identifier.to_string()));
    }
    if !allow_periods && identifier.contains('.') {
        return Err(IdentifierError::ContainsPeriod(identifier.to_string()));
    }
    Ok(())
}

/// A canonical identifier: one leading slash, one trailing slash, no empty,
/// `.` or `..` segments in between
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Identifier {
    value: String,
}

impl Identifier {
    /// Canonicalizes any slash-delimited string into an identifier
    ///
    /// `..` removes the segment before it and never climbs above the root.
    pub fn new(raw: &str) -> Self {
        let mut segments: Vec<&str> = Vec::new();
        for segment in raw.split('/') {
            match segment {
                "" | "." => {}
                ".." => {
                    segments.pop();
                }
                _ => segments.push(segment),
            }
        }

        let value = if segments.is_empty() {
            "/".to_string()
        } else {
            format!("/{}/", segments.join("/"))
        };

        Self { value }
    }

    /// The root identifier `/`
    pub fn root() -> Self {
        Self {
            value: "/".to_string(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// Returns true for `/`
    pub fn is_root(&self) -> bool {
        self.value == "/"
    }

    /// Iterates over the path segments (empty for the root)
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.value.split('/').filter(|s| !s.is_empty())
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl FromStr for Identifier {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

impl From<String> for Identifier {
    fn from(value: String) -> Self {
        Self::new(&value)
    }
}

impl From<Identifier> for String {
    fn from(id: Identifier) -> Self {
        id.value
    }
}
