//! Content object model
//!
//! A content object is one item or layout as discovered on disk: its
//! identifier, its attributes, its content (text or a reference to a binary
//! file) and the time it was last modified.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_yaml::Value;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::identifier::Identifier;

#[derive(Debug, Error, PartialEq)]
pub enum MetadataError {
    #[error("{0}")]
    Yaml(String),

    #[error("expected a mapping at the top level, found {0}")]
    NotAMapping(&'static str),

    #[error("unsupported key {0}; keys must be scalars")]
    UnsupportedKey(String),
}

/// Kind of content object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectKind {
    Item,
    Layout,
}

impl ObjectKind {
    /// Returns true if content files of this kind may be treated as binary
    pub fn detects_binary(&self) -> bool {
        matches!(self, ObjectKind::Item)
    }
}

impl std::fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ObjectKind::Item => write!(f, "item"),
            ObjectKind::Layout => write!(f, "layout"),
        }
    }
}

/// Attribute mapping - string keys, YAML values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Attributes(BTreeMap<String, Value>);

impl Attributes {
    /// Creates an empty mapping
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Decodes a YAML document into attributes
    ///
    /// Blank documents and documents that decode to `null` give an empty
    /// mapping. Numeric and boolean keys are kept in their string form.
    pub fn from_yaml(yaml: &str) -> Result<Self, MetadataError> {
        if yaml.trim().is_empty() {
            return Ok(Self::new());
        }

        let value: Value =
            serde_yaml::from_str(yaml).map_err(|e| MetadataError::Yaml(e.to_string()))?;

        let mapping = match value {
            Value::Null => return Ok(Self::new()),
            Value::Mapping(mapping) => mapping,
            Value::Bool(_) => return Err(MetadataError::NotAMapping("a boolean")),
            Value::Number(_) => return Err(MetadataError::NotAMapping("a number")),
            Value::String(_) => return Err(MetadataError::NotAMapping("a string")),
            Value::Sequence(_) => return Err(MetadataError::NotAMapping("a sequence")),
            Value::Tagged(_) => return Err(MetadataError::NotAMapping("a tagged value")),
        };

        let mut attributes = Self::new();
        for (key, value) in mapping {
            let key = match key {
                Value::String(s) => s,
                Value::Number(n) => n.to_string(),
                Value::Bool(b) => b.to_string(),
                other => return Err(MetadataError::UnsupportedKey(format!("{:?}", other))),
            };
            attributes.0.insert(key, value);
        }

        Ok(attributes)
    }

    /// Serializes the attributes as a YAML mapping (no document marker)
    pub fn to_yaml(&self) -> Result<String, MetadataError> {
        serde_yaml::to_string(&self.0).map_err(|e| MetadataError::Yaml(e.to_string()))
    }

    /// Gets a value by key
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Gets a string value by key
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    /// Sets a value, replacing any existing one
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    /// Sets a value only if the key is not present yet
    pub fn set_default(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.entry(key.into()).or_insert_with(|| value.into());
    }

    /// Removes a value
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterates over all key-value pairs in key order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    /// Returns the inner map
    pub fn inner(&self) -> &BTreeMap<String, Value> {
        &self.0
    }
}

impl FromIterator<(String, Value)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Content of an object
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Content {
    /// Decoded UTF-8 text
    Text(String),

    /// Path to a binary file, not loaded into memory
    Binary(PathBuf),
}

impl Content {
    pub fn is_binary(&self) -> bool {
        matches!(self, Content::Binary(_))
    }

    /// Returns the text, or None for binary content
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Content::Text(text) => Some(text),
            Content::Binary(_) => None,
        }
    }

    /// Returns the binary file path, or None for text content
    pub fn binary_path(&self) -> Option<&Path> {
        match self {
            Content::Text(_) => None,
            Content::Binary(path) => Some(path),
        }
    }
}

/// An item or layout loaded from the filesystem
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContentObject {
    /// Item or layout
    pub kind: ObjectKind,

    /// Logical identifier, e.g. `/about/`
    pub identifier: Identifier,

    /// Metadata plus implicit file attributes
    pub attributes: Attributes,

    /// Text payload or binary file reference
    pub content: Content,

    /// Latest modification time of the files backing this object
    pub modified_at: DateTime<Utc>,
}

impl ContentObject {
    /// Returns true if the content is a binary file reference
    pub fn is_binary(&self) -> bool {
        self.content.is_binary()
    }

    /// Path of the content file, if any
    pub fn content_filename(&self) -> Option<&str> {
        self.attributes.get_str(attr::CONTENT_FILENAME)
    }

    /// Path of the metadata file, if any
    pub fn meta_filename(&self) -> Option<&str> {
        self.attributes.get_str(attr::META_FILENAME)
    }
}

/// Names of the implicit attributes added on load
pub mod attr {
    pub const FILENAME: &str = "filename";
    pub const CONTENT_FILENAME: &str = "content_filename";
    pub const META_FILENAME: &str = "meta_filename";
    pub const EXTENSION: &str = "extension";
}
