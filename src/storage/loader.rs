//! Assembling content objects from a source directory
//!
//! Loading runs scan → group → parse for every basename key and layers the
//! implicit file attributes on top of the parsed metadata.

use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use chrono::{DateTime, Utc};
use serde_yaml::Value;

use crate::domain::{attr, identifier_for, split_extension, ContentObject, ObjectKind};

use super::config::SourceConfig;
use super::error::{Result, SourceError};
use super::pairing::{filename_for, group, FilePairing};
use super::parser::ContentParser;
use super::scanner::scan;

/// Loads content objects of one kind from a directory
pub struct ObjectLoader<'a> {
    config: &'a SourceConfig,
}

impl<'a> ObjectLoader<'a> {
    pub fn new(config: &'a SourceConfig) -> Self {
        Self { config }
    }

    /// Loads every object under `dir`, sorted by identifier
    pub fn load(&self, dir: &Path, kind: ObjectKind) -> Result<Vec<ContentObject>> {
        let files = scan(dir)?;

        let mut relative = Vec::with_capacity(files.len());
        for file in &files {
            let rel = relative_slash_path(dir, file).ok_or_else(|| {
                SourceError::read(
                    file.as_path(),
                    io::Error::new(io::ErrorKind::InvalidData, "file name is not valid UTF-8"),
                )
            })?;
            relative.push(rel);
        }

        let pairings = group(&relative, self.config.allow_periods_in_identifiers)?;

        let mut objects = Vec::with_capacity(pairings.len());
        for (key, pairing) in &pairings {
            objects.push(self.assemble(dir, key, pairing, kind)?);
        }

        objects.sort_by(|a, b| a.identifier.cmp(&b.identifier));
        tracing::debug!(dir = %dir.display(), %kind, count = objects.len(), "loaded objects");

        Ok(objects)
    }

    /// Builds one object from a basename key and its pairing
    pub fn assemble(
        &self,
        dir: &Path,
        key: &str,
        pairing: &FilePairing,
        kind: ObjectKind,
    ) -> Result<ContentObject> {
        let allow_periods = self.config.allow_periods_in_identifiers;

        let meta_rel = filename_for(key, pairing.meta_ext.as_deref());
        let content_rel = filename_for(key, pairing.content_ext.as_deref());

        let identifier_source = meta_rel
            .as_deref()
            .or(content_rel.as_deref())
            .ok_or_else(|| SourceError::MissingData {
                key: key.to_string(),
                reason: "no metadata or content file".to_string(),
            })?;
        let identifier = identifier_for(identifier_source, allow_periods);

        let meta_path = meta_rel.as_deref().map(|rel| dir.join(rel));
        let content_path = content_rel.as_deref().map(|rel| dir.join(rel));

        let modified_at = latest_mtime(key, meta_path.as_deref(), content_path.as_deref())?;

        let binary = kind.detects_binary()
            && content_rel
                .as_deref()
                .is_some_and(|rel| self.config.is_binary_filename(rel));

        tracing::debug!(
            %identifier,
            %kind,
            meta = ?meta_rel,
            content = ?content_rel,
            binary,
            "assembling object"
        );

        let parsed = ContentParser::new(self.config).parse(
            content_path.as_deref(),
            meta_path.as_deref(),
            binary,
        )?;

        let mut attributes = parsed.attributes;

        let extension = match content_rel.as_deref() {
            Some(rel) => {
                let ext = split_extension(rel, allow_periods).1;
                Value::from(ext.strip_prefix('.').unwrap_or(ext))
            }
            None => Value::Null,
        };
        attributes.set_default(attr::EXTENSION, extension);

        let content_filename = path_value(content_path.as_deref());
        attributes.set(attr::FILENAME, content_filename.clone());
        attributes.set(attr::CONTENT_FILENAME, content_filename);
        attributes.set(attr::META_FILENAME, path_value(meta_path.as_deref()));

        Ok(ContentObject {
            kind,
            identifier,
            attributes,
            content: parsed.content,
            modified_at,
        })
    }
}

/// Returns `file` relative to `dir` with `/` separators
fn relative_slash_path(dir: &Path, file: &Path) -> Option<String> {
    let rel = file.strip_prefix(dir).ok()?;

    let mut parts = Vec::new();
    for component in rel.components() {
        match component {
            Component::Normal(part) => parts.push(part.to_str()?),
            Component::CurDir => {}
            _ => return None,
        }
    }

    Some(parts.join("/"))
}

fn path_value(path: Option<&Path>) -> Value {
    match path {
        Some(path) => Value::from(path.display().to_string()),
        None => Value::Null,
    }
}

fn mtime(path: &Path) -> Option<DateTime<Utc>> {
    fs::metadata(path)
        .and_then(|m| m.modified())
        .ok()
        .map(DateTime::<Utc>::from)
}

/// Returns the later modification time of the two files
fn latest_mtime(key: &str, meta: Option<&Path>, content: Option<&Path>) -> Result<DateTime<Utc>> {
    let meta_time = meta.and_then(mtime);
    let content_time = content.and_then(mtime);

    match (meta_time, content_time) {
        (Some(a), Some(b)) => Ok(a.max(b)),
        (Some(t), None) | (None, Some(t)) => Ok(t),
        (None, None) => {
            let paths: Vec<PathBuf> = meta
                .into_iter()
                .chain(content)
                .map(Path::to_path_buf)
                .collect();
            Err(SourceError::MissingData {
                key: key.to_string(),
                reason: format!("could not stat any of {:?}", paths),
            })
        }
    }
}
