//! Writing new content objects to disk
//!
//! The inverse of loading: an identifier plus attributes and content become
//! a file whose name reloads to the same identifier.

use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::{validate_for_creation, Attributes, Identifier};

use super::config::SourceConfig;
use super::error::{Result, SourceError};

/// Extension used when none is given
pub const DEFAULT_EXTENSION: &str = ".html";

/// Receives a notification for every file written
pub trait CreationListener {
    fn object_created(&self, path: &Path);
}

impl<F> CreationListener for F
where
    F: Fn(&Path),
{
    fn object_created(&self, path: &Path) {
        self(path)
    }
}

/// Listener that ignores notifications
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopListener;

impl CreationListener for NoopListener {
    fn object_created(&self, _path: &Path) {}
}

/// Writes objects under a source directory
pub struct ObjectWriter<'a> {
    config: &'a SourceConfig,
    listener: &'a dyn CreationListener,
}

impl<'a> ObjectWriter<'a> {
    pub fn new(config: &'a SourceConfig, listener: &'a dyn CreationListener) -> Self {
        Self { config, listener }
    }

    /// Computes the file path an identifier is written to
    ///
    /// `/` becomes `<dir>/index.html`; any other identifier has its trailing
    /// slash replaced by the extension.
    pub fn path_for(dir: &Path, identifier: &Identifier, extension: &str) -> PathBuf {
        if identifier.is_root() {
            return dir.join("index.html");
        }

        let extension = normalize_extension(extension);
        let relative = format!("{}{}", identifier.segments().collect::<Vec<_>>().join("/"), extension);
        dir.join(relative)
    }

    /// Creates a new object file and returns its path
    ///
    /// Parent directories are created as needed and an existing file is
    /// overwritten.
    pub fn create(
        &self,
        dir: &Path,
        content: &str,
        attributes: &Attributes,
        identifier: &str,
        extension: &str,
    ) -> Result<PathBuf> {
        validate_for_creation(identifier, self.config.allow_periods_in_identifiers).map_err(
            |reason| SourceError::InvalidIdentifier {
                identifier: identifier.to_string(),
                reason,
            },
        )?;

        let identifier = Identifier::new(identifier);
        let path = Self::path_for(dir, &identifier, extension);

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| SourceError::write(parent, e))?;
        }

        tracing::info!(%identifier, path = %path.display(), "creating object");
        self.listener.object_created(&path);

        let data = render(&path, content, attributes)?;
        write_atomic(&path, &data)?;

        Ok(path)
    }
}

/// Writes through a hidden sibling temp file, then renames it into place
fn write_atomic(path: &Path, data: &str) -> Result<()> {
    let temp_path = temp_path_for(path);

    if let Err(e) = fs::write(&temp_path, data) {
        let _ = fs::remove_file(&temp_path);
        return Err(SourceError::write(&temp_path, e));
    }

    fs::rename(&temp_path, path).map_err(|e| SourceError::write(path, e))
}

/// `dir/foo.html` becomes `dir/.foo.html.tmp`, which scanning skips as hidden
fn temp_path_for(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!(".{}.tmp", name))
}

fn normalize_extension(extension: &str) -> String {
    if extension.is_empty() || extension.starts_with('.') {
        extension.to_string()
    } else {
        format!(".{}", extension)
    }
}

/// Renders the file body, with a metadata header when there are attributes
fn render(path: &Path, content: &str, attributes: &Attributes) -> Result<String> {
    if attributes.is_empty() {
        return Ok(content.to_string());
    }

    let yaml = attributes.to_yaml().map_err(|e| SourceError::MetadataFormat {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let mut data = String::with_capacity(yaml.len() + content.len() + 12);
    data.push_str("---\n");
    data.push_str(&yaml);
    if !yaml.ends_with('\n') {
        data.push('\n');
    }
    data.push_str("---\n\n");
    data.push_str(content);

    Ok(data)
}
