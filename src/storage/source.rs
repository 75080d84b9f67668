//! Filesystem data source
//!
//! Entry point for loading items and layouts from a site and creating new
//! ones with the same naming conventions.

use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::domain::{Attributes, ContentObject, ObjectKind};

use super::config::SourceConfig;
use super::error::Result;
use super::loader::ObjectLoader;
use super::writer::{CreationListener, NoopListener, ObjectWriter};

/// A site on disk: items under `content_dir`, layouts under `layouts_dir`
pub struct FilesystemSource {
    root: PathBuf,
    config: SourceConfig,
    listener: Box<dyn CreationListener>,
}

impl FilesystemSource {
    /// Creates a source for the site at `root` with explicit configuration
    pub fn new(root: impl Into<PathBuf>, config: SourceConfig) -> Self {
        Self {
            root: root.into(),
            config,
            listener: Box::new(NoopListener),
        }
    }

    /// Opens the site at `root`, reading `site.toml` if present
    pub fn open(root: impl Into<PathBuf>) -> anyhow::Result<Self> {
        let root = root.into();
        let config = SourceConfig::load(&root)
            .with_context(|| format!("Failed to load configuration for {}", root.display()))?;
        Ok(Self::new(root, config))
    }

    /// Registers the hook notified when an object file is created
    pub fn with_listener(mut self, listener: impl CreationListener + 'static) -> Self {
        self.listener = Box::new(listener);
        self
    }

    /// Returns the site root
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the configuration
    pub fn config(&self) -> &SourceConfig {
        &self.config
    }

    /// Returns the directory holding objects of the given kind
    pub fn dir_for(&self, kind: ObjectKind) -> PathBuf {
        self.root.join(self.config.dir_for(kind))
    }

    /// Loads all items
    pub fn load_items(&self) -> Result<Vec<ContentObject>> {
        self.load_objects(ObjectKind::Item)
    }

    /// Loads all layouts
    pub fn load_layouts(&self) -> Result<Vec<ContentObject>> {
        self.load_objects(ObjectKind::Layout)
    }

    /// Loads all objects of one kind
    ///
    /// A missing directory yields no objects.
    pub fn load_objects(&self, kind: ObjectKind) -> Result<Vec<ContentObject>> {
        let dir = self.dir_for(kind);

        if !dir.exists() {
            tracing::warn!(dir = %dir.display(), %kind, "source directory does not exist");
            return Ok(Vec::new());
        }

        ObjectLoader::new(&self.config).load(&dir, kind)
    }

    /// Creates a new item file and returns its path
    pub fn create_item(
        &self,
        content: &str,
        attributes: &Attributes,
        identifier: &str,
        extension: &str,
    ) -> Result<PathBuf> {
        self.create(ObjectKind::Item, content, attributes, identifier, extension)
    }

    /// Creates a new layout file and returns its path
    pub fn create_layout(
        &self,
        content: &str,
        attributes: &Attributes,
        identifier: &str,
        extension: &str,
    ) -> Result<PathBuf> {
        self.create(ObjectKind::Layout, content, attributes, identifier, extension)
    }

    /// Creates a new object file of the given kind
    pub fn create(
        &self,
        kind: ObjectKind,
        content: &str,
        attributes: &Attributes,
        identifier: &str,
        extension: &str,
    ) -> Result<PathBuf> {
        let dir = self.dir_for(kind);
        ObjectWriter::new(&self.config, self.listener.as_ref()).create(
            &dir,
            content,
            attributes,
            identifier,
            extension,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{attr, Content};
    use crate::storage::writer::DEFAULT_EXTENSION;
    use crate::storage::SourceError;
    use serde_yaml::Value;
    use std::fs;
    use std::sync::{Arc, Mutex};
    use tempfile::TempDir;

    #[test]
    fn missing_directories_load_empty() {
        let dir = TempDir::new().unwrap();
        let source = FilesystemSource::new(dir.path(), SourceConfig::default());

        assert!(source.load_items().unwrap().is_empty());
        assert!(source.load_layouts().unwrap().is_empty());
    }

    #[test]
    fn create_then_load_roundtrip() {
        let dir = TempDir::new().unwrap();
        let source = FilesystemSource::new(dir.path(), SourceConfig::default());

        let mut attrs = Attributes::new();
        attrs.set("title", "Hello World");
        attrs.set("tags", Value::Sequence(vec!["a".into(), "b".into()]));

        let path = source
            .create_item("\nSome content\n", &attrs, "/posts/hello/", DEFAULT_EXTENSION)
            .unwrap();
        assert_eq!(path, dir.path().join("content/posts/hello.html"));

        let items = source.load_items().unwrap();
        assert_eq!(items.len(), 1);

        let item = &items[0];
        assert_eq!(item.identifier.as_str(), "/posts/hello/");
        assert_eq!(item.content, Content::Text("Some content".into()));

        let mut expected = attrs.clone();
        let path_str = path.display().to_string();
        expected.set(attr::EXTENSION, "html");
        expected.set(attr::FILENAME, path_str.as_str());
        expected.set(attr::CONTENT_FILENAME, path_str.as_str());
        expected.set(attr::META_FILENAME, Value::Null);
        assert_eq!(item.attributes, expected);
    }

    #[test]
    fn create_root_item_writes_index() {
        let dir = TempDir::new().unwrap();
        let source = FilesystemSource::new(dir.path(), SourceConfig::default());

        let path = source
            .create_item("home", &Attributes::new(), "/", DEFAULT_EXTENSION)
            .unwrap();
        assert_eq!(path, dir.path().join("content/index.html"));

        let items = source.load_items().unwrap();
        assert!(items[0].identifier.is_root());
        assert_eq!(items[0].content, Content::Text("home".into()));
    }

    #[test]
    fn layouts_go_to_layouts_dir() {
        let dir = TempDir::new().unwrap();
        let source = FilesystemSource::new(dir.path(), SourceConfig::default());

        let path = source
            .create_layout("<%= yield %>", &Attributes::new(), "/default/", ".erb")
            .unwrap();
        assert_eq!(path, dir.path().join("layouts/default.erb"));

        let layouts = source.load_layouts().unwrap();
        assert_eq!(layouts[0].identifier.as_str(), "/default/");
        assert_eq!(layouts[0].kind, ObjectKind::Layout);
    }

    #[test]
    fn listener_is_notified() {
        let dir = TempDir::new().unwrap();
        let created = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&created);

        let source = FilesystemSource::new(dir.path(), SourceConfig::default())
            .with_listener(move |path: &Path| sink.lock().unwrap().push(path.to_path_buf()));

        let path = source
            .create_item("x", &Attributes::new(), "/a/", DEFAULT_EXTENSION)
            .unwrap();

        assert_eq!(*created.lock().unwrap(), vec![path]);
    }

    #[test]
    fn invalid_identifier_is_rejected() {
        let dir = TempDir::new().unwrap();
        let source = FilesystemSource::new(dir.path(), SourceConfig::default());

        let result = source.create_item("x", &Attributes::new(), "/v1.2/", DEFAULT_EXTENSION);
        assert!(matches!(result, Err(SourceError::InvalidIdentifier { .. })));
    }

    #[test]
    fn open_reads_site_config() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(SourceConfig::FILE_NAME),
            "content_dir = \"pages\"\nallow_periods_in_identifiers = true\n",
        )
        .unwrap();
        fs::create_dir_all(dir.path().join("pages")).unwrap();
        fs::write(dir.path().join("pages/v1.2.md"), "notes").unwrap();

        let source = FilesystemSource::open(dir.path()).unwrap();
        let items = source.load_items().unwrap();

        assert_eq!(items[0].identifier.as_str(), "/v1.2/");
        assert_eq!(items[0].attributes.get_str(attr::EXTENSION), Some("md"));
    }
}
