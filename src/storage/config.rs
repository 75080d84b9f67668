//! Data source configuration
//!
//! Configuration is read from `site.toml` at the site root. Every key is
//! optional; a missing file gives the defaults.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{extension_of, ObjectKind};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to parse configuration: {0}")]
    Parse(String),
}

/// Extensions treated as text when loading items
const DEFAULT_TEXT_EXTENSIONS: &[&str] = &[
    "coffee", "css", "erb", "haml", "handlebars", "hb", "htm", "html", "js", "less", "markdown",
    "md", "ms", "mustache", "php", "rb", "rdoc", "sass", "scss", "slim", "txt", "xhtml", "xml",
];

/// Settings for discovering and creating content objects
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Directory holding items, relative to the site root
    pub content_dir: PathBuf,

    /// Directory holding layouts, relative to the site root
    pub layouts_dir: PathBuf,

    /// Whether identifiers may contain periods (only the last suffix is an extension)
    pub allow_periods_in_identifiers: bool,

    /// Text encoding of source files
    pub encoding: String,

    /// Extensions of item content files that are loaded as text
    pub text_extensions: BTreeSet<String>,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            content_dir: PathBuf::from("content"),
            layouts_dir: PathBuf::from("layouts"),
            allow_periods_in_identifiers: false,
            encoding: "utf-8".to_string(),
            text_extensions: DEFAULT_TEXT_EXTENSIONS
                .iter()
                .map(|s| (*s).to_string())
                .collect(),
        }
    }
}

impl SourceConfig {
    /// Name of the configuration file at the site root
    pub const FILE_NAME: &'static str = "site.toml";

    /// Loads configuration from `site.toml` under the given site root
    pub fn load(site_root: &Path) -> Result<Self> {
        let config_path = site_root.join(Self::FILE_NAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config: {}", config_path.display()))?;

        let config = Self::from_toml(&content)
            .with_context(|| format!("Failed to parse config: {}", config_path.display()))?;

        Ok(config)
    }

    /// Parses and validates configuration text
    pub fn from_toml(content: &str) -> std::result::Result<Self, ConfigError> {
        let config: Self = toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> std::result::Result<(), ConfigError> {
        if self.encoding.trim().is_empty() {
            return Err(ConfigError::Invalid("encoding must not be empty".to_string()));
        }
        if self.content_dir == self.layouts_dir {
            return Err(ConfigError::Invalid(format!(
                "content_dir and layouts_dir must differ (both are '{}')",
                self.content_dir.display()
            )));
        }
        Ok(())
    }

    /// Returns the directory for objects of the given kind, relative to the site root
    pub fn dir_for(&self, kind: ObjectKind) -> &Path {
        match kind {
            ObjectKind::Item => &self.content_dir,
            ObjectKind::Layout => &self.layouts_dir,
        }
    }

    /// Returns true if the extension (without dot) names a text format
    pub fn is_text_extension(&self, ext: &str) -> bool {
        self.text_extensions.contains(ext)
    }

    /// Returns true if a content file should be loaded as a binary reference
    ///
    /// Only the last suffix of the file name is consulted, so `foo.html.erb`
    /// is checked as `erb`. A file without a suffix has the empty extension,
    /// which is text only if `text_extensions` lists `""`.
    pub fn is_binary_filename(&self, filename: &str) -> bool {
        let ext = extension_of(filename, true).trim_start_matches('.');
        !self.is_text_extension(ext)
    }
}
