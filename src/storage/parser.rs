//! Parsing of metadata and content files
//!
//! An object is backed by a content file, a metadata file, or both:
//!
//! 1. Binary content: metadata comes only from the `.yaml` file; the content
//!    is a reference to the file, never read.
//! 2. Separate metadata file: both files are read independently and the
//!    content is kept verbatim.
//! 3. Combined file: metadata is taken from the front matter block, if any,
//!    and the rest is the content.

use std::path::Path;

use crate::domain::{split_front_matter, Attributes, Content, FrontMatter, MetadataError};

use super::config::SourceConfig;
use super::error::{Result, SourceError};
use super::reader::read_text;

/// Metadata and content extracted from an object's files
#[derive(Debug, Clone, PartialEq)]
pub struct Parsed {
    pub attributes: Attributes,
    pub content: Content,
}

/// Parses object files using the configured encoding
pub struct ContentParser<'a> {
    config: &'a SourceConfig,
}

impl<'a> ContentParser<'a> {
    pub fn new(config: &'a SourceConfig) -> Self {
        Self { config }
    }

    /// Produces attributes and content from the given files
    pub fn parse(
        &self,
        content_path: Option<&Path>,
        meta_path: Option<&Path>,
        binary: bool,
    ) -> Result<Parsed> {
        if binary {
            if let Some(content_path) = content_path {
                let attributes = match meta_path {
                    Some(meta_path) => self.read_metadata(meta_path)?,
                    None => Attributes::new(),
                };
                return Ok(Parsed {
                    attributes,
                    content: Content::Binary(content_path.to_path_buf()),
                });
            }
        }

        if let Some(meta_path) = meta_path {
            let content = match content_path {
                Some(content_path) => self.read(content_path)?,
                None => String::new(),
            };
            let attributes = self.read_metadata(meta_path)?;
            return Ok(Parsed {
                attributes,
                content: Content::Text(content),
            });
        }

        let content_path = content_path.ok_or_else(|| SourceError::MissingData {
            key: String::new(),
            reason: "neither a content nor a metadata file was given".to_string(),
        })?;

        self.parse_combined(content_path)
    }

    fn parse_combined(&self, path: &Path) -> Result<Parsed> {
        let text = self.read(path)?;

        match split_front_matter(&text) {
            FrontMatter::Absent => Ok(Parsed {
                attributes: Attributes::new(),
                content: Content::Text(text),
            }),
            FrontMatter::Present { metadata, body } => {
                let attributes = decode(path, metadata)?;
                Ok(Parsed {
                    attributes,
                    content: Content::Text(body.to_string()),
                })
            }
            FrontMatter::Unterminated => Err(SourceError::MalformedFrontMatter {
                path: path.to_path_buf(),
            }),
        }
    }

    fn read(&self, path: &Path) -> Result<String> {
        read_text(path, &self.config.encoding)
    }

    fn read_metadata(&self, path: &Path) -> Result<Attributes> {
        let yaml = self.read(path)?;
        decode(path, &yaml)
    }
}

fn decode(path: &Path, yaml: &str) -> Result<Attributes> {
    Attributes::from_yaml(yaml).map_err(|e: MetadataError| SourceError::MetadataFormat {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}
