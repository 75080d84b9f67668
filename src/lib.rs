//! Site Source - filesystem content discovery for static site builds
//!
//! Walks a site's content and layout directories, pairs companion metadata
//! and content files, derives a stable identifier for each object, splits
//! YAML front matter from body content, and writes new objects back to disk
//! using the same naming conventions.

pub mod domain;
pub mod storage;
pub mod cli;

pub use domain::{Attributes, Content, ContentObject, Identifier, ObjectKind};
pub use storage::{FilesystemSource, SourceConfig, SourceError};
