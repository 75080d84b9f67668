//! # Storage Layer
//!
//! Filesystem access for content discovery and creation.
//!
//! ## Site Layout
//!
//! ```text
//! site/
//! ├── site.toml            # Optional configuration
//! ├── content/             # Items
//! │   ├── index.html       # → /
//! │   ├── about.html       # → /about/  (content)
//! │   ├── about.yaml       # → /about/  (metadata for the same item)
//! │   └── blog/
//! │       └── index.md     # → /blog/
//! └── layouts/             # Layouts, same rules (never binary)
//!     └── default.erb      # → /default/
//! ```
//!
//! ## Load Pipeline
//!
//! | Stage | Module | Output |
//! |-------|--------|--------|
//! | Scan | `scanner` | every non-backup, non-hidden file |
//! | Group | `pairing` | basename key → (meta?, content?) |
//! | Parse | `parser` + `reader` | attributes and content |
//! | Assemble | `loader` | [`ContentObject`](crate::domain::ContentObject) |
//!
//! Creation goes through `writer`, which applies the same naming rules in
//! reverse.
//!
//! ## Key Types
//!
//! - [`FilesystemSource`] - Entry point for loading and creating objects
//! - [`SourceConfig`] - Directories, encoding, text extensions, period rule
//! - [`SourceError`] - Every way a load or create can fail

mod config;
mod error;
mod loader;
mod pairing;
mod parser;
mod reader;
mod scanner;
mod source;
mod writer;

pub use config::{ConfigError, SourceConfig};
pub use error::{FileRole, Result, SourceError};
pub use loader::ObjectLoader;
pub use pairing::{filename_for, group, FilePairing, META_EXTENSION};
pub use parser::{ContentParser, Parsed};
pub use reader::read_text;
pub use scanner::{is_backup_file, scan};
pub use source::FilesystemSource;
pub use writer::{CreationListener, NoopListener, ObjectWriter, DEFAULT_EXTENSION};
