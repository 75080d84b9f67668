//! # Command-Line Interface
//!
//! A small inspection tool over a site's content objects.
//!
//! ## Commands
//!
//! | Command | Purpose |
//! |---------|---------|
//! | `items`, `layouts` | List discovered objects |
//! | `show <identifier>` | Print one object's attributes and content |
//! | `create-item`, `create-layout` | Write a new object file |
//!
//! ## Output Formats
//!
//! All commands support `--format` flag:
//! - `text` (default) - Human-readable output
//! - `json` - Machine-parseable JSON
//!
//! ## Logging
//!
//! Diagnostics go to stderr through `tracing`. `RUST_LOG` takes precedence;
//! otherwise `--verbose` enables debug output.

mod app;
mod output;
mod objects;

pub use app::{run, Cli, Commands, CreateArgs};
pub use output::{Output, OutputFormat};
