//! Main CLI application structure

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use super::objects;
use super::output::{Output, OutputFormat};
use crate::domain::ObjectKind;
use crate::storage::{FilesystemSource, DEFAULT_EXTENSION};

#[derive(Parser)]
#[command(name = "sitesrc")]
#[command(author, version, about = "Inspect and create site content objects")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Site root directory
    #[arg(long, short = 'r', global = true, default_value = ".", env = "SITESRC_ROOT")]
    pub root: PathBuf,

    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List all items
    Items,

    /// List all layouts
    Layouts,

    /// Show an object's attributes and content
    Show {
        /// Identifier, e.g. /about/
        identifier: String,

        /// Look up a layout instead of an item
        #[arg(long)]
        layout: bool,
    },

    /// Create a new item
    CreateItem(CreateArgs),

    /// Create a new layout
    CreateLayout(CreateArgs),
}

/// Arguments shared by the create commands
#[derive(Args)]
pub struct CreateArgs {
    /// Identifier of the new object, e.g. /blog/hello/
    pub identifier: String,

    /// Body content
    #[arg(long, short, default_value = "")]
    pub content: String,

    /// Attribute as key=value (value is parsed as YAML); repeatable
    #[arg(long = "attr", short = 'a', value_parser = parse_attr)]
    pub attrs: Vec<(String, String)>,

    /// File extension
    #[arg(long, default_value = DEFAULT_EXTENSION)]
    pub ext: String,
}

fn parse_attr(s: &str) -> std::result::Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got '{}'", s))?;

    let key = key.trim();
    if key.is_empty() {
        return Err(format!("empty attribute key in '{}'", s));
    }

    Ok((key.to_string(), value.to_string()))
}

/// Installs the tracing subscriber for the binary
///
/// Uses `RUST_LOG` if set, otherwise `debug` with `--verbose` and `warn` without.
fn init_logging(verbose: bool) {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };

    // Ignore error if a subscriber is already set (e.g. in tests).
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let output = Output::new(cli.format);
    let source = FilesystemSource::open(&cli.root)?;

    tracing::debug!(root = %source.root().display(), "opened site");

    match cli.command {
        Commands::Items => objects::list(&output, &source, ObjectKind::Item)?,
        Commands::Layouts => objects::list(&output, &source, ObjectKind::Layout)?,
        Commands::Show { identifier, layout } => {
            let kind = if layout { ObjectKind::Layout } else { ObjectKind::Item };
            objects::show(&output, &source, kind, &identifier)?
        }
        Commands::CreateItem(args) => objects::create(&output, &source, ObjectKind::Item, &args)?,
        Commands::CreateLayout(args) => {
            objects::create(&output, &source, ObjectKind::Layout, &args)?
        }
    }

    Ok(())
}
