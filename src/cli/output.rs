//! Output formatting for CLI commands

use std::path::Path;

use serde::Serialize;

use crate::domain::{ContentObject, ObjectKind};

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Output helper for consistent formatting
pub struct Output {
    format: OutputFormat,
}

impl Output {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Prints a success message
    pub fn success(&self, message: &str) {
        match self.format {
            OutputFormat::Text => println!("{}", message),
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::json!({
                        "success": true,
                        "message": message
                    })
                );
            }
        }
    }

    /// Prints structured data
    pub fn data<T: Serialize>(&self, data: &T) {
        match self.format {
            OutputFormat::Text => {
                if let Ok(json) = serde_json::to_string_pretty(data) {
                    println!("{}", json);
                }
            }
            OutputFormat::Json => {
                if let Ok(json) = serde_json::to_string(data) {
                    println!("{}", json);
                }
            }
        }
    }

    /// Prints a listing of objects: one JSON row each, or a text table with
    /// a count footer
    pub fn objects(&self, kind: ObjectKind, objects: &[ContentObject], dir: &Path) {
        if self.is_json() {
            let rows: Vec<_> = objects.iter().map(object_row).collect();
            self.data(&rows);
            return;
        }

        if objects.is_empty() {
            println!("No {}s found in {}", kind, dir.display());
            return;
        }

        println!("{:<32} {:<7} FILE", "IDENTIFIER", "BINARY");
        println!("{}", "-".repeat(70));

        for object in objects {
            let file = object
                .content_filename()
                .or(object.meta_filename())
                .unwrap_or("-");
            let binary = if object.is_binary() { "yes" } else { "no" };
            println!("{:<32} {:<7} {}", object.identifier, binary, file);
        }

        println!();
        println!("{} {}(s)", objects.len(), kind);
    }

    /// Returns true if using JSON format
    pub fn is_json(&self) -> bool {
        self.format == OutputFormat::Json
    }
}

/// Summary of an object for listings
fn object_row(object: &ContentObject) -> serde_json::Value {
    serde_json::json!({
        "identifier": object.identifier.as_str(),
        "kind": object.kind,
        "binary": object.is_binary(),
        "content_filename": object.content_filename(),
        "meta_filename": object.meta_filename(),
        "modified_at": object.modified_at,
    })
}
