//! Object listing, inspection and creation commands

use anyhow::{Context, Result};
use serde_yaml::Value;

use super::app::CreateArgs;
use super::output::Output;
use crate::domain::{Attributes, Content, ContentObject, Identifier, ObjectKind};
use crate::storage::FilesystemSource;

/// Lists all objects of one kind
pub fn list(output: &Output, source: &FilesystemSource, kind: ObjectKind) -> Result<()> {
    let objects = source
        .load_objects(kind)
        .with_context(|| format!("Failed to load {}s", kind))?;

    output.objects(kind, &objects, &source.dir_for(kind));
    Ok(())
}

/// Shows a single object
pub fn show(
    output: &Output,
    source: &FilesystemSource,
    kind: ObjectKind,
    identifier: &str,
) -> Result<()> {
    let identifier = Identifier::new(identifier);
    let objects = source
        .load_objects(kind)
        .with_context(|| format!("Failed to load {}s", kind))?;

    let object = find(&objects, &identifier)
        .ok_or_else(|| anyhow::anyhow!("No {} with identifier {}", kind, identifier))?;

    if output.is_json() {
        output.data(object);
        return Ok(());
    }

    println!("{} {}", kind, object.identifier);
    println!("modified: {}", object.modified_at.to_rfc3339());
    println!();

    if !object.attributes.is_empty() {
        let yaml = object
            .attributes
            .to_yaml()
            .context("Failed to render attributes")?;
        print!("{}", yaml);
        println!();
    }

    match &object.content {
        Content::Text(text) => println!("{}", text),
        Content::Binary(path) => println!("(binary file: {})", path.display()),
    }

    Ok(())
}

/// Creates a new object from command-line arguments
pub fn create(
    output: &Output,
    source: &FilesystemSource,
    kind: ObjectKind,
    args: &CreateArgs,
) -> Result<()> {
    let attributes = attributes_from_args(&args.attrs)?;

    let path = source
        .create(kind, &args.content, &attributes, &args.identifier, &args.ext)
        .with_context(|| format!("Failed to create {} {}", kind, args.identifier))?;

    if output.is_json() {
        output.data(&serde_json::json!({
            "kind": kind,
            "identifier": Identifier::new(&args.identifier).as_str(),
            "path": path.display().to_string(),
        }));
    } else {
        output.success(&format!("Created {} at {}", kind, path.display()));
    }

    Ok(())
}

fn find<'a>(objects: &'a [ContentObject], identifier: &Identifier) -> Option<&'a ContentObject> {
    objects.iter().find(|o| &o.identifier == identifier)
}

/// Builds attributes from key=value pairs, reading each value as YAML
fn attributes_from_args(pairs: &[(String, String)]) -> Result<Attributes> {
    let mut attributes = Attributes::new();

    for (key, raw) in pairs {
        let value: Value = if raw.trim().is_empty() {
            Value::String(raw.clone())
        } else {
            serde_yaml::from_str(raw)
                .with_context(|| format!("Invalid value for attribute '{}': {}", key, raw))?
        };
        attributes.set(key.clone(), value);
    }

    Ok(attributes)
}
