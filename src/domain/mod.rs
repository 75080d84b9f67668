//! Domain models for content discovery
//!
//! Identifier rules, front matter splitting and the content object model,
//! without any I/O concerns.

mod identifier;
mod frontmatter;
mod object;

pub use identifier::{
    extension_of, identifier_for, split_extension, strip_extension, validate_for_creation,
    Identifier, IdentifierError,
};
pub use frontmatter::{is_delimiter, split_front_matter, FrontMatter};
pub use object::{attr, Attributes, Content, ContentObject, MetadataError, ObjectKind};
