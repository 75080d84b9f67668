//! Front matter splitting
//!
//! A combined file may open with a metadata block delimited by lines of
//! exactly three or five dashes:
//!
//! ```text
//! ---
//! title: "Moo!"
//! ---
//! Body content
//! ```
//!
//! Trailing spaces, tabs and carriage returns on a delimiter line are ignored.

/// Result of looking for a front matter block
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrontMatter<'a> {
    /// The text does not open with a delimiter line; all of it is content
    Absent,

    /// A complete block was found
    Present {
        /// Raw YAML between the delimiters
        metadata: &'a str,
        /// Text after the closing delimiter, trimmed
        body: &'a str,
    },

    /// An opening delimiter was found but never closed
    Unterminated,
}

/// Returns true if a line (with or without its newline) is a delimiter
pub fn is_delimiter(line: &str) -> bool {
    let trimmed = line.trim_end_matches(|c: char| matches!(c, ' ' | '\t' | '\r' | '\n'));
    trimmed == "---" || trimmed == "-----"
}

/// Splits text into its front matter and body
pub fn split_front_matter(text: &str) -> FrontMatter<'_> {
    let mut lines = text.split_inclusive('\n');

    let first = match lines.next() {
        Some(line) => line,
        None => return FrontMatter::Absent,
    };
    if !is_delimiter(first) {
        return FrontMatter::Absent;
    }

    let metadata_start = first.len();
    let mut offset = metadata_start;

    for line in lines {
        if is_delimiter(line) {
            return FrontMatter::Present {
                metadata: &text[metadata_start..offset],
                body: text[offset + line.len()..].trim(),
            };
        }
        offset += line.len();
    }

    FrontMatter::Unterminated
}
