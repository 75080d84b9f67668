//! Grouping of companion files
//!
//! `about.yaml` and `about.html` describe the same object: the first holds
//! metadata, the second content. Files are grouped by their basename key
//! (the path with its extension stripped) and each group may hold at most
//! one metadata file and at most one content file.

use std::collections::BTreeMap;

use crate::domain::split_extension;

use super::error::{FileRole, Result, SourceError};

/// Marker for the metadata side of a pairing
pub const META_EXTENSION: &str = "yaml";

/// The files sharing one basename key
///
/// Extensions are stored without the leading dot. An empty content extension
/// means a content file with no extension at all, which is distinct from
/// having no content file.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilePairing {
    pub meta_ext: Option<String>,
    pub content_ext: Option<String>,
}

impl FilePairing {
    pub fn has_meta(&self) -> bool {
        self.meta_ext.is_some()
    }

    pub fn has_content(&self) -> bool {
        self.content_ext.is_some()
    }
}

/// Groups relative paths by basename key
///
/// Fails with [`SourceError::AmbiguousPairing`] when a key has more than one
/// metadata file or more than one content file.
pub fn group<S: AsRef<str>>(paths: &[S], allow_periods: bool) -> Result<BTreeMap<String, FilePairing>> {
    let mut by_key: BTreeMap<&str, (Vec<&str>, Vec<&str>)> = BTreeMap::new();

    for path in paths {
        let (key, ext) = split_extension(path.as_ref(), allow_periods);
        let ext = ext.strip_prefix('.').unwrap_or(ext);

        let (metas, contents) = by_key.entry(key).or_default();
        if ext == META_EXTENSION {
            metas.push(ext);
        } else {
            contents.push(ext);
        }
    }

    let mut pairings = BTreeMap::new();

    for (key, (metas, contents)) in by_key {
        if metas.len() > 1 {
            return Err(SourceError::AmbiguousPairing {
                key: key.to_string(),
                role: FileRole::Metadata,
                count: metas.len(),
            });
        }
        if contents.len() > 1 {
            return Err(SourceError::AmbiguousPairing {
                key: key.to_string(),
                role: FileRole::Content,
                count: contents.len(),
            });
        }

        let pairing = FilePairing {
            meta_ext: metas.first().map(|e| (*e).to_string()),
            content_ext: contents.first().map(|e| (*e).to_string()),
        };
        pairings.insert(key.to_string(), pairing);
    }

    Ok(pairings)
}

/// Reconstructs a file name from a basename key and an extension marker
///
/// `None` means there is no such file. An empty extension gives the key
/// itself (the extensionless case).
pub fn filename_for(base: &str, ext: Option<&str>) -> Option<String> {
    match ext {
        None => None,
        Some("") => Some(base.to_string()),
        Some(ext) => Some(format!("{}.{}", base, ext)),
    }
}
