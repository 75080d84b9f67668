//! Reading source files as UTF-8 text

use std::fs;
use std::path::Path;

use encoding_rs::Encoding;

use super::error::{Result, SourceError};

const BYTE_ORDER_MARK: char = '\u{feff}';

/// Reads a file and decodes it from `encoding` into UTF-8
///
/// The label is any WHATWG encoding label (`utf-8`, `iso-8859-1`,
/// `windows-1252`, `shift_jis`, ...). A leading byte order mark is removed.
/// Bytes that are invalid for the encoding are an error, not replaced.
pub fn read_text(path: &Path, encoding: &str) -> Result<String> {
    let bytes = fs::read(path).map_err(|e| SourceError::read(path, e))?;
    decode(path, &bytes, encoding)
}

fn decode(path: &Path, bytes: &[u8], label: &str) -> Result<String> {
    let encoding_error = || SourceError::Encoding {
        path: path.to_path_buf(),
        encoding: label.to_string(),
    };

    let encoding = Encoding::for_label(label.trim().as_bytes()).ok_or_else(encoding_error)?;

    let text = encoding
        .decode_without_bom_handling_and_without_replacement(bytes)
        .ok_or_else(encoding_error)?;

    let mut text = text.into_owned();
    if text.starts_with(BYTE_ORDER_MARK) {
        text.remove(0);
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn reads_utf8() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("a.txt");
        fs::write(&path, "héllo").unwrap();

        assert_eq!(read_text(&path, "utf-8").unwrap(), "héllo");
    }

    #[test]
    fn strips_byte_order_mark() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bom.txt");
        fs::write(&path, b"\xEF\xBB\xBF---\ntitle: x\n---\n").unwrap();

        let text = read_text(&path, "utf-8").unwrap();
        assert!(text.starts_with("---"));
        assert!(!text.contains(BYTE_ORDER_MARK));
    }

    #[test]
    fn decodes_latin1() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("latin.txt");
        fs::write(&path, b"caf\xE9").unwrap();

        assert_eq!(read_text(&path, "iso-8859-1").unwrap(), "café");
    }

    #[test]
    fn invalid_bytes_are_encoding_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.txt");
        fs::write(&path, b"caf\xE9").unwrap();

        match read_text(&path, "utf-8") {
            Err(SourceError::Encoding { path: p, encoding }) => {
                assert_eq!(p, path);
                assert_eq!(encoding, "utf-8");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn unknown_label_is_encoding_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("a.txt");
        fs::write(&path, "x").unwrap();

        assert!(matches!(
            read_text(&path, "klingon-8"),
            Err(SourceError::Encoding { .. })
        ));
    }

    #[test]
    fn missing_file_is_read_error() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(
            read_text(&dir.path().join("gone.txt"), "utf-8"),
            Err(SourceError::Read { .. })
        ));
    }
}
