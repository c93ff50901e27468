//! Input format detection.
//!
//! Documents reach the analyzer either as PDF files or as JSON span dumps
//! written by an external extractor. The kind is decided from the leading
//! bytes, never from the file extension.

use crate::error::{Error, Result};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// PDF magic bytes: %PDF-
const PDF_MAGIC: &[u8] = b"%PDF-";
const PDF_MAGIC_LEN: usize = 5;
const VERSION_LEN: usize = 3; // e.g., "1.7"
const PROBE_LEN: usize = 64;

/// Kind of a document source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceKind {
    /// A PDF file with its header version (e.g., "1.7")
    Pdf { version: String },
    /// A JSON span dump
    SpanDump,
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceKind::Pdf { version } => write!(f, "PDF {}", version),
            SourceKind::SpanDump => write!(f, "span dump"),
        }
    }
}

/// Detect the source kind of a file.
pub fn detect_source_kind<P: AsRef<Path>>(path: P) -> Result<SourceKind> {
    let mut file = File::open(path)?;
    let mut probe = Vec::with_capacity(PROBE_LEN);
    file.by_ref().take(PROBE_LEN as u64).read_to_end(&mut probe)?;
    detect_source_kind_from_bytes(&probe)
}

/// Detect the source kind from the first bytes of a file.
pub fn detect_source_kind_from_bytes(data: &[u8]) -> Result<SourceKind> {
    if data.starts_with(PDF_MAGIC) {
        return pdf_version(data).map(|version| SourceKind::Pdf { version });
    }

    let first = data
        .iter()
        .copied()
        .find(|b| !b.is_ascii_whitespace() && *b != 0xEF && *b != 0xBB && *b != 0xBF);
    match first {
        Some(b'{') => Ok(SourceKind::SpanDump),
        _ => Err(Error::UnknownFormat),
    }
}

/// Check if bytes start with a valid PDF header.
pub fn is_pdf_bytes(data: &[u8]) -> bool {
    matches!(
        detect_source_kind_from_bytes(data),
        Ok(SourceKind::Pdf { .. })
    )
}

fn pdf_version(data: &[u8]) -> Result<String> {
    if data.len() < PDF_MAGIC_LEN + VERSION_LEN {
        return Err(Error::UnknownFormat);
    }

    let version_bytes = &data[PDF_MAGIC_LEN..PDF_MAGIC_LEN + VERSION_LEN];
    let version = String::from_utf8_lossy(version_bytes).to_string();

    if !is_valid_version(&version) {
        return Err(Error::UnsupportedVersion(version));
    }
    Ok(version)
}

fn is_valid_version(version: &str) -> bool {
    let bytes = version.as_bytes();
    bytes.len() == 3 && bytes[0].is_ascii_digit() && bytes[1] == b'.' && bytes[2].is_ascii_digit()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_pdf() {
        let kind = detect_source_kind_from_bytes(b"%PDF-1.7\n%\xe2\xe3\xcf\xd3").unwrap();
        assert_eq!(
            kind,
            SourceKind::Pdf {
                version: "1.7".to_string()
            }
        );
        assert_eq!(kind.to_string(), "PDF 1.7");
    }

    #[test]
    fn test_detect_span_dump() {
        let kind = detect_source_kind_from_bytes(b"  \n{\"pages\": []}").unwrap();
        assert_eq!(kind, SourceKind::SpanDump);
    }

    #[test]
    fn test_detect_unknown() {
        let result = detect_source_kind_from_bytes(b"<!DOCTYPE html>");
        assert!(matches!(result, Err(Error::UnknownFormat)));

        let result = detect_source_kind_from_bytes(b"");
        assert!(matches!(result, Err(Error::UnknownFormat)));
    }

    #[test]
    fn test_detect_truncated_pdf_header() {
        let result = detect_source_kind_from_bytes(b"%PDF-");
        assert!(matches!(result, Err(Error::UnknownFormat)));
    }

    #[test]
    fn test_detect_bad_pdf_version() {
        let result = detect_source_kind_from_bytes(b"%PDF-x.y\n");
        assert!(matches!(result, Err(Error::UnsupportedVersion(_))));
    }

    #[test]
    fn test_is_pdf_bytes() {
        assert!(is_pdf_bytes(b"%PDF-1.4\n"));
        assert!(!is_pdf_bytes(b"{}"));
        assert!(!is_pdf_bytes(b"Not a PDF"));
    }
}
