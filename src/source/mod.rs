//! Document sources.
//!
//! A document is loaded either from a PDF (spans read from the content
//! streams with lopdf) or from a JSON span dump. The kind is detected from
//! the file contents.

mod dump;
mod pdf;

pub use dump::{DumpBlock, DumpLine, DumpPage, DumpSpan, SpanDump};
pub use pdf::PdfSource;

use std::path::Path;

use crate::detect::{detect_source_kind, SourceKind};
use crate::error::Result;
use crate::model::Document;
use crate::options::ErrorMode;

/// Load a document from a PDF file or span dump.
pub fn load_document<P: AsRef<Path>>(path: P, error_mode: ErrorMode) -> Result<Document> {
    let path = path.as_ref();
    let name = file_name(path);

    match detect_source_kind(path)? {
        SourceKind::Pdf { version } => {
            log::debug!("{}: PDF {}", name, version);
            PdfSource::open(path, error_mode)?.load()
        }
        SourceKind::SpanDump => {
            log::debug!("{}: span dump", name);
            Ok(SpanDump::open(path)?.into_document(name))
        }
    }
}

/// File name of a path, used as the document name.
pub(crate) fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::io::Write;

    #[test]
    fn test_load_span_dump() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.json");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(br#"{"pages": [{"blocks": [{"type": 0, "lines": [{"spans": [{"text": "Hello", "size": 12, "flags": 0, "bbox": [0, 10, 5, 20]}]}]}]}]}"#)
            .unwrap();

        let doc = load_document(&path, ErrorMode::Strict).unwrap();
        assert_eq!(doc.name, "notes.json");
        assert_eq!(doc.pages[0].text, "Hello");
        assert_eq!(doc.body_size, 12);
    }

    #[test]
    fn test_load_unknown_format() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"just some text").unwrap();
        let result = load_document(file.path(), ErrorMode::Lenient);
        assert!(matches!(result, Err(Error::UnknownFormat)));
    }

    #[test]
    fn test_load_missing_file() {
        let result = load_document("/nonexistent/file.pdf", ErrorMode::Strict);
        assert!(matches!(result, Err(Error::Io(_))));
    }
}
