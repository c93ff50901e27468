//! Error types for docintel.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for docintel operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while loading or analyzing documents.
///
/// The analysis core itself is total over its inputs; these errors come from
/// the collaborators around it (file access, PDF parsing, model loading).
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The file format is not recognized as PDF.
    #[error("Unknown file format: not a valid PDF")]
    UnknownFormat,

    /// The PDF version is not supported.
    #[error("Unsupported PDF version: {0}")]
    UnsupportedVersion(String),

    /// Error parsing PDF structure.
    #[error("PDF parsing error: {0}")]
    PdfParse(String),

    /// The PDF document is encrypted.
    #[error("Document is encrypted")]
    Encrypted,

    /// Error extracting text content.
    #[error("Text extraction error: {0}")]
    TextExtract(String),

    /// The classifier model file does not exist.
    #[error("Classifier model not found: {}", .0.display())]
    MissingModel(PathBuf),

    /// The classifier model file is structurally invalid.
    #[error("Invalid classifier model: {0}")]
    InvalidModel(String),

    /// A collection or span dump could not be decoded.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid collection configuration.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Error during rendering.
    #[error("Rendering error: {0}")]
    Render(String),
}

impl From<lopdf::Error> for Error {
    fn from(err: lopdf::Error) -> Self {
        match err {
            lopdf::Error::IO(e) => Error::Io(e),
            lopdf::Error::Decryption(_) => Error::Encrypted,
            _ => Error::PdfParse(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::Encrypted;
        assert_eq!(err.to_string(), "Document is encrypted");

        let err = Error::UnsupportedVersion("3.0".to_string());
        assert_eq!(err.to_string(), "Unsupported PDF version: 3.0");

        let err = Error::MissingModel(PathBuf::from("model.json"));
        assert_eq!(err.to_string(), "Classifier model not found: model.json");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err, Error::Json(_)));
    }
}
