//! Error types for pdf-outline.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::extract::EngineKind;

/// Result type alias for pdf-outline operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while extracting an outline.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading a PDF or writing a JSON file.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The file does not carry a PDF header.
    #[error("Unknown file format: not a valid PDF")]
    UnknownFormat,

    /// Error parsing PDF structure.
    #[error("PDF parsing error: {0}")]
    PdfParse(String),

    /// The PDF is encrypted and the empty password does not open it.
    #[error("Document is encrypted")]
    Encrypted,

    /// Error extracting text content.
    #[error("Text extraction error: {0}")]
    TextExtract(String),

    /// A single extraction engine could not produce text.
    ///
    /// Recovered by the extractor, which moves on to the next engine.
    #[error("{engine} engine failed: {reason}")]
    ExtractionFailed {
        /// Engine that failed.
        engine: EngineKind,
        /// Human-readable cause.
        reason: String,
    },

    /// Every engine failed on this file.
    #[error("Unreadable PDF (primary: {primary}; fallback: {fallback})")]
    UnreadablePdf {
        /// Why the primary engine failed.
        primary: String,
        /// Why the fallback engine failed.
        fallback: String,
    },

    /// Error serializing the outline document.
    #[error("Rendering error: {0}")]
    Render(String),

    /// JSON does not match the outline schema.
    #[error("Schema violation at {path}: {message}")]
    InvalidSchema {
        /// JSON pointer-like location of the offending value.
        path: String,
        /// What was expected there.
        message: String,
    },

    /// The output location cannot be written.
    #[error("Cannot write {}: {source}", path.display())]
    Write {
        /// Target file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Build a schema violation error.
    pub fn schema(path: impl Into<String>, message: impl Into<String>) -> Self {
        Error::InvalidSchema {
            path: path.into(),
            message: message.into(),
        }
    }
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

impl From<pdf_extract::OutputError> for Error {
    fn from(err: pdf_extract::OutputError) -> Self {
        Error::TextExtract(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::Encrypted;
        assert_eq!(err.to_string(), "Document is encrypted");

        let err = Error::ExtractionFailed {
            engine: EngineKind::Primary,
            reason: "no text".to_string(),
        };
        assert_eq!(err.to_string(), "primary engine failed: no text");
    }

    #[test]
    fn test_unreadable_display_carries_both_causes() {
        let err = Error::UnreadablePdf {
            primary: "corrupt xref".to_string(),
            fallback: "panicked".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("corrupt xref"));
        assert!(msg.contains("panicked"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_schema_helper() {
        let err = Error::schema("/outline/0/page", "expected integer >= 1");
        assert_eq!(
            err.to_string(),
            "Schema violation at /outline/0/page: expected integer >= 1"
        );
    }
}
