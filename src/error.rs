//! Error types for the PDF writer.
//!
//! This module defines all error types that can occur while assembling and
//! writing a PDF file.

use std::fmt;

/// Result type alias for PDF writer operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Phase of the write pass in which an I/O failure happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WritePhase {
    /// `%PDF-x.y` line and binary marker
    Header,
    /// Body of the given indirect object
    Object(u32),
    /// `xref` section
    CrossReference,
    /// Trailer dictionary, `startxref` and `%%EOF`
    Trailer,
    /// Final flush of the sink
    Flush,
}

impl fmt::Display for WritePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WritePhase::Header => write!(f, "header"),
            WritePhase::Object(n) => write!(f, "object {}", n),
            WritePhase::CrossReference => write!(f, "cross-reference table"),
            WritePhase::Trailer => write!(f, "trailer"),
            WritePhase::Flush => write!(f, "flush"),
        }
    }
}

/// Error types that can occur during PDF generation.
#[derive(Debug, thiserror::Error)]
#[allow(clippy::enum_variant_names)]
pub enum Error {
    /// Compression level outside -1..=9
    #[error("Invalid compression level: {0} (expected -1..=9)")]
    InvalidCompressionLevel(i32),

    /// Decompressed output grew past the configured ceiling
    #[error("Decompressed size exceeds limit of {limit} bytes")]
    DecompressedSizeExceeded {
        /// Ceiling in bytes
        limit: usize,
    },

    /// Compressed input is malformed or truncated
    #[error("Corrupt compressed stream: {0}")]
    CorruptStream(String),

    /// `write` called after `close`
    #[error("Writer is closed")]
    WriterClosed,

    /// `write` called again after a pass reached the sink
    #[error("Writer already produced a document")]
    AlreadyWritten,

    /// Object number that was never allocated (0 is reserved)
    #[error("Invalid object number: {0}")]
    InvalidObjectNumber(u32),

    /// An allocated object has no recorded offset
    #[error("Object {0} was allocated but never written")]
    MissingObject(u32),

    /// Document failed structural validation
    #[error("Invalid document: {0}")]
    InvalidDocument(String),

    /// I/O failure during a specific phase of the write pass
    #[error("I/O error while writing {phase}: {source}")]
    Write {
        /// Phase that failed
        phase: WritePhase,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Wrap an I/O error with the phase it occurred in.
    pub fn write(phase: WritePhase, source: std::io::Error) -> Self {
        Error::Write { phase, source }
    }

    /// Shorthand for a document validation failure.
    pub fn invalid_document(reason: impl Into<String>) -> Self {
        Error::InvalidDocument(reason.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InvalidCompressionLevel(10);
        assert_eq!(err.to_string(), "Invalid compression level: 10 (expected -1..=9)");

        let err = Error::DecompressedSizeExceeded { limit: 1024 };
        assert_eq!(err.to_string(), "Decompressed size exceeds limit of 1024 bytes");

        let err = Error::WriterClosed;
        assert_eq!(err.to_string(), "Writer is closed");

        let err = Error::AlreadyWritten;
        assert_eq!(err.to_string(), "Writer already produced a document");

        let err = Error::MissingObject(7);
        assert_eq!(err.to_string(), "Object 7 was allocated but never written");
    }

    #[test]
    fn test_write_error_carries_phase() {
        let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed");
        let err = Error::write(WritePhase::Object(3), io);
        assert_eq!(err.to_string(), "I/O error while writing object 3: pipe closed");
        assert!(std::error::Error::source(&err).is_some());

        match err {
            Error::Write { phase, .. } => assert_eq!(phase, WritePhase::Object(3)),
            _ => panic!("Wrong error type"),
        }
    }

    #[test]
    fn test_phase_display() {
        assert_eq!(WritePhase::Header.to_string(), "header");
        assert_eq!(WritePhase::CrossReference.to_string(), "cross-reference table");
        assert_eq!(WritePhase::Trailer.to_string(), "trailer");
        assert_eq!(WritePhase::Flush.to_string(), "flush");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send<T: Send>() {}
        fn assert_sync<T: Sync>() {}
        assert_send::<Error>();
        assert_sync::<Error>();
    }
}
