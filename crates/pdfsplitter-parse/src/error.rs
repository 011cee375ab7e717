//! Error types for the backend layer.
//!
//! [`BackendError`] is derived with [`thiserror`] and converts into the
//! library-wide [`PdfError`].

use pdfsplitter_core::PdfError;
use thiserror::Error;

/// Error type for PDF backend operations.
#[derive(Debug, Error)]
pub enum BackendError {
    /// Error from PDF parsing (structure, syntax, object resolution).
    #[error("PDF parse error: {0}")]
    Parse(String),

    /// Error reading PDF data.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error serializing an assembled document.
    #[error("failed to write PDF: {0}")]
    Write(String),

    /// A core library error.
    #[error(transparent)]
    Core(#[from] PdfError),
}

impl From<BackendError> for PdfError {
    fn from(err: BackendError) -> Self {
        match err {
            BackendError::Parse(msg) => PdfError::ParseError(msg),
            BackendError::Io(e) => PdfError::IoError(e.to_string()),
            BackendError::Write(msg) => PdfError::WriteError(msg),
            BackendError::Core(e) => e,
        }
    }
}
