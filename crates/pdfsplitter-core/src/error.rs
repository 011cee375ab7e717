//! Error types for pdfsplitter-rs.
//!
//! Provides [`PdfError`], the error type shared by every layer. Errors are
//! scoped to a single document or operation: nothing here is fatal to the
//! process, and batch runs record them per item instead of propagating.

use std::fmt;

/// Error types for PDF loading, splitting, and extraction.
#[derive(Debug, Clone, PartialEq)]
pub enum PdfError {
    /// Error parsing PDF structure or syntax.
    ParseError(String),
    /// I/O error reading PDF data or writing an artifact.
    IoError(String),
    /// The input is not a PDF document (wrong file type or missing header).
    NotPdf(String),
    /// The PDF is encrypted; encrypted documents are not supported.
    Encrypted,
    /// Error while copying pages or serializing a new document.
    WriteError(String),
    /// An operation needs a loaded document and none is loaded.
    NoDocument,
    /// A split or extraction was requested with no pages selected.
    EmptySelection,
    /// A page number outside `1..=page_count` reached the backend.
    PageOutOfRange {
        /// The offending 1-based page number.
        page: u32,
        /// Number of pages in the document.
        page_count: u32,
    },
}

impl fmt::Display for PdfError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PdfError::ParseError(msg) => write!(f, "parse error: {msg}"),
            PdfError::IoError(msg) => write!(f, "I/O error: {msg}"),
            PdfError::NotPdf(name) => write!(f, "not a valid PDF file: {name}"),
            PdfError::Encrypted => write!(f, "PDF is encrypted and cannot be processed"),
            PdfError::WriteError(msg) => write!(f, "failed to write PDF: {msg}"),
            PdfError::NoDocument => write!(f, "no PDF loaded"),
            PdfError::EmptySelection => write!(f, "please select at least one page"),
            PdfError::PageOutOfRange { page, page_count } => {
                write!(f, "page {page} is out of range (document has {page_count} pages)")
            }
        }
    }
}

impl std::error::Error for PdfError {}

impl From<std::io::Error> for PdfError {
    fn from(err: std::io::Error) -> Self {
        PdfError::IoError(err.to_string())
    }
}
