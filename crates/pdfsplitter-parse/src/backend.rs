//! PDF backend trait.
//!
//! [`PdfBackend`] abstracts the few document operations pdfsplitter needs,
//! so the facade can be written against a trait rather than against lopdf.

use pdfsplitter_core::{PdfError, TextRun};

use crate::handler::TextHandler;

/// Trait abstracting PDF reading and page-subset writing.
///
/// # Associated Types
///
/// - `Document`: The parsed PDF document representation.
/// - `Error`: Backend-specific error type, convertible to [`PdfError`].
///
/// # Usage
///
/// ```ignore
/// let doc = MyBackend::open(pdf_bytes)?;
/// let runs = MyBackend::page_text_runs(&doc, 0)?;
/// let bytes = MyBackend::assemble(&doc, &[0, 2])?;
/// ```
pub trait PdfBackend {
    /// The parsed PDF document type.
    type Document;

    /// Backend-specific error type, convertible to [`PdfError`].
    type Error: std::error::Error + Into<PdfError>;

    /// Parse PDF bytes into a document.
    ///
    /// # Errors
    ///
    /// Returns an error if the bytes are not a readable PDF, or if the
    /// document is encrypted.
    fn open(bytes: &[u8]) -> Result<Self::Document, Self::Error>;

    /// Return the number of pages in the document.
    fn page_count(doc: &Self::Document) -> usize;

    /// Interpret the content of the page at 0-based `index`, reporting each
    /// text run to `handler` in content-stream order.
    ///
    /// # Errors
    ///
    /// Returns an error if the index is out of range or the page content
    /// cannot be decoded.
    fn interpret_page_text(
        doc: &Self::Document,
        index: usize,
        handler: &mut dyn TextHandler,
    ) -> Result<(), Self::Error>;

    /// Collect the text runs of the page at 0-based `index`.
    ///
    /// # Errors
    ///
    /// Same as [`PdfBackend::interpret_page_text`].
    fn page_text_runs(doc: &Self::Document, index: usize) -> Result<Vec<TextRun>, Self::Error> {
        let mut runs = Vec::new();
        Self::interpret_page_text(doc, index, &mut runs)?;
        Ok(runs)
    }

    /// Build a new PDF containing only the pages at the given 0-based
    /// indices, and serialize it.
    ///
    /// Indices must be unique and in range. Pages keep their document
    /// order in the output. The source document is not modified. An empty
    /// list is only accepted for a document without pages, which is copied
    /// as is.
    ///
    /// # Errors
    ///
    /// Returns an error for an out-of-range or duplicate index, an empty
    /// list on a document with pages, or if the new document cannot be
    /// serialized.
    fn assemble(doc: &Self::Document, pages: &[usize]) -> Result<Vec<u8>, Self::Error>;
}
