//! Top-level PDF document type.

use pdfsplitter_core::{
    LineBreakStrategy, PageSelection, PdfError, TextRun, VerticalShift, assemble_page,
};
use pdfsplitter_parse::{LopdfBackend, LopdfDocument, PdfBackend};

/// An opened PDF document.
///
/// Opening parses the document once; page text and page subsets are then
/// produced on demand. The document is never modified: splitting builds a
/// fresh copy.
#[derive(Debug, Clone)]
pub struct Pdf {
    doc: LopdfDocument,
    page_count: u32,
}

impl Pdf {
    /// Open a PDF document from bytes.
    ///
    /// # Errors
    ///
    /// Returns [`PdfError::ParseError`] for unreadable input and
    /// [`PdfError::Encrypted`] for encrypted documents.
    pub fn open(bytes: &[u8]) -> Result<Self, PdfError> {
        let doc = LopdfBackend::open(bytes).map_err(PdfError::from)?;
        let page_count = u32::try_from(LopdfBackend::page_count(&doc))
            .map_err(|_| PdfError::ParseError("too many pages".to_string()))?;
        tracing::debug!(page_count, bytes = bytes.len(), "opened document");
        Ok(Self { doc, page_count })
    }

    /// Open a PDF document from a file path.
    ///
    /// Convenience wrapper around [`Pdf::open`] that reads the file into
    /// memory first.
    ///
    /// # Errors
    ///
    /// Returns [`PdfError::IoError`] if the file cannot be read, otherwise
    /// the same errors as [`Pdf::open`].
    #[cfg(feature = "std")]
    pub fn open_file(path: impl AsRef<std::path::Path>) -> Result<Self, PdfError> {
        let bytes = std::fs::read(path.as_ref()).map_err(|e| PdfError::IoError(e.to_string()))?;
        Self::open(&bytes)
    }

    /// Number of pages.
    pub fn page_count(&self) -> u32 {
        self.page_count
    }

    /// Text runs of a 1-based page, in content-stream order.
    ///
    /// # Errors
    ///
    /// Returns [`PdfError::PageOutOfRange`] for a page outside
    /// `1..=page_count`, or the backend's error if the page content cannot
    /// be decoded.
    pub fn page_text_runs(&self, page: u32) -> Result<Vec<TextRun>, PdfError> {
        self.check_page(page)?;
        LopdfBackend::page_text_runs(&self.doc, page as usize - 1).map_err(PdfError::from)
    }

    /// Plain text of the selected pages using the default line-break rule.
    ///
    /// # Errors
    ///
    /// See [`Pdf::extract_text_with`].
    pub fn extract_text(&self, selection: &PageSelection) -> Result<String, PdfError> {
        self.extract_text_with(selection, &VerticalShift)
    }

    /// Plain text of the selected pages, in ascending page order, with line
    /// breaks decided by `strategy`.
    ///
    /// # Errors
    ///
    /// Returns [`PdfError::EmptySelection`] when nothing is selected, and
    /// stops at the first page whose text cannot be read.
    pub fn extract_text_with(
        &self,
        selection: &PageSelection,
        strategy: &dyn LineBreakStrategy,
    ) -> Result<String, PdfError> {
        if selection.is_empty() {
            return Err(PdfError::EmptySelection);
        }
        let mut out = String::new();
        for page in selection {
            let runs = self.page_text_runs(page)?;
            assemble_page(page, &runs, strategy, &mut out);
        }
        Ok(out)
    }

    /// Serialize a new PDF holding only the selected pages.
    ///
    /// # Errors
    ///
    /// Returns [`PdfError::EmptySelection`] when nothing is selected,
    /// [`PdfError::PageOutOfRange`] for a page the document does not have,
    /// and [`PdfError::WriteError`] if serialization fails.
    pub fn assemble(&self, selection: &PageSelection) -> Result<Vec<u8>, PdfError> {
        if selection.is_empty() {
            return Err(PdfError::EmptySelection);
        }
        for page in selection {
            self.check_page(page)?;
        }
        let bytes = LopdfBackend::assemble(&self.doc, &selection.to_zero_based())
            .map_err(PdfError::from)?;
        tracing::debug!(pages = selection.len(), bytes = bytes.len(), "assembled document");
        Ok(bytes)
    }

    /// Serialize a copy holding every page. A document without pages gives
    /// an empty copy instead of an error.
    ///
    /// # Errors
    ///
    /// Returns [`PdfError::WriteError`] if serialization fails.
    pub fn assemble_all(&self) -> Result<Vec<u8>, PdfError> {
        let pages: Vec<usize> = (0..self.page_count as usize).collect();
        LopdfBackend::assemble(&self.doc, &pages).map_err(PdfError::from)
    }

    fn check_page(&self, page: u32) -> Result<(), PdfError> {
        if page == 0 || page > self.page_count {
            return Err(PdfError::PageOutOfRange {
                page,
                page_count: self.page_count,
            });
        }
        Ok(())
    }
}
