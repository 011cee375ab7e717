//! Application state shared by the interactive front ends.
//!
//! [`AppState`] owns everything a session works on: the loaded document,
//! the current page selection, the range policy, and the batch queue. Front
//! ends hold one instance and call its methods; there is no global state.

use pdfsplitter_core::{
    Artifact, BatchError, BatchObserver, BatchOperation, BatchResult, PageSelection, PdfError,
    RangeError, RangePolicy,
};

use crate::batch::{FileProcessor, SourceFile, filter_pdf_files, is_pdf_source};
use crate::{Pdf, ops};

/// The document currently open for page selection.
#[derive(Debug, Clone)]
pub struct LoadedDocument {
    name: String,
    size: u64,
    pdf: Pdf,
}

impl LoadedDocument {
    /// File name the document was loaded under.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Size of the source file in bytes.
    pub fn size(&self) -> u64 {
        self.size
    }

    /// The parsed document.
    pub fn pdf(&self) -> &Pdf {
        &self.pdf
    }

    /// Number of pages.
    pub fn page_count(&self) -> u32 {
        self.pdf.page_count()
    }
}

/// Session state: one loaded document with its selection, plus a batch queue.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    document: Option<LoadedDocument>,
    selection: PageSelection,
    policy: RangePolicy,
    batch: Vec<SourceFile>,
}

impl AppState {
    /// Empty state with the lenient range policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty state with the given range policy.
    pub fn with_policy(policy: RangePolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    /// Range policy used by [`AppState::apply_range`].
    pub fn policy(&self) -> RangePolicy {
        self.policy
    }

    /// Change the range policy.
    pub fn set_policy(&mut self, policy: RangePolicy) {
        self.policy = policy;
    }

    /// Load a document, replacing the current one and clearing the selection.
    ///
    /// Returns the page count. On failure the previous document and
    /// selection are kept.
    ///
    /// # Errors
    ///
    /// [`PdfError::NotPdf`] if the input has neither the PDF signature nor a
    /// `.pdf` name, otherwise any error from [`Pdf::open`].
    pub fn load_document(&mut self, name: &str, bytes: &[u8]) -> Result<u32, PdfError> {
        if !is_pdf_source(name, bytes) {
            return Err(PdfError::NotPdf(name.to_string()));
        }
        let pdf = Pdf::open(bytes).inspect_err(|err| {
            tracing::warn!(name, error = %err, "failed to load document");
        })?;
        let page_count = pdf.page_count();
        self.document = Some(LoadedDocument {
            name: name.to_string(),
            size: bytes.len() as u64,
            pdf,
        });
        self.selection.clear();
        tracing::info!(name, page_count, "document loaded");
        Ok(page_count)
    }

    /// Drop the loaded document and its selection.
    pub fn close_document(&mut self) {
        self.document = None;
        self.selection.clear();
    }

    /// The loaded document, if any.
    pub fn document(&self) -> Option<&LoadedDocument> {
        self.document.as_ref()
    }

    /// Page count of the loaded document, 0 when none is loaded.
    pub fn page_count(&self) -> u32 {
        self.document.as_ref().map_or(0, LoadedDocument::page_count)
    }

    /// Current selection.
    pub fn selection(&self) -> &PageSelection {
        &self.selection
    }

    /// Mutable access to the current selection.
    ///
    /// Prefer [`AppState::toggle_page`] and friends, which keep pages within
    /// the document.
    pub fn selection_mut(&mut self) -> &mut PageSelection {
        &mut self.selection
    }

    /// Flip one page. Returns its new state.
    pub fn toggle_page(&mut self, page: u32) -> bool {
        let page_count = self.page_count();
        self.selection.toggle(page, page_count)
    }

    /// Select every page of the loaded document.
    pub fn select_all(&mut self) {
        let page_count = self.page_count();
        self.selection.select_all(page_count);
    }

    /// Deselect every page.
    pub fn deselect_all(&mut self) {
        self.selection.clear();
    }

    /// Replace the selection from a range expression. A blank expression is
    /// ignored. Returns the number of selected pages.
    ///
    /// # Errors
    ///
    /// Only under [`RangePolicy::Strict`]; the selection is then unchanged.
    pub fn apply_range(&mut self, input: &str) -> Result<usize, RangeError> {
        let page_count = self.page_count();
        self.selection.apply_range(input, page_count, self.policy)
    }

    /// Split the selected pages into a new PDF.
    ///
    /// # Errors
    ///
    /// [`PdfError::NoDocument`] without a loaded document,
    /// [`PdfError::EmptySelection`] without selected pages, otherwise any
    /// error from [`ops::split`].
    pub fn split_selected(&self, output_name: Option<&str>) -> Result<Artifact, PdfError> {
        let document = self.loaded()?;
        ops::split(&document.pdf, &document.name, &self.selection, output_name)
    }

    /// Extract the text of the selected pages.
    ///
    /// # Errors
    ///
    /// As [`AppState::split_selected`], with errors from [`ops::extract_text`].
    pub fn extract_selected(&self, output_name: Option<&str>) -> Result<Artifact, PdfError> {
        let document = self.loaded()?;
        ops::extract_text(&document.pdf, &document.name, &self.selection, output_name)
    }

    fn loaded(&self) -> Result<&LoadedDocument, PdfError> {
        self.document.as_ref().ok_or(PdfError::NoDocument)
    }

    /// Queue the PDFs among `files` for batch processing. Returns how many
    /// were added.
    ///
    /// # Errors
    ///
    /// [`BatchError::NoPdfFiles`] if none of `files` is a PDF; the queue is
    /// then unchanged.
    pub fn add_batch_files(
        &mut self,
        files: impl IntoIterator<Item = SourceFile>,
    ) -> Result<usize, BatchError> {
        let pdfs = filter_pdf_files(files)?;
        let added = pdfs.len();
        self.batch.extend(pdfs);
        Ok(added)
    }

    /// Remove a queued file by position.
    pub fn remove_batch_file(&mut self, index: usize) -> Option<SourceFile> {
        (index < self.batch.len()).then(|| self.batch.remove(index))
    }

    /// Files queued for batch processing, in the order they were added.
    pub fn batch_files(&self) -> &[SourceFile] {
        &self.batch
    }

    /// Empty the batch queue.
    pub fn clear_batch(&mut self) {
        self.batch.clear();
    }

    /// Run `operation` over every queued file.
    ///
    /// # Errors
    ///
    /// [`BatchError::Empty`] if the queue is empty.
    pub fn run_batch(
        &self,
        operation: BatchOperation,
        observer: &mut dyn BatchObserver,
    ) -> Result<Vec<BatchResult>, BatchError> {
        FileProcessor.run(&self.batch, operation, observer)
    }
}
