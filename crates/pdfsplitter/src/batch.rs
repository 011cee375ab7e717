//! Batch processing of whole files.
//!
//! [`FileProcessor`] is the per-item step handed to the core batch runner:
//! it opens one [`SourceFile`] and applies the batch operation to all of its
//! pages. Failures stay inside the item's [`BatchResult`](pdfsplitter_core::BatchResult).

use pdfsplitter_core::{
    Artifact, BatchError, BatchItem, BatchObserver, BatchOperation, BatchResult, PageSelection,
    PdfError, batch_output_name, run_batch_observed,
};

use crate::Pdf;

/// PDF file signature.
const PDF_MAGIC: &[u8] = b"%PDF-";

/// A file queued for batch processing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// File name as shown to the user.
    pub name: String,
    /// Raw file content.
    pub bytes: Vec<u8>,
}

impl SourceFile {
    /// Create a source file.
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }

    /// Read a file from disk, naming it after the path's file name.
    ///
    /// # Errors
    ///
    /// Returns [`PdfError::IoError`] if the file cannot be read.
    #[cfg(feature = "std")]
    pub fn from_path(path: impl AsRef<std::path::Path>) -> Result<Self, PdfError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|e| PdfError::IoError(e.to_string()))?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self::new(name, bytes))
    }

    /// Size of the content in bytes.
    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

impl BatchItem for SourceFile {
    fn name(&self) -> &str {
        &self.name
    }
}

/// Whether a file should be treated as a PDF: it starts with the `%PDF-`
/// signature or, failing that, its name ends in `.pdf`.
pub fn is_pdf_source(name: &str, bytes: &[u8]) -> bool {
    bytes.starts_with(PDF_MAGIC) || name.to_ascii_lowercase().ends_with(".pdf")
}

/// Applies a [`BatchOperation`] to one whole file.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileProcessor;

impl FileProcessor {
    /// Process every page of `file`.
    ///
    /// A file without pages still succeeds: splitting copies it and text
    /// extraction yields an empty file.
    ///
    /// # Errors
    ///
    /// Any error from opening the file or producing the output.
    pub fn process(
        &self,
        file: &SourceFile,
        operation: BatchOperation,
    ) -> Result<Artifact, PdfError> {
        let pdf = Pdf::open(&file.bytes)?;
        let all = PageSelection::all(pdf.page_count());
        let filename = batch_output_name(&file.name, operation);
        let bytes = match operation {
            BatchOperation::Split => pdf.assemble_all()?,
            BatchOperation::ExtractText if all.is_empty() => Vec::new(),
            BatchOperation::ExtractText => pdf.extract_text(&all)?.into_bytes(),
        };
        Ok(Artifact::new(filename, operation.output_kind(), bytes))
    }

    /// Run `operation` over `files` in order, reporting to `observer`.
    ///
    /// # Errors
    ///
    /// Returns [`BatchError::Empty`] when there are no files. Per-file
    /// failures are not errors; they are recorded in the results.
    pub fn run(
        &self,
        files: &[SourceFile],
        operation: BatchOperation,
        observer: &mut dyn BatchObserver,
    ) -> Result<Vec<BatchResult>, BatchError> {
        if files.is_empty() {
            return Err(BatchError::Empty);
        }
        tracing::info!(files = files.len(), operation = %operation, "batch started");
        let results = run_batch_observed(
            files,
            operation,
            |file, op| self.process(file, op),
            &mut LoggingObserver { inner: observer },
        );
        Ok(results)
    }
}

/// Forwards events to the caller's observer and logs failures.
struct LoggingObserver<'a> {
    inner: &'a mut dyn BatchObserver,
}

impl BatchObserver for LoggingObserver<'_> {
    fn on_item_start(&mut self, index: usize, total: usize, name: &str) {
        tracing::debug!(item = index + 1, total, name, "processing");
        self.inner.on_item_start(index, total, name);
    }

    fn on_item_done(&mut self, index: usize, result: &BatchResult) {
        if let Some(detail) = result.error_detail() {
            tracing::warn!(
                item = index + 1,
                name = result.name(),
                error = detail,
                "batch item failed"
            );
        }
        self.inner.on_item_done(index, result);
    }
}

/// Keep the PDFs among `files`.
///
/// # Errors
///
/// Returns [`BatchError::NoPdfFiles`] if none of them is a PDF.
pub fn filter_pdf_files(
    files: impl IntoIterator<Item = SourceFile>,
) -> Result<Vec<SourceFile>, BatchError> {
    let pdfs: Vec<SourceFile> = files
        .into_iter()
        .filter(|file| is_pdf_source(&file.name, &file.bytes))
        .collect();
    if pdfs.is_empty() {
        Err(BatchError::NoPdfFiles)
    } else {
        Ok(pdfs)
    }
}
