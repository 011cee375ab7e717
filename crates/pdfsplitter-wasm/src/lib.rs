//! WebAssembly/JavaScript bindings for pdfsplitter-rs.
//!
//! Exposes page selection, splitting, text extraction, and batch processing
//! via wasm-bindgen. Outputs are returned as [`WasmArtifact`] objects whose
//! bytes can be handed straight to a `Blob` for download.

use serde::Deserialize;
use wasm_bindgen::prelude::*;

use pdfsplitter::{
    Artifact, BatchError, BatchOperation, BatchResult, FileProcessor, NoopObserver, PageSelection,
    Pdf, PdfError, RangeError, RangePolicy, SourceFile, filter_pdf_files, ops,
};

/// A PDF document opened for splitting (WASM binding).
///
/// # JavaScript Usage
///
/// ```js
/// const pdf = WasmPdf.open(pdfBytes);
/// console.log(`Pages: ${pdf.pageCount}`);
/// const pages = pdf.parseRange("1-3,5");
/// const out = pdf.split(pages, "report.pdf");
/// ```
#[wasm_bindgen]
pub struct WasmPdf {
    inner: Pdf,
}

#[wasm_bindgen]
impl WasmPdf {
    /// Open a PDF from raw bytes (Uint8Array in JavaScript).
    pub fn open(data: &[u8]) -> Result<WasmPdf, JsError> {
        let pdf = Pdf::open(data).map_err(to_js_error)?;
        Ok(WasmPdf { inner: pdf })
    }

    /// Return the number of pages in the document.
    #[wasm_bindgen(getter, js_name = "pageCount")]
    pub fn page_count(&self) -> u32 {
        self.inner.page_count()
    }

    /// Parse a range expression such as `"1-3,5"` into ascending page
    /// numbers (a Uint32Array in JavaScript).
    ///
    /// Invalid parts are dropped unless `strict` is true, in which case any
    /// invalid part throws.
    #[wasm_bindgen(js_name = "parseRange")]
    pub fn parse_range(&self, input: &str, strict: Option<bool>) -> Result<Vec<u32>, JsError> {
        self.pages_for(input, strict.unwrap_or(false))
            .map_err(to_js_error)
    }

    /// Copy `pages` (1-based, any order) into a new PDF named after
    /// `source_name` unless `output_name` is given.
    pub fn split(
        &self,
        pages: &[u32],
        source_name: &str,
        output_name: Option<String>,
    ) -> Result<WasmArtifact, JsError> {
        self.split_pages(pages, source_name, output_name.as_deref())
            .map(WasmArtifact::from)
            .map_err(to_js_error)
    }

    /// Extract the text of `pages` as a `.txt` artifact.
    #[wasm_bindgen(js_name = "extractText")]
    pub fn extract_text(
        &self,
        pages: &[u32],
        source_name: &str,
        output_name: Option<String>,
    ) -> Result<WasmArtifact, JsError> {
        self.extract_pages(pages, source_name, output_name.as_deref())
            .map(WasmArtifact::from)
            .map_err(to_js_error)
    }
}

impl WasmPdf {
    fn pages_for(&self, input: &str, strict: bool) -> Result<Vec<u32>, RangeError> {
        let policy = if strict {
            RangePolicy::Strict
        } else {
            RangePolicy::Lenient
        };
        pdfsplitter::parse_with_policy(input, self.inner.page_count(), policy)
            .map(|selection| selection.to_vec())
    }

    fn split_pages(
        &self,
        pages: &[u32],
        source_name: &str,
        output_name: Option<&str>,
    ) -> Result<Artifact, PdfError> {
        let selection: PageSelection = pages.iter().copied().collect();
        ops::split(&self.inner, source_name, &selection, output_name)
    }

    fn extract_pages(
        &self,
        pages: &[u32],
        source_name: &str,
        output_name: Option<&str>,
    ) -> Result<Artifact, PdfError> {
        let selection: PageSelection = pages.iter().copied().collect();
        ops::extract_text(&self.inner, source_name, &selection, output_name)
    }
}

/// A downloadable output: bytes plus a suggested filename.
#[wasm_bindgen]
#[derive(Debug, Clone)]
pub struct WasmArtifact {
    inner: Artifact,
}

#[wasm_bindgen]
impl WasmArtifact {
    /// Suggested filename, extension included.
    #[wasm_bindgen(getter)]
    pub fn filename(&self) -> String {
        self.inner.filename.clone()
    }

    /// Raw bytes (a Uint8Array copy in JavaScript).
    #[wasm_bindgen(getter)]
    pub fn bytes(&self) -> Vec<u8> {
        self.inner.bytes.clone()
    }

    /// `application/pdf` or `text/plain`.
    #[wasm_bindgen(getter, js_name = "mimeType")]
    pub fn mime_type(&self) -> String {
        self.inner.kind.mime_type().to_string()
    }

    /// Payload as a string for text artifacts, `undefined` otherwise.
    #[wasm_bindgen(getter)]
    pub fn text(&self) -> Option<String> {
        self.inner.as_text().map(str::to_string)
    }

    /// Payload size in bytes.
    #[wasm_bindgen(getter)]
    pub fn size(&self) -> usize {
        self.inner.len()
    }
}

impl From<Artifact> for WasmArtifact {
    fn from(inner: Artifact) -> Self {
        Self { inner }
    }
}

/// Outcome of one file in [`run_batch`].
#[wasm_bindgen]
#[derive(Debug, Clone)]
pub struct WasmBatchResult {
    inner: BatchResult,
}

#[wasm_bindgen]
impl WasmBatchResult {
    #[wasm_bindgen(getter)]
    pub fn name(&self) -> String {
        self.inner.name().to_string()
    }

    /// Operation label, e.g. `"Text Extraction"`.
    #[wasm_bindgen(getter)]
    pub fn operation(&self) -> String {
        self.inner.operation().label().to_string()
    }

    #[wasm_bindgen(getter)]
    pub fn succeeded(&self) -> bool {
        self.inner.succeeded()
    }

    #[wasm_bindgen(getter, js_name = "errorDetail")]
    pub fn error_detail(&self) -> Option<String> {
        self.inner.error_detail().map(str::to_string)
    }

    /// Output of a successful file, `undefined` for failures.
    #[wasm_bindgen(getter)]
    pub fn artifact(&self) -> Option<WasmArtifact> {
        self.inner.artifact().cloned().map(WasmArtifact::from)
    }
}

#[derive(Debug, Deserialize)]
struct FileInput {
    name: String,
    bytes: Vec<u8>,
}

/// Process every PDF in `files` (an array of `{name, bytes}`) with `mode`
/// (`"split"` or `"text"`), in order. Failed files are reported in their
/// result and do not stop the batch; non-PDF entries are skipped.
#[wasm_bindgen(js_name = "runBatch")]
pub fn run_batch(files: JsValue, mode: &str) -> Result<Vec<WasmBatchResult>, JsError> {
    let operation =
        parse_mode(mode).ok_or_else(|| JsError::new(&format!("unknown batch mode: {mode}")))?;
    let inputs: Vec<FileInput> =
        serde_wasm_bindgen::from_value(files).map_err(|e| JsError::new(&e.to_string()))?;
    let sources = inputs
        .into_iter()
        .map(|input| SourceFile::new(input.name, input.bytes));
    process_batch(sources, operation).map_err(to_js_error)
}

/// Human-readable file size, e.g. `"1.5 KB"`.
#[wasm_bindgen(js_name = "formatFileSize")]
pub fn format_file_size(bytes: f64) -> String {
    pdfsplitter::format_file_size(bytes.max(0.0) as u64)
}

fn parse_mode(mode: &str) -> Option<BatchOperation> {
    match mode {
        "split" => Some(BatchOperation::Split),
        "text" | "extract-text" => Some(BatchOperation::ExtractText),
        _ => None,
    }
}

fn process_batch(
    sources: impl IntoIterator<Item = SourceFile>,
    operation: BatchOperation,
) -> Result<Vec<WasmBatchResult>, BatchError> {
    let files = filter_pdf_files(sources)?;
    let results = FileProcessor.run(&files, operation, &mut NoopObserver)?;
    Ok(results
        .into_iter()
        .map(|inner| WasmBatchResult { inner })
        .collect())
}

fn to_js_error(err: impl std::fmt::Display) -> JsError {
    JsError::new(&err.to_string())
}
