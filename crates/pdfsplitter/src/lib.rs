//! pdfsplitter: select, split, and extract text from PDF pages.
//!
//! This is the public API facade crate for pdfsplitter-rs. It re-exports the
//! types of pdfsplitter-core and uses pdfsplitter-parse for PDF access.
//!
//! # Architecture
//!
//! - **pdfsplitter-core**: Range parsing, selection, naming, text assembly, batch runner
//! - **pdfsplitter-parse**: `PdfBackend` trait and its lopdf implementation
//! - **pdfsplitter** (this crate): [`Pdf`], single-file [`ops`], batch file
//!   processing, and the [`AppState`] that front ends drive

pub mod batch;
pub mod ops;
mod pdf;
pub mod state;

pub use batch::{FileProcessor, SourceFile, filter_pdf_files, is_pdf_source};
pub use pdf::Pdf;
pub use state::{AppState, LoadedDocument};

pub use pdfsplitter_core::{
    Artifact, BatchError, BatchItem, BatchObserver, BatchOperation, BatchResult, LineBreakStrategy,
    NoopObserver, OutputKind, PageSelection, PdfError, RangeError, RangePolicy, RangeToken,
    TextRun, VerticalShift, batch_output_name, default_output_name, format_file_size, parse,
    parse_with_policy, resolve_output_name, source_stem,
};
pub use pdfsplitter_core;
pub use pdfsplitter_parse;
