//! pdfsplitter-core: Backend-independent data types and algorithms.
//!
//! This crate provides the foundational types (page selections, range tokens,
//! text runs, batch results, output artifacts) and the pure algorithms that
//! operate on them: page-range parsing, output file naming, text assembly from
//! positioned runs, and sequential batch orchestration.
//! It performs no I/O; PDF access lives in `pdfsplitter-parse`.

pub mod artifact;
pub mod batch;
pub mod error;
pub mod naming;
pub mod page_range;
pub mod selection;
pub mod text;

pub use artifact::{Artifact, OutputKind};
pub use batch::{
    BatchError, BatchItem, BatchObserver, BatchOperation, BatchResult, NoopObserver, run_batch,
    run_batch_observed,
};
pub use error::PdfError;
pub use naming::{
    batch_output_name, default_output_name, format_file_size, resolve_output_name, source_stem,
};
pub use page_range::{RangeError, RangePolicy, RangeToken, parse, parse_with_policy, tokenize};
pub use selection::PageSelection;
pub use text::{
    LineBreakStrategy, TextRun, VerticalShift, assemble_document, assemble_page, page_separator,
};
