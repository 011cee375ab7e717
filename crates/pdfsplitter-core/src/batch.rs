//! Sequential batch orchestration.
//!
//! [`run_batch`] applies one operation to every item of a list, strictly in
//! input order and one item at a time. Each item runs inside its own failure
//! boundary: an error (or a panic) from the processor is recorded in that
//! item's [`BatchResult`] and the batch moves on to the next item.
//!
//! Items are never processed concurrently. Should that change, each item
//! must keep its own failure boundary and the results must be joined back
//! in input order.

use std::fmt;
use std::panic::{AssertUnwindSafe, catch_unwind};

use crate::artifact::{Artifact, OutputKind};

/// The single-file operation applied to every item of a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum BatchOperation {
    /// Copy all pages into a new document.
    Split,
    /// Extract the text of all pages.
    ExtractText,
}

impl BatchOperation {
    /// Label shown next to each result.
    pub fn label(&self) -> &'static str {
        match self {
            BatchOperation::Split => "PDF Split",
            BatchOperation::ExtractText => "Text Extraction",
        }
    }

    /// Kind of artifact the operation produces.
    pub fn output_kind(&self) -> OutputKind {
        match self {
            BatchOperation::Split => OutputKind::Pdf,
            BatchOperation::ExtractText => OutputKind::Text,
        }
    }
}

impl fmt::Display for BatchOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A source file taking part in a batch.
pub trait BatchItem {
    /// Display name of the source, usually its file name.
    fn name(&self) -> &str;
}

impl BatchItem for String {
    fn name(&self) -> &str {
        self
    }
}

impl BatchItem for &str {
    fn name(&self) -> &str {
        self
    }
}

/// Outcome of one batch item. Immutable once produced.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BatchResult {
    name: String,
    operation: BatchOperation,
    succeeded: bool,
    error_detail: Option<String>,
    artifact: Option<Artifact>,
}

impl BatchResult {
    /// A successful outcome carrying the produced artifact.
    pub fn success(name: impl Into<String>, operation: BatchOperation, artifact: Artifact) -> Self {
        Self {
            name: name.into(),
            operation,
            succeeded: true,
            error_detail: None,
            artifact: Some(artifact),
        }
    }

    /// A failed outcome with an error message.
    pub fn failure(
        name: impl Into<String>,
        operation: BatchOperation,
        error_detail: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            operation,
            succeeded: false,
            error_detail: Some(error_detail.into()),
            artifact: None,
        }
    }

    /// Name of the source item.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Operation that produced this result.
    pub fn operation(&self) -> BatchOperation {
        self.operation
    }

    /// Whether the operation completed.
    pub fn succeeded(&self) -> bool {
        self.succeeded
    }

    /// Error message of a failed item.
    pub fn error_detail(&self) -> Option<&str> {
        self.error_detail.as_deref()
    }

    /// Output of a successful item.
    pub fn artifact(&self) -> Option<&Artifact> {
        self.artifact.as_ref()
    }

    /// Take ownership of the output, leaving the outcome record.
    pub fn into_artifact(self) -> Option<Artifact> {
        self.artifact
    }
}

/// Progress callbacks during a batch run.
///
/// All methods have default no-op implementations.
pub trait BatchObserver {
    /// Called before item `index` (0-based) of `total` is processed.
    fn on_item_start(&mut self, index: usize, total: usize, name: &str) {
        let _ = (index, total, name);
    }

    /// Called after item `index` produced `result`.
    fn on_item_done(&mut self, index: usize, result: &BatchResult) {
        let _ = (index, result);
    }
}

/// Observer that ignores every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl BatchObserver for NoopObserver {}

/// Reasons a batch cannot start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchError {
    /// The batch list is empty.
    Empty,
    /// None of the offered files is a PDF.
    NoPdfFiles,
}

impl fmt::Display for BatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BatchError::Empty => write!(f, "no files in batch"),
            BatchError::NoPdfFiles => write!(f, "no PDF files selected"),
        }
    }
}

impl std::error::Error for BatchError {}

/// Run `processor` on every item in order and collect one result per item.
pub fn run_batch<T, E, F>(items: &[T], operation: BatchOperation, processor: F) -> Vec<BatchResult>
where
    T: BatchItem,
    E: fmt::Display,
    F: FnMut(&T, BatchOperation) -> Result<Artifact, E>,
{
    run_batch_observed(items, operation, processor, &mut NoopObserver)
}

/// Like [`run_batch`], reporting progress to `observer`.
pub fn run_batch_observed<T, E, F>(
    items: &[T],
    operation: BatchOperation,
    mut processor: F,
    observer: &mut dyn BatchObserver,
) -> Vec<BatchResult>
where
    T: BatchItem,
    E: fmt::Display,
    F: FnMut(&T, BatchOperation) -> Result<Artifact, E>,
{
    let total = items.len();
    let mut results = Vec::with_capacity(total);

    for (index, item) in items.iter().enumerate() {
        let name = item.name();
        observer.on_item_start(index, total, name);

        let outcome = catch_unwind(AssertUnwindSafe(|| processor(item, operation)));
        let result = match outcome {
            Ok(Ok(artifact)) => BatchResult::success(name, operation, artifact),
            Ok(Err(err)) => BatchResult::failure(name, operation, err.to_string()),
            Err(payload) => BatchResult::failure(name, operation, panic_message(&*payload)),
        };

        observer.on_item_done(index, &result);
        results.push(result);
    }

    results
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        format!("internal error: {msg}")
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        format!("internal error: {msg}")
    } else {
        "internal error".to_string()
    }
}
