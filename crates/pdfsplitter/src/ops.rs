//! Single-file operations producing downloadable [`Artifact`]s.
//!
//! Both operations require a non-empty selection and name their output with
//! [`resolve_output_name`]: the user's name with the right extension, or
//! `<stem>_pages_<first>-<last>.<ext>` when none is given.

use pdfsplitter_core::{Artifact, OutputKind, PageSelection, PdfError, resolve_output_name};

use crate::Pdf;

/// Copy the selected pages, in ascending order, into a new PDF.
///
/// # Errors
///
/// Returns [`PdfError::EmptySelection`] if no page is selected, otherwise
/// any error from [`Pdf::assemble`].
pub fn split(
    pdf: &Pdf,
    source_name: &str,
    selection: &PageSelection,
    output_name: Option<&str>,
) -> Result<Artifact, PdfError> {
    let bytes = pdf.assemble(selection)?;
    let filename = resolve_output_name(output_name, source_name, selection, OutputKind::Pdf);
    tracing::info!(%filename, pages = selection.len(), "split complete");
    Ok(Artifact::new(filename, OutputKind::Pdf, bytes))
}

/// Extract the text of the selected pages as a UTF-8 text artifact.
///
/// # Errors
///
/// Returns [`PdfError::EmptySelection`] if no page is selected, otherwise
/// any error from [`Pdf::extract_text`].
pub fn extract_text(
    pdf: &Pdf,
    source_name: &str,
    selection: &PageSelection,
    output_name: Option<&str>,
) -> Result<Artifact, PdfError> {
    let text = pdf.extract_text(selection)?;
    let filename = resolve_output_name(output_name, source_name, selection, OutputKind::Text);
    tracing::info!(%filename, pages = selection.len(), "text extraction complete");
    Ok(Artifact::new(filename, OutputKind::Text, text.into_bytes()))
}
