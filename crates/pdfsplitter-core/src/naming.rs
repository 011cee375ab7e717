//! Suggested filenames for output artifacts.

use crate::artifact::OutputKind;
use crate::batch::BatchOperation;
use crate::selection::PageSelection;

/// Strip a trailing `.pdf` (any case) from a source file name. A `.pdf`
/// elsewhere in the name is kept.
pub fn source_stem(name: &str) -> &str {
    let len = name.len();
    if len >= 4 && name.is_char_boundary(len - 4) && name[len - 4..].eq_ignore_ascii_case(".pdf")
    {
        &name[..len - 4]
    } else {
        name
    }
}

/// Default name for a split or extraction of `selection` taken from `source`.
///
/// `report.pdf` with pages `{3,4,5}` gives `report_pages_3-5.pdf`; a single
/// page omits the range: `report_pages_7.pdf`. Only the first and last page
/// appear, so gaps in the selection are not reflected in the name.
pub fn default_output_name(source: &str, selection: &PageSelection, kind: OutputKind) -> String {
    let stem = source_stem(source);
    let ext = kind.extension();
    match (selection.first(), selection.last()) {
        (Some(first), Some(last)) if first != last => {
            format!("{stem}_pages_{first}-{last}.{ext}")
        }
        (Some(page), _) => format!("{stem}_pages_{page}.{ext}"),
        _ => format!("{stem}_pages.{ext}"),
    }
}

/// Resolve the output name from an optional user-supplied name.
///
/// A blank or missing name falls back to [`default_output_name`]. A supplied
/// name is trimmed and gets the kind's extension appended unless it already
/// ends with it (case-insensitive).
pub fn resolve_output_name(
    user: Option<&str>,
    source: &str,
    selection: &PageSelection,
    kind: OutputKind,
) -> String {
    match user.map(str::trim).filter(|name| !name.is_empty()) {
        Some(name) => {
            let suffix = format!(".{}", kind.extension());
            if name.to_ascii_lowercase().ends_with(&suffix) {
                name.to_string()
            } else {
                format!("{name}{suffix}")
            }
        }
        None => default_output_name(source, selection, kind),
    }
}

/// Name of the artifact a batch operation produces for `source`.
pub fn batch_output_name(source: &str, operation: BatchOperation) -> String {
    let stem = source_stem(source);
    match operation {
        BatchOperation::Split => format!("{stem}_processed.pdf"),
        BatchOperation::ExtractText => format!("{stem}.txt"),
    }
}

/// Human-readable file size: bytes, then KB and MB with one decimal.
pub fn format_file_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = 1024 * 1024;
    if bytes < KB {
        format!("{bytes} B")
    } else if bytes < MB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    }
}
