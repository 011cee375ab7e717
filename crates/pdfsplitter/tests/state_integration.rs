//! Session flows through `AppState`: load, select, split, extract, batch.

mod common;

use common::{lopdf_page_count, pdf_with_pages};
use pdfsplitter::{
    AppState, BatchObserver, BatchOperation, BatchResult, NoopObserver, PdfError, RangePolicy,
    SourceFile,
};

fn loaded(texts: &[&str]) -> AppState {
    let mut state = AppState::new();
    state
        .load_document("report.pdf", &pdf_with_pages(texts))
        .unwrap();
    state
}

#[test]
fn loading_sets_page_count_and_clears_selection() {
    let mut state = loaded(&["a", "b", "c"]);
    state.select_all();
    assert_eq!(state.selection().len(), 3);

    let pages = state
        .load_document("other.pdf", &pdf_with_pages(&["x", "y"]))
        .unwrap();
    assert_eq!(pages, 2);
    assert_eq!(state.page_count(), 2);
    assert!(state.selection().is_empty());
    assert_eq!(state.document().map(|d| d.name()), Some("other.pdf"));
}

#[test]
fn failed_load_keeps_previous_document() {
    let mut state = loaded(&["a", "b"]);
    state.toggle_page(2);

    let err = state.load_document("broken.pdf", b"%PDF-1.4 nonsense").unwrap_err();
    assert!(matches!(err, PdfError::ParseError(_)));
    assert_eq!(state.document().map(|d| d.name()), Some("report.pdf"));
    assert_eq!(state.selection().to_vec(), vec![2]);
}

#[test]
fn range_then_split() {
    let mut state = loaded(&["1", "2", "3", "4", "5", "6"]);
    assert_eq!(state.apply_range("1-3,5").unwrap(), 4);
    let artifact = state.split_selected(None).unwrap();
    assert_eq!(artifact.filename, "report_pages_1-5.pdf");
    assert_eq!(lopdf_page_count(&artifact.bytes), 4);
}

#[test]
fn blank_range_keeps_manual_selection() {
    let mut state = loaded(&["a", "b", "c"]);
    state.toggle_page(3);
    state.apply_range("   ").unwrap();
    assert_eq!(state.selection().to_vec(), vec![3]);
}

#[test]
fn strict_policy_rejects_bad_ranges() {
    let mut state = AppState::with_policy(RangePolicy::Strict);
    state
        .load_document("report.pdf", &pdf_with_pages(&["a", "b"]))
        .unwrap();
    state.toggle_page(1);
    assert!(state.apply_range("1,7").is_err());
    assert_eq!(state.selection().to_vec(), vec![1]);
}

#[test]
fn extract_selected_uses_output_name() {
    let mut state = loaded(&["hello", "world"]);
    state.toggle_page(2);
    let artifact = state.extract_selected(Some("page two")).unwrap();
    assert_eq!(artifact.filename, "page two.txt");
    assert_eq!(
        artifact.as_text(),
        Some("--- Page 2 ---\n\nworld \n\n")
    );
}

#[test]
fn split_without_selection_fails() {
    let state = loaded(&["a"]);
    assert_eq!(state.split_selected(None), Err(PdfError::EmptySelection));
}

#[derive(Default)]
struct StatusLines(Vec<String>);

impl BatchObserver for StatusLines {
    fn on_item_start(&mut self, index: usize, total: usize, name: &str) {
        self.0.push(format!("Processing {}/{total}: {name}", index + 1));
    }

    fn on_item_done(&mut self, _index: usize, result: &BatchResult) {
        let mark = if result.succeeded() { "ok" } else { "failed" };
        self.0.push(format!("{} {mark}", result.name()));
    }
}

#[test]
fn batch_failure_does_not_stop_later_files() {
    let mut state = AppState::new();
    state
        .add_batch_files(vec![
            SourceFile::new("a.pdf", pdf_with_pages(&["A1", "A2"])),
            SourceFile::new("b.pdf", b"%PDF-1.7 truncated".to_vec()),
            SourceFile::new("c.pdf", pdf_with_pages(&["C1"])),
        ])
        .unwrap();

    let mut status = StatusLines::default();
    let results = state
        .run_batch(BatchOperation::ExtractText, &mut status)
        .unwrap();

    assert_eq!(results.len(), 3);
    assert!(results[0].succeeded());
    assert!(!results[1].succeeded());
    assert!(results[2].succeeded());

    let first = results[0].artifact().unwrap();
    assert_eq!(first.filename, "a.txt");
    assert_eq!(
        first.as_text(),
        Some("--- Page 1 ---\n\nA1 \n\n--- Page 2 ---\n\nA2 \n\n")
    );
    assert_eq!(
        status.0,
        vec![
            "Processing 1/3: a.pdf",
            "a.pdf ok",
            "Processing 2/3: b.pdf",
            "b.pdf failed",
            "Processing 3/3: c.pdf",
            "c.pdf ok",
        ]
    );
}

#[test]
fn batch_split_copies_every_page() {
    let mut state = AppState::new();
    state
        .add_batch_files(vec![SourceFile::new("scan.pdf", pdf_with_pages(&["1", "2", "3"]))])
        .unwrap();
    let results = state
        .run_batch(BatchOperation::Split, &mut NoopObserver)
        .unwrap();
    let artifact = results[0].artifact().unwrap();
    assert_eq!(artifact.filename, "scan_processed.pdf");
    assert_eq!(lopdf_page_count(&artifact.bytes), 3);
}

#[test]
fn batch_handles_document_without_pages() {
    let mut state = AppState::new();
    state
        .add_batch_files(vec![SourceFile::new("blank.pdf", pdf_with_pages(&[]))])
        .unwrap();

    let split = state
        .run_batch(BatchOperation::Split, &mut NoopObserver)
        .unwrap();
    assert!(split[0].succeeded(), "{:?}", split[0].error_detail());
    let copy = split[0].artifact().unwrap();
    assert_eq!(copy.filename, "blank_processed.pdf");
    assert_eq!(lopdf_page_count(&copy.bytes), 0);

    let text = state
        .run_batch(BatchOperation::ExtractText, &mut NoopObserver)
        .unwrap();
    assert!(text[0].succeeded());
    let artifact = text[0].artifact().unwrap();
    assert_eq!(artifact.filename, "blank.txt");
    assert!(artifact.is_empty());
}
