//! Integration tests for the `batch` subcommand.

mod common;

use common::{cmd, lopdf_page_count, pdf_with_pages, write_file};
use predicates::prelude::*;

#[test]
fn failing_file_does_not_stop_batch() {
    let dir = tempfile::tempdir().unwrap();
    let a = write_file(dir.path(), "a.pdf", &pdf_with_pages(&["alpha"]));
    let broken = write_file(dir.path(), "broken.pdf", b"%PDF-1.4\nnot really a pdf");
    let c = write_file(dir.path(), "c.pdf", &pdf_with_pages(&["gamma", "delta"]));
    let out = dir.path().join("out");

    cmd(dir.path())
        .args(["batch", "text"])
        .arg(&a)
        .arg(&broken)
        .arg(&c)
        .arg("--out-dir")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("✓ a.pdf: Text Extraction - Success"))
        .stdout(predicate::str::contains("✗ broken.pdf: Text Extraction - Failed"))
        .stdout(predicate::str::contains("✓ c.pdf: Text Extraction - Success"))
        .stdout(predicate::str::contains(
            "Batch processing complete. 3 files processed.",
        ));

    let text = std::fs::read_to_string(out.join("c.txt")).unwrap();
    assert!(text.contains("gamma"));
    assert!(!out.join("broken.txt").exists());
}

#[test]
fn split_mode_copies_every_page() {
    let dir = tempfile::tempdir().unwrap();
    let a = write_file(dir.path(), "a.pdf", &pdf_with_pages(&["1", "2", "3"]));

    cmd(dir.path())
        .args(["batch", "split"])
        .arg(&a)
        .arg("--out-dir")
        .arg(dir.path())
        .assert()
        .success();

    let bytes = std::fs::read(dir.path().join("a_processed.pdf")).unwrap();
    assert_eq!(lopdf_page_count(&bytes), 3);
}

#[test]
fn non_pdf_files_are_skipped() {
    let dir = tempfile::tempdir().unwrap();
    let a = write_file(dir.path(), "a.pdf", &pdf_with_pages(&["x"]));
    let notes = write_file(dir.path(), "notes.txt", b"hello");

    cmd(dir.path())
        .args(["batch", "text"])
        .arg(&notes)
        .arg(&a)
        .arg("--out-dir")
        .arg(dir.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("Skipped 1 non-PDF file(s)"))
        .stdout(predicate::str::contains("1 files processed"));
}

#[test]
fn only_non_pdf_files_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let notes = write_file(dir.path(), "notes.txt", b"hello");

    cmd(dir.path())
        .args(["batch", "split"])
        .arg(&notes)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("no PDF files selected"));
}

#[test]
fn json_lists_results_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let b = write_file(dir.path(), "b.pdf", &pdf_with_pages(&["x"]));
    let bad = write_file(dir.path(), "bad.pdf", b"%PDF-1.7 garbage");

    let output = cmd(dir.path())
        .args(["batch", "split", "--format", "json"])
        .arg(&b)
        .arg(&bad)
        .arg("--out-dir")
        .arg(dir.path())
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let items = json.as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["name"], "b.pdf");
    assert_eq!(items[0]["succeeded"], true);
    assert_eq!(items[0]["operation"], "split");
    assert_eq!(items[1]["name"], "bad.pdf");
    assert_eq!(items[1]["succeeded"], false);
    assert!(items[1]["output"].is_null());
}

#[test]
fn same_name_from_different_folders_is_not_overwritten() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir(dir.path().join("x")).unwrap();
    std::fs::create_dir(dir.path().join("y")).unwrap();
    let first = write_file(&dir.path().join("x"), "a.pdf", &pdf_with_pages(&["first"]));
    let second = write_file(&dir.path().join("y"), "a.pdf", &pdf_with_pages(&["second"]));
    let out = dir.path().join("out");

    cmd(dir.path())
        .args(["batch", "text"])
        .arg(&first)
        .arg(&second)
        .arg("--out-dir")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("a (1).txt"));

    let one = std::fs::read_to_string(out.join("a.txt")).unwrap();
    let two = std::fs::read_to_string(out.join("a (1).txt")).unwrap();
    assert!(one.contains("first"));
    assert!(two.contains("second"));
}

#[test]
fn unwritable_output_fails_only_that_file() {
    let dir = tempfile::tempdir().unwrap();
    let a = write_file(dir.path(), "a.pdf", &pdf_with_pages(&["alpha"]));
    let b = write_file(dir.path(), "b.pdf", &pdf_with_pages(&["beta"]));
    let out = dir.path().join("out");
    // a directory where a.txt should go makes that write fail
    std::fs::create_dir_all(out.join("a.txt")).unwrap();

    cmd(dir.path())
        .args(["batch", "text"])
        .arg(&a)
        .arg(&b)
        .arg("--out-dir")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("✗ a.pdf: Text Extraction - Failed: cannot write"))
        .stdout(predicate::str::contains("✓ b.pdf: Text Extraction - Success"))
        .stdout(predicate::str::contains(
            "Batch processing complete. 2 files processed.",
        ));

    let text = std::fs::read_to_string(out.join("b.txt")).unwrap();
    assert!(text.contains("beta"));
}
