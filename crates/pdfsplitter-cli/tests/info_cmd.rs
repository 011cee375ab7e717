//! Integration tests for the `info` subcommand.

mod common;

use common::{cmd, pdf_with_pages, write_file};
use predicates::prelude::*;

#[test]
fn prints_name_and_page_count() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(dir.path(), "report.pdf", &pdf_with_pages(&["a", "b", "c"]));
    cmd(dir.path())
        .arg("info")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("File: report.pdf"))
        .stdout(predicate::str::contains("Pages: 3"))
        .stdout(predicate::str::contains("Size: "));
}

#[test]
fn json_output() {
    let dir = tempfile::tempdir().unwrap();
    let bytes = pdf_with_pages(&["a", "b"]);
    let path = write_file(dir.path(), "two.pdf", &bytes);
    let output = cmd(dir.path())
        .args(["info", "--format", "json"])
        .arg(&path)
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["file"], "two.pdf");
    assert_eq!(json["pages"], 2);
    assert_eq!(json["size"], bytes.len() as u64);
}
