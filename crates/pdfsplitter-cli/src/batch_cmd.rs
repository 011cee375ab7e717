use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use pdfsplitter::{AppState, BatchOperation, BatchResult, format_file_size};

use crate::cli::{BatchMode, OutputFormat};
use crate::shared::{ProgressReporter, read_source};

impl From<BatchMode> for BatchOperation {
    fn from(mode: BatchMode) -> Self {
        match mode {
            BatchMode::Split => BatchOperation::Split,
            BatchMode::Text => BatchOperation::ExtractText,
        }
    }
}

/// Run a batch. Per-file failures, including failures to write an output,
/// are reported but do not fail the command.
pub fn run(
    mode: BatchMode,
    files: &[PathBuf],
    out_dir: Option<&Path>,
    format: OutputFormat,
) -> Result<(), i32> {
    let sources = files
        .iter()
        .map(|file| read_source(file))
        .collect::<Result<Vec<_>, _>>()?;

    let mut state = AppState::new();
    let offered = sources.len();
    let added = state.add_batch_files(sources).map_err(|e| {
        eprintln!("Error: {e}");
        1
    })?;
    if added < offered {
        eprintln!("Skipped {} non-PDF file(s)", offered - added);
    }

    let dir = out_dir.unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(dir).map_err(|e| {
        eprintln!("Error: cannot create {}: {e}", dir.display());
        1
    })?;

    let mut progress = ProgressReporter::new();
    let results = state
        .run_batch(mode.into(), &mut progress)
        .map_err(|e| {
            eprintln!("Error: {e}");
            1
        })?;
    progress.finish();

    let mut taken = HashSet::new();
    let (results, outputs): (Vec<BatchResult>, Vec<Option<PathBuf>>) = results
        .into_iter()
        .map(|result| save_result(result, dir, &mut taken))
        .unzip();

    match format {
        OutputFormat::Text => {
            for (result, output) in results.iter().zip(&outputs) {
                println!("{}", format_result_line(result, output.as_deref()));
            }
            println!(
                "Batch processing complete. {} files processed.",
                results.len()
            );
        }
        OutputFormat::Json => {
            let items: Vec<serde_json::Value> = results
                .iter()
                .zip(&outputs)
                .map(|(result, output)| {
                    serde_json::json!({
                        "name": result.name(),
                        "operation": result.operation(),
                        "succeeded": result.succeeded(),
                        "error_detail": result.error_detail(),
                        "output": output.as_ref().map(|p| p.display().to_string()),
                    })
                })
                .collect();
            println!("{}", serde_json::Value::Array(items));
        }
    }
    Ok(())
}

/// Write a successful item's artifact into `dir`.
///
/// Names already written during this run get a ` (n)` suffix. A write error
/// turns the item into a failure.
fn save_result(
    result: BatchResult,
    dir: &Path,
    taken: &mut HashSet<PathBuf>,
) -> (BatchResult, Option<PathBuf>) {
    let Some(artifact) = result.artifact() else {
        return (result, None);
    };
    let path = unique_path(dir, &artifact.filename, taken);
    match fs::write(&path, &artifact.bytes) {
        Ok(()) => {
            taken.insert(path.clone());
            (result, Some(path))
        }
        Err(err) => {
            let detail = format!("cannot write {}: {err}", path.display());
            let failed = BatchResult::failure(result.name(), result.operation(), detail);
            (failed, None)
        }
    }
}

fn unique_path(dir: &Path, filename: &str, taken: &HashSet<PathBuf>) -> PathBuf {
    let first = dir.join(filename);
    if !taken.contains(&first) {
        return first;
    }
    let (stem, ext) = match filename.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => (stem, Some(ext)),
        _ => (filename, None),
    };
    (1..)
        .map(|n| match ext {
            Some(ext) => dir.join(format!("{stem} ({n}).{ext}")),
            None => dir.join(format!("{stem} ({n})")),
        })
        .find(|path| !taken.contains(path))
        .unwrap_or(first)
}

fn format_result_line(result: &BatchResult, output: Option<&Path>) -> String {
    let label = result.operation().label();
    match (result.error_detail(), result.artifact(), output) {
        (None, Some(artifact), Some(path)) => format!(
            "✓ {}: {label} - Success -> {} ({})",
            result.name(),
            path.display(),
            format_file_size(artifact.len() as u64)
        ),
        (detail, _, _) => format!(
            "✗ {}: {label} - Failed: {}",
            result.name(),
            detail.unwrap_or("unknown error")
        ),
    }
}
