use std::fs;
use std::io::{self, IsTerminal, Write};
use std::path::{Path, PathBuf};

use pdfsplitter::{
    AppState, Artifact, BatchObserver, BatchResult, RangePolicy, SourceFile, format_file_size,
};

/// Read a file with user-friendly error messages.
pub fn read_source(file: &Path) -> Result<SourceFile, i32> {
    if !file.exists() {
        eprintln!("Error: file not found: {}", file.display());
        return Err(1);
    }
    SourceFile::from_path(file).map_err(|e| {
        eprintln!("Error: {e}");
        1
    })
}

/// Load a file into a fresh [`AppState`].
///
/// Prints the error and returns `Err(1)` if the file is missing or is not a
/// readable PDF.
pub fn load_state(file: &Path, strict: bool) -> Result<AppState, i32> {
    let source = read_source(file)?;
    let policy = if strict {
        RangePolicy::Strict
    } else {
        RangePolicy::Lenient
    };
    let mut state = AppState::with_policy(policy);
    state
        .load_document(&source.name, &source.bytes)
        .map_err(|e| {
            eprintln!("Error: failed to open PDF: {e}");
            1
        })?;
    Ok(state)
}

/// Apply an optional range to the loaded document. `None` selects every page.
pub fn select_pages(state: &mut AppState, pages: Option<&str>) -> Result<(), i32> {
    match pages {
        Some(range) => {
            state.apply_range(range).map_err(|e| {
                eprintln!("Error: {e}");
                1
            })?;
        }
        None => state.select_all(),
    }
    Ok(())
}

/// Write an artifact into `out_dir` (or the current directory) and return
/// its path.
pub fn write_artifact(artifact: &Artifact, out_dir: Option<&Path>) -> Result<PathBuf, i32> {
    let dir = out_dir.unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(dir).map_err(|e| {
        eprintln!("Error: cannot create {}: {e}", dir.display());
        1
    })?;
    let path = dir.join(&artifact.filename);
    fs::write(&path, &artifact.bytes).map_err(|e| {
        eprintln!("Error: cannot write {}: {e}", path.display());
        1
    })?;
    Ok(path)
}

/// One-line description of a written artifact.
pub fn describe_output(path: &Path, artifact: &Artifact) -> String {
    format!(
        "{} ({})",
        path.display(),
        format_file_size(artifact.len() as u64)
    )
}

/// A progress reporter that prints "Processing N/M: name" to stderr,
/// but only when stderr is connected to a TTY (terminal).
pub struct ProgressReporter {
    is_tty: bool,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            is_tty: io::stderr().is_terminal(),
        }
    }

    /// Clear the progress line (if TTY).
    pub fn finish(&self) {
        if self.is_tty {
            eprint!("\r{}\r", " ".repeat(60));
            let _ = io::stderr().flush();
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl BatchObserver for ProgressReporter {
    fn on_item_start(&mut self, index: usize, total: usize, name: &str) {
        if self.is_tty {
            eprint!("\r{}\rProcessing {}/{total}: {name}", " ".repeat(60), index + 1);
            let _ = io::stderr().flush();
        }
    }

    fn on_item_done(&mut self, _index: usize, _result: &BatchResult) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use pdfsplitter::OutputKind;

    #[test]
    fn read_source_file_not_found() {
        let result = read_source(Path::new("/nonexistent/file.pdf"));
        assert_eq!(result.err(), Some(1));
    }

    #[test]
    fn load_state_rejects_non_pdf() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        fs::write(&path, "plain text").unwrap();
        assert_eq!(load_state(&path, false).err(), Some(1));
    }

    #[test]
    fn write_artifact_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out");
        let artifact = Artifact::new("a.txt", OutputKind::Text, b"hi".to_vec());
        let path = write_artifact(&artifact, Some(&out)).unwrap();
        assert_eq!(path, out.join("a.txt"));
        assert_eq!(fs::read(&path).unwrap(), b"hi");
        assert!(describe_output(&path, &artifact).ends_with("(2 B)"));
    }
}
