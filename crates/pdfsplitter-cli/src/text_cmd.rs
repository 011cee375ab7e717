use std::io::{self, Write};
use std::path::Path;

use crate::shared::{describe_output, load_state, select_pages, write_artifact};

pub fn run(
    file: &Path,
    pages: Option<&str>,
    output: Option<&str>,
    out_dir: Option<&Path>,
    strict: bool,
    to_stdout: bool,
) -> Result<(), i32> {
    let mut state = load_state(file, strict)?;
    select_pages(&mut state, pages)?;

    let artifact = state.extract_selected(output).map_err(|e| {
        eprintln!("Error extracting text: {e}");
        1
    })?;

    if to_stdout {
        let mut stdout = io::stdout().lock();
        stdout
            .write_all(&artifact.bytes)
            .and_then(|()| stdout.flush())
            .map_err(|e| {
                eprintln!("Error: {e}");
                1
            })?;
        return Ok(());
    }

    let path = write_artifact(&artifact, out_dir)?;
    println!(
        "Text extracted successfully: {}",
        describe_output(&path, &artifact)
    );
    Ok(())
}
