use std::path::Path;

use crate::shared::{describe_output, load_state, select_pages, write_artifact};

pub fn run(
    file: &Path,
    pages: &str,
    output: Option<&str>,
    out_dir: Option<&Path>,
    strict: bool,
) -> Result<(), i32> {
    let mut state = load_state(file, strict)?;
    select_pages(&mut state, Some(pages))?;

    let artifact = state.split_selected(output).map_err(|e| {
        eprintln!("Error splitting PDF: {e}");
        1
    })?;
    let path = write_artifact(&artifact, out_dir)?;
    println!("PDF split successfully: {}", describe_output(&path, &artifact));
    Ok(())
}
