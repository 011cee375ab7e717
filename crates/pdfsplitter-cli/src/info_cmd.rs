use std::path::Path;

use pdfsplitter::format_file_size;

use crate::cli::OutputFormat;
use crate::shared::load_state;

pub fn run(file: &Path, format: OutputFormat) -> Result<(), i32> {
    let state = load_state(file, false)?;
    let Some(document) = state.document() else {
        eprintln!("Error: no PDF loaded");
        return Err(1);
    };

    match format {
        OutputFormat::Text => {
            println!("File: {}", document.name());
            println!("Size: {}", format_file_size(document.size()));
            println!("Pages: {}", document.page_count());
        }
        OutputFormat::Json => {
            let json = serde_json::json!({
                "file": document.name(),
                "size": document.size(),
                "pages": document.page_count(),
            });
            println!("{json}");
        }
    }
    Ok(())
}
