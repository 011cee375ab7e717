mod batch_cmd;
mod cli;
mod info_cmd;
mod logging;
mod preferences;
mod prefs_cmd;
mod shared;
mod split_cmd;
mod text_cmd;
#[cfg(feature = "tui")]
mod tui;

use clap::Parser;
use cli::Cli;

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let result = match cli.command {
        cli::Commands::Info { ref file, format } => info_cmd::run(file, format),
        cli::Commands::Split {
            ref file,
            ref pages,
            ref output,
            ref out_dir,
            strict,
        } => split_cmd::run(file, pages, output.as_deref(), out_dir.as_deref(), strict),
        cli::Commands::Text {
            ref file,
            ref pages,
            ref output,
            ref out_dir,
            strict,
            stdout,
        } => text_cmd::run(
            file,
            pages.as_deref(),
            output.as_deref(),
            out_dir.as_deref(),
            strict,
            stdout,
        ),
        cli::Commands::Batch {
            mode,
            ref files,
            ref out_dir,
            format,
        } => batch_cmd::run(mode, files, out_dir.as_deref(), format),
        cli::Commands::Prefs { ref action } => prefs_cmd::run(action),
        #[cfg(feature = "tui")]
        cli::Commands::Browse { ref file } => tui::run(file),
    };

    if let Err(code) = result {
        std::process::exit(code);
    }
}
