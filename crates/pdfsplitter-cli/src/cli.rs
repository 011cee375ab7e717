use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Split PDFs by page range and extract their text.
#[derive(Debug, Parser)]
#[command(name = "pdfsplitter", about, version)]
pub struct Cli {
    /// Increase log verbosity (-v debug, -vv trace). RUST_LOG takes precedence.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show page count and file size
    Info {
        /// Path to the PDF file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Copy selected pages into a new PDF
    Split {
        /// Path to the PDF file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Page range (e.g. '1-3,5,8-10')
        #[arg(long)]
        pages: String,

        /// Output file name. Default: <name>_pages_<first>-<last>.pdf
        #[arg(long, short)]
        output: Option<String>,

        /// Directory to write the output into. Default: current directory
        #[arg(long)]
        out_dir: Option<PathBuf>,

        /// Reject the whole range if any part is invalid
        #[arg(long)]
        strict: bool,
    },

    /// Extract the text of selected pages
    Text {
        /// Path to the PDF file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Page range (e.g. '1-3,5'). Default: all pages
        #[arg(long)]
        pages: Option<String>,

        /// Output file name. Default: <name>_pages_<first>-<last>.txt
        #[arg(long, short, conflicts_with = "stdout")]
        output: Option<String>,

        /// Directory to write the output into. Default: current directory
        #[arg(long, conflicts_with = "stdout")]
        out_dir: Option<PathBuf>,

        /// Reject the whole range if any part is invalid
        #[arg(long)]
        strict: bool,

        /// Print the text instead of writing a file
        #[arg(long)]
        stdout: bool,
    },

    /// Apply one operation to every file, continuing past failures
    Batch {
        /// Operation to apply to each file
        #[arg(value_enum)]
        mode: BatchMode,

        /// Files to process (non-PDF files are skipped)
        #[arg(value_name = "FILES", required = true)]
        files: Vec<PathBuf>,

        /// Directory to write outputs into. Default: current directory
        #[arg(long)]
        out_dir: Option<PathBuf>,

        /// Output format for the result list
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Show or change accessibility preferences
    Prefs {
        #[command(subcommand)]
        action: PrefsAction,
    },

    /// Select pages interactively in the terminal
    #[cfg(feature = "tui")]
    Browse {
        /// Path to the PDF file
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
}

/// Preference subcommands.
#[derive(Debug, Subcommand)]
pub enum PrefsAction {
    /// Print the current preferences
    Show {
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Flip one preference and save
    Toggle {
        #[arg(value_enum)]
        setting: PrefSetting,
    },
    /// Restore defaults
    Reset,
}

/// Output format for listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Batch operation selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum BatchMode {
    /// Copy all pages into `<name>_processed.pdf`
    Split,
    /// Extract all text into `<name>.txt`
    Text,
}

/// A toggleable preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PrefSetting {
    HighContrast,
    LargeText,
}
