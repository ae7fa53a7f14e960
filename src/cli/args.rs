/// CLI argument definitions via clap derive.
use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// nbclear — strip outputs and execution counts from Jupyter notebooks.
#[derive(Debug, Parser)]
#[allow(clippy::struct_excessive_bools)]
#[command(
    name = "nbclear",
    about = "Strip outputs and execution counts from Jupyter notebooks",
    version
)]
pub struct Cli {
    /// Notebooks to clear. Arguments without the `.ipynb` extension are skipped.
    /// With no arguments, every notebook in the current directory is checked.
    #[arg(value_name = "PATH")]
    pub paths: Vec<PathBuf>,

    /// Report notebooks that still have outputs without rewriting them.
    /// Exits 1 if any were found (for pre-commit hooks).
    #[arg(long)]
    pub check: bool,

    /// Report unreadable or malformed notebooks and continue with the rest
    /// instead of stopping at the first failure.
    #[arg(long)]
    pub keep_going: bool,

    /// Output format.
    #[arg(long, value_name = "FORMAT", default_value = "text")]
    pub output: OutputFormat,

    /// Shorthand for --output json.
    #[arg(long, conflicts_with = "output")]
    pub json: bool,

    /// Print per-phase timing to stderr for debugging.
    #[arg(long)]
    pub debug: bool,
}

/// Output format variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Human-readable progress lines and a summary.
    #[default]
    Text,
    /// One pretty-printed JSON report after the run.
    Json,
    /// One single-line JSON report after the run.
    Compact,
    /// Newline-delimited JSON (one object per file, as it is processed).
    Ndjson,
    /// Paths of modified notebooks only, one per line.
    Path,
}
