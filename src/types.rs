/// Shared serializable output types for batch reports.
///
/// These types are what gets written to stdout in the structured output modes.
/// They are decoupled from the internal `ClearOutcome` / `NotebookError` types.
use serde::{Deserialize, Serialize};

use crate::notebook::NotebookError;

/// What happened to a single notebook.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileStatus {
    /// Outputs were cleared and the file rewritten.
    Cleared,
    /// Nothing to clear; the file was not touched.
    Clean,
    /// `--check` found outputs; the file was not touched.
    NeedsClearing,
    /// The file could not be processed (`--keep-going` only).
    Failed,
}

/// Per-file result line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileReport {
    /// Path as given on the command line or found by discovery.
    pub path: String,
    /// Final path component.
    pub name: String,
    /// Outcome for this file.
    pub status: FileStatus,
    /// Number of code cells that were (or would be) reset.
    pub cleared_cells: usize,
    /// Number of code cells in the notebook.
    pub code_cells: usize,
    /// Error message when `status` is `failed`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl FileReport {
    /// Whether the file was, or would be, rewritten.
    #[must_use]
    pub fn is_modified(&self) -> bool {
        matches!(self.status, FileStatus::Cleared | FileStatus::NeedsClearing)
    }
}

/// Summary of a whole batch run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchReport {
    /// `true` unless some file failed or `--check` found outputs.
    pub ok: bool,
    /// Number of notebooks visited.
    pub checked: usize,
    /// Number of notebooks cleared (or needing clearing under `--check`).
    pub modified: usize,
    /// Number of notebooks that failed (`--keep-going` only).
    pub failed: usize,
    /// Whether this was a `--check` run.
    pub dry_run: bool,
    /// Per-file results, in processing order.
    pub files: Vec<FileReport>,
}

impl BatchReport {
    /// Build the summary from per-file results.
    #[must_use]
    pub fn from_files(files: Vec<FileReport>, dry_run: bool) -> Self {
        let modified = files.iter().filter(|f| f.is_modified()).count();
        let failed = files
            .iter()
            .filter(|f| f.status == FileStatus::Failed)
            .count();
        Self {
            ok: failed == 0 && !(dry_run && modified > 0),
            checked: files.len(),
            modified,
            failed,
            dry_run,
            files,
        }
    }
}

/// A structured error envelope for JSON error output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorOutput {
    /// Always `false`.
    pub ok: bool,
    /// Error details.
    pub error: ErrorDetail,
}

/// Error detail in the JSON error envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    /// Machine-readable error code (snake_case).
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Notebook the error concerns, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl ErrorOutput {
    /// Construct from a `NotebookError`.
    #[must_use]
    pub fn from_notebook_error(err: &NotebookError) -> Self {
        Self {
            ok: false,
            error: ErrorDetail {
                code: err.code().to_owned(),
                message: err.to_string(),
                path: err.path().map(|p| p.display().to_string()),
            },
        }
    }
}
