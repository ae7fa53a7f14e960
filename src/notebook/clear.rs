/// Output clearing: reset `outputs` and `execution_count` on code cells.
///
/// A cell is dirty when it holds any output entries or a non-null execution
/// counter. Dirty code cells get `outputs = []` and `execution_count = null`;
/// every other field, and every non-code cell, is left as it was. The file is
/// rewritten only when at least one cell changed.
use std::path::Path;

use serde_json::{Map, Value};

use super::document::Notebook;
use super::errors::NotebookError;

const CELL_TYPE_KEY: &str = "cell_type";
const CODE_CELL: &str = "code";
const OUTPUTS_KEY: &str = "outputs";
const EXECUTION_COUNT_KEY: &str = "execution_count";

/// Options for [`clear_outputs_with`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ClearOptions {
    /// Report what would change without writing the file.
    pub dry_run: bool,
}

/// Cell counts from one clearing pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClearStats {
    /// Number of code cells seen.
    pub code_cells: usize,
    /// Number of code cells that were reset.
    pub cleared_cells: usize,
}

impl ClearStats {
    /// Whether any cell changed.
    #[must_use]
    pub fn modified(&self) -> bool {
        self.cleared_cells > 0
    }
}

/// Result of clearing one notebook file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClearOutcome {
    /// True iff the file changed on disk (or would have, under `dry_run`).
    pub modified: bool,
    /// Cell counts behind `modified`.
    pub stats: ClearStats,
}

/// Reset a single cell if it is a dirty code cell. Returns whether it changed.
///
/// Keys already present keep their position; a missing key is appended.
pub fn clear_cell(cell: &mut Map<String, Value>) -> bool {
    if cell.get(CELL_TYPE_KEY).and_then(Value::as_str) != Some(CODE_CELL) {
        return false;
    }
    if !has_outputs(cell.get(OUTPUTS_KEY)) && !has_execution_count(cell.get(EXECUTION_COUNT_KEY))
    {
        return false;
    }
    cell.insert(OUTPUTS_KEY.to_owned(), Value::Array(Vec::new()));
    cell.insert(EXECUTION_COUNT_KEY.to_owned(), Value::Null);
    true
}

fn has_outputs(outputs: Option<&Value>) -> bool {
    match outputs {
        None | Some(Value::Null) => false,
        Some(Value::Array(entries)) => !entries.is_empty(),
        // Not a list, but still stale content that belongs in `[]`.
        Some(_) => true,
    }
}

fn has_execution_count(count: Option<&Value>) -> bool {
    count.is_some_and(|c| !c.is_null())
}

/// Clear every code cell of an in-memory notebook.
///
/// # Errors
///
/// Returns `NotebookError::InvalidStructure` if the cell list has the wrong shape.
pub fn clear_notebook(notebook: &mut Notebook) -> Result<ClearStats, NotebookError> {
    let mut stats = ClearStats::default();
    for cell in notebook.cells_mut()? {
        if cell.get(CELL_TYPE_KEY).and_then(Value::as_str) == Some(CODE_CELL) {
            stats.code_cells += 1;
        }
        if clear_cell(cell) {
            stats.cleared_cells += 1;
        }
    }
    Ok(stats)
}

/// Clear outputs from the notebook at `path`, rewriting it only if something changed.
///
/// Returns `true` iff the file content changed on disk.
///
/// # Errors
///
/// Returns `NotebookError` if the file cannot be read, parsed, or written.
pub fn clear_outputs(path: &Path) -> Result<bool, NotebookError> {
    clear_outputs_with(path, &ClearOptions::default()).map(|o| o.modified)
}

/// Like [`clear_outputs`], with options and per-cell counts.
///
/// # Errors
///
/// Returns `NotebookError` if the file cannot be read, parsed, or written.
pub fn clear_outputs_with(path: &Path, opts: &ClearOptions) -> Result<ClearOutcome, NotebookError> {
    let mut notebook = Notebook::load(path)?;
    let stats = clear_notebook(&mut notebook)?;
    let modified = stats.modified();
    if modified && !opts.dry_run {
        notebook.save()?;
    }
    Ok(ClearOutcome { modified, stats })
}
