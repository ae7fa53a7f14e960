/// Batch driver: resolve targets, clear each notebook, report per file and in total.
use std::io::Write;
use std::path::Path;

use crate::cli::output::{write_file, write_header, write_no_targets, write_summary};
use crate::cli::{Cli, OutputCtx};
use crate::notebook::{
    ClearOptions, ClearOutcome, NotebookError, clear_outputs_with, resolve_targets,
};
use crate::types::{BatchReport, FileReport, FileStatus};

/// How a batch treats writes and per-file failures.
#[derive(Debug, Clone, Copy, Default)]
pub struct BatchOptions {
    /// Report instead of rewriting (`--check`).
    pub dry_run: bool,
    /// Record per-file failures and continue (`--keep-going`).
    pub keep_going: bool,
}

/// Run `nbclear` over the command-line paths, or the current directory.
///
/// # Errors
///
/// Returns the first `NotebookError` encountered (unless `--keep-going`),
/// `NotebookError::BatchFailed` if `--keep-going` recorded failures, or
/// `NotebookError::NeedsClearing` if `--check` found notebooks with outputs.
pub fn run(cli: &Cli, ctx: &OutputCtx) -> Result<(), NotebookError> {
    let opts = BatchOptions {
        dry_run: cli.check,
        keep_going: cli.keep_going,
    };
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let batch = run_batch(cli.paths.as_slice(), Path::new("."), &opts, ctx, &mut out)?;
    finish(&batch)
}

/// Turn a completed batch into the command's result (and so its exit status).
///
/// # Errors
///
/// `NotebookError::BatchFailed` if any file failed, else
/// `NotebookError::NeedsClearing` if a dry run found notebooks with outputs.
pub fn finish(batch: &BatchReport) -> Result<(), NotebookError> {
    if batch.failed > 0 {
        return Err(NotebookError::BatchFailed {
            failed: batch.failed,
        });
    }
    if batch.dry_run && batch.modified > 0 {
        return Err(NotebookError::NeedsClearing {
            count: batch.modified,
        });
    }
    Ok(())
}

/// Process every target in resolution order, streaming per-file lines to `out`.
///
/// # Errors
///
/// Returns `NotebookError` if discovery fails, or if a notebook fails and
/// `opts.keep_going` is not set. Files after the failing one are not visited.
pub fn run_batch<P: AsRef<Path>>(
    args: &[P],
    cwd: &Path,
    opts: &BatchOptions,
    ctx: &OutputCtx,
    out: &mut impl Write,
) -> Result<BatchReport, NotebookError> {
    let t_resolve = ctx.timer("resolve_targets");
    let targets = resolve_targets(args, cwd)?;
    drop(t_resolve);

    if targets.is_empty() {
        let batch = BatchReport::from_files(Vec::new(), opts.dry_run);
        write_no_targets(out, &batch, ctx);
        return Ok(batch);
    }

    write_header(out, targets.len(), ctx);

    let clear_opts = ClearOptions {
        dry_run: opts.dry_run,
    };
    let mut files = Vec::with_capacity(targets.len());
    for path in &targets {
        let t_clear = ctx.timer(format!("clear {}", path.display()));
        let report = match clear_outputs_with(path, &clear_opts) {
            Ok(outcome) => file_report(path, &outcome, opts.dry_run),
            Err(err) if opts.keep_going => failed_report(path, &err),
            Err(err) => return Err(err),
        };
        drop(t_clear);

        write_file(out, &report, ctx);
        files.push(report);
    }

    let batch = BatchReport::from_files(files, opts.dry_run);
    write_summary(out, &batch, ctx);
    Ok(batch)
}

fn display_name(path: &Path) -> String {
    path.file_name().map_or_else(
        || path.display().to_string(),
        |n| n.to_string_lossy().into_owned(),
    )
}

fn file_report(path: &Path, outcome: &ClearOutcome, dry_run: bool) -> FileReport {
    let status = match (outcome.modified, dry_run) {
        (false, _) => FileStatus::Clean,
        (true, false) => FileStatus::Cleared,
        (true, true) => FileStatus::NeedsClearing,
    };
    FileReport {
        path: path.display().to_string(),
        name: display_name(path),
        status,
        cleared_cells: outcome.stats.cleared_cells,
        code_cells: outcome.stats.code_cells,
        error: None,
    }
}

fn failed_report(path: &Path, err: &NotebookError) -> FileReport {
    FileReport {
        path: path.display().to_string(),
        name: display_name(path),
        status: FileStatus::Failed,
        cleared_cells: 0,
        code_cells: 0,
        error: Some(err.to_string()),
    }
}
