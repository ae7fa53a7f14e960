/// Output formatting: text progress lines, JSON reports, path mode.
use std::io::Write;

use serde::Serialize;

use super::args::OutputFormat;
use crate::types::{BatchReport, ErrorOutput, FileReport, FileStatus};

/// Resolve the effective output format, handling the `--json` flag.
#[must_use]
pub fn resolve_format(fmt: OutputFormat, json_flag: bool) -> OutputFormat {
    if json_flag { OutputFormat::Json } else { fmt }
}

/// Output context passed to all formatters.
pub struct OutputCtx {
    pub format: OutputFormat,
    /// When true, print timing spans to stderr.
    pub debug: bool,
}

impl OutputCtx {
    /// Construct from CLI args.
    #[must_use]
    pub fn new(fmt: OutputFormat, json_flag: bool, debug: bool) -> Self {
        Self {
            format: resolve_format(fmt, json_flag),
            debug,
        }
    }

    /// Start a named debug timer. Prints elapsed on drop only when `--debug` is set.
    #[must_use]
    pub fn timer(&self, label: impl Into<String>) -> DebugTimer {
        DebugTimer::new(label.into(), self.debug)
    }
}

// --- Batch progress ---

/// Report that there was nothing to do. `batch` is the (empty) run summary.
pub fn write_no_targets(out: &mut impl Write, batch: &BatchReport, ctx: &OutputCtx) {
    match ctx.format {
        OutputFormat::Text => {
            let _ = writeln!(out, "No notebooks found.");
        }
        OutputFormat::Json | OutputFormat::Compact => write_summary(out, batch, ctx),
        OutputFormat::Ndjson | OutputFormat::Path => {}
    }
}

/// Announce how many notebooks are about to be checked.
pub fn write_header(out: &mut impl Write, count: usize, ctx: &OutputCtx) {
    if ctx.format == OutputFormat::Text {
        let _ = writeln!(out, "Checking {count} notebook(s)...");
    }
}

/// Report one processed notebook as soon as it is done.
pub fn write_file(out: &mut impl Write, report: &FileReport, ctx: &OutputCtx) {
    match ctx.format {
        OutputFormat::Text => {
            let _ = writeln!(out, "{}", file_line(report));
        }
        OutputFormat::Ndjson => write_compact_json(out, report),
        OutputFormat::Path => {
            if report.is_modified() {
                let _ = writeln!(out, "{}", report.path);
            }
        }
        OutputFormat::Json | OutputFormat::Compact => {}
    }
}

/// Write the end-of-run summary.
pub fn write_summary(out: &mut impl Write, batch: &BatchReport, ctx: &OutputCtx) {
    match ctx.format {
        OutputFormat::Text => {
            let _ = writeln!(out);
            let _ = if batch.dry_run {
                writeln!(out, "{} notebook(s) need clearing.", batch.modified)
            } else {
                writeln!(out, "Cleaned {} notebook(s).", batch.modified)
            };
            if batch.failed > 0 {
                let _ = writeln!(out, "Failed to process {} notebook(s).", batch.failed);
            }
        }
        OutputFormat::Json => write_json(out, batch),
        OutputFormat::Compact => write_compact_json(out, batch),
        OutputFormat::Ndjson | OutputFormat::Path => {}
    }
}

fn file_line(report: &FileReport) -> String {
    let name = &report.name;
    match report.status {
        FileStatus::Cleared => format!("  ✓ Cleared outputs from {name}"),
        FileStatus::Clean => format!("  - {name} (no outputs to clear)"),
        FileStatus::NeedsClearing => format!("  ✗ {name} has outputs to clear"),
        FileStatus::Failed => format!(
            "  ! {name}: {}",
            report.error.as_deref().unwrap_or("unknown error")
        ),
    }
}

// --- Error output ---

/// Write a structured error to stderr.
pub fn write_error(err: &ErrorOutput, format: OutputFormat, json_flag: bool) {
    let fmt = resolve_format(format, json_flag);
    let stderr = std::io::stderr();
    let mut out = stderr.lock();
    match fmt {
        OutputFormat::Json => write_json(&mut out, err),
        OutputFormat::Compact | OutputFormat::Ndjson => write_compact_json(&mut out, err),
        OutputFormat::Text | OutputFormat::Path => {
            let _ = writeln!(out, "Error: {}", err.error.message);
        }
    }
}

// --- Debug timer ---

/// A RAII timer that prints elapsed milliseconds to stderr on drop.
///
/// Created via [`OutputCtx::timer`]. Does nothing when `debug` is false.
pub struct DebugTimer {
    label: String,
    start: std::time::Instant,
    active: bool,
}

impl DebugTimer {
    #[must_use]
    fn new(label: String, active: bool) -> Self {
        Self {
            label,
            start: std::time::Instant::now(),
            active,
        }
    }
}

impl Drop for DebugTimer {
    fn drop(&mut self) {
        if self.active {
            let ms = self.start.elapsed().as_secs_f64() * 1000.0;
            eprintln!("[debug] {}: {ms:.2}ms", self.label);
        }
    }
}

// --- Generic JSON helpers ---

fn write_json<T: Serialize + ?Sized>(out: &mut impl Write, value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => {
            let _ = writeln!(out, "{s}");
        }
        Err(e) => eprintln!("JSON serialization error: {e}"),
    }
}

fn write_compact_json<T: Serialize + ?Sized>(out: &mut impl Write, value: &T) {
    match serde_json::to_string(value) {
        Ok(s) => {
            let _ = writeln!(out, "{s}");
        }
        Err(e) => eprintln!("JSON serialization error: {e}"),
    }
}
