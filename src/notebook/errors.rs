/// Errors from the notebook domain layer.
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors that can occur while clearing notebooks.
#[derive(Debug, Error)]
pub enum NotebookError {
    /// The file could not be read or written.
    #[error("Failed to access '{}': {source}", path.display())]
    Io {
        /// The notebook path being read or written.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The file content is not valid UTF-8 JSON.
    #[error("Malformed notebook '{}': {source}", path.display())]
    Malformed {
        /// The notebook path.
        path: PathBuf,
        /// Underlying parse error.
        #[source]
        source: serde_json::Error,
    },

    /// The JSON parsed, but the fields we rely on have the wrong shape.
    #[error("Malformed notebook '{}': {reason}", path.display())]
    InvalidStructure {
        /// The notebook path.
        path: PathBuf,
        /// What was wrong.
        reason: String,
    },

    /// `--check` found notebooks that still carry outputs.
    #[error("{count} notebook(s) have outputs to clear")]
    NeedsClearing {
        /// Number of notebooks that would be rewritten.
        count: usize,
    },

    /// `--keep-going` finished, but at least one notebook failed.
    #[error("{failed} notebook(s) could not be processed")]
    BatchFailed {
        /// Number of notebooks that failed.
        failed: usize,
    },
}

impl NotebookError {
    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_owned(),
            source,
        }
    }

    pub(crate) fn invalid(path: &Path, reason: impl Into<String>) -> Self {
        Self::InvalidStructure {
            path: path.to_owned(),
            reason: reason.into(),
        }
    }

    /// Machine-readable error code (snake_case).
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::Io { .. } => "io_error",
            Self::Malformed { .. } | Self::InvalidStructure { .. } => "malformed_document",
            Self::NeedsClearing { .. } => "needs_clearing",
            Self::BatchFailed { .. } => "batch_failed",
        }
    }

    /// The notebook this error is about, if it concerns a single file.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Io { path, .. }
            | Self::Malformed { path, .. }
            | Self::InvalidStructure { path, .. } => Some(path),
            Self::NeedsClearing { .. } | Self::BatchFailed { .. } => None,
        }
    }
}

/// Exit code mapping for `NotebookError` variants.
impl NotebookError {
    /// Return the CLI exit code for this error.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::NeedsClearing { .. } | Self::BatchFailed { .. } => 1,
            Self::Malformed { .. } | Self::InvalidStructure { .. } => 2,
            Self::Io { .. } => 3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        let io = NotebookError::io(
            Path::new("a.ipynb"),
            std::io::Error::from(std::io::ErrorKind::NotFound),
        );
        assert_eq!(io.exit_code(), 3);
        assert_eq!(io.code(), "io_error");

        let bad = NotebookError::invalid(Path::new("a.ipynb"), "root is not an object");
        assert_eq!(bad.exit_code(), 2);
        assert_eq!(bad.code(), "malformed_document");
        assert_eq!(bad.path(), Some(Path::new("a.ipynb")));

        let dirty = NotebookError::NeedsClearing { count: 2 };
        assert_eq!(dirty.exit_code(), 1);
        assert_eq!(dirty.path(), None);
        assert_eq!(dirty.to_string(), "2 notebook(s) have outputs to clear");
    }

    #[test]
    fn test_message_names_file() {
        let bad = NotebookError::invalid(Path::new("nb/x.ipynb"), "'cells' is not an array");
        assert_eq!(
            bad.to_string(),
            "Malformed notebook 'nb/x.ipynb': 'cells' is not an array"
        );
    }
}
