/// Notebook domain layer: document I/O, output clearing, target resolution.
pub mod clear;
pub mod document;
pub mod errors;
pub mod targets;

pub use clear::{ClearOptions, ClearOutcome, clear_outputs, clear_outputs_with};
pub use document::Notebook;
pub use errors::NotebookError;
pub use targets::resolve_targets;
