/// Notebook document: lossless load, serialize, and save of `.ipynb` JSON.
///
/// The document is held as an ordered JSON mapping rather than a typed record so
/// unknown top-level and cell fields round-trip untouched, in their original order.
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Value};

use super::errors::NotebookError;

/// Top-level key holding the cell sequence.
pub const CELLS_KEY: &str = "cells";

/// Indentation used when rewriting a notebook (one space, as Jupyter writes it).
const INDENT: &[u8] = b" ";

/// A parsed notebook, remembered together with the path it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct Notebook {
    path: PathBuf,
    root: Map<String, Value>,
}

impl Notebook {
    /// Parse notebook bytes. `path` is used for error context only.
    ///
    /// # Errors
    ///
    /// - `NotebookError::Malformed` if the bytes are not UTF-8 JSON
    /// - `NotebookError::InvalidStructure` if the root is not an object
    pub fn parse(path: &Path, bytes: &[u8]) -> Result<Self, NotebookError> {
        let value: Value =
            serde_json::from_slice(bytes).map_err(|source| NotebookError::Malformed {
                path: path.to_owned(),
                source,
            })?;
        match value {
            Value::Object(root) => Ok(Self {
                path: path.to_owned(),
                root,
            }),
            other => Err(NotebookError::invalid(
                path,
                format!("root must be an object, found {}", kind(&other)),
            )),
        }
    }

    /// Read and parse the notebook at `path`.
    ///
    /// # Errors
    ///
    /// Returns `NotebookError::Io` if the file cannot be read, or a parse error
    /// as described in [`Notebook::parse`].
    pub fn load(path: &Path) -> Result<Self, NotebookError> {
        let bytes = fs::read(path).map_err(|e| NotebookError::io(path, e))?;
        Self::parse(path, &bytes)
    }

    /// Mutable views of every cell, in document order.
    ///
    /// A missing `cells` key yields no cells.
    ///
    /// # Errors
    ///
    /// Returns `NotebookError::InvalidStructure` if `cells` is not an array or any
    /// element of it is not an object. Nothing is handed out in that case.
    pub fn cells_mut(&mut self) -> Result<Vec<&mut Map<String, Value>>, NotebookError> {
        let cells = match self.root.get_mut(CELLS_KEY) {
            None => return Ok(Vec::new()),
            Some(Value::Array(cells)) => cells,
            Some(other) => {
                return Err(NotebookError::invalid(
                    &self.path,
                    format!("'{CELLS_KEY}' must be an array, found {}", kind(other)),
                ));
            }
        };
        let path = &self.path;
        cells
            .iter_mut()
            .enumerate()
            .map(|(i, cell)| match cell {
                Value::Object(map) => Ok(map),
                other => Err(NotebookError::invalid(
                    path,
                    format!("cell {i} must be an object, found {}", kind(other)),
                )),
            })
            .collect()
    }

    /// Serialize with one-space indentation, literal non-ASCII text, and exactly
    /// one trailing newline.
    ///
    /// # Errors
    ///
    /// Returns a `serde_json::Error` if serialization fails.
    pub fn to_bytes(&self) -> Result<Vec<u8>, serde_json::Error> {
        let mut buf = Vec::new();
        let mut ser =
            serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(INDENT));
        self.root.serialize(&mut ser)?;
        buf.push(b'\n');
        Ok(buf)
    }

    /// Overwrite the file this notebook was loaded from.
    ///
    /// # Errors
    ///
    /// Returns `NotebookError::Io` if the file cannot be written.
    pub fn save(&self) -> Result<(), NotebookError> {
        let bytes = self
            .to_bytes()
            .map_err(|e| NotebookError::io(&self.path, e.into()))?;
        fs::write(&self.path, bytes).map_err(|e| NotebookError::io(&self.path, e))
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Result<Notebook, NotebookError> {
        Notebook::parse(Path::new("test.ipynb"), text.as_bytes())
    }

    #[test]
    fn test_serialize_one_space_indent_and_newline() {
        let nb = parse(r#"{"cells":[],"nbformat":4}"#).unwrap();
        let text = String::from_utf8(nb.to_bytes().unwrap()).unwrap();
        assert_eq!(text, "{\n \"cells\": [],\n \"nbformat\": 4\n}\n");
    }

    #[test]
    fn test_serialize_preserves_key_order() {
        let nb = parse(r#"{"zeta":1,"alpha":{"y":true,"b":null},"cells":[]}"#).unwrap();
        let text = String::from_utf8(nb.to_bytes().unwrap()).unwrap();
        let zeta = text.find("\"zeta\"").unwrap();
        let alpha = text.find("\"alpha\"").unwrap();
        let cells = text.find("\"cells\"").unwrap();
        assert!(zeta < alpha && alpha < cells);
        assert!(text.find("\"y\"").unwrap() < text.find("\"b\"").unwrap());
    }

    #[test]
    fn test_serialize_keeps_non_ascii_literal() {
        let nb = parse(r#"{"cells":[],"title":"Grüße ✓ 日本"}"#).unwrap();
        let text = String::from_utf8(nb.to_bytes().unwrap()).unwrap();
        assert!(text.contains("\"title\": \"Grüße ✓ 日本\""));
        assert!(!text.contains("\\u"));
    }

    #[test]
    fn test_exactly_one_trailing_newline() {
        let nb = parse("{\"cells\": []}\n\n\n").unwrap();
        let bytes = nb.to_bytes().unwrap();
        assert!(bytes.ends_with(b"}\n"));
        assert!(!bytes.ends_with(b"\n\n"));
    }

    #[test]
    fn test_invalid_json_is_malformed() {
        let err = parse("{\"cells\": [").unwrap_err();
        assert!(matches!(err, NotebookError::Malformed { .. }));
    }

    #[test]
    fn test_invalid_utf8_is_malformed() {
        let err = Notebook::parse(Path::new("x.ipynb"), b"{\"a\": \"\xff\"}").unwrap_err();
        assert!(matches!(err, NotebookError::Malformed { .. }));
    }

    #[test]
    fn test_non_object_root_is_invalid() {
        let err = parse("[1, 2]").unwrap_err();
        assert!(matches!(err, NotebookError::InvalidStructure { .. }));
    }

    #[test]
    fn test_missing_cells_is_empty() {
        let mut nb = parse(r#"{"metadata":{}}"#).unwrap();
        assert!(nb.cells_mut().unwrap().is_empty());
    }

    #[test]
    fn test_cells_wrong_shape() {
        let mut nb = parse(r#"{"cells":{"a":1}}"#).unwrap();
        assert!(matches!(
            nb.cells_mut(),
            Err(NotebookError::InvalidStructure { .. })
        ));

        let mut nb = parse(r#"{"cells":[{"cell_type":"code"}, "oops"]}"#).unwrap();
        let err = nb.cells_mut().unwrap_err();
        assert!(err.to_string().contains("cell 1 must be an object"));
    }

    #[test]
    fn test_load_and_save_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nb.ipynb");
        fs::write(&path, "{\n \"cells\": [],\n \"nbformat\": 4\n}\n").unwrap();

        let nb = Notebook::load(&path).unwrap();
        nb.save().unwrap();
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "{\n \"cells\": [],\n \"nbformat\": 4\n}\n"
        );
    }

    #[test]
    fn test_load_missing_file_is_io() {
        let dir = tempfile::tempdir().unwrap();
        let err = Notebook::load(&dir.path().join("gone.ipynb")).unwrap_err();
        assert!(matches!(err, NotebookError::Io { .. }));
    }
}
