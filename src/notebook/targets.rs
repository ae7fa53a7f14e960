/// Target resolution: which files a batch run should visit.
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

use super::errors::NotebookError;

/// File extension of Jupyter notebooks.
pub const NOTEBOOK_EXTENSION: &str = "ipynb";

/// Whether a path names a notebook (case-sensitive suffix check on the raw bytes,
/// so names that are not valid UTF-8 still qualify).
#[must_use]
pub fn is_notebook_path(arg: impl AsRef<OsStr>) -> bool {
    arg.as_ref()
        .as_encoded_bytes()
        .strip_suffix(NOTEBOOK_EXTENSION.as_bytes())
        .is_some_and(|stem| stem.ends_with(b"."))
}

/// Keep only notebook arguments, in the order given.
#[must_use]
pub fn from_args<P: AsRef<Path>>(args: &[P]) -> Vec<PathBuf> {
    args.iter()
        .map(AsRef::<Path>::as_ref)
        .filter(|p| is_notebook_path(p))
        .map(Path::to_path_buf)
        .collect()
}

/// Notebook files directly inside `dir`, in directory-listing order.
///
/// # Errors
///
/// Returns `NotebookError::Io` if the directory cannot be listed.
pub fn discover(dir: &Path) -> Result<Vec<PathBuf>, NotebookError> {
    let entries = fs::read_dir(dir).map_err(|e| NotebookError::io(dir, e))?;
    let mut found = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| NotebookError::io(dir, e))?;
        if !is_notebook_path(entry.file_name()) {
            continue;
        }
        // Follows symlinks, so a link to a notebook counts as a notebook.
        let is_file = fs::metadata(entry.path()).is_ok_and(|m| m.is_file());
        if is_file {
            found.push(entry.path());
        }
    }
    Ok(found)
}

/// Resolve the batch target set: explicit arguments if any, else discovery in `cwd`.
///
/// # Errors
///
/// Returns `NotebookError::Io` if discovery cannot list `cwd`.
pub fn resolve_targets<P: AsRef<Path>>(
    args: &[P],
    cwd: &Path,
) -> Result<Vec<PathBuf>, NotebookError> {
    if args.is_empty() {
        discover(cwd)
    } else {
        Ok(from_args(args))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_notebook_path() {
        assert!(is_notebook_path("a.ipynb"));
        assert!(is_notebook_path("dir/sub/a.ipynb"));
        assert!(!is_notebook_path("b.txt"));
        assert!(!is_notebook_path("a.IPYNB"));
        assert!(!is_notebook_path("ipynb"));
        assert!(!is_notebook_path("a.ipynb.bak"));
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_notebook_name() {
        use std::os::unix::ffi::OsStrExt;

        let latin1 = PathBuf::from(OsStr::from_bytes(b"caf\xe9.ipynb"));
        let other = PathBuf::from(OsStr::from_bytes(b"caf\xe9.txt"));
        assert_eq!(from_args(&[latin1.clone(), other]), vec![latin1]);
    }

    #[cfg(unix)]
    #[test]
    fn test_discover_non_utf8_name() {
        use std::os::unix::ffi::OsStrExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(OsStr::from_bytes(b"caf\xe9.ipynb"));
        if fs::write(&path, "{}").is_err() {
            // Some filesystems only accept UTF-8 names.
            return;
        }
        assert_eq!(discover(dir.path()).unwrap(), vec![path]);
    }

    #[test]
    fn test_args_filter_non_notebooks() {
        let targets = from_args(&["a.ipynb", "b.txt"]);
        assert_eq!(targets, vec![PathBuf::from("a.ipynb")]);
    }

    #[test]
    fn test_args_keep_order_and_duplicates() {
        let targets = from_args(&["z.ipynb", "a.ipynb", "z.ipynb"]);
        assert_eq!(
            targets,
            vec![
                PathBuf::from("z.ipynb"),
                PathBuf::from("a.ipynb"),
                PathBuf::from("z.ipynb")
            ]
        );
    }

    #[test]
    fn test_args_without_notebooks_do_not_discover() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("x.ipynb"), "{}").unwrap();
        let targets = resolve_targets(&["notes.md"], dir.path()).unwrap();
        assert!(targets.is_empty());
    }

    #[test]
    fn test_discover_non_recursive() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("one.ipynb"), "{}").unwrap();
        fs::write(dir.path().join("two.ipynb"), "{}").unwrap();
        fs::write(dir.path().join("readme.md"), "").unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("nested").join("deep.ipynb"), "{}").unwrap();
        fs::create_dir(dir.path().join("folder.ipynb")).unwrap();

        let mut names: Vec<String> = resolve_targets::<&str>(&[], dir.path())
            .unwrap()
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        names.sort();
        assert_eq!(names, ["one.ipynb", "two.ipynb"]);
    }

    #[test]
    fn test_discover_empty_dir() {
        let dir = tempfile::tempdir().unwrap();
        assert!(discover(dir.path()).unwrap().is_empty());
    }

    #[test]
    fn test_discover_missing_dir_is_io() {
        let dir = tempfile::tempdir().unwrap();
        let err = discover(&dir.path().join("gone")).unwrap_err();
        assert!(matches!(err, NotebookError::Io { .. }));
    }
}
