//! Scaffolding for turning saved snapshots back into test fixtures.

use crate::{error::Error, snapshot::Snapshot};
use std::{
    fs,
    path::{Path, PathBuf},
};

const SNAPSHOT_VERBS: [&str; 3] = ["GET", "POST", "PUT"];

/// Enumerates the snapshot files in a directory: regular files whose
/// name starts with an HTTP verb the recorder writes.
pub fn snapshot_files<P: AsRef<Path>>(dir: P) -> Result<Vec<PathBuf>, Error> {
    let mut paths = Vec::new();

    for entry in fs::read_dir(dir.as_ref())? {
        let path = entry?.path();
        let verb = path
            .file_name()
            .and_then(|name| name.to_str())
            .and_then(|name| name.split('.').next())
            .unwrap_or_default();

        if path.is_file() && SNAPSHOT_VERBS.contains(&verb) {
            paths.push(path);
        }
    }

    paths.sort();
    Ok(paths)
}

/// Loads a saved snapshot file back into a [`Snapshot`], e.g. to
/// reconstruct a mock response in a test suite.
pub fn load_snapshot<P: AsRef<Path>>(path: P) -> Result<Snapshot, Error> {
    let contents = fs::read_to_string(path.as_ref())?;
    Ok(serde_json::from_str(&contents)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;

    #[test]
    fn only_verb_prefixed_files_are_listed() {
        let dir = tempfile::tempdir().unwrap();
        for name in &["GET.users.json", "POST.datasets.json", "notes.txt", "DELETE.x.json"] {
            File::create(dir.path().join(name)).unwrap();
        }

        let files = snapshot_files(dir.path()).unwrap();
        let names: Vec<_> = files
            .iter()
            .filter_map(|path| path.file_name().and_then(|name| name.to_str()))
            .collect();

        assert_eq!(names, vec!["GET.users.json", "POST.datasets.json"]);
    }

    #[test]
    fn missing_directory_is_an_io_error() {
        let result = snapshot_files("/nonexistent/apisnap");
        assert!(matches!(result, Err(Error::IoError(_))));
    }
}
