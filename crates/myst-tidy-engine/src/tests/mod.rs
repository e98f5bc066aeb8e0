use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Temporary content directory seeded with the given (filename, text) pairs.
pub fn content_dir_with(files: &[(&str, &str)]) -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    for (name, text) in files {
        write_content_file(&dir, name, text);
    }
    dir
}

/// Add one file to a test content directory.
pub fn write_content_file(dir: &TempDir, name: &str, text: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, text).unwrap();
    path
}
