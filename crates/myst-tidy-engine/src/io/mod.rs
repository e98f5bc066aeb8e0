use glob::glob;
use relative_path::RelativePath;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("File not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid content directory: {0}")]
    InvalidContentDir(String),
    #[error("Invalid file pattern: {0}")]
    Pattern(#[from] glob::PatternError),
    #[error("Failed to read directory entry: {0}")]
    Entry(#[from] glob::GlobError),
}

/// Read a content file and return its text
pub fn read_file(relative_path: &RelativePath, content_root: &Path) -> Result<String, IoError> {
    let absolute_path = relative_path.to_path(content_root);
    if !absolute_path.exists() {
        return Err(IoError::NotFound(absolute_path));
    }
    fs::read_to_string(&absolute_path).map_err(IoError::Io)
}

/// Write text to a content file
pub fn write_file(
    relative_path: &RelativePath,
    content_root: &Path,
    content: &str,
) -> Result<(), IoError> {
    let absolute_path = relative_path.to_path(content_root);

    // Create parent directories if they don't exist
    if let Some(parent) = absolute_path.parent() {
        fs::create_dir_all(parent).map_err(IoError::Io)?;
    }

    fs::write(&absolute_path, content).map_err(IoError::Io)
}

/// List the top-level files of the content directory with one of the given
/// extensions, sorted.
///
/// Enumeration is deliberately non-recursive: content directories are flat,
/// and anything in a subdirectory (exports, assets) is not ours to touch.
pub fn scan_content_files<S: AsRef<str>>(
    content_root: &Path,
    extensions: &[S],
) -> Result<Vec<PathBuf>, IoError> {
    if !content_root.exists() {
        return Err(IoError::InvalidContentDir(
            "content directory not found".to_string(),
        ));
    }

    // Only the `*.ext` part is a pattern; the root itself must match
    // literally even when its name contains glob metacharacters.
    let escaped_root = glob::Pattern::escape(&content_root.to_string_lossy());

    let mut files = Vec::new();
    for extension in extensions {
        let pattern = format!("{escaped_root}/*.{}", extension.as_ref());
        for entry in glob(&pattern)? {
            files.push(entry?);
        }
    }
    files.sort();
    Ok(files)
}

pub fn validate_content_dir(path: &Path) -> Result<(), IoError> {
    if !path.exists() || !path.is_dir() {
        return Err(IoError::InvalidContentDir(
            "Directory does not exist".to_string(),
        ));
    }

    Ok(())
}

/// Apply a text transform to one file on disk.
///
/// Reads the file, runs `transform`, and writes the result back only when it
/// differs from the original (and `dry_run` is off). Returns whether the file
/// changed, or would have. Transforms are pure, so running this twice over
/// the same file settles on the first run's output.
pub fn rewrite_file<F>(
    relative_path: &RelativePath,
    content_root: &Path,
    dry_run: bool,
    transform: F,
) -> Result<bool, IoError>
where
    F: Fn(&str) -> String,
{
    let content = read_file(relative_path, content_root)?;
    let fixed = transform(&content);

    if fixed == content {
        return Ok(false);
    }
    if !dry_run {
        write_file(relative_path, content_root, &fixed)?;
    }
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::balance_admonitions;
    use crate::tests::{content_dir_with, write_content_file};

    const EXTENSIONS: &[&str] = &["md", "markdown"];

    #[test]
    fn test_scan_finds_both_markdown_extensions() {
        let content_dir = content_dir_with(&[
            ("chapter1.md", "# Chapter 1"),
            ("chapter2.markdown", "# Chapter 2"),
        ]);

        let files = scan_content_files(content_dir.path(), EXTENSIONS).unwrap();

        assert_eq!(files.len(), 2);
        assert!(
            files
                .iter()
                .any(|f| f.file_name().unwrap() == "chapter1.md")
        );
        assert!(
            files
                .iter()
                .any(|f| f.file_name().unwrap() == "chapter2.markdown")
        );
    }

    #[test]
    fn test_scan_honors_configured_extensions() {
        let content_dir = content_dir_with(&[
            ("chapter1.md", "# Chapter 1"),
            ("chapter2.markdown", "# Chapter 2"),
        ]);

        let files = scan_content_files(content_dir.path(), &["md"]).unwrap();

        assert_eq!(files.len(), 1);
        assert_eq!(files[0].file_name().unwrap(), "chapter1.md");
    }

    #[test]
    fn test_scan_returns_sorted_paths() {
        let content_dir = content_dir_with(&[("b.md", "b"), ("a.md", "a"), ("c.md", "c")]);

        let files = scan_content_files(content_dir.path(), EXTENSIONS).unwrap();

        let names: Vec<_> = files.iter().map(|f| f.file_name().unwrap()).collect();
        assert_eq!(names, ["a.md", "b.md", "c.md"]);
    }

    #[test]
    fn test_scan_ignores_subdirectories_and_other_files() {
        // Given a content directory with exports and non-markdown files
        let content_dir = content_dir_with(&[("chapter1.md", "# Chapter"), ("figure.svg", "<svg/>")]);

        let exports_dir = content_dir.path().join("exports");
        std::fs::create_dir(&exports_dir).unwrap();
        std::fs::write(exports_dir.join("chapter1.md"), "# Exported copy").unwrap();

        // When scanning for files
        let files = scan_content_files(content_dir.path(), EXTENSIONS).unwrap();

        // Then only the top-level markdown file is found
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].file_name().unwrap(), "chapter1.md");
    }

    #[test]
    fn test_scan_handles_metacharacters_in_root_name() {
        // Given a content directory whose name would read as a glob pattern
        let parent = content_dir_with(&[]);
        let content_root = parent.path().join("content [draft]");
        std::fs::create_dir(&content_root).unwrap();
        std::fs::write(content_root.join("chapter1.md"), "# Chapter").unwrap();

        // When scanning for files
        let files = scan_content_files(&content_root, EXTENSIONS).unwrap();

        // Then the root is matched literally, not as a pattern
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].file_name().unwrap(), "chapter1.md");
    }

    #[test]
    fn test_scan_invalid_content_directory() {
        let nonexistent_path = PathBuf::from("/this/path/does/not/exist");

        let result = scan_content_files(&nonexistent_path, EXTENSIONS);
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("content directory")
        );
    }

    #[test]
    fn test_validate_content_dir_exists() {
        let content_dir = content_dir_with(&[]);
        let result = validate_content_dir(content_dir.path());
        assert!(result.is_ok());
    }

    #[test]
    fn test_validate_content_dir_not_exists() {
        let result = validate_content_dir(Path::new("/nonexistent/path"));
        assert!(result.is_err());
        assert!(matches!(result, Err(IoError::InvalidContentDir(_))));
    }

    #[test]
    fn test_read_file_success() {
        let content_dir = content_dir_with(&[("chapter1.md", "# Test Content\n\nParagraph")]);

        let relative_path = RelativePath::new("chapter1.md");
        let content = read_file(relative_path, content_dir.path()).unwrap();
        assert_eq!(content, "# Test Content\n\nParagraph");
    }

    #[test]
    fn test_read_file_not_found() {
        let content_dir = content_dir_with(&[]);
        let relative_path = RelativePath::new("nonexistent.md");
        let result = read_file(relative_path, content_dir.path());
        assert!(result.is_err());
        assert!(matches!(result, Err(IoError::NotFound(_))));
    }

    #[test]
    fn test_write_file_roundtrip() {
        let content_dir = content_dir_with(&[]);
        let relative_path = RelativePath::new("new_file.md");
        let content = "# New File\n\nThis is new content";

        write_file(relative_path, content_dir.path(), content).unwrap();

        let written_content = read_file(relative_path, content_dir.path()).unwrap();
        assert_eq!(written_content, content);
    }

    #[test]
    fn test_rewrite_file_fixes_and_reports_change() {
        // Given a file with a misaligned closing fence
        let content_dir = content_dir_with(&[]);
        write_content_file(&content_dir, "chapter1.md", ":::{note}\ntext\n    :::\n");

        // When rewriting with the balancer
        let relative_path = RelativePath::new("chapter1.md");
        let changed =
            rewrite_file(relative_path, content_dir.path(), false, balance_admonitions).unwrap();

        // Then the change is reported and written back
        assert!(changed);
        let content = read_file(relative_path, content_dir.path()).unwrap();
        assert_eq!(content, ":::{note}\ntext\n:::\n");
    }

    #[test]
    fn test_rewrite_file_reports_unchanged() {
        let content_dir = content_dir_with(&[("chapter1.md", ":::{note}\ntext\n:::\n")]);

        let relative_path = RelativePath::new("chapter1.md");
        let changed =
            rewrite_file(relative_path, content_dir.path(), false, balance_admonitions).unwrap();

        assert!(!changed);
    }

    #[test]
    fn test_rewrite_file_dry_run_leaves_file_untouched() {
        let original = ":::{note}\ntext\n    :::\n";
        let content_dir = content_dir_with(&[("chapter1.md", original)]);

        let relative_path = RelativePath::new("chapter1.md");
        let changed =
            rewrite_file(relative_path, content_dir.path(), true, balance_admonitions).unwrap();

        // Reported as a change, but nothing written
        assert!(changed);
        let content = read_file(relative_path, content_dir.path()).unwrap();
        assert_eq!(content, original);
    }
}
