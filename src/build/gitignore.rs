//! .gitignore patching
//!
//! Generated directories are appended once; a line counts as present only if
//! it matches exactly.

use std::fs;
use std::path::Path;

use anyhow::Result;

use crate::error::ForgeError;

pub const IGNORE_FILE: &str = ".gitignore";

/// Append `line` to `content` unless an identical line already exists
///
/// Returns `None` when nothing needs to change.
pub fn insert_if_missing(content: &str, line: &str) -> Option<String> {
    if content.lines().any(|existing| existing == line) {
        return None;
    }

    let mut patched = content.to_string();
    if !patched.is_empty() && !patched.ends_with('\n') {
        patched.push('\n');
    }
    patched.push_str(line);
    patched.push('\n');
    Some(patched)
}

/// Patch the ignore file at `path` with `lines`, if the file exists
///
/// Returns the lines that were added.
pub fn patch_ignore_file(path: &Path, lines: &[String]) -> Result<Vec<String>> {
    if !path.exists() {
        tracing::debug!("{} not found, skipping patch", path.display());
        return Ok(Vec::new());
    }

    println!("Patching {}...", IGNORE_FILE);
    let mut content =
        fs::read_to_string(path).map_err(|e| ForgeError::filesystem("read", path, e))?;

    let mut added = Vec::new();
    for line in lines {
        if let Some(patched) = insert_if_missing(&content, line) {
            println!("Added {} to {}", line, IGNORE_FILE);
            content = patched;
            added.push(line.clone());
        }
    }

    if !added.is_empty() {
        fs::write(path, &content).map_err(|e| ForgeError::filesystem("write", path, e))?;
    }
    Ok(added)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_if_missing() {
        assert_eq!(insert_if_missing("", "build").as_deref(), Some("build\n"));
        assert_eq!(
            insert_if_missing("target", "build").as_deref(),
            Some("target\nbuild\n")
        );
        assert_eq!(insert_if_missing("target\nbuild\n", "build"), None);
    }

    #[test]
    fn test_substring_is_not_a_match() {
        assert!(insert_if_missing("build/\n/builds\n", "build").is_some());
    }

    #[test]
    fn test_patch_is_idempotent() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join(IGNORE_FILE);
        fs::write(&path, "*.o\nbuild\n").unwrap();
        let lines = vec!["build".to_string(), "releases".to_string()];

        let added = patch_ignore_file(&path, &lines).unwrap();
        assert_eq!(added, vec!["releases"]);

        let added = patch_ignore_file(&path, &lines).unwrap();
        assert!(added.is_empty());

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().filter(|l| *l == "build").count(), 1);
        assert_eq!(content.lines().filter(|l| *l == "releases").count(), 1);
        assert_eq!(content, "*.o\nbuild\nreleases\n");
    }

    #[test]
    fn test_missing_file_is_left_alone() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join(IGNORE_FILE);
        let added = patch_ignore_file(&path, &["build".to_string()]).unwrap();
        assert!(added.is_empty());
        assert!(!path.exists());
    }
}
