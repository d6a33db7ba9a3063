//! Path and filesystem utilities

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::config::PROJECT_FILE;
use crate::error::ForgeError;

/// Find the project root from the current directory
pub fn find_project_root() -> Result<PathBuf> {
    let current_dir = std::env::current_dir().context("Failed to get current directory")?;
    find_project_root_from(&current_dir)
}

/// Look for CMakeLists.txt in `start`, then in its parent only
pub fn find_project_root_from(start: &Path) -> Result<PathBuf> {
    if start.join(PROJECT_FILE).exists() {
        return Ok(start.to_path_buf());
    }

    if let Some(parent) = start.parent() {
        tracing::debug!(
            "{} not in {}, looking in {}",
            PROJECT_FILE,
            start.display(),
            parent.display()
        );
        if parent.join(PROJECT_FILE).exists() {
            return Ok(parent.to_path_buf());
        }
    }

    Err(ForgeError::ProjectNotFound {
        searched: start.to_path_buf(),
    }
    .into())
}

/// True if `path` is a directory with at least one direct entry
pub fn has_entries(path: &Path) -> bool {
    match fs::read_dir(path) {
        Ok(mut entries) => entries.next().is_some(),
        Err(_) => false,
    }
}

/// Remove `path` and everything below it; absent paths are fine
pub fn remove_recursive(path: &Path) -> Result<()> {
    if !path.exists() {
        return Ok(());
    }

    let removed = if path.is_dir() {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    };
    removed.map_err(|e| ForgeError::filesystem("remove", path, e))?;
    tracing::debug!("removed {}", path.display());
    Ok(())
}

/// Ensure a directory exists
pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.is_dir() {
        fs::create_dir_all(path).map_err(|e| ForgeError::filesystem("create", path, e))?;
    }
    Ok(())
}
