//! Tool detection on PATH
//!
//! A tool counts as available when some directory on PATH holds a direct
//! entry whose file stem equals the tool name, so `cmake` matches both
//! `cmake` and `cmake.exe`.

use std::ffi::{OsStr, OsString};
use std::path::Path;

use anyhow::Result;
use walkdir::WalkDir;

use crate::config::Platform;
use crate::error::ForgeError;
use crate::utils::terminal;

pub const FOUND: &str = "FOUND";
pub const MISSING: &str = "MISSING";

/// Answers whether an executable is reachable
pub trait ToolLocator {
    fn is_available(&self, name: &str) -> bool;
}

/// Scans the directories of a PATH-style variable
#[derive(Debug, Clone)]
pub struct PathLocator {
    path_var: Option<OsString>,
    separator: u8,
}

impl PathLocator {
    /// Locator over the process's PATH
    pub fn from_env(platform: Platform) -> Self {
        Self::new(std::env::var_os("PATH"), platform)
    }

    /// Locator over an explicit PATH value
    pub fn new(path_var: Option<OsString>, platform: Platform) -> Self {
        Self {
            path_var,
            separator: platform.path_separator() as u8,
        }
    }

    fn dir_contains(dir: &Path, name: &str) -> bool {
        WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .into_iter()
            .filter_map(|e| e.ok())
            .any(|entry| {
                entry
                    .path()
                    .file_stem()
                    .map(|stem| stem == OsStr::new(name))
                    .unwrap_or(false)
            })
    }
}

impl ToolLocator for PathLocator {
    fn is_available(&self, name: &str) -> bool {
        let Some(path_var) = &self.path_var else {
            tracing::warn!("Could not determine PATH variable");
            return false;
        };

        split_path_var(path_var, self.separator)
            .map(Path::new)
            .filter(|dir| dir.is_dir())
            .any(|dir| Self::dir_contains(dir, name))
    }
}

/// Non-empty entries of a PATH-style value, without any lossy conversion
fn split_path_var(path_var: &OsStr, separator: u8) -> impl Iterator<Item = &OsStr> {
    path_var
        .as_encoded_bytes()
        .split(move |byte| *byte == separator)
        .filter(|piece| !piece.is_empty())
        // SAFETY: the separator is ASCII, so every piece starts and ends on a
        // boundary of the original encoded string.
        .map(|piece| unsafe { OsStr::from_encoded_bytes_unchecked(piece) })
}

/// Availability of each required tool, in configuration order
#[derive(Debug, Clone)]
pub struct ToolReport {
    pub tools: Vec<(String, bool)>,
}

impl ToolReport {
    pub fn all_found(&self) -> bool {
        self.tools.iter().all(|(_, found)| *found)
    }

    pub fn missing(&self) -> Vec<String> {
        self.tools
            .iter()
            .filter(|(_, found)| !found)
            .map(|(name, _)| name.clone())
            .collect()
    }

    /// Rows for the FOUND/MISSING table
    pub fn rows(&self) -> Vec<(String, &'static str)> {
        self.tools
            .iter()
            .map(|(name, found)| (name.clone(), if *found { FOUND } else { MISSING }))
            .collect()
    }
}

/// Check multiple tools and return results
pub fn check_tools(locator: &dyn ToolLocator, tools: &[String]) -> ToolReport {
    ToolReport {
        tools: tools
            .iter()
            .map(|name| (name.clone(), locator.is_available(name)))
            .collect(),
    }
}

/// Require every tool, printing the table when something is missing or `verbose`
pub fn require_tools(locator: &dyn ToolLocator, tools: &[String], verbose: bool) -> Result<()> {
    let report = check_tools(locator, tools);

    if !report.all_found() || verbose {
        terminal::print_table(&report.rows());
    }

    if !report.all_found() {
        println!("You are missing required software!");
        return Err(ForgeError::MissingTools {
            tools: report.missing(),
        }
        .into());
    }

    Ok(())
}
