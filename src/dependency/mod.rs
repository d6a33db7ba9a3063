//! Library checkouts
//!
//! Each configured dependency is a git checkout under the project root. A
//! directory with content is updated in place with fetch + merge; an empty
//! directory is treated as a failed earlier clone and replaced.
//!
//! The merge runs unconditionally after the fetch, so a checkout with local
//! commits that diverge from upstream makes the sync fail.

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::config::DependencySpec;
use crate::exec::{run_checked, Invocation, ProcessRunner};
use crate::utils::{paths, terminal};

/// What the filesystem says about a checkout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutState {
    /// Directory does not exist
    Absent,
    /// Directory exists but has no entries
    Empty,
    /// Directory has at least one entry
    Present,
}

/// What `sync` did to a checkout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncAction {
    Updated,
    Cloned,
    Recloned,
}

/// Fetches and updates library checkouts
pub struct DependencyManager<'a> {
    project_root: &'a Path,
    runner: &'a dyn ProcessRunner,
}

impl<'a> DependencyManager<'a> {
    pub fn new(project_root: &'a Path, runner: &'a dyn ProcessRunner) -> Self {
        Self {
            project_root,
            runner,
        }
    }

    fn checkout_dir(&self, spec: &DependencySpec) -> PathBuf {
        self.project_root.join(&spec.path)
    }

    /// Inspect a checkout
    pub fn state(&self, spec: &DependencySpec) -> CheckoutState {
        let dir = self.checkout_dir(spec);
        if !dir.exists() {
            CheckoutState::Absent
        } else if paths::has_entries(&dir) {
            CheckoutState::Present
        } else {
            CheckoutState::Empty
        }
    }

    /// Bring every checkout up to date, stopping at the first failure
    pub fn sync_all(&self, specs: &[DependencySpec]) -> Result<Vec<SyncAction>> {
        println!("Checking if libraries are present...");
        specs.iter().map(|spec| self.sync(spec)).collect()
    }

    /// Clone or update one checkout
    pub fn sync(&self, spec: &DependencySpec) -> Result<SyncAction> {
        let dir = self.checkout_dir(spec);

        match self.state(spec) {
            CheckoutState::Present => {
                println!("Updating repo {}", spec.path.display());
                run_checked(
                    self.runner,
                    &Invocation::new("git", &dir).args(["fetch", "origin", "--prune"]),
                )?;
                run_checked(self.runner, &Invocation::new("git", &dir).arg("merge"))?;
                Ok(SyncAction::Updated)
            }
            state => {
                if state == CheckoutState::Empty {
                    terminal::print_warning(&format!(
                        "Incomplete repo found at {}! Wiping it...",
                        spec.path.display()
                    ));
                    paths::remove_recursive(&dir)?;
                }

                println!("Downloading repo {}", spec.url);
                run_checked(
                    self.runner,
                    &Invocation::new("git", self.project_root)
                        .args(["clone", "--recursive"])
                        .arg(&spec.url)
                        .arg(&spec.path),
                )?;

                Ok(if state == CheckoutState::Empty {
                    SyncAction::Recloned
                } else {
                    SyncAction::Cloned
                })
            }
        }
    }

    /// Remove every checkout, stopping at the first failure
    pub fn wipe_all(&self, specs: &[DependencySpec]) -> Result<()> {
        println!("Wiping libraries!");
        for spec in specs {
            println!(".. {}", spec.path.display());
            paths::remove_recursive(&self.checkout_dir(spec))?;
        }
        Ok(())
    }
}
