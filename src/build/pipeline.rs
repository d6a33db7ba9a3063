//! Build pipeline
//!
//! generate → build/release → package → run. Every step decides from the
//! filesystem whether its prerequisites still need to run: a present build
//! directory means the project is generated, nothing is hashed or compared.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use super::archive::{self, ArchiveWriter};
use super::cmake::{host_parallelism, BuildType, CMakeConfig};
use super::gitignore::{self, IGNORE_FILE};
use crate::config::{ForgeConfig, Platform};
use crate::dependency::DependencyManager;
use crate::error::ForgeError;
use crate::exec::subprocess::containing_dir;
use crate::exec::{run_checked, Invocation, ProcessRunner};
use crate::utils::{paths, terminal};
use crate::utils::tools::{self, ToolLocator};

/// Everything a pipeline step needs, borrowed for the duration of one command
pub struct Pipeline<'a> {
    config: &'a ForgeConfig,
    platform: Platform,
    project_root: PathBuf,
    runner: &'a dyn ProcessRunner,
    locator: &'a dyn ToolLocator,
    jobs: usize,
    verbose: bool,
}

impl<'a> Pipeline<'a> {
    pub fn new(
        config: &'a ForgeConfig,
        platform: Platform,
        project_root: impl Into<PathBuf>,
        runner: &'a dyn ProcessRunner,
        locator: &'a dyn ToolLocator,
    ) -> Self {
        Self {
            config,
            platform,
            project_root: project_root.into(),
            runner,
            locator,
            jobs: host_parallelism(),
            verbose: false,
        }
    }

    /// Override the parallelism hint passed to the build
    #[cfg(test)]
    pub fn with_jobs(mut self, jobs: usize) -> Self {
        self.jobs = jobs;
        self
    }

    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Tools the environment gate and `check` look for
    pub fn required_tools(&self) -> Vec<String> {
        self.config.required_tools(self.platform)
    }

    fn path(&self, relative: &Path) -> PathBuf {
        self.project_root.join(relative)
    }

    fn dependencies(&self) -> DependencyManager<'_> {
        DependencyManager::new(&self.project_root, self.runner)
    }

    fn cmake(&self) -> CMakeConfig {
        CMakeConfig::new(&self.project_root, &self.config.build_dir)
            .generator(self.config.generator(self.platform))
            .generator_args(self.platform.generator_args().iter().copied())
            .jobs(self.jobs)
    }

    /// True once CMake has written the build directory
    pub fn is_generated(&self) -> bool {
        self.path(&self.config.build_dir).exists()
    }

    /// Print the tool table and fail if anything is missing
    pub fn check(&self) -> Result<()> {
        tools::require_tools(self.locator, &self.required_tools(), true)
    }

    /// Clone or update every library
    pub fn download(&self) -> Result<()> {
        self.dependencies().sync_all(&self.config.dependencies)?;
        Ok(())
    }

    /// Patch .gitignore, fetch libraries and configure the CMake project
    pub fn generate(&self) -> Result<()> {
        if self.config.patch_gitignore {
            let lines = [&self.config.build_dir, &self.config.releases_dir]
                .iter()
                .map(|dir| dir.to_string_lossy().replace('\\', "/"))
                .collect::<Vec<_>>();
            gitignore::patch_ignore_file(&self.path(Path::new(IGNORE_FILE)), &lines)?;
        }

        self.download()?;

        println!("Generating cmake project...");
        self.cmake().configure(self.runner)
    }

    /// Compile with the given configuration, generating first if needed
    pub fn compile(&self, build_type: BuildType) -> Result<()> {
        if !self.is_generated() {
            tracing::info!("{} missing, generating first", self.config.build_dir.display());
            self.generate()?;
        }

        println!("Building cmake project...");
        self.cmake()
            .build_type(build_type)
            .verbose(self.verbose)
            .build(self.runner)
    }

    pub fn build(&self) -> Result<()> {
        self.compile(BuildType::Debug)
    }

    pub fn release(&self) -> Result<()> {
        self.compile(BuildType::Release)
    }

    /// Absolute path of the executable for `build_type`
    pub fn executable(&self, build_type: BuildType) -> PathBuf {
        self.path(&self.config.executable_path(build_type, self.platform))
    }

    /// Release build, then zip the executable and the configured includes
    pub fn package(&self) -> Result<PathBuf> {
        println!("Compiling and packaging release build!");
        self.release()?;

        paths::ensure_dir(&self.path(&self.config.releases_dir))?;

        let mut writer = ArchiveWriter::new();

        let executable = self.executable(BuildType::Release);
        let file_name = executable
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .context("Executable path has no file name")?;
        writer.add_file(&executable, &file_name)?;

        for include in &self.config.includes {
            writer.add_path(&self.path(&include.source), &include.dest_name())?;
        }

        tracing::debug!("archive holds {} files", writer.len());
        let archive_path = self.path(&self.config.archive_path());
        writer.save(&archive_path)?;
        terminal::print_success(&format!("Wrote release archive {}", archive_path.display()));

        if self.verbose {
            for (name, size) in archive::list_entries(&archive_path)? {
                println!("  {} ({})", name, archive::format_size(size));
            }
        }
        Ok(archive_path)
    }

    /// Build, then start the executable from its own directory
    pub fn run(&self, build_type: BuildType) -> Result<()> {
        self.compile(build_type)?;

        let executable = self.executable(build_type);
        if !executable.exists() {
            return Err(ForgeError::ExecutableMissing { path: executable }.into());
        }

        let cwd = containing_dir(&executable);
        run_checked(self.runner, &Invocation::new(&executable, cwd))
    }

    /// Remove the build directory
    pub fn clean(&self) -> Result<()> {
        paths::remove_recursive(&self.path(&self.config.build_dir))
    }

    /// Remove every library checkout and the build directory
    pub fn wipe(&self) -> Result<()> {
        self.dependencies().wipe_all(&self.config.dependencies)?;
        println!("Wiping build folder!");
        self.clean()
    }
}
