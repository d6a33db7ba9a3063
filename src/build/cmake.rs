//! CMake configuration and execution
//!
//! This module builds the configure and build invocations and hands them to a
//! `ProcessRunner`. Paths are passed relative to the project root, which is the
//! working directory of every CMake call.

use std::fmt;
use std::path::PathBuf;

use anyhow::Result;

use crate::exec::{run_checked, Invocation, ProcessRunner};

/// CMake build configuration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BuildType {
    #[default]
    Debug,
    Release,
}

impl fmt::Display for BuildType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildType::Debug => write!(f, "Debug"),
            BuildType::Release => write!(f, "Release"),
        }
    }
}

/// CMake configuration builder
#[derive(Debug, Clone, Default)]
pub struct CMakeConfig {
    /// Working directory of every CMake call
    project_root: PathBuf,
    /// Build directory, relative to the project root
    build_dir: PathBuf,
    /// Build type
    build_type: BuildType,
    /// Generator (e.g. "Unix Makefiles")
    generator: Option<String>,
    /// Extra arguments after the generator (e.g. "-A Win32")
    generator_args: Vec<String>,
    /// Number of parallel jobs
    jobs: Option<usize>,
    /// Verbose output
    verbose: bool,
}

impl CMakeConfig {
    /// Create a new CMake configuration
    pub fn new(project_root: impl Into<PathBuf>, build_dir: impl Into<PathBuf>) -> Self {
        Self {
            project_root: project_root.into(),
            build_dir: build_dir.into(),
            ..Default::default()
        }
    }

    /// Set the build type
    pub fn build_type(mut self, build_type: BuildType) -> Self {
        self.build_type = build_type;
        self
    }

    /// Set the generator
    pub fn generator(mut self, generator: impl Into<String>) -> Self {
        self.generator = Some(generator.into());
        self
    }

    /// Set arguments that follow the generator
    pub fn generator_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.generator_args = args.into_iter().map(Into::into).collect();
        self
    }

    /// Set number of parallel jobs; zero leaves the choice to the build tool
    pub fn jobs(mut self, jobs: usize) -> Self {
        self.jobs = if jobs > 0 { Some(jobs) } else { None };
        self
    }

    /// Enable verbose output
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// `cmake -S . -B <build> -G <generator> ...`
    pub fn configure_invocation(&self) -> Invocation {
        let mut inv = Invocation::new("cmake", &self.project_root)
            .args(["-S", "."])
            .arg("-B")
            .arg(&self.build_dir);

        if let Some(generator) = &self.generator {
            inv = inv.arg("-G").arg(generator);
        }

        inv.args(&self.generator_args)
    }

    /// `cmake --build <build> [-j N] --config <type>`
    pub fn build_invocation(&self) -> Invocation {
        let mut inv = Invocation::new("cmake", &self.project_root)
            .arg("--build")
            .arg(&self.build_dir);

        if let Some(jobs) = self.jobs {
            inv = inv.arg("-j").arg(jobs.to_string());
        }

        inv = inv.arg("--config").arg(self.build_type.to_string());

        if self.verbose {
            inv = inv.arg("--verbose");
        }
        inv
    }

    /// Run CMake configure step
    pub fn configure(&self, runner: &dyn ProcessRunner) -> Result<()> {
        run_checked(runner, &self.configure_invocation())
    }

    /// Run CMake build step
    pub fn build(&self, runner: &dyn ProcessRunner) -> Result<()> {
        run_checked(runner, &self.build_invocation())
    }
}

/// Worker count reported by the host, or 0 if unknown
pub fn host_parallelism() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(0)
}
