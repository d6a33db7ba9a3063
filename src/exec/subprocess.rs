//! Synchronous subprocess execution
//!
//! Commands are structured invocations (program, argument list, working
//! directory), never shell strings. Children inherit the terminal and are
//! waited on without a timeout.

use std::ffi::{OsStr, OsString};
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use console::style;

use crate::error::ForgeError;

/// A program to run, with its arguments and working directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: OsString,
    pub args: Vec<OsString>,
    pub cwd: PathBuf,
}

impl Invocation {
    /// Create an invocation of `program` running in `cwd`
    pub fn new(program: impl AsRef<OsStr>, cwd: impl Into<PathBuf>) -> Self {
        Self {
            program: program.as_ref().to_os_string(),
            args: Vec::new(),
            cwd: cwd.into(),
        }
    }

    /// Append an argument
    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_os_string());
        self
    }

    /// Append several arguments
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args
            .extend(args.into_iter().map(|a| a.as_ref().to_os_string()));
        self
    }

    /// Program name as text
    pub fn program_name(&self) -> String {
        self.program.to_string_lossy().into_owned()
    }

    /// Arguments as text
    pub fn args_lossy(&self) -> Vec<String> {
        self.args
            .iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect()
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program.to_string_lossy())?;
        for arg in self.args_lossy() {
            if arg.contains(' ') {
                write!(f, " \"{}\"", arg)?;
            } else {
                write!(f, " {}", arg)?;
            }
        }
        Ok(())
    }
}

/// Result of a subprocess execution
#[derive(Debug, Clone)]
pub struct CommandResult {
    /// Whether the command succeeded (exit code 0)
    pub success: bool,

    /// Process exit code, `None` when killed by a signal
    pub exit_code: Option<i32>,

    /// Execution duration
    pub duration: Duration,
}

impl CommandResult {
    /// Create a CommandResult from an exit status
    pub fn from_status(status: ExitStatus, duration: Duration) -> Self {
        Self {
            success: status.success(),
            exit_code: status.code(),
            duration,
        }
    }

    /// Create a CommandResult from a bare exit code
    #[cfg(test)]
    pub fn from_code(code: i32) -> Self {
        Self {
            success: code == 0,
            exit_code: Some(code),
            duration: Duration::ZERO,
        }
    }
}

/// Anything that can execute an invocation and report how it exited
pub trait ProcessRunner {
    fn run(&self, invocation: &Invocation) -> Result<CommandResult>;
}

/// Runs invocations as real child processes
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl ProcessRunner for SystemRunner {
    fn run(&self, invocation: &Invocation) -> Result<CommandResult> {
        let start = Instant::now();

        let status = Command::new(&invocation.program)
            .args(&invocation.args)
            .current_dir(&invocation.cwd)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .with_context(|| format!("Failed to execute {}", invocation.program_name()))?;

        let result = CommandResult::from_status(status, start.elapsed());
        tracing::debug!(
            program = %invocation.program_name(),
            code = ?result.exit_code,
            elapsed_ms = result.duration.as_millis() as u64,
            "process exited"
        );
        Ok(result)
    }
}

/// Echo and run an invocation, turning a non-zero exit into an error
pub fn run_checked(runner: &dyn ProcessRunner, invocation: &Invocation) -> Result<()> {
    println!("{} {}", style(">>").cyan().bold(), invocation);
    tracing::debug!(cwd = %invocation.cwd.display(), "running {}", invocation);

    let result = runner.run(invocation)?;
    if !result.success {
        return Err(ForgeError::ProcessFailed {
            program: invocation.program_name(),
            code: result.exit_code,
        }
        .into());
    }
    Ok(())
}

/// Working directory for running `path`: its parent, or `.` for bare names
pub fn containing_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_quotes_spaced_args() {
        let inv = Invocation::new("cmake", ".")
            .args(["-S", ".", "-G"])
            .arg("CodeBlocks - Unix Makefiles");
        assert_eq!(inv.to_string(), "cmake -S . -G \"CodeBlocks - Unix Makefiles\"");
    }

    #[test]
    fn test_run_checked_maps_failure() {
        struct Exit(i32);
        impl ProcessRunner for Exit {
            fn run(&self, _: &Invocation) -> Result<CommandResult> {
                Ok(CommandResult::from_code(self.0))
            }
        }

        let inv = Invocation::new("git", ".").arg("merge");
        assert!(run_checked(&Exit(0), &inv).is_ok());

        let err = run_checked(&Exit(128), &inv).unwrap_err();
        match err.downcast_ref::<ForgeError>() {
            Some(ForgeError::ProcessFailed { program, code }) => {
                assert_eq!(program, "git");
                assert_eq!(*code, Some(128));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_system_runner_reports_exit_code() {
        let temp = tempfile::tempdir().unwrap();
        let ok = SystemRunner
            .run(&Invocation::new("sh", temp.path()).args(["-c", "exit 0"]))
            .unwrap();
        assert!(ok.success);

        let failed = SystemRunner
            .run(&Invocation::new("sh", temp.path()).args(["-c", "exit 3"]))
            .unwrap();
        assert!(!failed.success);
        assert_eq!(failed.exit_code, Some(3));
    }

    #[test]
    fn test_system_runner_missing_program_is_error() {
        let temp = tempfile::tempdir().unwrap();
        let inv = Invocation::new("forge-definitely-not-a-program", temp.path());
        assert!(SystemRunner.run(&inv).is_err());
    }

    #[test]
    fn test_containing_dir() {
        assert_eq!(
            containing_dir(Path::new("build/Debug/app")),
            PathBuf::from("build/Debug")
        );
        assert_eq!(containing_dir(Path::new("app")), PathBuf::from("."));
    }
}
