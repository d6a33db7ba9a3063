//! Error types and helpers for user-friendly error messages
//!
//! Every pipeline step returns `anyhow::Result<()>`. The variants here are the
//! failures the front end knows how to explain with a hint.

use std::path::PathBuf;

use thiserror::Error;

use crate::utils::terminal;

/// Failures surfaced by forge
#[derive(Error, Debug)]
pub enum ForgeError {
    /// No build description in the current or parent directory
    #[error("Didn't find CMakeLists.txt in {} or its parent", .searched.display())]
    ProjectNotFound { searched: PathBuf },

    /// One or more required tools are not on PATH
    #[error("Missing required tools: {}", .tools.join(", "))]
    MissingTools { tools: Vec<String> },

    /// An external process exited non-zero
    #[error("{program} exited with {}", exit_label(.code))]
    ProcessFailed { program: String, code: Option<i32> },

    /// Create/delete/read failure
    #[error("Failed to {action} {}", .path.display())]
    Filesystem {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Archive assembly or flush failure
    #[error("Failed to archive {}: {message}", .path.display())]
    Archive { path: PathBuf, message: String },

    /// The run target was never built
    #[error("Executable {} does not exist!", .path.display())]
    ExecutableMissing { path: PathBuf },

    /// Dispatcher received an empty token
    #[error("No command given!")]
    NoCommand,

    /// Dispatcher received an unregistered token
    #[error("Invalid option: {token}")]
    InvalidCommand { token: String },

    /// Invalid Forge.toml
    #[error("Configuration error: {message}")]
    Config { message: String, hint: Option<String> },
}

fn exit_label(code: &Option<i32>) -> String {
    match *code {
        Some(code) => format!("exit code {}", code),
        None => "no exit code (terminated by signal)".to_string(),
    }
}

impl ForgeError {
    /// Create a configuration error
    pub fn config_error(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            hint: None,
        }
    }

    /// Create a configuration error with a hint
    pub fn config_error_with_hint(message: impl Into<String>, hint: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            hint: Some(hint.into()),
        }
    }

    /// Create a filesystem error
    pub fn filesystem(action: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Filesystem {
            action,
            path: path.into(),
            source,
        }
    }

    /// Hint shown under the error, if any
    pub fn hint(&self) -> Option<String> {
        match self {
            ForgeError::ProjectNotFound { .. } => Some(hints::project_not_found().to_string()),
            ForgeError::MissingTools { tools } => Some(
                tools
                    .iter()
                    .map(|tool| format!("• {}: {}", tool, hints::for_tool(tool)))
                    .collect::<Vec<_>>()
                    .join("\n"),
            ),
            ForgeError::Filesystem { .. } => {
                Some("You'll need to manually remove or fix the folder for now.".to_string())
            }
            ForgeError::InvalidCommand { .. } | ForgeError::NoCommand => {
                Some("Run: forge help".to_string())
            }
            ForgeError::Config { hint, .. } => hint.clone(),
            _ => None,
        }
    }

    /// Display error with formatting and hints
    pub fn display_with_hints(&self) {
        use console::style;

        eprintln!();
        terminal::print_error(&self.to_string());

        if let ForgeError::Filesystem { source, .. } = self {
            eprintln!("  {}", source);
        }

        if let Some(hint) = self.hint() {
            eprintln!("\n{} {}", style("HINT:").yellow().bold(), hint);
        }

        eprintln!();
    }
}

/// Print any error, using hints when it is a `ForgeError`
pub fn report(err: &anyhow::Error) {
    match err.downcast_ref::<ForgeError>() {
        Some(forge_err) => forge_err.display_with_hints(),
        None => {
            eprintln!();
            terminal::print_error(&format!("{:#}", err));
            eprintln!();
        }
    }
}

/// Common error hints
pub mod hints {
    /// Get hint for missing CMake
    pub fn cmake() -> &'static str {
        "Install CMake from https://cmake.org/ or use your package manager \
         (brew install cmake, sudo apt install cmake, winget install Kitware.CMake)"
    }

    /// Get hint for missing Git
    pub fn git() -> &'static str {
        "Install Git from https://git-scm.com/ or use your package manager \
         (brew install git, sudo apt install git, winget install Git.Git)"
    }

    /// Get hint for a missing C++ compiler
    pub fn compiler() -> &'static str {
        "Install a C++ compiler (g++ via build-essential, or Visual Studio with \
         'Desktop development with C++' for cl)"
    }

    /// Hint for an arbitrary tool
    pub fn for_tool(tool: &str) -> &'static str {
        match tool {
            "cmake" => cmake(),
            "git" => git(),
            "g++" | "cl" | "clang++" => compiler(),
            _ => "Install this tool and ensure it's in your PATH",
        }
    }

    /// Get hint for CMakeLists.txt not found
    pub fn project_not_found() -> &'static str {
        "Run forge from the project root (the directory holding CMakeLists.txt) \
         or from one of its direct subdirectories."
    }
}
