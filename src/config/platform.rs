//! Host platform policy
//!
//! The two supported hosts differ only in a handful of constants, so they are
//! resolved once into a `Platform` value instead of being scattered through
//! `cfg!` checks.

use std::fmt;

/// Supported host families
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Posix,
    Windows,
}

impl Platform {
    /// Platform of the running host
    pub fn current() -> Self {
        if cfg!(target_os = "windows") {
            Platform::Windows
        } else {
            Platform::Posix
        }
    }

    /// Separator between entries of the PATH variable
    pub fn path_separator(self) -> char {
        match self {
            Platform::Posix => ':',
            Platform::Windows => ';',
        }
    }

    /// Default CMake generator
    pub fn cmake_generator(self) -> &'static str {
        match self {
            Platform::Posix => "CodeBlocks - Unix Makefiles",
            Platform::Windows => "Visual Studio 17 2022",
        }
    }

    /// Arguments appended to the configure step after the generator
    pub fn generator_args(self) -> &'static [&'static str] {
        match self {
            Platform::Posix => &[],
            Platform::Windows => &["-A", "Win32"],
        }
    }

    /// Suffix of built executables
    pub fn executable_suffix(self) -> &'static str {
        match self {
            Platform::Posix => "",
            Platform::Windows => ".exe",
        }
    }

    /// C++ compiler expected on PATH
    pub fn compiler(self) -> &'static str {
        match self {
            Platform::Posix => "g++",
            Platform::Windows => "cl",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Platform::Posix => write!(f, "posix"),
            Platform::Windows => write!(f, "windows"),
        }
    }
}
