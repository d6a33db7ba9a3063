//! forge - a minimal CMake project orchestrator
//!
//! Fetches library checkouts with git, generates and builds the CMake project,
//! runs the resulting executable and packages it into a release zip.
//!
//! ## Architecture
//!
//! ```text
//! cli → commands (registry + dispatch) → build/pipeline → dependency, cmake, archive
//!                                                        ↓
//!                                              exec (git / cmake processes)
//! ```

mod build;
mod cli;
mod commands;
mod config;
mod dependency;
mod error;
mod exec;
mod utils;

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::Cli;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    match cli.execute() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error::report(&err);
            ExitCode::FAILURE
        }
    }
}

/// Initialize tracing with appropriate verbosity
fn init_tracing(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("warn"),
            1 => EnvFilter::new("debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}
