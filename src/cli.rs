//! CLI argument parsing using clap derive macros

use anyhow::Result;
use clap::{ArgAction, Parser};

use crate::build::Pipeline;
use crate::commands::{CommandRegistry, Dispatcher};
use crate::config::{ForgeConfig, Platform, CONFIG_FILE};
use crate::exec::SystemRunner;
use crate::utils::paths;
use crate::utils::terminal;
use crate::utils::tools::{self, PathLocator};

/// The command that bypasses the environment gate
const HELP: &str = "help";

/// forge - fetch libraries, build, run and package a CMake project
///
/// Run `forge help` for the list of commands.
#[derive(Parser, Debug)]
#[command(name = "forge")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Command to run (check, download, gen, build, release, package, run, runrel, clean, wipe, help)
    #[arg(value_name = "COMMAND")]
    pub command: Option<String>,

    /// Enable verbose output (-vv for trace logging)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        if self.no_color {
            console::set_colors_enabled(false);
            console::set_colors_enabled_stderr(false);
        }

        let registry = CommandRegistry::new();
        let token = self.command.unwrap_or_default();

        if token == HELP {
            registry.print_help();
            return Ok(());
        }

        // Environment gate: project file first, then tools
        let project_root = paths::find_project_root()?;
        let platform = Platform::current();
        let config = ForgeConfig::load(&project_root)?;
        let locator = PathLocator::from_env(platform);
        tools::require_tools(&locator, &config.required_tools(platform), false)?;

        let verbose = self.verbose > 0;
        if verbose {
            terminal::print_info(&format!(
                "project {} ({} host, {} {})",
                project_root.display(),
                platform,
                CONFIG_FILE,
                if project_root.join(CONFIG_FILE).exists() {
                    "loaded"
                } else {
                    "not found, using defaults"
                }
            ));
        }

        let runner = SystemRunner;
        let pipeline = Pipeline::new(&config, platform, project_root, &runner, &locator)
            .verbose(verbose);
        Dispatcher::new(&registry, &pipeline).dispatch(&token)
    }
}
