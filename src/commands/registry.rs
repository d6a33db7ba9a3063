//! Command table

use crate::utils::terminal;

/// What a command does when dispatched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Check,
    Download,
    Generate,
    Build,
    Release,
    Package,
    Run,
    RunRelease,
    Clean,
    Wipe,
    Help,
}

/// A named, zero-argument command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandEntry {
    pub name: &'static str,
    pub description: &'static str,
    pub action: Action,
}

const fn entry(name: &'static str, description: &'static str, action: Action) -> CommandEntry {
    CommandEntry {
        name,
        description,
        action,
    }
}

const COMMANDS: &[CommandEntry] = &[
    entry("check", "Check if required programs are installed", Action::Check),
    entry(
        "download",
        "Clone required libraries from Github or merge new commits",
        Action::Download,
    ),
    entry("gen", "Generate CMake project files", Action::Generate),
    entry("generate", "Generate CMake project files (alias)", Action::Generate),
    entry("build", "Build project (for debugging)", Action::Build),
    entry("release", "Build optimized executable", Action::Release),
    entry("package", "Build and package optimized executable", Action::Package),
    entry("run", "Run executable (debug)", Action::Run),
    entry("runrel", "Run executable (release)", Action::RunRelease),
    entry("clean", "Remove build folder", Action::Clean),
    entry("wipe", "clean + remove downloaded libraries", Action::Wipe),
    entry("help", "Show this screen", Action::Help),
];

/// Registry of every command, looked up by exact name
#[derive(Debug, Clone)]
pub struct CommandRegistry {
    entries: Vec<CommandEntry>,
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self {
            entries: COMMANDS.to_vec(),
        }
    }

    pub fn entries(&self) -> &[CommandEntry] {
        &self.entries
    }

    /// Exact, case-sensitive lookup
    pub fn find(&self, name: &str) -> Option<&CommandEntry> {
        self.entries().iter().find(|entry| entry.name == name)
    }

    /// (name, description) rows for the help table
    pub fn help_rows(&self) -> Vec<(&'static str, &'static str)> {
        self.entries()
            .iter()
            .map(|entry| (entry.name, entry.description))
            .collect()
    }

    /// Print the command table
    pub fn print_help(&self) {
        terminal::print_table(&self.help_rows());
    }
}
