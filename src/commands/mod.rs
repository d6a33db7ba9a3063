//! Command dispatch
//!
//! A token is matched exactly against the registry and its action runs
//! against the pipeline. An unknown token prints the command table; the
//! error itself is reported once by the front end. The dispatcher only looks at whether the action
//! succeeded.

mod registry;

use anyhow::Result;
use console::style;

use crate::build::{BuildType, Pipeline};
use crate::error::ForgeError;

pub use registry::{Action, CommandRegistry};

/// Maps command tokens to pipeline steps
pub struct Dispatcher<'a> {
    registry: &'a CommandRegistry,
    pipeline: &'a Pipeline<'a>,
}

impl<'a> Dispatcher<'a> {
    pub fn new(registry: &'a CommandRegistry, pipeline: &'a Pipeline<'a>) -> Self {
        Self { registry, pipeline }
    }

    /// Run the command named by `token`
    pub fn dispatch(&self, token: &str) -> Result<()> {
        if token.is_empty() {
            return Err(ForgeError::NoCommand.into());
        }

        let Some(entry) = self.registry.find(token) else {
            self.registry.print_help();
            return Err(ForgeError::InvalidCommand {
                token: token.to_string(),
            }
            .into());
        };

        tracing::debug!(command = entry.name, action = ?entry.action, "dispatching");
        match self.execute(entry.action) {
            Ok(()) => {
                println!("{}", style("Done...").green());
                Ok(())
            }
            Err(err) => {
                eprintln!("{}", style("Failed.").red());
                Err(err)
            }
        }
    }

    /// Run an action directly
    pub fn execute(&self, action: Action) -> Result<()> {
        let pipeline = self.pipeline;
        match action {
            Action::Check => pipeline.check(),
            Action::Download => pipeline.download(),
            Action::Generate => pipeline.generate(),
            Action::Build => pipeline.build(),
            Action::Release => pipeline.release(),
            Action::Package => pipeline.package().map(|_| ()),
            Action::Run => pipeline.run(BuildType::Debug),
            Action::RunRelease => pipeline.run(BuildType::Release),
            Action::Clean => pipeline.clean(),
            Action::Wipe => pipeline.wipe(),
            Action::Help => {
                self.registry.print_help();
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ForgeConfig, Platform};
    use crate::exec::fake::FakeRunner;
    use crate::utils::tools::ToolLocator;
    use std::fs;

    struct Only(&'static [&'static str]);

    impl ToolLocator for Only {
        fn is_available(&self, name: &str) -> bool {
            self.0.iter().any(|tool| *tool == name)
        }
    }

    fn config() -> ForgeConfig {
        ForgeConfig {
            dependencies: vec![],
            ..ForgeConfig::default()
        }
    }

    fn forge_err(err: &anyhow::Error) -> &ForgeError {
        err.downcast_ref::<ForgeError>().expect("ForgeError")
    }

    #[test]
    fn test_empty_token_fails_without_running_anything() {
        let temp = tempfile::tempdir().unwrap();
        let config = config();
        let runner = FakeRunner::succeeding();
        let locator = Only(&[]);
        let pipeline = Pipeline::new(&config, Platform::Posix, temp.path(), &runner, &locator);
        let registry = CommandRegistry::new();

        let err = Dispatcher::new(&registry, &pipeline).dispatch("").unwrap_err();
        assert!(matches!(forge_err(&err), ForgeError::NoCommand));
        assert!(runner.calls().is_empty());
    }

    #[test]
    fn test_unknown_token_is_rejected() {
        let temp = tempfile::tempdir().unwrap();
        let config = config();
        let runner = FakeRunner::succeeding();
        let locator = Only(&[]);
        let pipeline = Pipeline::new(&config, Platform::Posix, temp.path(), &runner, &locator);
        let registry = CommandRegistry::new();

        let err = Dispatcher::new(&registry, &pipeline)
            .dispatch("deploy")
            .unwrap_err();
        match forge_err(&err) {
            ForgeError::InvalidCommand { token } => assert_eq!(token, "deploy"),
            other => panic!("unexpected error: {:?}", other),
        }
        assert!(runner.calls().is_empty());
    }

    #[test]
    fn test_clean_through_dispatch() {
        let temp = tempfile::tempdir().unwrap();
        fs::create_dir_all(temp.path().join("build/Debug")).unwrap();
        let config = config();
        let runner = FakeRunner::succeeding();
        let locator = Only(&[]);
        let pipeline = Pipeline::new(&config, Platform::Posix, temp.path(), &runner, &locator);
        let registry = CommandRegistry::new();

        Dispatcher::new(&registry, &pipeline).dispatch("clean").unwrap();
        assert!(!temp.path().join("build").exists());
    }

    #[test]
    fn test_check_reports_missing_tool() {
        let temp = tempfile::tempdir().unwrap();
        let config = ForgeConfig {
            tools: Some(vec!["git".to_string(), "cmake".to_string()]),
            ..config()
        };
        let runner = FakeRunner::succeeding();
        let locator = Only(&["git"]);
        let pipeline = Pipeline::new(&config, Platform::Posix, temp.path(), &runner, &locator);
        let registry = CommandRegistry::new();

        let err = Dispatcher::new(&registry, &pipeline).dispatch("check").unwrap_err();
        match forge_err(&err) {
            ForgeError::MissingTools { tools } => assert_eq!(tools, &vec!["cmake".to_string()]),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_failed_step_propagates() {
        let temp = tempfile::tempdir().unwrap();
        fs::create_dir(temp.path().join("build")).unwrap();
        let config = config();
        let runner = FakeRunner::with(|_| 1);
        let locator = Only(&[]);
        let pipeline = Pipeline::new(&config, Platform::Posix, temp.path(), &runner, &locator);
        let registry = CommandRegistry::new();

        let err = Dispatcher::new(&registry, &pipeline).dispatch("release").unwrap_err();
        assert!(matches!(forge_err(&err), ForgeError::ProcessFailed { .. }));
    }

    #[test]
    fn test_aliases_dispatch_the_same_step() {
        let temp = tempfile::tempdir().unwrap();
        let config = config();
        let runner = FakeRunner::succeeding();
        let locator = Only(&[]);
        let pipeline = Pipeline::new(&config, Platform::Posix, temp.path(), &runner, &locator);
        let registry = CommandRegistry::new();
        let dispatcher = Dispatcher::new(&registry, &pipeline);

        dispatcher.dispatch("gen").unwrap();
        dispatcher.dispatch("generate").unwrap();
        assert_eq!(
            runner.commands(),
            vec![
                "cmake -S . -B build -G CodeBlocks - Unix Makefiles",
                "cmake -S . -B build -G CodeBlocks - Unix Makefiles",
            ]
        );
        assert!(dispatcher.dispatch("help").is_ok());
    }
}
