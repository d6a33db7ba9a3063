//! Recording process runner for tests

use std::cell::RefCell;
use std::fs;

use anyhow::Result;

use super::subprocess::{CommandResult, Invocation, ProcessRunner};

type Hook = Box<dyn Fn(&Invocation) -> i32>;

/// Records every invocation and answers with the hook's exit code
pub struct FakeRunner {
    calls: RefCell<Vec<Invocation>>,
    hook: Hook,
}

impl FakeRunner {
    /// Every invocation exits 0; `git clone` populates its target directory
    pub fn succeeding() -> Self {
        Self::with(|inv| {
            simulate_clone(inv);
            0
        })
    }

    /// Custom exit codes
    pub fn with(hook: impl Fn(&Invocation) -> i32 + 'static) -> Self {
        Self {
            calls: RefCell::new(Vec::new()),
            hook: Box::new(hook),
        }
    }

    pub fn calls(&self) -> Vec<Invocation> {
        self.calls.borrow().clone()
    }

    /// Invocations rendered as `program arg arg...`
    pub fn commands(&self) -> Vec<String> {
        self.calls
            .borrow()
            .iter()
            .map(|inv| {
                let mut parts = vec![inv.program_name()];
                parts.extend(inv.args_lossy());
                parts.join(" ")
            })
            .collect()
    }
}

impl ProcessRunner for FakeRunner {
    fn run(&self, invocation: &Invocation) -> Result<CommandResult> {
        self.calls.borrow_mut().push(invocation.clone());
        Ok(CommandResult::from_code((self.hook)(invocation)))
    }
}

/// Make `git clone ... <dir>` leave a non-empty checkout behind
pub fn simulate_clone(inv: &Invocation) {
    let args = inv.args_lossy();
    if inv.program_name() == "git" && args.first().map(String::as_str) == Some("clone") {
        if let Some(target) = args.iter().rev().find(|a| !a.starts_with('-')) {
            let dir = inv.cwd.join(target);
            fs::create_dir_all(&dir).unwrap();
            fs::write(dir.join("CMakeLists.txt"), "project(dep)\n").unwrap();
        }
    }
}

/// True if `program` was invoked with `first` as its first argument
pub fn is(inv: &Invocation, program: &str, first: &str) -> bool {
    inv.program_name() == program && inv.args_lossy().first().map(String::as_str) == Some(first)
}
