//! External process execution

pub mod subprocess;

#[cfg(test)]
pub mod fake;

pub use subprocess::{run_checked, Invocation, ProcessRunner, SystemRunner};
