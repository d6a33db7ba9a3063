//! Project configuration
//!
//! The configuration is built once at startup from built-in defaults, optionally
//! overridden by a `Forge.toml` next to `CMakeLists.txt`, and then passed by
//! reference to every step.

pub mod forge_toml;
mod platform;
mod validation;

pub use forge_toml::{DependencySpec, ForgeConfig, CONFIG_FILE, PROJECT_FILE};
pub use platform::Platform;
pub use validation::validate_config;
