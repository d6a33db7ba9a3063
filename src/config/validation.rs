//! Configuration validation with helpful error messages

use std::collections::HashSet;

use anyhow::Result;

use super::ForgeConfig;
use crate::error::ForgeError;

/// Validate a parsed configuration
pub fn validate_config(config: &ForgeConfig) -> Result<()> {
    if config.build_dir.as_os_str().is_empty() {
        return Err(ForgeError::config_error("build_dir cannot be empty").into());
    }

    if config.releases_dir.as_os_str().is_empty() {
        return Err(ForgeError::config_error("releases_dir cannot be empty").into());
    }

    if config.executable.trim().is_empty() {
        return Err(ForgeError::config_error_with_hint(
            "executable cannot be empty",
            "Set it to the name of the add_executable() target in CMakeLists.txt",
        )
        .into());
    }

    if config.archive_name.trim().is_empty() {
        return Err(ForgeError::config_error("archive_name cannot be empty").into());
    }

    if let Some(tools) = &config.tools {
        if tools.iter().any(|tool| tool.trim().is_empty()) {
            return Err(ForgeError::config_error("tools cannot contain empty names").into());
        }
    }

    let mut seen = HashSet::new();
    for dep in &config.dependencies {
        if dep.path.as_os_str().is_empty() || dep.url.trim().is_empty() {
            return Err(ForgeError::config_error_with_hint(
                "every [[dependency]] needs a path and a url",
                "Example: path = \"libs/raylib\", url = \"https://github.com/...\"",
            )
            .into());
        }

        if dep.path == config.build_dir {
            return Err(ForgeError::config_error(format!(
                "dependency path '{}' cannot be the build directory",
                dep.path.display()
            ))
            .into());
        }

        if !seen.insert(&dep.path) {
            return Err(ForgeError::config_error(format!(
                "dependency path '{}' is listed more than once",
                dep.path.display()
            ))
            .into());
        }
    }

    for include in &config.includes {
        if include.source.as_os_str().is_empty() {
            return Err(ForgeError::config_error("[[include]] source cannot be empty").into());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DependencySpec;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&ForgeConfig::default()).is_ok());
    }

    #[test]
    fn test_duplicate_dependency_paths() {
        let mut config = ForgeConfig::default();
        config
            .dependencies
            .push(DependencySpec::new("libs/raylib", "https://example.com/other.git"));
        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("more than once"));
    }

    #[test]
    fn test_dependency_inside_build_dir_rejected() {
        let mut config = ForgeConfig::default();
        config.dependencies = vec![DependencySpec::new("build", "https://example.com/x.git")];
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_empty_executable_rejected() {
        let config = ForgeConfig {
            executable: " ".to_string(),
            ..ForgeConfig::default()
        };
        assert!(validate_config(&config).is_err());
    }
}
