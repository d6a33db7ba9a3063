//! Forge.toml configuration parsing
//!
//! Every field is optional; anything left out keeps its built-in default.
//!
//! ```toml
//! build_dir = "build"
//! releases_dir = "releases"
//! executable = "forge_example"
//! archive_name = "build.zip"
//! patch_gitignore = true
//! tools = ["cmake", "git", "g++"]
//!
//! [[dependency]]
//! path = "libs/raylib"
//! url = "https://github.com/bramtechs/raylib-lite.git"
//!
//! [[include]]
//! source = "src"
//! dest = "source"
//!
//! [[include]]
//! source = "LICENSE.txt"
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use super::{validate_config, Platform};
use crate::build::cmake::BuildType;

/// Optional configuration file, looked up in the project root
pub const CONFIG_FILE: &str = "Forge.toml";

/// Build description that marks the project root
pub const PROJECT_FILE: &str = "CMakeLists.txt";

/// A library checkout the project builds against
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DependencySpec {
    /// Checkout directory, relative to the project root
    pub path: PathBuf,
    /// Remote repository URL
    pub url: String,
}

impl DependencySpec {
    pub fn new(path: impl Into<PathBuf>, url: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            url: url.into(),
        }
    }
}

/// Extra file or directory packed next to the executable
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ArchiveEntry {
    /// Path on disk, relative to the project root
    pub source: PathBuf,
    /// Name inside the archive; defaults to `source`
    #[serde(default)]
    pub dest: Option<String>,
}

impl ArchiveEntry {
    pub fn new(source: impl Into<PathBuf>, dest: Option<&str>) -> Self {
        Self {
            source: source.into(),
            dest: dest.map(String::from),
        }
    }

    /// Name of the entry inside the archive
    pub fn dest_name(&self) -> String {
        match self.dest.as_deref() {
            Some(dest) if !dest.is_empty() => dest.to_string(),
            _ => self.source.to_string_lossy().replace('\\', "/"),
        }
    }
}

/// Resolved project configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ForgeConfig {
    /// CMake binary directory
    pub build_dir: PathBuf,
    /// Where `package` writes the archive
    pub releases_dir: PathBuf,
    /// Executable target name, without platform suffix
    pub executable: String,
    /// Archive file name inside `releases_dir`
    pub archive_name: String,
    /// Append build/release directories to .gitignore on generate
    pub patch_gitignore: bool,
    /// CMake generator override
    pub generator: Option<String>,
    /// Tools required on PATH; platform defaults when unset
    pub tools: Option<Vec<String>>,
    #[serde(rename = "dependency")]
    pub dependencies: Vec<DependencySpec>,
    #[serde(rename = "include")]
    pub includes: Vec<ArchiveEntry>,
}

impl Default for ForgeConfig {
    fn default() -> Self {
        Self {
            build_dir: PathBuf::from("build"),
            releases_dir: PathBuf::from("releases"),
            executable: "forge_example".to_string(),
            archive_name: "build.zip".to_string(),
            patch_gitignore: true,
            generator: None,
            tools: None,
            dependencies: vec![DependencySpec::new(
                "libs/raylib",
                "https://github.com/bramtechs/raylib-lite.git",
            )],
            includes: vec![
                ArchiveEntry::new("src", Some("source")),
                ArchiveEntry::new("LICENSE.txt", None),
            ],
        }
    }
}

impl ForgeConfig {
    /// Load `Forge.toml` from the project root, or use defaults if absent
    pub fn load(project_root: &Path) -> Result<Self> {
        let path = project_root.join(CONFIG_FILE);
        if !path.exists() {
            tracing::debug!("No {} in {}, using defaults", CONFIG_FILE, project_root.display());
            return Ok(Self::default());
        }
        Self::load_from_path(&path)
    }

    /// Load configuration from a specific path
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration from {}", path.display()))?;
        Self::parse(&content)
    }

    /// Parse configuration from TOML string
    pub fn parse(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).context("Failed to parse Forge.toml")?;
        validate_config(&config)?;
        Ok(config)
    }

    /// Tools every command needs on PATH
    pub fn required_tools(&self, platform: Platform) -> Vec<String> {
        match &self.tools {
            Some(tools) => tools.clone(),
            None => vec![
                "cmake".to_string(),
                "git".to_string(),
                platform.compiler().to_string(),
            ],
        }
    }

    /// CMake generator for this host
    pub fn generator(&self, platform: Platform) -> String {
        self.generator
            .clone()
            .unwrap_or_else(|| platform.cmake_generator().to_string())
    }

    /// Location of the built executable, relative to the project root
    pub fn executable_path(&self, build_type: BuildType, platform: Platform) -> PathBuf {
        self.build_dir
            .join(build_type.to_string())
            .join(format!("{}{}", self.executable, platform.executable_suffix()))
    }

    /// Location of the release archive, relative to the project root
    pub fn archive_path(&self) -> PathBuf {
        self.releases_dir.join(&self.archive_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ForgeConfig::default();
        assert_eq!(config.build_dir, PathBuf::from("build"));
        assert_eq!(config.archive_path(), PathBuf::from("releases").join("build.zip"));
        assert_eq!(config.dependencies.len(), 1);
        assert_eq!(config.dependencies[0].path, PathBuf::from("libs/raylib"));
        assert_eq!(
            config.required_tools(Platform::Posix),
            vec!["cmake", "git", "g++"]
        );
        assert_eq!(
            config.required_tools(Platform::Windows),
            vec!["cmake", "git", "cl"]
        );
    }

    #[test]
    fn test_parse_partial_override_keeps_defaults() {
        let config = ForgeConfig::parse(
            r#"
executable = "game"
tools = ["cmake"]
"#,
        )
        .unwrap();
        assert_eq!(config.executable, "game");
        assert_eq!(config.required_tools(Platform::Posix), vec!["cmake"]);
        assert_eq!(config.releases_dir, PathBuf::from("releases"));
        assert_eq!(config.includes.len(), 2);
    }

    #[test]
    fn test_parse_dependencies_and_includes() {
        let config = ForgeConfig::parse(
            r#"
[[dependency]]
path = "libs/fmt"
url = "https://github.com/fmtlib/fmt.git"

[[dependency]]
path = "libs/spdlog"
url = "https://github.com/gabime/spdlog.git"

[[include]]
source = "assets"
dest = "data"
"#,
        )
        .unwrap();
        assert_eq!(config.dependencies.len(), 2);
        assert_eq!(config.dependencies[1].path, PathBuf::from("libs/spdlog"));
        assert_eq!(config.includes, vec![ArchiveEntry::new("assets", Some("data"))]);
    }

    #[test]
    fn test_parse_rejects_unknown_field() {
        assert!(ForgeConfig::parse("build_directory = \"out\"").is_err());
    }

    #[test]
    fn test_dest_name_falls_back_to_source() {
        assert_eq!(ArchiveEntry::new("LICENSE.txt", None).dest_name(), "LICENSE.txt");
        assert_eq!(ArchiveEntry::new("LICENSE.txt", Some("")).dest_name(), "LICENSE.txt");
        assert_eq!(ArchiveEntry::new("src", Some("source")).dest_name(), "source");
    }

    #[test]
    fn test_executable_path() {
        let config = ForgeConfig::default();
        assert_eq!(
            config.executable_path(BuildType::Release, Platform::Windows),
            PathBuf::from("build").join("Release").join("forge_example.exe")
        );
        assert_eq!(
            config.executable_path(BuildType::Debug, Platform::Posix),
            PathBuf::from("build").join("Debug").join("forge_example")
        );
    }

    #[test]
    fn test_load_without_file_uses_defaults() {
        let temp = tempfile::tempdir().unwrap();
        let config = ForgeConfig::load(temp.path()).unwrap();
        assert_eq!(config.executable, "forge_example");
    }

    #[test]
    fn test_load_reads_file() {
        let temp = tempfile::tempdir().unwrap();
        std::fs::write(temp.path().join(CONFIG_FILE), "archive_name = \"game.zip\"\n").unwrap();
        let config = ForgeConfig::load(temp.path()).unwrap();
        assert_eq!(config.archive_name, "game.zip");
    }
}
