use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::domain::{FieldLabels, TagPattern};
use crate::error::Result;

/// Name of the project-level configuration file
pub const CONFIG_FILE_NAME: &str = "watchy-dev.toml";

/// Represents the complete configuration for watchy-dev.
///
/// Contains document and directory locations, the labels of the fields kept in
/// sync inside the readme, release naming, and the external build tool.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub paths: PathsConfig,

    #[serde(default)]
    pub labels: LabelsConfig,

    #[serde(default)]
    pub release: ReleaseConfig,

    #[serde(default)]
    pub toolchain: ToolchainConfig,
}

fn default_changelog() -> PathBuf {
    PathBuf::from("VERSION.md")
}

fn default_readme() -> PathBuf {
    PathBuf::from("README.md")
}

fn default_simulator() -> PathBuf {
    PathBuf::from("simulator/watchy_simulator.html")
}

fn default_examples_dir() -> PathBuf {
    PathBuf::from("examples")
}

/// Locations of the project files, relative to the project root.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct PathsConfig {
    /// Changelog holding the authoritative version history
    #[serde(default = "default_changelog")]
    pub changelog: PathBuf,

    /// Companion document whose version and date fields track the changelog
    #[serde(default = "default_readme")]
    pub readme: PathBuf,

    #[serde(default = "default_simulator")]
    pub simulator: PathBuf,

    #[serde(default = "default_examples_dir")]
    pub examples_dir: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        PathsConfig {
            changelog: default_changelog(),
            readme: default_readme(),
            simulator: default_simulator(),
            examples_dir: default_examples_dir(),
        }
    }
}

fn default_version_label() -> String {
    "**Version** : ".to_string()
}

fn default_updated_label() -> String {
    "**Dernière mise à jour** : ".to_string()
}

/// Label prefixes of the fields rewritten in the readme on every release.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct LabelsConfig {
    #[serde(default = "default_version_label")]
    pub version: String,

    #[serde(default = "default_updated_label")]
    pub updated: String,
}

impl Default for LabelsConfig {
    fn default() -> Self {
        LabelsConfig {
            version: default_version_label(),
            updated: default_updated_label(),
        }
    }
}

impl LabelsConfig {
    pub fn field_labels(&self) -> FieldLabels {
        FieldLabels::new(self.version.clone(), self.updated.clone())
    }
}

fn default_tag_pattern() -> String {
    "v{version}".to_string()
}

/// Naming of release commits and tags.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ReleaseConfig {
    /// Tag name template; must contain `{version}` exactly once
    #[serde(default = "default_tag_pattern")]
    pub tag_pattern: String,
}

impl Default for ReleaseConfig {
    fn default() -> Self {
        ReleaseConfig {
            tag_pattern: default_tag_pattern(),
        }
    }
}

impl ReleaseConfig {
    pub fn tag_pattern(&self) -> Result<TagPattern> {
        TagPattern::new(self.tag_pattern.clone())
    }
}

fn default_build_program() -> String {
    "pio".to_string()
}

/// The external build/test tool.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ToolchainConfig {
    #[serde(default = "default_build_program")]
    pub build_program: String,
}

impl Default for ToolchainConfig {
    fn default() -> Self {
        ToolchainConfig {
            build_program: default_build_program(),
        }
    }
}

/// Absolute locations of every project file, resolved once from the project
/// root and handed to each command.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectPaths {
    pub root: PathBuf,
    pub changelog: PathBuf,
    pub readme: PathBuf,
    pub simulator: PathBuf,
    pub examples_dir: PathBuf,
}

impl Config {
    /// Resolve the configured relative paths against `root`. Absolute paths in
    /// the config are kept as they are.
    pub fn resolve(&self, root: &Path) -> ProjectPaths {
        ProjectPaths {
            root: root.to_path_buf(),
            changelog: root.join(&self.paths.changelog),
            readme: root.join(&self.paths.readme),
            simulator: root.join(&self.paths.simulator),
            examples_dir: root.join(&self.paths.examples_dir),
        }
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `watchy-dev.toml` in the project root
/// 3. `.watchy-dev.toml` in the user config directory
/// 4. Default configuration if no file found
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If a file exists but cannot be read or parsed, or if a custom
///   path was given and does not exist
pub fn load_config(config_path: Option<&Path>, project_root: &Path) -> Result<Config> {
    let project_file = project_root.join(CONFIG_FILE_NAME);

    let source = if let Some(path) = config_path {
        Some(path.to_path_buf())
    } else if project_file.exists() {
        Some(project_file)
    } else {
        dirs::config_dir()
            .map(|dir| dir.join(format!(".{}", CONFIG_FILE_NAME)))
            .filter(|path| path.exists())
    };

    let Some(source) = source else {
        debug!("no config file found, using defaults");
        return Ok(Config::default());
    };

    debug!(path = %source.display(), "loading config");
    let config_str = fs::read_to_string(&source)?;
    let config: Config = toml::from_str(&config_str)?;
    config.release.tag_pattern()?;
    Ok(config)
}
