//! Configuration schema for wikilearn.toml
//!
//! Every section is optional; missing keys fall back to the values the
//! plugin has always shipped with.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Root configuration structure for wikilearn.toml
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct WikilearnConfig {
    /// Latest-release lookup settings
    #[serde(default)]
    pub release: ReleaseConfig,

    /// Project file locations, relative to the project root
    #[serde(default)]
    pub paths: PathsConfig,

    /// Host `plugins enable` settings
    #[serde(default)]
    pub enable: EnableConfig,
}

impl WikilearnConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        self.release.validate()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseConfig {
    /// Base URL of the repository host
    #[serde(default = "default_host")]
    pub host: String,

    /// Owner prefixed to repository identifiers that have none
    #[serde(default = "default_owner")]
    pub default_owner: String,

    /// Timeout for a single latest-release request
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Ref that marks a dependency as tracking the development branch
    #[serde(default = "default_development_marker")]
    pub development_marker: String,

    /// Optional-dependency group that receives the pinned declarations
    #[serde(default = "default_group")]
    pub group: String,
}

impl Default for ReleaseConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            default_owner: default_owner(),
            timeout_secs: default_timeout_secs(),
            development_marker: default_development_marker(),
            group: default_group(),
        }
    }
}

impl ReleaseConfig {
    fn validate(&self) -> anyhow::Result<()> {
        url::Url::parse(&self.host)
            .map_err(|e| anyhow::anyhow!("Invalid release host '{}': {}", self.host, e))?;
        if self.timeout_secs == 0 {
            anyhow::bail!("release.timeout_secs must be greater than zero");
        }
        if self.development_marker.is_empty() || self.development_marker.contains('@') {
            anyhow::bail!(
                "release.development_marker must be a non-empty ref without '@': '{}'",
                self.development_marker
            );
        }
        if self.group.is_empty() {
            anyhow::bail!("release.group must not be empty");
        }
        Ok(())
    }
}

fn default_host() -> String {
    "https://github.com".to_string()
}

fn default_owner() -> String {
    "wikimedia".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_development_marker() -> String {
    "develop".to_string()
}

fn default_group() -> String {
    "release".to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Version descriptor holding `__version__`
    #[serde(default = "default_about")]
    pub about: PathBuf,

    #[serde(default = "default_requirements_dir")]
    pub requirements_dir: PathBuf,

    /// Base dependencies, copied verbatim into metadata
    #[serde(default = "default_base_requirements")]
    pub base_requirements: String,

    /// Custom plugin dependencies, pinned to their latest releases
    #[serde(default = "default_release_requirements")]
    pub release_requirements: String,

    #[serde(default = "default_templates")]
    pub templates: PathBuf,

    #[serde(default = "default_patches")]
    pub patches: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            about: default_about(),
            requirements_dir: default_requirements_dir(),
            base_requirements: default_base_requirements(),
            release_requirements: default_release_requirements(),
            templates: default_templates(),
            patches: default_patches(),
        }
    }
}

impl PathsConfig {
    pub fn about_path(&self, root: &Path) -> PathBuf {
        root.join(&self.about)
    }

    pub fn base_requirements_path(&self, root: &Path) -> PathBuf {
        root.join(&self.requirements_dir)
            .join(&self.base_requirements)
    }

    pub fn release_requirements_path(&self, root: &Path) -> PathBuf {
        root.join(&self.requirements_dir)
            .join(&self.release_requirements)
    }

    pub fn templates_path(&self, root: &Path) -> PathBuf {
        root.join(&self.templates)
    }

    pub fn patches_path(&self, root: &Path) -> PathBuf {
        root.join(&self.patches)
    }
}

fn default_about() -> PathBuf {
    PathBuf::from("tutorwikilearn/__about__.py")
}

fn default_requirements_dir() -> PathBuf {
    PathBuf::from("requirements")
}

fn default_base_requirements() -> String {
    "base.in".to_string()
}

fn default_release_requirements() -> String {
    "dev.in".to_string()
}

fn default_templates() -> PathBuf {
    PathBuf::from("tutorwikilearn/templates")
}

fn default_patches() -> PathBuf {
    PathBuf::from("tutorwikilearn/patches")
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnableConfig {
    /// Host orchestrator executable
    #[serde(default = "default_program")]
    pub program: String,

    /// Sub-plugins enabled by `wikilearn enable`
    #[serde(default = "default_plugins")]
    pub plugins: Vec<String>,
}

impl Default for EnableConfig {
    fn default() -> Self {
        Self {
            program: default_program(),
            plugins: default_plugins(),
        }
    }
}

fn default_program() -> String {
    "tutor".to_string()
}

fn default_plugins() -> Vec<String> {
    ["mfe", "indigo", "notes", "forum", "aspects"]
        .into_iter()
        .map(String::from)
        .collect()
}
