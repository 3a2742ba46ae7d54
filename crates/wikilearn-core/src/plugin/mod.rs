//! Extension-point registrations for the host orchestrator.
//!
//! Nothing registers itself at load time. [`PluginManifest::init`] builds the
//! full set of registrations from explicit inputs and
//! [`PluginManifest::register`] hands them to a host adapter.

pub mod manifest;
pub mod mfe;
pub mod registry;
pub mod settings;

use std::path::Path;

use crate::config::WikilearnConfig;
use crate::metadata::load_version;

pub use manifest::{
    ConfigItem, EnvPatch, PLUGIN_NAME, PluginContext, PluginManifest, PluginSlot, TemplateTarget,
};
pub use mfe::{MfeApp, MfeChanges};
pub use registry::{ExtensionRegistry, Registration};
pub use settings::{ENV_FILE_NAME, PluginSettings};

impl PluginContext {
    /// Context for a project checkout: version from its descriptor, asset
    /// directories from the configured paths.
    pub fn for_project(
        root: &Path,
        config: &WikilearnConfig,
        settings: PluginSettings,
    ) -> anyhow::Result<Self> {
        Ok(Self {
            version: load_version(&config.paths.about_path(root))?,
            settings,
            templates_dir: config.paths.templates_path(root),
            patches_dir: config.paths.patches_path(root),
        })
    }
}
