//! Host extension-point registrations.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::mfe::MfeChanges;

/// One registration into a host extension point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "filter", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Registration {
    /// New setting with its default value
    ConfigDefault { key: String, value: Option<String> },
    /// Replacement value for an existing setting
    ConfigOverride { key: String, value: Option<String> },
    /// Rendered-environment path pattern the host must not template
    EnvPatternIgnore { pattern: String },
    /// Text inserted at a named patch point of the generated files
    EnvPatch { name: String, content: String },
    /// Widget inserted into a micro-frontend plugin slot
    PluginSlot {
        mfe: String,
        slot: String,
        config: String,
    },
    EnvTemplateRoot { path: PathBuf },
    EnvTemplateTarget { source: String, destination: String },
    /// CLI command group contributed to the host
    CliCommand { name: String },
    MfeApps(MfeChanges),
}

/// Receiver of registrations; implemented by the host adapter.
pub trait ExtensionRegistry {
    fn register(&mut self, registration: Registration);
}

impl ExtensionRegistry for Vec<Registration> {
    fn register(&mut self, registration: Registration) {
        self.push(registration);
    }
}
