//! WikiLearn Core Library
//!
//! Provides the domain logic behind the WikiLearn deployment plugin:
//! release pinning of development dependencies, build metadata generation,
//! the plugin's extension-point registrations, and host CLI helpers.

pub mod commands;
pub mod config;
pub mod error;
pub mod metadata;
pub mod pinning;
pub mod plugin;

/// Re-exports of commonly used types
pub mod prelude {
    // Configuration
    pub use crate::config::{EnableConfig, PathsConfig, ReleaseConfig, WikilearnConfig};

    // Errors
    pub use crate::error::{EnableError, PinError};

    // Pinning
    pub use crate::pinning::{
        CachedResolver, Declaration, GitHubReleaseResolver, ReleasePinner, TagResolver,
    };

    // Metadata
    pub use crate::metadata::{BuildMetadata, MetadataHook};

    // Plugin
    pub use crate::plugin::{
        ExtensionRegistry, MfeApp, MfeChanges, PluginContext, PluginManifest, PluginSettings,
        Registration,
    };

    // Commands
    pub use crate::commands::{EnablePluginsCommand, EnableReport};
}
