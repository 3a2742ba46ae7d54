//! Deployment settings read from the environment and the project's `.env`.

use std::collections::HashMap;
use std::path::Path;

use anyhow::Context;
use tracing::debug;

/// Dotenv file read from the project root.
pub const ENV_FILE_NAME: &str = ".env";

/// Default ref of `frontend-plugins-wikilearn` installed into the MFE image.
pub const DEFAULT_FRONTEND_PLUGINS_VERSION: &str = "master";

pub const EDX_FEATURES_VERSION_VAR: &str = "WIKILEARN_EDX_FEATURES_VERSION";
pub const EDX_PLATFORM_VERSION_VAR: &str = "WIKILEARN_EDX_PLATFORM_VERSION";
pub const FRONTEND_PLUGINS_VERSION_VAR: &str = "WIKILEARN_FRONTEND_PLUGINS_VERSION";
pub const MESSENGER_MFE_VERSION_VAR: &str = "WIKILEARN_MESSENGER_MFE_VERSION";
pub const DISCUSSIONS_MFE_VERSION_VAR: &str = "WIKILEARN_DISCUSSIONS_MFE_VERSION";

/// Versions the deployment pins through environment variables. Unset
/// variables stay `None` and reach the host as null values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PluginSettings {
    pub edx_features_version: Option<String>,
    pub edx_platform_version: Option<String>,
    pub frontend_plugins_version: String,
    pub messenger_mfe_version: Option<String>,
    pub discussions_mfe_version: Option<String>,
}

impl PluginSettings {
    /// Process environment first, then the dotenv file at `path`. A missing
    /// file leaves only the process environment.
    pub fn from_env_file(path: &Path) -> anyhow::Result<Self> {
        Self::from_env_file_with(path, |key| std::env::var(key).ok())
    }

    /// Like [`from_env_file`](Self::from_env_file) with `lookup` standing in
    /// for the process environment. Values from `lookup` are never overridden.
    pub fn from_env_file_with<F>(path: &Path, lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let file_vars = read_env_file(path)?;
        Ok(Self::from_lookup(|key| lookup(key).or_else(|| file_vars.get(key).cloned())))
    }

    /// Build settings from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            edx_features_version: lookup(EDX_FEATURES_VERSION_VAR),
            edx_platform_version: lookup(EDX_PLATFORM_VERSION_VAR),
            frontend_plugins_version: lookup(FRONTEND_PLUGINS_VERSION_VAR)
                .unwrap_or_else(|| DEFAULT_FRONTEND_PLUGINS_VERSION.to_string()),
            messenger_mfe_version: lookup(MESSENGER_MFE_VERSION_VAR),
            discussions_mfe_version: lookup(DISCUSSIONS_MFE_VERSION_VAR),
        }
    }
}

fn read_env_file(path: &Path) -> anyhow::Result<HashMap<String, String>> {
    if !path.is_file() {
        debug!("No env file at {}", path.display());
        return Ok(HashMap::new());
    }

    let entries = dotenvy::from_path_iter(path)
        .with_context(|| format!("Failed to read env file: {}", path.display()))?;
    let vars = entries
        .map(|entry| {
            entry.with_context(|| format!("Invalid entry in env file: {}", path.display()))
        })
        .collect::<anyhow::Result<HashMap<_, _>>>()?;
    debug!("Loaded {} variables from {}", vars.len(), path.display());
    Ok(vars)
}
