//! Project configuration
//!
//! Settings live in an optional `wikilearn.toml` at the project root. A
//! project without the file runs on the built-in defaults.

pub mod parser;
pub mod schema;

use std::path::{Path, PathBuf};

use tracing::debug;

pub use parser::{parse_wikilearn_toml, parse_wikilearn_toml_str, to_toml};
pub use schema::{EnableConfig, PathsConfig, ReleaseConfig, WikilearnConfig};

/// File name of the project configuration
pub const CONFIG_FILE_NAME: &str = "wikilearn.toml";

pub fn config_path(project_root: &Path) -> PathBuf {
    project_root.join(CONFIG_FILE_NAME)
}

/// Load the configuration for a project, falling back to defaults when the
/// file does not exist.
pub fn load_config(project_root: &Path) -> anyhow::Result<WikilearnConfig> {
    let path = config_path(project_root);
    if !path.exists() {
        debug!("No {} at {}, using defaults", CONFIG_FILE_NAME, path.display());
        return Ok(WikilearnConfig::new());
    }
    debug!("Loading configuration from {}", path.display());
    parse_wikilearn_toml(&path)
}
