//! Build metadata hook.

use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::WikilearnConfig;
use crate::pinning::{ReleasePinner, TagResolver};

use super::about::load_version;
use super::requirements::load_requirements;

/// Dynamic project metadata handed to the packaging backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildMetadata {
    pub version: String,
    pub dependencies: Vec<String>,
    #[serde(rename = "optional-dependencies")]
    pub optional_dependencies: BTreeMap<String, Vec<String>>,
}

/// Computes build metadata for a project checkout.
#[derive(Debug, Clone)]
pub struct MetadataHook {
    root: PathBuf,
    config: WikilearnConfig,
}

impl MetadataHook {
    pub fn new(root: impl Into<PathBuf>, config: WikilearnConfig) -> Self {
        Self {
            root: root.into(),
            config,
        }
    }

    /// Version from the descriptor.
    pub fn version(&self) -> anyhow::Result<String> {
        load_version(&self.config.paths.about_path(&self.root))
    }

    /// Base dependencies, verbatim.
    pub fn base_dependencies(&self) -> anyhow::Result<Vec<String>> {
        load_requirements(&self.config.paths.base_requirements_path(&self.root))
    }

    /// Custom plugin dependencies with development refs pinned to releases.
    pub fn release_dependencies<R: TagResolver>(&self, resolver: R) -> anyhow::Result<Vec<String>> {
        let path = self.config.paths.release_requirements_path(&self.root);
        let declarations = load_requirements(&path)?;
        let pinner = ReleasePinner::new(resolver)
            .with_development_marker(self.config.release.development_marker.clone());
        let pinned = pinner
            .resolve(&declarations)
            .with_context(|| format!("Failed to pin dependencies from {}", path.display()))?;
        Ok(pinned)
    }

    /// Assemble the full metadata. Any failure aborts the whole build.
    pub fn update<R: TagResolver>(&self, resolver: R) -> anyhow::Result<BuildMetadata> {
        let version = self.version()?;
        let dependencies = self.base_dependencies()?;
        let release = self.release_dependencies(resolver)?;

        info!(
            "Build metadata: version {}, {} dependencies, {} pinned release dependencies",
            version,
            dependencies.len(),
            release.len()
        );

        let mut optional_dependencies = BTreeMap::new();
        optional_dependencies.insert(self.config.release.group.clone(), release);

        Ok(BuildMetadata {
            version,
            dependencies,
            optional_dependencies,
        })
    }
}
