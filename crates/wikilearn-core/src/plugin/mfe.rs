//! Micro-frontend app table changes.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

/// A micro-frontend app as the host's MFE table describes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MfeApp {
    pub repository: String,
    pub port: u16,
    pub version: Option<String>,
}

impl MfeApp {
    pub fn new(repository: impl Into<String>, port: u16, version: Option<String>) -> Self {
        Self {
            repository: repository.into(),
            port,
            version,
        }
    }
}

/// Apps to add (or replace) and apps to drop from the host's table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MfeChanges {
    pub add: BTreeMap<String, MfeApp>,
    pub remove: Vec<String>,
}

impl MfeChanges {
    /// Apply to a host app table. Additions replace existing entries of the
    /// same name; removing an app the table lacks is a no-op.
    pub fn apply(&self, apps: &mut BTreeMap<String, MfeApp>) {
        for (name, app) in &self.add {
            debug!("Registering MFE app {} on port {}", name, app.port);
            apps.insert(name.clone(), app.clone());
        }
        for name in &self.remove {
            if apps.remove(name).is_some() {
                debug!("Removed MFE app {}", name);
            }
        }
    }
}
