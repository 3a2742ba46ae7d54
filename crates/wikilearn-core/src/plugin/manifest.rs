//! The plugin's registrations, built once and handed to the host.

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::mfe::{MfeApp, MfeChanges};
use super::registry::{ExtensionRegistry, Registration};
use super::settings::PluginSettings;

pub const PLUGIN_NAME: &str = "wikilearn";

const EDX_PLATFORM_REPOSITORY: &str = "https://github.com/wikimedia/edx-platform.git";
const FRONTEND_PLUGINS_REPOSITORY: &str =
    "https://github.com/wikimedia/frontend-plugins-wikilearn.git";
const ACE_BASE_BODY_PATTERN: &str = r"(.*/)?ace_common/edx_ace/common/base_body.html(/.*)?";

const USER_MENTION_SLOT: &str = "org.openedx.frontend.discussions.user_mention_plugin.v1";
const USER_MENTION_WIDGET: &str = r#"
        {
          op: PLUGIN_OPERATIONS.Insert,
          widget: {
            id: 'user_mention_plugin',
            type: DIRECT_PLUGIN,
            priority: 10,
            RenderWidget: UsernameMention,
          },
        }"#;

const MESSENGER_REPOSITORY: &str = "https://github.com/wikimedia/frontend-app-messenger.git";
const MESSENGER_PORT: u16 = 2010;
const DISCUSSIONS_REPOSITORY: &str = "https://github.com/edly-io/frontend-app-discussions.git";
const DISCUSSIONS_PORT: u16 = 2002;

/// Inputs to [`PluginManifest::init`].
#[derive(Debug, Clone)]
pub struct PluginContext {
    pub version: String,
    pub settings: PluginSettings,
    pub templates_dir: PathBuf,
    pub patches_dir: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigItem {
    pub key: String,
    pub value: Option<String>,
}

impl ConfigItem {
    fn new(key: &str, value: Option<String>) -> Self {
        Self {
            key: key.to_string(),
            value,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvPatch {
    pub name: String,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginSlot {
    pub mfe: String,
    pub slot: String,
    pub config: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateTarget {
    pub source: String,
    pub destination: String,
}

/// Everything the plugin contributes to the host orchestrator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginManifest {
    pub config_defaults: Vec<ConfigItem>,
    pub config_overrides: Vec<ConfigItem>,
    pub env_patterns_ignore: Vec<String>,
    /// Inline patches followed by the patch files, sorted by file name
    pub env_patches: Vec<EnvPatch>,
    pub plugin_slots: Vec<PluginSlot>,
    pub template_roots: Vec<PathBuf>,
    pub template_targets: Vec<TemplateTarget>,
    pub cli_commands: Vec<String>,
    pub mfe_apps: MfeChanges,
}

impl PluginManifest {
    pub fn init(context: &PluginContext) -> anyhow::Result<Self> {
        let settings = &context.settings;

        let mut env_patches = inline_patches(&settings.frontend_plugins_version);
        env_patches.extend(load_patch_files(&context.patches_dir)?);

        let mut mfe_apps = MfeChanges::default();
        mfe_apps.add.insert(
            "messenger".to_string(),
            MfeApp::new(
                MESSENGER_REPOSITORY,
                MESSENGER_PORT,
                settings.messenger_mfe_version.clone(),
            ),
        );
        mfe_apps.add.insert(
            "discussions".to_string(),
            MfeApp::new(
                DISCUSSIONS_REPOSITORY,
                DISCUSSIONS_PORT,
                settings.discussions_mfe_version.clone(),
            ),
        );
        mfe_apps.remove.push("authn".to_string());

        Ok(Self {
            config_defaults: vec![
                ConfigItem::new("WIKILEARN_VERSION", Some(context.version.clone())),
                ConfigItem::new(
                    "WIKILEARN_EDX_FEATURES_VERSION",
                    settings.edx_features_version.clone(),
                ),
            ],
            config_overrides: vec![
                ConfigItem::new(
                    "EDX_PLATFORM_REPOSITORY",
                    Some(EDX_PLATFORM_REPOSITORY.to_string()),
                ),
                ConfigItem::new(
                    "EDX_PLATFORM_VERSION",
                    settings.edx_platform_version.clone(),
                ),
            ],
            env_patterns_ignore: vec![ACE_BASE_BODY_PATTERN.to_string()],
            env_patches,
            plugin_slots: vec![PluginSlot {
                mfe: "discussions".to_string(),
                slot: USER_MENTION_SLOT.to_string(),
                config: USER_MENTION_WIDGET.to_string(),
            }],
            template_roots: vec![context.templates_dir.clone()],
            template_targets: vec![
                TemplateTarget {
                    source: format!("{PLUGIN_NAME}/build"),
                    destination: "plugins".to_string(),
                },
                TemplateTarget {
                    source: format!("{PLUGIN_NAME}/apps"),
                    destination: "plugins".to_string(),
                },
            ],
            cli_commands: vec![PLUGIN_NAME.to_string()],
            mfe_apps,
        })
    }

    /// Hand every registration to the host, in a fixed order.
    pub fn register<R: ExtensionRegistry + ?Sized>(&self, registry: &mut R) {
        for item in &self.config_defaults {
            registry.register(Registration::ConfigDefault {
                key: item.key.clone(),
                value: item.value.clone(),
            });
        }
        for item in &self.config_overrides {
            registry.register(Registration::ConfigOverride {
                key: item.key.clone(),
                value: item.value.clone(),
            });
        }
        for pattern in &self.env_patterns_ignore {
            registry.register(Registration::EnvPatternIgnore {
                pattern: pattern.clone(),
            });
        }
        for patch in &self.env_patches {
            registry.register(Registration::EnvPatch {
                name: patch.name.clone(),
                content: patch.content.clone(),
            });
        }
        for slot in &self.plugin_slots {
            registry.register(Registration::PluginSlot {
                mfe: slot.mfe.clone(),
                slot: slot.slot.clone(),
                config: slot.config.clone(),
            });
        }
        for path in &self.template_roots {
            registry.register(Registration::EnvTemplateRoot { path: path.clone() });
        }
        for target in &self.template_targets {
            registry.register(Registration::EnvTemplateTarget {
                source: target.source.clone(),
                destination: target.destination.clone(),
            });
        }
        for name in &self.cli_commands {
            registry.register(Registration::CliCommand { name: name.clone() });
        }
        registry.register(Registration::MfeApps(self.mfe_apps.clone()));
    }

    /// Registrations as a list, in the order [`register`](Self::register) emits them.
    pub fn registrations(&self) -> Vec<Registration> {
        let mut registrations = Vec::new();
        self.register(&mut registrations);
        registrations
    }
}

fn inline_patches(frontend_plugins_version: &str) -> Vec<EnvPatch> {
    vec![
        EnvPatch {
            name: "mfe-dockerfile-post-npm-install-discussions".to_string(),
            content: format!(
                "\nRUN npm install git+{FRONTEND_PLUGINS_REPOSITORY}#{frontend_plugins_version}\n"
            ),
        },
        EnvPatch {
            name: "mfe-env-config-runtime-definitions-discussions".to_string(),
            content: "\n    const { UsernameMention } = require('frontend-plugins-wikilearn');\n"
                .to_string(),
        },
    ]
}

/// One patch per visible regular file in `dir`, named after the file. A
/// missing directory contributes nothing.
fn load_patch_files(dir: &Path) -> anyhow::Result<Vec<EnvPatch>> {
    if !dir.exists() {
        debug!("No patches directory at {}", dir.display());
        return Ok(Vec::new());
    }

    let entries = std::fs::read_dir(dir)
        .with_context(|| format!("Failed to read patches directory: {}", dir.display()))?;

    let mut paths = Vec::new();
    for entry in entries {
        let entry = entry
            .with_context(|| format!("Failed to read patches directory: {}", dir.display()))?;
        let path = entry.path();
        let hidden = entry.file_name().to_string_lossy().starts_with('.');
        if path.is_file() && !hidden {
            paths.push(path);
        }
    }
    paths.sort();

    paths
        .into_iter()
        .map(|path| -> anyhow::Result<EnvPatch> {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read patch file: {}", path.display()))?;
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            debug!("Loaded patch {}", name);
            Ok(EnvPatch { name, content })
        })
        .collect()
}
