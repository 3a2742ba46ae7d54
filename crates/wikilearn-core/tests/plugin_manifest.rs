use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

use wikilearn_core::config::WikilearnConfig;
use wikilearn_core::plugin::{
    MfeApp, PluginContext, PluginManifest, PluginSettings, Registration,
};

fn settings(vars: &[(&str, &str)]) -> PluginSettings {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    PluginSettings::from_lookup(|key| vars.get(key).cloned())
}

fn context(patches_dir: PathBuf, settings: PluginSettings) -> PluginContext {
    PluginContext {
        version: "20.0.3".to_string(),
        settings,
        templates_dir: PathBuf::from("/opt/wikilearn/templates"),
        patches_dir,
    }
}

#[test]
fn settings_default_frontend_plugins_version() {
    let settings = settings(&[]);

    assert_eq!(settings.frontend_plugins_version, "master");
    assert_eq!(settings.edx_platform_version, None);
}

#[test]
fn settings_read_versions_from_env_file() {
    let temp = TempDir::new().unwrap();
    let env_file = temp.path().join(".env");
    fs::write(
        &env_file,
        concat!(
            "# pinned versions\n",
            "WIKILEARN_EDX_PLATFORM_VERSION=wikilearn/sumac\n",
            "WIKILEARN_MESSENGER_MFE_VERSION=\"v1.2.0\"\n",
        ),
    )
    .unwrap();

    let settings = PluginSettings::from_env_file_with(&env_file, |_| None).unwrap();

    assert_eq!(
        settings.edx_platform_version.as_deref(),
        Some("wikilearn/sumac")
    );
    assert_eq!(settings.messenger_mfe_version.as_deref(), Some("v1.2.0"));
    assert_eq!(settings.frontend_plugins_version, "master");
}

#[test]
fn process_environment_wins_over_env_file() {
    let temp = TempDir::new().unwrap();
    let env_file = temp.path().join(".env");
    fs::write(&env_file, "WIKILEARN_EDX_FEATURES_VERSION=v1.0.0\n").unwrap();

    let settings = PluginSettings::from_env_file_with(&env_file, |key| {
        (key == "WIKILEARN_EDX_FEATURES_VERSION").then(|| "v2.0.0".to_string())
    })
    .unwrap();

    assert_eq!(settings.edx_features_version.as_deref(), Some("v2.0.0"));
}

#[test]
fn missing_env_file_leaves_lookup_only() {
    let temp = TempDir::new().unwrap();

    let loaded =
        PluginSettings::from_env_file_with(&temp.path().join(".env"), |_| None).unwrap();

    assert_eq!(loaded, settings(&[]));
}

#[test]
fn env_file_versions_reach_the_manifest() {
    let temp = TempDir::new().unwrap();
    let env_file = temp.path().join(".env");
    fs::write(&env_file, "WIKILEARN_FRONTEND_PLUGINS_VERSION=v0.4.1\n").unwrap();
    let settings = PluginSettings::from_env_file_with(&env_file, |_| None).unwrap();

    let manifest = PluginManifest::init(&context(PathBuf::from("/nonexistent"), settings)).unwrap();

    assert!(manifest.env_patches[0].content.contains("#v0.4.1"));
}

#[test]
fn config_defaults_and_overrides_follow_settings() {
    let settings = settings(&[
        ("WIKILEARN_EDX_FEATURES_VERSION", "v1.4.0"),
        ("WIKILEARN_EDX_PLATFORM_VERSION", "wikilearn/sumac"),
    ]);
    let manifest = PluginManifest::init(&context(PathBuf::from("/nonexistent"), settings)).unwrap();

    let defaults: Vec<_> = manifest
        .config_defaults
        .iter()
        .map(|item| (item.key.as_str(), item.value.as_deref()))
        .collect();
    assert_eq!(
        defaults,
        vec![
            ("WIKILEARN_VERSION", Some("20.0.3")),
            ("WIKILEARN_EDX_FEATURES_VERSION", Some("v1.4.0")),
        ]
    );

    let overrides: Vec<_> = manifest
        .config_overrides
        .iter()
        .map(|item| (item.key.as_str(), item.value.as_deref()))
        .collect();
    assert_eq!(
        overrides,
        vec![
            (
                "EDX_PLATFORM_REPOSITORY",
                Some("https://github.com/wikimedia/edx-platform.git")
            ),
            ("EDX_PLATFORM_VERSION", Some("wikilearn/sumac")),
        ]
    );
}

#[test]
fn frontend_plugins_patch_uses_configured_version() {
    let settings = settings(&[("WIKILEARN_FRONTEND_PLUGINS_VERSION", "v0.3.0")]);
    let manifest = PluginManifest::init(&context(PathBuf::from("/nonexistent"), settings)).unwrap();

    let patch = manifest
        .env_patches
        .iter()
        .find(|p| p.name == "mfe-dockerfile-post-npm-install-discussions")
        .unwrap();
    assert!(patch.content.contains(
        "RUN npm install git+https://github.com/wikimedia/frontend-plugins-wikilearn.git#v0.3.0"
    ));
}

#[test]
fn patch_files_skip_hidden_and_load_sorted_after_inline_patches() {
    let temp = TempDir::new().unwrap();
    let patches = temp.path().join("patches");
    fs::create_dir_all(patches.join("nested")).unwrap();
    fs::write(patches.join("openedx-lms-common-settings"), "FEATURE = True\n").unwrap();
    fs::write(patches.join("caddyfile"), "# caddy\n").unwrap();
    fs::write(patches.join(".gitkeep"), "").unwrap();

    let manifest = PluginManifest::init(&context(patches, settings(&[]))).unwrap();

    let names: Vec<_> = manifest.env_patches.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "mfe-dockerfile-post-npm-install-discussions",
            "mfe-env-config-runtime-definitions-discussions",
            "caddyfile",
            "openedx-lms-common-settings",
        ]
    );
    assert_eq!(manifest.env_patches[3].content, "FEATURE = True\n");
}

#[test]
fn registrations_are_emitted_in_order() {
    let manifest = PluginManifest::init(&context(PathBuf::from("/nonexistent"), settings(&[]))).unwrap();

    let registrations = manifest.registrations();

    assert!(matches!(
        registrations.first(),
        Some(Registration::ConfigDefault { key, .. }) if key == "WIKILEARN_VERSION"
    ));
    assert!(matches!(registrations.last(), Some(Registration::MfeApps(_))));
    assert!(registrations.contains(&Registration::EnvTemplateTarget {
        source: "wikilearn/build".to_string(),
        destination: "plugins".to_string(),
    }));
    assert!(registrations.contains(&Registration::EnvTemplateRoot {
        path: PathBuf::from("/opt/wikilearn/templates"),
    }));
    assert!(registrations.contains(&Registration::CliCommand {
        name: "wikilearn".to_string(),
    }));
    assert!(registrations.iter().any(|r| matches!(
        r,
        Registration::PluginSlot { mfe, slot, .. }
            if mfe == "discussions"
                && slot == "org.openedx.frontend.discussions.user_mention_plugin.v1"
    )));
}

#[test]
fn registrations_serialize_with_filter_tag() {
    let manifest = PluginManifest::init(&context(PathBuf::from("/nonexistent"), settings(&[]))).unwrap();

    let json = serde_json::to_value(manifest.registrations()).unwrap();

    assert_eq!(json[0]["filter"], "CONFIG_DEFAULT");
    assert_eq!(json[0]["key"], "WIKILEARN_VERSION");
    assert_eq!(json[1]["value"], serde_json::Value::Null);
}

#[test]
fn mfe_changes_add_apps_and_drop_authn() {
    let settings = settings(&[("WIKILEARN_MESSENGER_MFE_VERSION", "v1.2.0")]);
    let manifest = PluginManifest::init(&context(PathBuf::from("/nonexistent"), settings)).unwrap();

    let mut apps = BTreeMap::new();
    apps.insert(
        "authn".to_string(),
        MfeApp::new("https://github.com/openedx/frontend-app-authn.git", 1999, None),
    );
    apps.insert(
        "discussions".to_string(),
        MfeApp::new("https://github.com/openedx/frontend-app-discussions.git", 2002, None),
    );
    apps.insert(
        "learning".to_string(),
        MfeApp::new("https://github.com/openedx/frontend-app-learning.git", 2000, None),
    );

    manifest.mfe_apps.apply(&mut apps);

    assert!(!apps.contains_key("authn"));
    assert!(apps.contains_key("learning"));
    assert_eq!(
        apps["messenger"],
        MfeApp::new(
            "https://github.com/wikimedia/frontend-app-messenger.git",
            2010,
            Some("v1.2.0".to_string())
        )
    );
    assert_eq!(
        apps["discussions"].repository,
        "https://github.com/edly-io/frontend-app-discussions.git"
    );
}

#[test]
fn mfe_changes_tolerate_missing_authn() {
    let manifest = PluginManifest::init(&context(PathBuf::from("/nonexistent"), settings(&[]))).unwrap();
    let mut apps = BTreeMap::new();

    manifest.mfe_apps.apply(&mut apps);

    assert_eq!(apps.len(), 2);
}

#[test]
fn context_for_project_reads_version_and_paths() {
    let temp = TempDir::new().unwrap();
    fs::create_dir_all(temp.path().join("tutorwikilearn")).unwrap();
    fs::write(
        temp.path().join("tutorwikilearn/__about__.py"),
        "__version__ = \"20.1.0\"\n",
    )
    .unwrap();

    let context =
        PluginContext::for_project(temp.path(), &WikilearnConfig::default(), settings(&[]))
            .unwrap();

    assert_eq!(context.version, "20.1.0");
    assert_eq!(
        context.templates_dir,
        temp.path().join("tutorwikilearn/templates")
    );
    assert_eq!(context.patches_dir, temp.path().join("tutorwikilearn/patches"));
}
