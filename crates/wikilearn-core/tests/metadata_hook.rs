mod support;

use std::fs;
use std::path::Path;

use tempfile::TempDir;

use support::StubResolver;
use wikilearn_core::config::{WikilearnConfig, load_config};
use wikilearn_core::error::PinError;
use wikilearn_core::metadata::{MetadataHook, load_requirements};
use wikilearn_core::pinning::ReleasePinner;

const DEV_IN: &str = "\
# Custom plugins tracked on their development branch

repoA@develop

# Already released
repoB@v1.5.0
";

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn project() -> TempDir {
    let temp = TempDir::new().unwrap();
    write(
        temp.path(),
        "tutorwikilearn/__about__.py",
        "__version__ = \"20.0.3\"\n",
    );
    write(
        temp.path(),
        "requirements/base.in",
        "# base\ntutor>=20.0.0,<21.0.0\ntutor-mfe\n\npython-dotenv\n",
    );
    write(temp.path(), "requirements/dev.in", DEV_IN);
    temp
}

#[test]
fn requirements_fixture_roundtrip_through_pinner() {
    let temp = project();

    let declarations = load_requirements(&temp.path().join("requirements/dev.in")).unwrap();
    assert_eq!(declarations, vec!["repoA@develop", "repoB@v1.5.0"]);

    let resolver = StubResolver::new().with_tag("repoA", "v2.0.0");
    let pinned = ReleasePinner::new(&resolver).resolve(&declarations).unwrap();

    assert_eq!(pinned, vec!["repoA@v2.0.0", "repoB@v1.5.0"]);
}

#[test]
fn update_builds_full_metadata() {
    let temp = project();
    let resolver = StubResolver::new().with_tag("repoA", "v2.0.0");
    let hook = MetadataHook::new(temp.path(), WikilearnConfig::default());

    let metadata = hook.update(&resolver).unwrap();

    assert_eq!(metadata.version, "20.0.3");
    assert_eq!(
        metadata.dependencies,
        vec!["tutor>=20.0.0,<21.0.0", "tutor-mfe", "python-dotenv"]
    );
    assert_eq!(
        metadata.optional_dependencies.get("release"),
        Some(&vec!["repoA@v2.0.0".to_string(), "repoB@v1.5.0".to_string()])
    );
    assert_eq!(resolver.call_count(), 2);
}

#[test]
fn metadata_serializes_with_packaging_keys() {
    let temp = project();
    let resolver = StubResolver::new().with_tag("repoA", "v2.0.0");
    let metadata = MetadataHook::new(temp.path(), WikilearnConfig::default())
        .update(&resolver)
        .unwrap();

    let json = serde_json::to_value(&metadata).unwrap();

    assert_eq!(json["version"], "20.0.3");
    assert_eq!(json["optional-dependencies"]["release"][0], "repoA@v2.0.0");
}

#[test]
fn update_fails_on_invalid_declaration() {
    let temp = project();
    write(temp.path(), "requirements/dev.in", "repoA@develop\nrepoB\n");
    let resolver = StubResolver::new();
    let hook = MetadataHook::new(temp.path(), WikilearnConfig::default());

    let err = hook.update(&resolver).unwrap_err();

    assert_eq!(
        err.downcast_ref::<PinError>(),
        Some(&PinError::InvalidDependencyFormat {
            declaration: "repoB".to_string()
        })
    );
}

#[test]
fn update_fails_when_resolution_fails() {
    let temp = project();
    let resolver = StubResolver::new().failing_on("repoB");
    let hook = MetadataHook::new(temp.path(), WikilearnConfig::default());

    let err = hook.update(&resolver).unwrap_err();

    assert!(matches!(
        err.downcast_ref::<PinError>(),
        Some(PinError::ResolutionFailed { .. })
    ));
}

#[test]
fn update_fails_without_version() {
    let temp = project();
    write(
        temp.path(),
        "tutorwikilearn/__about__.py",
        "__package_version__ = \"1.0\"\n",
    );
    let resolver = StubResolver::new();
    let hook = MetadataHook::new(temp.path(), WikilearnConfig::default());

    let err = hook.update(&resolver).unwrap_err();

    assert!(err.to_string().contains("__version__"));
    assert_eq!(resolver.call_count(), 0);
}

#[test]
fn update_fails_on_missing_requirements_file() {
    let temp = project();
    fs::remove_file(temp.path().join("requirements/base.in")).unwrap();
    let resolver = StubResolver::new();

    let err = MetadataHook::new(temp.path(), WikilearnConfig::default())
        .update(&resolver)
        .unwrap_err();

    assert!(err.to_string().contains("base.in"));
}

#[test]
fn config_file_changes_paths_marker_and_group() {
    let temp = project();
    write(
        temp.path(),
        "wikilearn.toml",
        r#"
[release]
development_marker = "main"
group = "pinned"

[paths]
release_requirements = "custom.txt"
"#,
    );
    write(temp.path(), "requirements/custom.txt", "repoA@main\n");

    let config = load_config(temp.path()).unwrap();
    let resolver = StubResolver::new().with_tag("repoA", "v5.0.0");
    let metadata = MetadataHook::new(temp.path(), config)
        .update(&resolver)
        .unwrap();

    assert_eq!(
        metadata.optional_dependencies.get("pinned"),
        Some(&vec!["repoA@v5.0.0".to_string()])
    );
    assert!(!metadata.optional_dependencies.contains_key("release"));
}

#[test]
fn missing_config_file_uses_defaults() {
    let temp = TempDir::new().unwrap();
    let config = load_config(temp.path()).unwrap();
    assert_eq!(config, WikilearnConfig::default());
}
