//! Layered profile loading, merging, and single-scope persistence

use replicate_runner::error::ProfileError;
use replicate_runner::params::ParamValue;
use replicate_runner::profile::{load_profiles, ProfileScope, ProfileSource, ProfileStore};
use serde_yaml::Mapping;
use tempfile::TempDir;

use crate::integration::write_layer;

const PACKAGE: &str = r#"
profiles:
  andie:
    description: Shipped profile
    model: black-forest-labs/flux-dev-lora
    lora: hf/andie-v1
    trigger: andie
    defaults:
      persona_tokens: [andie]
      params:
        steps: 28
        guidance: 3.5
"#;

const WORKSPACE: &str = r#"
profiles:
  andie:
    lora: hf/andie-v2
    defaults:
      params:
        steps: 40
"#;

const USER: &str = r#"
profiles:
  andie:
    description: null
    defaults:
      subject: andie on a rooftop
  stevie:
    model: owner/other
    lora: hf/stevie
"#;

fn sources(temp: &TempDir) -> Vec<ProfileSource> {
    vec![
        ProfileSource::new(ProfileScope::User, write_layer(temp.path(), "user.yaml", USER)),
        ProfileSource::new(
            ProfileScope::Package,
            write_layer(temp.path(), "package.yaml", PACKAGE),
        ),
        ProfileSource::new(
            ProfileScope::Workspace,
            write_layer(temp.path(), "ws/profiles.yaml", WORKSPACE),
        ),
    ]
}

#[test]
fn test_higher_scopes_win_and_record_provenance() {
    let temp = TempDir::new().unwrap();
    let store = ProfileStore::load(sources(&temp)).unwrap();
    let record = store.resolve("andie").unwrap();

    assert_eq!(record.lora.as_deref(), Some("hf/andie-v2"));
    assert_eq!(record.defaults.params.get("steps"), Some(&ParamValue::Integer(40)));
    assert_eq!(record.defaults.params.get("guidance"), Some(&ParamValue::Float(3.5)));
    assert_eq!(record.defaults.subject.as_deref(), Some("andie on a rooftop"));

    assert_eq!(record.provenance_of("lora"), Some(ProfileScope::Workspace));
    assert_eq!(record.provenance_of("model"), Some(ProfileScope::Package));
    assert_eq!(
        record.provenance_of("defaults.params.steps"),
        Some(ProfileScope::Workspace)
    );
    assert_eq!(
        record.provenance_of("defaults.subject"),
        Some(ProfileScope::User)
    );

    let scopes: Vec<ProfileScope> = record.sources.iter().map(|s| s.scope).collect();
    assert_eq!(
        scopes,
        vec![ProfileScope::Package, ProfileScope::Workspace, ProfileScope::User]
    );
}

#[test]
fn test_null_in_higher_layer_keeps_lower_value() {
    let temp = TempDir::new().unwrap();
    let record = ProfileStore::load(sources(&temp))
        .unwrap()
        .resolve("andie")
        .unwrap();
    assert_eq!(record.description.as_deref(), Some("Shipped profile"));
    assert_eq!(record.provenance_of("description"), Some(ProfileScope::Package));
}

#[test]
fn test_load_profiles_lists_union_of_layers() {
    let temp = TempDir::new().unwrap();
    let profiles = load_profiles(sources(&temp)).unwrap();
    let names: Vec<&str> = profiles.keys().map(String::as_str).collect();
    assert_eq!(names, vec!["andie", "stevie"]);
    assert_eq!(profiles["stevie"].sources.len(), 1);
}

#[test]
fn test_missing_files_are_empty_layers() {
    let temp = TempDir::new().unwrap();
    let store = ProfileStore::load(vec![ProfileSource::new(
        ProfileScope::User,
        temp.path().join("absent.yaml"),
    )])
    .unwrap();
    assert!(store.available_profiles().is_empty());
    assert!(matches!(
        store.resolve("andie"),
        Err(ProfileError::ProfileNotFound(name)) if name == "andie"
    ));
}

#[test]
fn test_malformed_layer_names_scope_and_path() {
    let temp = TempDir::new().unwrap();
    let path = write_layer(temp.path(), "bad.yaml", "profiles: [not, a, mapping]\n");
    let err = ProfileStore::load(vec![ProfileSource::new(ProfileScope::Workspace, path.clone())])
        .unwrap_err();
    match err {
        ProfileError::SourceParse { path: p, .. } => assert_eq!(p, path),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_unknown_profile_field_is_rejected() {
    let temp = TempDir::new().unwrap();
    let path = write_layer(
        temp.path(),
        "typo.yaml",
        "profiles:\n  andie:\n    modle: owner/name\n",
    );
    assert!(matches!(
        ProfileStore::load(vec![ProfileSource::new(ProfileScope::User, path)]),
        Err(ProfileError::SourceParse { .. })
    ));
}

#[test]
fn test_save_touches_only_target_scope() {
    let temp = TempDir::new().unwrap();
    let mut store = ProfileStore::load(sources(&temp)).unwrap();
    let package_before = std::fs::read_to_string(temp.path().join("package.yaml")).unwrap();

    let updates: Mapping = serde_yaml::from_str("defaults:\n  params:\n    steps: 50\n").unwrap();
    let path = store.save(ProfileScope::User, "andie", &updates).unwrap();
    assert_eq!(path, temp.path().join("user.yaml"));

    let package_after = std::fs::read_to_string(temp.path().join("package.yaml")).unwrap();
    assert_eq!(package_before, package_after);

    let record = store.resolve("andie").unwrap();
    assert_eq!(record.defaults.params.get("steps"), Some(&ParamValue::Integer(50)));
    assert_eq!(record.defaults.subject.as_deref(), Some("andie on a rooftop"));

    let reloaded = ProfileStore::load(sources_without_rewrite(&temp))
        .unwrap()
        .resolve("andie")
        .unwrap();
    assert_eq!(reloaded, record);
}

fn sources_without_rewrite(temp: &TempDir) -> Vec<ProfileSource> {
    vec![
        ProfileSource::new(ProfileScope::Package, temp.path().join("package.yaml")),
        ProfileSource::new(ProfileScope::Workspace, temp.path().join("ws/profiles.yaml")),
        ProfileSource::new(ProfileScope::User, temp.path().join("user.yaml")),
    ]
}

#[test]
fn test_unset_reveals_lower_layer() {
    let temp = TempDir::new().unwrap();
    let mut store = ProfileStore::load(sources(&temp)).unwrap();

    store
        .unset(ProfileScope::Workspace, "andie", "defaults.params.steps")
        .unwrap();
    let record = store.resolve("andie").unwrap();
    assert_eq!(record.defaults.params.get("steps"), Some(&ParamValue::Integer(28)));
    assert_eq!(
        record.provenance_of("defaults.params.steps"),
        Some(ProfileScope::Package)
    );

    let err = store
        .unset(ProfileScope::Workspace, "andie", "defaults.params.steps")
        .unwrap_err();
    assert!(matches!(err, ProfileError::InvalidUnsetPath { .. }));
}

#[test]
fn test_save_rejects_invalid_entry() {
    let temp = TempDir::new().unwrap();
    let mut store = ProfileStore::load(sources(&temp)).unwrap();
    let before = std::fs::read_to_string(temp.path().join("user.yaml")).unwrap();

    let updates: Mapping = serde_yaml::from_str("unknown_field: 1\n").unwrap();
    assert!(store.save(ProfileScope::User, "andie", &updates).is_err());
    assert_eq!(
        std::fs::read_to_string(temp.path().join("user.yaml")).unwrap(),
        before
    );
}
