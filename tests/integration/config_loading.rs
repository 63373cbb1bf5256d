//! Runner settings: file layering, environment overrides, and path resolution

use replicate_runner::config::{workspace_config_path, xdg, ConfigLoader, RunnerConfig};
use replicate_runner::profile::ProfileScope;
use replicate_runner::resolver::DEFAULT_BASE_MODEL;
use std::path::PathBuf;
use tempfile::TempDir;

use crate::integration::{with_xdg_env, write_layer};

#[test]
fn test_defaults_without_any_files() {
    let temp = TempDir::new().unwrap();
    with_xdg_env(&temp, || {
        let workspace = temp.path().join("empty-ws");
        std::fs::create_dir_all(&workspace).unwrap();
        let config = ConfigLoader::load(&workspace).unwrap();
        assert_eq!(config.defaults.base_model, DEFAULT_BASE_MODEL);
        assert_eq!(config.logging.level, "warn");
        assert_eq!(config.logging.format, "text");
    });
}

#[test]
fn test_explicit_settings_file_wins_over_workspace() {
    let temp = TempDir::new().unwrap();
    with_xdg_env(&temp, || {
        let workspace = temp.path().join("ws");
        write_layer(
            &workspace,
            "config/runner.toml",
            "[defaults]\nbase_model = \"ws/model\"\n[logging]\nformat = \"json\"\n",
        );
        let explicit = write_layer(
            temp.path(),
            "explicit.toml",
            "[defaults]\nbase_model = \"explicit/model\"\n",
        );

        let config = ConfigLoader::load_with(&workspace, Some(&explicit)).unwrap();
        assert_eq!(config.defaults.base_model, "explicit/model");
        assert_eq!(config.logging.format, "json");
    });
}

#[test]
fn test_missing_explicit_settings_file_is_an_error() {
    let temp = TempDir::new().unwrap();
    with_xdg_env(&temp, || {
        let missing = temp.path().join("nope.toml");
        assert!(ConfigLoader::load_with(temp.path(), Some(&missing)).is_err());
    });
}

#[test]
fn test_user_settings_live_under_config_home() {
    let temp = TempDir::new().unwrap();
    with_xdg_env(&temp, || {
        assert_eq!(
            xdg::user_settings_path().unwrap(),
            temp.path().join("replicate-runner").join("config.toml")
        );
        write_layer(
            temp.path(),
            "replicate-runner/config.toml",
            "[paths]\nuser_profiles = \"/elsewhere/profiles.yaml\"\n",
        );
        let config = ConfigLoader::load(temp.path()).unwrap();
        let paths = config.resolve_paths(temp.path());
        assert_eq!(
            paths.user_profiles,
            Some(PathBuf::from("/elsewhere/profiles.yaml"))
        );
    });
}

#[test]
fn test_workspace_settings_path() {
    let root = PathBuf::from("/work");
    assert_eq!(workspace_config_path(&root), root.join("config").join("runner.toml"));
}

#[test]
fn test_explicit_paths_skip_unconfigured_scopes() {
    let temp = TempDir::new().unwrap();
    with_xdg_env(&temp, || {
        let mut config = RunnerConfig::default();
        config.paths.workspace_profiles = Some(PathBuf::from("profiles/team.yaml"));
        let paths = config.resolve_paths(temp.path());
        assert_eq!(
            paths.workspace_profiles,
            temp.path().join("profiles/team.yaml")
        );
        let sources = paths.profile_sources();
        assert!(sources.iter().any(|s| s.scope == ProfileScope::Workspace));
        assert_eq!(sources.last().map(|s| s.scope), Some(ProfileScope::User));
    });
}
