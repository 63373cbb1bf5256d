//! Configuration System
//!
//! Runner settings, distinct from profile layers: where the profile layers
//! and persona catalog live, the default base model, and logging. Settings
//! merge built-in defaults, the user settings file, the workspace settings
//! file, and `REPLICATE_RUNNER__*` environment variables.

use crate::logging::LoggingConfig;
use crate::profile::{ProfileScope, ProfileSource};
use crate::resolver::DEFAULT_BASE_MODEL;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

mod facade;
mod merge;
mod sources;
pub mod xdg;

pub use facade::ConfigLoader;
pub use sources::workspace_file::workspace_config_path;

/// Root settings structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunnerConfig {
    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub paths: PathsConfig,

    #[serde(default)]
    pub defaults: DefaultsConfig,
}

/// Explicit file locations. Unset entries use the standard locations;
/// relative paths are taken from the workspace root.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PathsConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package_profiles: Option<PathBuf>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workspace_profiles: Option<PathBuf>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_profiles: Option<PathBuf>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub persona_catalog: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Model used when neither the caller nor the profile names one
    #[serde(default = "default_base_model")]
    pub base_model: String,
}

fn default_base_model() -> String {
    DEFAULT_BASE_MODEL.to_string()
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            base_model: default_base_model(),
        }
    }
}

/// Concrete locations after applying settings to a workspace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPaths {
    pub package_profiles: Option<PathBuf>,
    pub workspace_profiles: PathBuf,
    pub user_profiles: Option<PathBuf>,
    /// `None` means the built-in catalog
    pub persona_catalog: Option<PathBuf>,
}

impl ResolvedPaths {
    /// Profile layers in priority order, skipping scopes with no location.
    pub fn profile_sources(&self) -> Vec<ProfileSource> {
        let mut sources = Vec::with_capacity(3);
        if let Some(path) = &self.package_profiles {
            sources.push(ProfileSource::new(ProfileScope::Package, path.clone()));
        }
        sources.push(ProfileSource::new(
            ProfileScope::Workspace,
            self.workspace_profiles.clone(),
        ));
        if let Some(path) = &self.user_profiles {
            sources.push(ProfileSource::new(ProfileScope::User, path.clone()));
        }
        sources
    }
}

impl RunnerConfig {
    pub fn resolve_paths(&self, workspace_root: &Path) -> ResolvedPaths {
        let anchor = |path: &PathBuf| {
            if path.is_absolute() {
                path.clone()
            } else {
                workspace_root.join(path)
            }
        };
        let exe_config = xdg::executable_config_dir();

        ResolvedPaths {
            package_profiles: self
                .paths
                .package_profiles
                .as_ref()
                .map(anchor)
                .or_else(|| exe_config.as_ref().map(|dir| dir.join(xdg::PROFILES_FILE))),
            workspace_profiles: self
                .paths
                .workspace_profiles
                .as_ref()
                .map(anchor)
                .unwrap_or_else(|| workspace_root.join("config").join(xdg::PROFILES_FILE)),
            user_profiles: self
                .paths
                .user_profiles
                .as_ref()
                .map(anchor)
                .or_else(xdg::user_profiles_path),
            persona_catalog: self
                .paths
                .persona_catalog
                .as_ref()
                .map(anchor)
                .or_else(|| exe_config.map(|dir| dir.join(xdg::PERSONA_CATALOG_FILE))),
        }
    }

    /// Settings rendered as TOML for `config show`.
    pub fn to_toml(&self) -> Result<String, crate::error::ProfileError> {
        toml::to_string_pretty(self)
            .map_err(|e| crate::error::ProfileError::ConfigError(e.to_string()))
    }
}
