//! Settings loader: defaults, user file, workspace file, environment.

use crate::config::merge::merge_policy;
use crate::config::sources::{env, global_file, workspace_file};
use crate::config::RunnerConfig;
use crate::error::ProfileError;
use config::File;
use std::path::Path;
use tracing::debug;

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load settings for `workspace_root`.
    ///
    /// Precedence (highest last): defaults, user settings file, workspace
    /// `config/runner.toml`, `REPLICATE_RUNNER__*` environment variables.
    pub fn load(workspace_root: &Path) -> Result<RunnerConfig, ProfileError> {
        Self::load_with(workspace_root, None)
    }

    /// Like [`ConfigLoader::load`], with an explicit settings file (the
    /// `--config` flag) layered over the workspace file. The file must exist.
    pub fn load_with(
        workspace_root: &Path,
        settings_file: Option<&Path>,
    ) -> Result<RunnerConfig, ProfileError> {
        let mut builder = merge_policy::builder_with_defaults()?;
        builder = global_file::add_to_builder(builder)?;
        builder = workspace_file::add_to_builder(builder, workspace_root)?;
        if let Some(path) = settings_file {
            builder = builder.add_source(File::from(path).required(true));
        }
        builder = env::add_to_builder(builder);

        let config: RunnerConfig = builder.build()?.try_deserialize()?;
        debug!(workspace = %workspace_root.display(), "Loaded runner settings");
        Ok(config)
    }
}
