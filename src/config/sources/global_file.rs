//! User settings file: $XDG_CONFIG_HOME/replicate-runner/config.toml

use crate::config::xdg;
use config::builder::DefaultState;
use config::ConfigBuilder;
use config::ConfigError;
use config::File;
use std::path::PathBuf;
use tracing::debug;

/// Path to the user settings file.
pub fn global_config_path() -> Option<PathBuf> {
    xdg::user_settings_path()
}

/// Add the user settings file to the builder if it exists.
pub fn add_to_builder(
    mut builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    if let Some(path) = global_config_path() {
        if path.exists() {
            builder = builder.add_source(File::from(path.as_path()).required(false));
        } else {
            debug!(config_path = %path.display(), "No user settings file");
        }
    }
    Ok(builder)
}
