//! Merge rules: built-in defaults applied before any file or env source.

use crate::resolver::DEFAULT_BASE_MODEL;
use config::Config;
use config::ConfigBuilder;
use config::ConfigError;

/// Create a Config builder with runner defaults applied.
pub fn builder_with_defaults() -> Result<ConfigBuilder<config::builder::DefaultState>, ConfigError>
{
    Config::builder()
        .set_default("logging.level", "warn")?
        .set_default("logging.format", "text")?
        .set_default("logging.output", "stderr")?
        .set_default("defaults.base_model", DEFAULT_BASE_MODEL)
}
