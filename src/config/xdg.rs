//! XDG-style locations for user settings and the user profile layer.

use directories::BaseDirs;
use std::path::PathBuf;

pub const APP_DIR: &str = "replicate-runner";
pub const SETTINGS_FILE: &str = "config.toml";
pub const PROFILES_FILE: &str = "profiles.yaml";
pub const PERSONA_CATALOG_FILE: &str = "persona_actions.yaml";

/// `$XDG_CONFIG_HOME`, else the platform config dir, else `$HOME/.config`.
pub fn config_home() -> Option<PathBuf> {
    if let Some(dir) = std::env::var_os("XDG_CONFIG_HOME").filter(|v| !v.is_empty()) {
        return Some(PathBuf::from(dir));
    }
    if let Some(dirs) = BaseDirs::new() {
        return Some(dirs.config_dir().to_path_buf());
    }
    std::env::var_os("HOME")
        .filter(|v| !v.is_empty())
        .map(|home| PathBuf::from(home).join(".config"))
}

pub fn app_config_dir() -> Option<PathBuf> {
    config_home().map(|home| home.join(APP_DIR))
}

pub fn user_settings_path() -> Option<PathBuf> {
    app_config_dir().map(|dir| dir.join(SETTINGS_FILE))
}

pub fn user_profiles_path() -> Option<PathBuf> {
    app_config_dir().map(|dir| dir.join(PROFILES_FILE))
}

/// `config/` beside the running executable; holds the package layer and
/// the shipped persona catalog.
pub fn executable_config_dir() -> Option<PathBuf> {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join("config")))
}
