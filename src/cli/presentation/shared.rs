//! Shared presentation helpers.

use crate::error::ProfileError;
use owo_colors::OwoColorize;
use serde::Serialize;

/// Format a section heading with bold/underline.
pub fn format_section_heading(title: &str) -> String {
    format!("{}", title.bold().underline())
}

pub fn to_pretty_json<T: Serialize + ?Sized>(value: &T) -> Result<String, ProfileError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| ProfileError::ConfigError(format!("Failed to render JSON: {}", e)))
}

/// `-` for absent values in tables.
pub(crate) fn or_dash(value: Option<&str>) -> String {
    value.filter(|v| !v.is_empty()).unwrap_or("-").to_string()
}
