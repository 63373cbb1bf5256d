//! `owner/name[:version]` model references.

/// Split a model reference into `owner/name` and an optional version.
///
/// Accepts `owner/name:version` and the URL-style `owner/name/version`.
pub fn split_model_reference(model: &str) -> (String, Option<String>) {
    let cleaned = model.trim();

    if let Some((name, version)) = cleaned.split_once(':') {
        let version = Some(version.to_string()).filter(|v| !v.is_empty());
        return (name.to_string(), version);
    }

    let parts: Vec<&str> = cleaned.split('/').collect();
    if parts.len() > 2 {
        let version = parts[2..].join("/");
        return (
            parts[..2].join("/"),
            Some(version).filter(|v| !v.is_empty()),
        );
    }

    (cleaned.to_string(), None)
}

/// `owner/name` or `owner/name:version`.
pub fn format_model_reference(name: &str, version: Option<&str>) -> String {
    match version.filter(|v| !v.is_empty()) {
        Some(version) => format!("{}:{}", name, version),
        None => name.to_string(),
    }
}
