//! Quoting for prompts embedded in composed command strings.

/// Escape embedded double quotes. Nothing else is touched.
pub fn escape_prompt_literal(text: &str) -> String {
    text.replace('"', "\\\"")
}

/// Wrap `text` in double quotes after escaping.
pub fn quote_argument(text: &str) -> String {
    format!("\"{}\"", escape_prompt_literal(text))
}
