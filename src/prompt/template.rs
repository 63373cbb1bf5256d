//! `{token}` scanning.
//!
//! A token is `{` followed by one or more characters that are not braces,
//! then `}`. Matches are left to right and non-overlapping; a brace that
//! does not open a well-formed token is copied through as text.

use regex::{Captures, Regex};
use std::collections::BTreeSet;
use std::sync::OnceLock;

fn token_pattern() -> &'static Regex {
    static TOKEN_PATTERN: OnceLock<Regex> = OnceLock::new();
    TOKEN_PATTERN.get_or_init(|| Regex::new(r"\{([^{}]+)\}").expect("token pattern is valid"))
}

/// Names of every token in `template`.
pub fn extract_tokens(template: &str) -> BTreeSet<String> {
    token_pattern()
        .captures_iter(template)
        .map(|caps| caps[1].to_string())
        .collect()
}

/// Replace tokens for which `resolve` returns a value; leave the others as
/// literal `{name}` text.
pub fn substitute<F>(template: &str, mut resolve: F) -> String
where
    F: FnMut(&str) -> Option<String>,
{
    token_pattern()
        .replace_all(template, |caps: &Captures| {
            resolve(&caps[1]).unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}
