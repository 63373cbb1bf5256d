//! Error types for profile loading, resolution, and prompt rendering.

use crate::profile::ProfileScope;
use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by the profile store, resolver, catalog, and CLI shell.
///
/// Every variant is fatal to the current resolution. Variants carry enough
/// context (scope, path, field) for the CLI to print a precise message.
#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("Failed to parse {scope} source {path}: {message}")]
    SourceParse {
        scope: String,
        path: PathBuf,
        message: String,
    },

    #[error("Unable to write {scope} scope at {path}: {message}. Check permissions or choose another scope.")]
    UnwritableScope {
        scope: ProfileScope,
        path: PathBuf,
        message: String,
    },

    #[error("Cannot unset '{path}' on profile '{profile}' in {scope} scope: no such field")]
    InvalidUnsetPath {
        scope: ProfileScope,
        profile: String,
        path: String,
    },

    #[error("Cannot combine {first} with {second}")]
    ConflictingOptions {
        first: &'static str,
        second: &'static str,
    },

    #[error("No LoRA configured for {profile}. Provide --lora or confirm the base model with --base-model-only.")]
    MissingLora { profile: String },

    #[error("Prompt template for {profile} requires a subject, but none was provided.")]
    MissingSubject { profile: String },

    #[error("Prompt template for {profile} requires a trigger or subject for {{subject_or_trigger}}.")]
    MissingSubjectOrTrigger { profile: String },

    #[error("Persona action requested but the action catalog is empty")]
    EmptyCatalog,

    #[error("Profile '{profile}' is invalid after merging {sources}: {message}")]
    InvalidMergedProfile {
        profile: String,
        sources: String,
        message: String,
    },

    #[error("Profile '{0}' not found in any scope")]
    ProfileNotFound(String),

    #[error("Unknown scope '{0}'. Valid scopes: package, workspace, user")]
    UnknownScope(String),

    #[error("Invalid param format: '{0}'. Expected 'key:value'")]
    InvalidParam(String),

    #[error("Invalid field assignment '{input}': {reason}")]
    InvalidAssignment { input: String, reason: String },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Failed to get user input: {0}")]
    Prompt(String),
}

impl From<config::ConfigError> for ProfileError {
    fn from(err: config::ConfigError) -> Self {
        ProfileError::ConfigError(err.to_string())
    }
}

impl From<dialoguer::Error> for ProfileError {
    fn from(err: dialoguer::Error) -> Self {
        ProfileError::Prompt(err.to_string())
    }
}
