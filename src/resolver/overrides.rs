//! Caller-supplied overrides for one resolution.

use crate::params::Params;
use serde::Serialize;

/// Values given on the command line for a single run.
///
/// Every text field treats an empty string the same as an absent flag.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct OverrideSet {
    pub params: Params,
    /// Literal prompt; skips template rendering entirely
    pub prompt: Option<String>,
    pub model: Option<String>,
    pub version: Option<String>,
    pub lora: Option<String>,
    pub subject: Option<String>,
    pub mood: Option<String>,
    pub action: Option<String>,
    pub camera: Option<String>,
    pub lighting: Option<String>,
    pub base_model_only: bool,
    /// `Some(false)` for `--no-persona-action`, `Some(true)` for
    /// `--persona-action`
    pub persona_action: Option<bool>,
}

pub(crate) fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

impl OverrideSet {
    pub fn prompt(&self) -> Option<&str> {
        present(&self.prompt)
    }

    pub fn model(&self) -> Option<&str> {
        present(&self.model)
    }

    pub fn version(&self) -> Option<&str> {
        present(&self.version)
    }

    pub fn lora(&self) -> Option<&str> {
        present(&self.lora)
    }

    pub fn subject(&self) -> Option<&str> {
        present(&self.subject)
    }
}
