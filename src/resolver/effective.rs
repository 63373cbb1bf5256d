//! Final run configuration handed to the execution layer.

use crate::params::{ParamValue, Params};
use crate::profile::ProfileSource;
use crate::prompt::quote_argument;
use crate::resolver::model_ref::split_model_reference;
use serde::Serialize;

pub const PROMPT_PARAM: &str = "prompt";
pub const LORA_PARAM: &str = "hf_lora";
/// Params dropped when running the base model alone.
pub const LORA_PARAMS: [&str; 3] = [LORA_PARAM, "lora_uri", "extra_lora"];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EffectiveRunConfig {
    pub profile: Option<String>,
    /// `owner/name` without version
    pub model: String,
    pub version: Option<String>,
    /// `owner/name[:version]`
    pub model_ref: String,
    pub lora: Option<String>,
    pub base_model_only: bool,
    pub rendered_prompt: String,
    /// Persona action text that went into the prompt, if any
    pub persona_action: Option<String>,
    /// `None` when a literal prompt bypassed templating
    pub template: Option<String>,
    pub params: Params,
    pub sources: Vec<ProfileSource>,
}

impl EffectiveRunConfig {
    /// Equivalent `run-model` invocation, prompt first and the remaining
    /// params in key order. Text values are quoted.
    pub fn to_command_line(&self) -> String {
        let (name, embedded) = split_model_reference(&self.model_ref);
        let mut parts = vec![
            "replicate-runner".to_string(),
            "replicate".to_string(),
            "run-model".to_string(),
            name,
        ];
        if let Some(version) = embedded {
            parts.push(version);
        }

        let prompt = self
            .params
            .get(PROMPT_PARAM)
            .and_then(ParamValue::as_str)
            .unwrap_or(&self.rendered_prompt);
        parts.push("--param".to_string());
        parts.push(format!("{}:{}", PROMPT_PARAM, quote_argument(prompt)));

        for (key, value) in self.params.iter().filter(|(k, _)| k.as_str() != PROMPT_PARAM) {
            parts.push("--param".to_string());
            parts.push(match value {
                ParamValue::Text(text) => format!("{}:{}", key, quote_argument(text)),
                other => format!("{}:{}", key, other),
            });
        }

        parts.join(" ")
    }
}
