//! Typed on-disk shape of one profile entry in a layer file.
//!
//! ```yaml
//! profiles:
//!   andie:
//!     description: Andie portrait LoRA
//!     model: black-forest-labs/flux-dev-lora
//!     lora: huggingface.co/owner/andie-lora
//!     trigger: andie
//!     prompt_template: "{trigger}, {mood}"
//!     defaults:
//!       subject: a woman in a red coat
//!       persona_tokens: [andie]
//!       persona_enabled: true
//!       params:
//!         guidance: 3.5
//! ```
//!
//! Every field is optional in a single layer; an explicit `null` means the
//! layer does not set that field.

use crate::params::ParamValue;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const FIELD_DESCRIPTION: &str = "description";
pub const FIELD_MODEL: &str = "model";
pub const FIELD_VERSION: &str = "version";
pub const FIELD_LORA: &str = "lora";
pub const FIELD_TRIGGER: &str = "trigger";
pub const FIELD_PROMPT_TEMPLATE: &str = "prompt_template";
pub const FIELD_DEFAULTS: &str = "defaults";
pub const FIELD_SUBJECT: &str = "subject";
pub const FIELD_PARAMS: &str = "params";
pub const FIELD_PERSONA_TOKENS: &str = "persona_tokens";
pub const FIELD_PERSONA_ENABLED: &str = "persona_enabled";

/// Top-level string fields of a profile entry.
pub const TOP_LEVEL_TEXT_FIELDS: [&str; 6] = [
    FIELD_DESCRIPTION,
    FIELD_MODEL,
    FIELD_VERSION,
    FIELD_LORA,
    FIELD_TRIGGER,
    FIELD_PROMPT_TEMPLATE,
];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lora: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trigger: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt_template: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub defaults: Option<RawDefaults>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawDefaults {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<BTreeMap<String, Option<ParamValue>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub persona_tokens: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub persona_enabled: Option<bool>,
}

impl RawProfile {
    /// Validate a YAML mapping against the profile schema.
    pub fn from_mapping(mapping: &serde_yaml::Mapping) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_value(serde_yaml::Value::Mapping(mapping.clone()))
    }
}
