//! Field updates for `profile save`: typed builder and `<field>=<value>`
//! assignments, both producing a YAML mapping for [`ProfileStore::save`].
//!
//! [`ProfileStore::save`]: crate::profile::ProfileStore::save

use crate::error::ProfileError;
use crate::params::{parse_param_value, ParamValue, Params};
use crate::profile::schema::{
    FIELD_DEFAULTS, FIELD_DESCRIPTION, FIELD_LORA, FIELD_MODEL, FIELD_PARAMS,
    FIELD_PERSONA_ENABLED, FIELD_PERSONA_TOKENS, FIELD_PROMPT_TEMPLATE, FIELD_SUBJECT,
    FIELD_TRIGGER, FIELD_VERSION, TOP_LEVEL_TEXT_FIELDS,
};
use serde_yaml::{Mapping, Value};

/// Typed set of fields to write into one layer.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub description: Option<String>,
    pub model: Option<String>,
    pub version: Option<String>,
    pub lora: Option<String>,
    pub trigger: Option<String>,
    pub prompt_template: Option<String>,
    pub subject: Option<String>,
    pub persona_tokens: Option<Vec<String>>,
    pub persona_enabled: Option<bool>,
    pub params: Params,
}

impl ProfileUpdate {
    pub fn is_empty(&self) -> bool {
        self.to_mapping().is_empty()
    }

    pub fn to_mapping(&self) -> Mapping {
        let mut payload = Mapping::new();
        let text_fields = [
            (FIELD_DESCRIPTION, &self.description),
            (FIELD_MODEL, &self.model),
            (FIELD_VERSION, &self.version),
            (FIELD_LORA, &self.lora),
            (FIELD_TRIGGER, &self.trigger),
            (FIELD_PROMPT_TEMPLATE, &self.prompt_template),
        ];
        for (field, value) in text_fields {
            if let Some(value) = value {
                payload.insert(field.into(), Value::String(value.clone()));
            }
        }

        let mut defaults = Mapping::new();
        if let Some(subject) = &self.subject {
            defaults.insert(FIELD_SUBJECT.into(), Value::String(subject.clone()));
        }
        if let Some(tokens) = &self.persona_tokens {
            defaults.insert(FIELD_PERSONA_TOKENS.into(), token_sequence(tokens));
        }
        if let Some(enabled) = self.persona_enabled {
            defaults.insert(FIELD_PERSONA_ENABLED.into(), Value::Bool(enabled));
        }
        if !self.params.is_empty() {
            let params: Mapping = self
                .params
                .iter()
                .map(|(key, value)| (Value::String(key.clone()), value.to_yaml()))
                .collect();
            defaults.insert(FIELD_PARAMS.into(), Value::Mapping(params));
        }
        if !defaults.is_empty() {
            payload.insert(FIELD_DEFAULTS.into(), Value::Mapping(defaults));
        }
        payload
    }
}

fn token_sequence(tokens: &[String]) -> Value {
    Value::Sequence(
        tokens
            .iter()
            .map(|t| t.trim())
            .filter(|t| !t.is_empty())
            .map(|t| Value::String(t.to_string()))
            .collect(),
    )
}

/// Parse a `<dotted.field>=<value>` argument.
///
/// Text fields keep the value verbatim, `defaults.persona_enabled` must be
/// a boolean, `defaults.persona_tokens` is comma separated, and
/// `defaults.params.<key>` infers a scalar like `--param`.
pub fn parse_assignment(input: &str) -> Result<(Vec<String>, Value), ProfileError> {
    let invalid = |reason: &str| ProfileError::InvalidAssignment {
        input: input.to_string(),
        reason: reason.to_string(),
    };

    let (field, raw) = input
        .split_once('=')
        .ok_or_else(|| invalid("expected <field>=<value>"))?;
    let segments: Vec<String> = field.trim().split('.').map(str::to_string).collect();
    let parts: Vec<&str> = segments.iter().map(String::as_str).collect();

    let value = match parts.as_slice() {
        [top] if TOP_LEVEL_TEXT_FIELDS.contains(top) => Value::String(raw.to_string()),
        [FIELD_DEFAULTS, FIELD_SUBJECT] => Value::String(raw.to_string()),
        [FIELD_DEFAULTS, FIELD_PERSONA_ENABLED] => match parse_param_value(raw) {
            ParamValue::Bool(b) => Value::Bool(b),
            _ => return Err(invalid("persona_enabled must be true or false")),
        },
        [FIELD_DEFAULTS, FIELD_PERSONA_TOKENS] => {
            let tokens: Vec<String> = raw.split(',').map(str::to_string).collect();
            token_sequence(&tokens)
        }
        [FIELD_DEFAULTS, FIELD_PARAMS, key] if !key.is_empty() => parse_param_value(raw).to_yaml(),
        _ => return Err(invalid("unknown profile field")),
    };
    Ok((segments, value))
}

/// Fold assignments into one update mapping. Later assignments win.
pub fn assignments_to_mapping<S: AsRef<str>>(inputs: &[S]) -> Result<Mapping, ProfileError> {
    let mut mapping = Mapping::new();
    for input in inputs {
        let (segments, value) = parse_assignment(input.as_ref())?;
        insert_path(&mut mapping, &segments, value);
    }
    Ok(mapping)
}

fn insert_path(mapping: &mut Mapping, segments: &[String], value: Value) {
    let Some((first, rest)) = segments.split_first() else {
        return;
    };
    let key = Value::String(first.clone());
    if rest.is_empty() {
        mapping.insert(key, value);
        return;
    }
    if !matches!(mapping.get(&key), Some(Value::Mapping(_))) {
        mapping.insert(key.clone(), Value::Mapping(Mapping::new()));
    }
    if let Some(Value::Mapping(child)) = mapping.get_mut(&key) {
        insert_path(child, rest, value);
    }
}
