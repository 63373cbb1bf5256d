//! Model input parameters: scalar values and `key:value` parsing.

use crate::error::ProfileError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Flat parameter map. Keys are model input names.
pub type Params = BTreeMap<String, ParamValue>;

/// A single scalar model input.
///
/// Profiles only carry scalars under `defaults.params`; lists and mappings
/// are rejected when a layer is loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
}

impl ParamValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParamValue::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// YAML representation used when writing a layer file.
    pub fn to_yaml(&self) -> serde_yaml::Value {
        match self {
            ParamValue::Bool(b) => serde_yaml::Value::Bool(*b),
            ParamValue::Integer(i) => serde_yaml::Value::Number((*i).into()),
            ParamValue::Float(f) => serde_yaml::Value::Number((*f).into()),
            ParamValue::Text(s) => serde_yaml::Value::String(s.clone()),
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Bool(b) => write!(f, "{}", b),
            ParamValue::Integer(i) => write!(f, "{}", i),
            ParamValue::Float(v) => write!(f, "{}", v),
            ParamValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Text(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Text(value)
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        ParamValue::Bool(value)
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        ParamValue::Integer(value)
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        ParamValue::Float(value)
    }
}

/// Infer a scalar from raw CLI text.
///
/// `true`/`false` in any case become booleans, then integers, then finite
/// floats. A value wrapped in matching single or double quotes is kept as
/// text with the quotes stripped. Anything else is text.
pub fn parse_param_value(raw: &str) -> ParamValue {
    let value = raw.trim();
    if value.eq_ignore_ascii_case("true") {
        return ParamValue::Bool(true);
    }
    if value.eq_ignore_ascii_case("false") {
        return ParamValue::Bool(false);
    }
    if let Ok(i) = value.parse::<i64>() {
        return ParamValue::Integer(i);
    }
    if let Ok(f) = value.parse::<f64>() {
        if f.is_finite() {
            return ParamValue::Float(f);
        }
    }
    for quote in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return ParamValue::Text(value[1..value.len() - 1].to_string());
        }
    }
    ParamValue::Text(value.to_string())
}

/// Parse repeated `--param key:value` arguments.
///
/// Splits on the first colon only, so values may contain colons
/// (`hf_lora:huggingface.co/owner/repo:main`). Later keys win.
pub fn parse_params<S: AsRef<str>>(raw: &[S]) -> Result<Params, ProfileError> {
    let mut params = Params::new();
    for item in raw {
        let item = item.as_ref();
        let (key, value) = item
            .split_once(':')
            .ok_or_else(|| ProfileError::InvalidParam(item.to_string()))?;
        let key = key.trim();
        if key.is_empty() {
            return Err(ProfileError::InvalidParam(item.to_string()));
        }
        params.insert(key.to_string(), parse_param_value(value));
    }
    Ok(params)
}
