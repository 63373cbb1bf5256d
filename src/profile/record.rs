//! Merged, typed profile record.

use crate::error::ProfileError;
use crate::params::Params;
use crate::profile::merge::Provenance;
use crate::profile::schema::{RawDefaults, RawProfile};
use crate::profile::{ProfileScope, ProfileSource};
use serde::Serialize;
use serde_yaml::Mapping;
use std::collections::BTreeSet;

/// Default run inputs declared by a profile.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProfileDefaults {
    pub params: Params,
    pub subject: Option<String>,
    pub persona_tokens: BTreeSet<String>,
    /// `None` when no layer sets it; persona injection is then enabled.
    pub persona_enabled: Option<bool>,
}

impl ProfileDefaults {
    fn from_raw(raw: Option<RawDefaults>) -> Self {
        let raw = raw.unwrap_or_default();
        Self {
            params: raw
                .params
                .unwrap_or_default()
                .into_iter()
                .filter_map(|(key, value)| value.map(|v| (key, v)))
                .collect(),
            subject: raw.subject,
            persona_tokens: raw
                .persona_tokens
                .unwrap_or_default()
                .into_iter()
                .filter(|token| !token.is_empty())
                .collect(),
            persona_enabled: raw.persona_enabled,
        }
    }
}

/// One profile after all layers have been merged.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileRecord {
    pub name: String,
    pub description: Option<String>,
    pub model: Option<String>,
    pub version: Option<String>,
    pub lora: Option<String>,
    pub trigger: Option<String>,
    pub prompt_template: Option<String>,
    pub defaults: ProfileDefaults,
    /// Dotted leaf path to the scope that set it
    pub provenance: Provenance,
    /// Layers that define this profile, lowest priority first
    pub sources: Vec<ProfileSource>,
}

impl ProfileRecord {
    pub(crate) fn from_merged(
        name: &str,
        merged: &Mapping,
        provenance: Provenance,
        sources: Vec<ProfileSource>,
    ) -> Result<Self, ProfileError> {
        let raw = RawProfile::from_mapping(merged).map_err(|e| {
            let layers: Vec<String> = sources
                .iter()
                .map(|s| format!("{} ({})", s.scope, s.path.display()))
                .collect();
            ProfileError::InvalidMergedProfile {
                profile: name.to_string(),
                sources: layers.join(", "),
                message: e.to_string(),
            }
        })?;

        Ok(Self {
            name: name.to_string(),
            description: raw.description,
            model: raw.model,
            version: raw.version,
            lora: raw.lora,
            trigger: raw.trigger,
            prompt_template: raw.prompt_template,
            defaults: ProfileDefaults::from_raw(raw.defaults),
            provenance,
            sources,
        })
    }

    /// Scope that contributed the value at a dotted path.
    pub fn provenance_of(&self, path: &str) -> Option<ProfileScope> {
        self.provenance.get(path).copied()
    }

    /// Trigger word, ignoring an empty string.
    pub fn trigger(&self) -> Option<&str> {
        self.trigger.as_deref().filter(|t| !t.is_empty())
    }

    /// Tokens used to filter persona actions. Falls back to the trigger word
    /// when the profile declares none.
    pub fn persona_tokens(&self) -> BTreeSet<String> {
        if !self.defaults.persona_tokens.is_empty() {
            return self.defaults.persona_tokens.clone();
        }
        self.trigger().map(|t| t.to_string()).into_iter().collect()
    }
}
