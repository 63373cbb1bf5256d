//! Profile command service: one entry point per profile CLI command.
//!
//! The CLI parses flags, calls one method here, and formats the returned
//! result. No terminal interaction happens in this module.

use crate::error::ProfileError;
use crate::persona::ActionChooser;
use crate::profile::{ProfileRecord, ProfileScope, ProfileStore};
use crate::resolver::{EffectiveRunConfig, OverrideSet, ProfileResolver};
use serde::Serialize;
use serde_yaml::Mapping;
use std::path::PathBuf;

pub struct ProfileCommandService;

/// Result of profile list command.
#[derive(Debug, Clone, Serialize)]
pub struct ProfileListResult {
    pub profiles: Vec<ProfileListItem>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProfileListItem {
    pub name: String,
    pub description: Option<String>,
    pub model: Option<String>,
    pub lora: Option<String>,
    pub scopes: Vec<ProfileScope>,
}

/// Result of profile save command.
#[derive(Debug, Clone, Serialize)]
pub struct ProfileSaveResult {
    pub name: String,
    pub scope: ProfileScope,
    pub path: PathBuf,
    pub updated: bool,
    pub unset: Vec<String>,
}

/// Result of profile delete command.
#[derive(Debug, Clone, Serialize)]
pub struct ProfileDeleteResult {
    pub name: String,
    pub scope: ProfileScope,
    pub path: Option<PathBuf>,
    pub removed: bool,
}

impl ProfileCommandService {
    pub fn list(store: &ProfileStore) -> Result<ProfileListResult, ProfileError> {
        let profiles = store
            .records()?
            .into_values()
            .map(|record| ProfileListItem {
                scopes: record.sources.iter().map(|s| s.scope).collect(),
                name: record.name,
                description: record.description,
                model: record.model,
                lora: record.lora,
            })
            .collect();
        Ok(ProfileListResult { profiles })
    }

    pub fn show(store: &ProfileStore, name: &str) -> Result<ProfileRecord, ProfileError> {
        store.resolve(name)
    }

    /// Apply field updates, then unset paths, in one scope with a single
    /// write.
    pub fn save(
        store: &mut ProfileStore,
        scope: ProfileScope,
        name: &str,
        updates: &Mapping,
        unset: &[String],
    ) -> Result<ProfileSaveResult, ProfileError> {
        if updates.is_empty() && unset.is_empty() {
            return Err(ProfileError::InvalidAssignment {
                input: name.to_string(),
                reason: "nothing to save; pass field flags, <field>=<value>, or --unset"
                    .to_string(),
            });
        }

        let path = store.save_with_unset(scope, name, updates, unset)?;

        Ok(ProfileSaveResult {
            name: name.to_string(),
            scope,
            path,
            updated: !updates.is_empty(),
            unset: unset.to_vec(),
        })
    }

    pub fn delete(
        store: &mut ProfileStore,
        scope: ProfileScope,
        name: &str,
    ) -> Result<ProfileDeleteResult, ProfileError> {
        let removed = store.delete(scope, name)?;
        Ok(ProfileDeleteResult {
            name: name.to_string(),
            scope,
            path: store.source(scope).map(|s| s.path.clone()),
            removed,
        })
    }

    /// Resolve `name` (or an ad-hoc run when `None`) against `overrides`.
    pub fn resolve(
        store: &ProfileStore,
        resolver: &ProfileResolver<'_>,
        name: Option<&str>,
        overrides: &OverrideSet,
        chooser: &mut dyn ActionChooser,
    ) -> Result<EffectiveRunConfig, ProfileError> {
        let record = name.map(|n| store.resolve(n)).transpose()?;
        resolver.resolve(record.as_ref(), overrides, chooser)
    }
}
