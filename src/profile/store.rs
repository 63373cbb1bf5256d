//! Profile store: loads ordered layers, resolves merged records, and writes
//! single-scope updates.

use crate::error::ProfileError;
use crate::profile::merge::{deep_merge, merge_layer, Provenance};
use crate::profile::schema::RawProfile;
use crate::profile::{ProfileLayer, ProfileRecord, ProfileScope, ProfileSource};
use serde_yaml::{Mapping, Value};
use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;
use tracing::{debug, info};

/// Load every profile defined across `sources`, merged by priority.
pub fn load_profiles(
    sources: Vec<ProfileSource>,
) -> Result<BTreeMap<String, ProfileRecord>, ProfileError> {
    ProfileStore::load(sources)?.records()
}

/// Loaded profile layers, lowest priority first.
///
/// Layers are read once per store; `save`, `unset` and `delete` update the
/// in-memory copy after writing so later resolutions see the change.
#[derive(Debug, Clone)]
pub struct ProfileStore {
    layers: Vec<ProfileLayer>,
}

impl ProfileStore {
    /// Load layers from `sources`. Order in the input does not matter; layers
    /// are sorted by scope priority. Missing files become empty layers.
    pub fn load(mut sources: Vec<ProfileSource>) -> Result<Self, ProfileError> {
        sources.sort_by_key(|s| s.priority());
        let layers = sources
            .into_iter()
            .map(ProfileLayer::load)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { layers })
    }

    pub fn sources(&self) -> Vec<&ProfileSource> {
        self.layers.iter().map(|l| &l.source).collect()
    }

    /// Configured source for one scope, if any.
    pub fn source(&self, scope: ProfileScope) -> Option<&ProfileSource> {
        self.layers
            .iter()
            .map(|l| &l.source)
            .find(|source| source.scope == scope)
    }

    /// Sorted union of profile names across all layers.
    pub fn available_profiles(&self) -> Vec<String> {
        let names: BTreeSet<String> = self
            .layers
            .iter()
            .flat_map(|layer| layer.profile_names())
            .collect();
        names.into_iter().collect()
    }

    /// Layers that define `name`, lowest priority first.
    pub fn sources_for(&self, name: &str) -> Vec<ProfileSource> {
        self.layers
            .iter()
            .filter(|layer| layer.profile(name).is_some())
            .map(|layer| layer.source.clone())
            .collect()
    }

    /// Merge `name` across all layers.
    pub fn resolve(&self, name: &str) -> Result<ProfileRecord, ProfileError> {
        let mut merged = Mapping::new();
        let mut provenance = Provenance::new();
        let mut sources = Vec::new();

        for layer in &self.layers {
            if let Some(entry) = layer.profile(name) {
                merge_layer(&mut merged, entry, layer.scope(), &mut provenance);
                sources.push(layer.source.clone());
            }
        }

        if sources.is_empty() {
            return Err(ProfileError::ProfileNotFound(name.to_string()));
        }

        debug!(
            profile = name,
            layers = sources.len(),
            fields = provenance.len(),
            "Resolved profile"
        );
        ProfileRecord::from_merged(name, &merged, provenance, sources)
    }

    /// Every profile, merged.
    pub fn records(&self) -> Result<BTreeMap<String, ProfileRecord>, ProfileError> {
        self.available_profiles()
            .into_iter()
            .map(|name| self.resolve(&name).map(|record| (name, record)))
            .collect()
    }

    fn layer_mut(&mut self, scope: ProfileScope) -> Result<&mut ProfileLayer, ProfileError> {
        self.layers
            .iter_mut()
            .find(|layer| layer.scope() == scope)
            .ok_or_else(|| ProfileError::UnwritableScope {
                scope,
                path: PathBuf::new(),
                message: "no source is configured for this scope".to_string(),
            })
    }

    /// Write `updates` into the `scope` layer's entry for `name`.
    ///
    /// Only the given fields change; other layers are untouched. The
    /// resulting entry must still satisfy the profile schema.
    pub fn save(
        &mut self,
        scope: ProfileScope,
        name: &str,
        updates: &Mapping,
    ) -> Result<PathBuf, ProfileError> {
        self.save_with_unset(scope, name, updates, &[])
    }

    /// Remove the leaf at `dotted_path` from the `scope` layer's entry for
    /// `name`. Parent mappings left empty are pruned. Lower layers then show
    /// through on the next resolution.
    pub fn unset(
        &mut self,
        scope: ProfileScope,
        name: &str,
        dotted_path: &str,
    ) -> Result<PathBuf, ProfileError> {
        self.save_with_unset(scope, name, &Mapping::new(), &[dotted_path.to_string()])
    }

    /// Merge `updates`, then remove every path in `unset`, and write the
    /// layer once. Nothing is written unless every step succeeds.
    pub fn save_with_unset(
        &mut self,
        scope: ProfileScope,
        name: &str,
        updates: &Mapping,
        unset: &[String],
    ) -> Result<PathBuf, ProfileError> {
        let layer = self.layer_mut(scope)?;
        let mut entry = layer.profile(name).cloned().unwrap_or_default();
        deep_merge(&mut entry, updates);

        for dotted_path in unset {
            let segments: Vec<&str> = dotted_path.split('.').collect();
            if segments.iter().any(|s| s.is_empty()) || !remove_leaf(&mut entry, &segments) {
                return Err(ProfileError::InvalidUnsetPath {
                    scope,
                    profile: name.to_string(),
                    path: dotted_path.clone(),
                });
            }
        }

        RawProfile::from_mapping(&entry).map_err(|e| ProfileError::InvalidAssignment {
            input: name.to_string(),
            reason: e.to_string(),
        })?;

        let mut updated = layer.clone();
        updated.set_profile(name, entry);
        updated.write()?;
        *layer = updated;

        if !updates.is_empty() {
            info!(profile = name, scope = %scope, path = %layer.path().display(), "Saved profile");
        }
        for dotted_path in unset {
            info!(
                profile = name,
                scope = %scope,
                field = %dotted_path,
                "Unset profile field; lower layers now apply"
            );
        }
        Ok(layer.path().to_path_buf())
    }

    /// Remove a profile from one scope. Returns false when the scope does not
    /// define it.
    pub fn delete(&mut self, scope: ProfileScope, name: &str) -> Result<bool, ProfileError> {
        let layer = self.layer_mut(scope)?;
        if layer.profile(name).is_none() {
            return Ok(false);
        }
        let mut updated = layer.clone();
        updated.remove_profile(name);
        updated.write()?;
        *layer = updated;
        info!(profile = name, scope = %scope, "Deleted profile from scope");
        Ok(true)
    }
}

/// Remove a non-mapping leaf. Returns false when the path does not reach one.
fn remove_leaf(mapping: &mut Mapping, segments: &[&str]) -> bool {
    let Some((first, rest)) = segments.split_first() else {
        return false;
    };

    if rest.is_empty() {
        return match mapping.get(*first) {
            Some(Value::Mapping(_)) | None => false,
            Some(_) => mapping.remove(*first).is_some(),
        };
    }

    let (removed, now_empty) = match mapping.get_mut(*first) {
        Some(Value::Mapping(child)) => {
            let removed = remove_leaf(child, rest);
            (removed, child.is_empty())
        }
        _ => return false,
    };
    if removed && now_empty {
        mapping.remove(*first);
    }
    removed
}
