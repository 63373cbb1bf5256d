//! Profile sources: one YAML file per scope.

use crate::error::ProfileError;
use crate::profile::merge::key_label;
use crate::profile::schema::RawProfile;
use crate::profile::ProfileScope;
use serde::Serialize;
use serde_yaml::{Mapping, Value};
use std::path::{Path, PathBuf};
use tracing::debug;

pub const PROFILES_KEY: &str = "profiles";

/// Location of one configuration layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileSource {
    pub scope: ProfileScope,
    pub path: PathBuf,
}

impl ProfileSource {
    pub fn new(scope: ProfileScope, path: impl Into<PathBuf>) -> Self {
        Self {
            scope,
            path: path.into(),
        }
    }

    pub fn priority(&self) -> u8 {
        self.scope.priority()
    }
}

/// A loaded layer: the whole document (so saves keep unrelated top-level
/// keys) plus validated access to its `profiles` mapping.
#[derive(Debug, Clone)]
pub struct ProfileLayer {
    pub source: ProfileSource,
    document: Mapping,
}

impl ProfileLayer {
    /// Read and validate a layer. A missing file is an empty layer.
    pub fn load(source: ProfileSource) -> Result<Self, ProfileError> {
        if !source.path.exists() {
            debug!(
                scope = %source.scope,
                path = %source.path.display(),
                "Profile source not found; treating as empty layer"
            );
            return Ok(Self {
                source,
                document: Mapping::new(),
            });
        }

        let content = std::fs::read_to_string(&source.path)
            .map_err(|e| parse_error(&source, e.to_string()))?;
        let document = match serde_yaml::from_str::<Value>(&content)
            .map_err(|e| parse_error(&source, e.to_string()))?
        {
            Value::Null => Mapping::new(),
            Value::Mapping(mapping) => mapping,
            _ => {
                return Err(parse_error(
                    &source,
                    "expected a mapping at the top level".to_string(),
                ))
            }
        };

        let layer = Self { source, document };
        layer.validate()?;
        debug!(
            scope = %layer.source.scope,
            path = %layer.source.path.display(),
            profiles = layer.profile_names().len(),
            "Loaded profile source"
        );
        Ok(layer)
    }

    fn validate(&self) -> Result<(), ProfileError> {
        let profiles = match self.document.get(PROFILES_KEY) {
            None | Some(Value::Null) => return Ok(()),
            Some(Value::Mapping(profiles)) => profiles,
            Some(_) => {
                return Err(parse_error(
                    &self.source,
                    "'profiles' must be a mapping of profile name to fields".to_string(),
                ))
            }
        };

        for (name, entry) in profiles {
            let name = match name {
                Value::String(name) => name,
                other => {
                    return Err(parse_error(
                        &self.source,
                        format!("profile name '{}' must be a string", key_label(other)),
                    ))
                }
            };
            match entry {
                Value::Null => {}
                Value::Mapping(fields) => {
                    RawProfile::from_mapping(fields).map_err(|e| {
                        parse_error(&self.source, format!("profile '{}': {}", name, e))
                    })?;
                }
                _ => {
                    return Err(parse_error(
                        &self.source,
                        format!("profile '{}' must be a mapping", name),
                    ))
                }
            }
        }
        Ok(())
    }

    pub fn scope(&self) -> ProfileScope {
        self.source.scope
    }

    pub fn path(&self) -> &Path {
        &self.source.path
    }

    /// Profile entry for `name` in this layer, if the layer defines one.
    pub fn profile(&self, name: &str) -> Option<&Mapping> {
        match self.document.get(PROFILES_KEY)? {
            Value::Mapping(profiles) => match profiles.get(name)? {
                Value::Mapping(entry) => Some(entry),
                _ => None,
            },
            _ => None,
        }
    }

    pub fn profile_names(&self) -> Vec<String> {
        match self.document.get(PROFILES_KEY) {
            Some(Value::Mapping(profiles)) => profiles
                .iter()
                .filter(|(_, entry)| entry.is_mapping())
                .filter_map(|(name, _)| name.as_str().map(str::to_string))
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Replace the entry for `name`, creating the `profiles` mapping if needed.
    pub(crate) fn set_profile(&mut self, name: &str, entry: Mapping) {
        let key = Value::String(PROFILES_KEY.to_string());
        if !matches!(self.document.get(&key), Some(Value::Mapping(_))) {
            self.document.insert(key.clone(), Value::Mapping(Mapping::new()));
        }
        if let Some(Value::Mapping(profiles)) = self.document.get_mut(&key) {
            profiles.insert(Value::String(name.to_string()), Value::Mapping(entry));
        }
    }

    /// Remove the entry for `name`. Drops `profiles` once it is empty.
    pub(crate) fn remove_profile(&mut self, name: &str) -> bool {
        let removed = match self.document.get_mut(PROFILES_KEY) {
            Some(Value::Mapping(profiles)) => profiles.remove(name).is_some(),
            _ => false,
        };
        if removed {
            let now_empty = matches!(
                self.document.get(PROFILES_KEY),
                Some(Value::Mapping(profiles)) if profiles.is_empty()
            );
            if now_empty {
                self.document.remove(PROFILES_KEY);
            }
        }
        removed
    }

    /// Write the document back to disk, creating parent directories.
    pub(crate) fn write(&self) -> Result<(), ProfileError> {
        let unwritable = |message: String| ProfileError::UnwritableScope {
            scope: self.source.scope,
            path: self.source.path.clone(),
            message,
        };

        if let Some(parent) = self.source.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| unwritable(e.to_string()))?;
            }
        }
        let content = serde_yaml::to_string(&self.document).map_err(|e| unwritable(e.to_string()))?;
        std::fs::write(&self.source.path, content).map_err(|e| unwritable(e.to_string()))?;
        debug!(
            scope = %self.source.scope,
            path = %self.source.path.display(),
            "Wrote profile source"
        );
        Ok(())
    }
}

fn parse_error(source: &ProfileSource, message: String) -> ProfileError {
    ProfileError::SourceParse {
        scope: source.scope.to_string(),
        path: source.path.clone(),
        message,
    }
}
