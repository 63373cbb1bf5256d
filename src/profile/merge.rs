//! Deep merge of profile layers with per-field provenance.
//!
//! Layers are folded lowest to highest priority:
//! - scalars and sequences from the later layer replace the earlier value
//! - mappings merge key by key, recursively
//! - an explicit `null` leaves whatever a lower layer provided in place
//!
//! Provenance maps the dotted path of every leaf (`defaults.params.steps`)
//! to the scope that last set it. Mappings are not leaves.

use crate::profile::ProfileScope;
use serde_yaml::{Mapping, Value};
use std::collections::BTreeMap;

/// Dotted field path to the scope that contributed the value.
pub type Provenance = BTreeMap<String, ProfileScope>;

/// Render a mapping key as a path segment.
pub fn key_label(key: &Value) -> String {
    match key {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        other => serde_yaml::to_string(other)
            .map(|s| s.trim().to_string())
            .unwrap_or_default(),
    }
}

fn join_path(prefix: &str, segment: &str) -> String {
    if prefix.is_empty() {
        segment.to_string()
    } else {
        format!("{}.{}", prefix, segment)
    }
}

/// Drop provenance for `path` and everything nested below it.
fn clear_provenance(provenance: &mut Provenance, path: &str) {
    let nested = format!("{}.", path);
    provenance.retain(|key, _| key != path && !key.starts_with(&nested));
}

/// Merge one layer's profile entry into the accumulated mapping.
pub fn merge_layer(
    target: &mut Mapping,
    layer: &Mapping,
    scope: ProfileScope,
    provenance: &mut Provenance,
) {
    merge_at(target, layer, scope, "", provenance);
}

fn merge_at(
    target: &mut Mapping,
    layer: &Mapping,
    scope: ProfileScope,
    prefix: &str,
    provenance: &mut Provenance,
) {
    for (key, value) in layer {
        let path = join_path(prefix, &key_label(key));
        match value {
            Value::Null => continue,
            Value::Mapping(child) => {
                if !matches!(target.get(key), Some(Value::Mapping(_))) {
                    clear_provenance(provenance, &path);
                    target.insert(key.clone(), Value::Mapping(Mapping::new()));
                }
                if let Some(Value::Mapping(existing)) = target.get_mut(key) {
                    merge_at(existing, child, scope, &path, provenance);
                }
            }
            other => {
                clear_provenance(provenance, &path);
                target.insert(key.clone(), other.clone());
                provenance.insert(path, scope);
            }
        }
    }
}

/// Plain deep merge used when writing updates into a single layer.
///
/// Same replace rules as [`merge_layer`] except that `null` is written
/// through, so a saved `null` keeps acting as "not set here".
pub fn deep_merge(base: &mut Mapping, overlay: &Mapping) {
    for (key, value) in overlay {
        if let Value::Mapping(child) = value {
            if let Some(Value::Mapping(existing)) = base.get_mut(key) {
                deep_merge(existing, child);
                continue;
            }
        }
        base.insert(key.clone(), value.clone());
    }
}
