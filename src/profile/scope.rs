//! Profile scopes (layers) in ascending override priority.

use crate::error::ProfileError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Configuration layer a profile field can come from.
///
/// Ordering follows priority: `Package < Workspace < User`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProfileScope {
    /// Bundled next to the executable
    Package,
    /// Project-local `config/profiles.yaml`
    Workspace,
    /// Per-user file under the XDG config home
    User,
}

impl ProfileScope {
    pub const ALL: [ProfileScope; 3] = [
        ProfileScope::Package,
        ProfileScope::Workspace,
        ProfileScope::User,
    ];

    /// Merge priority; higher values are applied later and win.
    pub fn priority(self) -> u8 {
        match self {
            ProfileScope::Package => 0,
            ProfileScope::Workspace => 1,
            ProfileScope::User => 2,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ProfileScope::Package => "package",
            ProfileScope::Workspace => "workspace",
            ProfileScope::User => "user",
        }
    }
}

impl fmt::Display for ProfileScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProfileScope {
    type Err = ProfileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "package" => Ok(ProfileScope::Package),
            "workspace" => Ok(ProfileScope::Workspace),
            "user" => Ok(ProfileScope::User),
            _ => Err(ProfileError::UnknownScope(s.to_string())),
        }
    }
}
