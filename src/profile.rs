//! Profile store: layered profile sources, deep merge with provenance, and
//! the save/unset persistence surface.

pub mod commands;
pub mod merge;
pub mod record;
pub mod schema;
pub mod scope;
pub mod source;
pub mod store;
pub mod update;

pub use commands::{
    ProfileCommandService, ProfileDeleteResult, ProfileListItem, ProfileListResult,
    ProfileSaveResult,
};
pub use merge::Provenance;
pub use record::{ProfileDefaults, ProfileRecord};
pub use scope::ProfileScope;
pub use source::{ProfileLayer, ProfileSource};
pub use store::{load_profiles, ProfileStore};
pub use update::{assignments_to_mapping, parse_assignment, ProfileUpdate};
