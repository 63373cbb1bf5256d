//! Replicate Runner: layered prompt profiles for generative model runs
//!
//! Profiles are merged from package, workspace, and user layers, resolved
//! against per-run overrides, and rendered through a prompt template with
//! optional persona actions drawn from a tagged catalog.

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod params;
pub mod persona;
pub mod profile;
pub mod prompt;
pub mod resolver;
