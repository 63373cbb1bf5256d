//! Integration tests for layered profiles, resolution, and the CLI surface

mod cli_commands;
mod config_loading;
mod profile_layers;
mod resolver_scenarios;
mod test_utils;

pub use test_utils::{with_xdg_env, write_layer};
