//! CLI presentation: text and JSON formatters for command results.

mod persona;
mod profile;
mod shared;

pub use persona::{format_persona_list_json, format_persona_list_text};
pub use profile::{
    format_delete_result, format_effective_config_json, format_effective_config_text,
    format_profile_list_json, format_profile_list_text, format_profile_show_json,
    format_profile_show_text, format_save_result,
};
pub use shared::{format_section_heading, to_pretty_json};
