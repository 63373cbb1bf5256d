//! CLI domain: parse, route, help, output, and presentation only.
//! No domain orchestration; single route table dispatches to domain services.

mod help;
mod output;
mod parse;
mod presentation;
mod route;

pub use help::command_name;
pub use output::map_error;
pub use parse::{
    Cli, Commands, ConfigCommands, PersonaCommands, ProfileCommands, ProfileSaveArgs,
    PromptCommands, RunArgs,
};
pub use presentation::{
    format_delete_result, format_effective_config_json, format_effective_config_text,
    format_persona_list_json, format_persona_list_text, format_profile_list_json,
    format_profile_list_text, format_profile_show_json, format_profile_show_text,
    format_save_result,
};
pub use route::RunContext;
