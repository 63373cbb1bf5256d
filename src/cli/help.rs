//! CLI help and command-name contract for logging and routing.

use crate::cli::parse::{
    Commands, ConfigCommands, PersonaCommands, ProfileCommands, PromptCommands,
};

/// Command name string for log fields (e.g. "profile.list", "prompt.render").
pub fn command_name(command: &Commands) -> String {
    match command {
        Commands::Profile { command } => format!("profile.{}", profile_command_name(command)),
        Commands::Prompt { command } => format!("prompt.{}", prompt_command_name(command)),
        Commands::Persona { command } => format!("persona.{}", persona_command_name(command)),
        Commands::Config { command } => format!("config.{}", config_command_name(command)),
    }
}

pub fn profile_command_name(command: &ProfileCommands) -> &'static str {
    match command {
        ProfileCommands::List { .. } => "list",
        ProfileCommands::Show { .. } => "show",
        ProfileCommands::Save(_) => "save",
        ProfileCommands::Delete { .. } => "delete",
        ProfileCommands::Resolve { .. } => "resolve",
    }
}

pub fn prompt_command_name(command: &PromptCommands) -> &'static str {
    match command {
        PromptCommands::Render { .. } => "render",
    }
}

pub fn persona_command_name(command: &PersonaCommands) -> &'static str {
    match command {
        PersonaCommands::List { .. } => "list",
        PersonaCommands::Pick { .. } => "pick",
    }
}

pub fn config_command_name(command: &ConfigCommands) -> &'static str {
    match command {
        ConfigCommands::Show => "show",
    }
}
