//! CLI parse: clap types for replicate-runner. No behavior; definitions only.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Replicate Runner CLI - layered prompt profiles for model runs
#[derive(Parser, Debug)]
#[command(name = "replicate-runner")]
#[command(about = "Resolve layered prompt profiles into rendered prompts and run parameters")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Workspace root directory
    #[arg(long, default_value = ".")]
    pub workspace: PathBuf,

    /// Settings file layered over the user and workspace settings
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging (debug level)
    #[arg(long, default_value = "false")]
    pub verbose: bool,

    /// Disable logging entirely
    #[arg(long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output is "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage saved prompt profiles
    Profile {
        #[command(subcommand)]
        command: ProfileCommands,
    },
    /// Render prompts without a saved profile or from one
    Prompt {
        #[command(subcommand)]
        command: PromptCommands,
    },
    /// Inspect the persona action catalog
    Persona {
        #[command(subcommand)]
        command: PersonaCommands,
    },
    /// Runner settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum ProfileCommands {
    /// List profiles across all scopes
    List {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Show a merged profile with the scope behind each field
    Show {
        /// Profile name
        name: String,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Create or update a profile in one scope
    Save(ProfileSaveArgs),
    /// Remove a profile from one scope
    Delete {
        /// Profile name
        name: String,
        /// Scope to delete from (package, workspace, user)
        #[arg(long, default_value = "user")]
        scope: String,
        /// Skip confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// Resolve a profile into the effective run configuration
    Resolve {
        /// Profile name
        name: String,
        #[command(flatten)]
        run: RunArgs,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
}

#[derive(Args, Debug, Clone)]
pub struct ProfileSaveArgs {
    /// Profile name
    pub name: String,

    /// Field assignments, e.g. defaults.params.lora_scale=0.8
    #[arg(value_name = "FIELD=VALUE")]
    pub assignments: Vec<String>,

    /// Scope to write (package, workspace, user)
    #[arg(long, default_value = "user")]
    pub scope: String,

    #[arg(long)]
    pub description: Option<String>,

    /// Model reference (owner/name or owner/name:version)
    #[arg(long)]
    pub model: Option<String>,

    /// Model version
    #[arg(long)]
    pub version: Option<String>,

    /// LoRA reference
    #[arg(long)]
    pub lora: Option<String>,

    /// Trigger word for the LoRA
    #[arg(long)]
    pub trigger: Option<String>,

    /// Prompt template with {token} placeholders
    #[arg(long)]
    pub prompt_template: Option<String>,

    /// Default subject
    #[arg(long)]
    pub subject: Option<String>,

    /// Persona tokens (repeatable or comma separated)
    #[arg(long = "persona-token", value_delimiter = ',')]
    pub persona_tokens: Vec<String>,

    /// Enable or disable persona action injection by default
    #[arg(long)]
    pub persona_enabled: Option<bool>,

    /// Default model input (key:value, repeatable)
    #[arg(long = "param", value_name = "KEY:VALUE")]
    pub params: Vec<String>,

    /// Remove a field from this scope (dotted path, repeatable)
    #[arg(long = "unset", value_name = "PATH")]
    pub unset: Vec<String>,
}

/// Resolver inputs shared by `profile resolve` and `prompt render`.
#[derive(Args, Debug, Clone, Default)]
pub struct RunArgs {
    /// Model input override (key:value, repeatable)
    #[arg(long = "param", value_name = "KEY:VALUE")]
    pub params: Vec<String>,

    /// Literal prompt; skips the template
    #[arg(long)]
    pub prompt: Option<String>,

    /// Model reference override
    #[arg(long)]
    pub model: Option<String>,

    /// Model version override
    #[arg(long)]
    pub version: Option<String>,

    /// LoRA reference override
    #[arg(long)]
    pub lora: Option<String>,

    /// Subject override
    #[arg(long)]
    pub subject: Option<String>,

    /// Mood descriptor
    #[arg(long)]
    pub mood: Option<String>,

    /// Explicit action text
    #[arg(long)]
    pub action: Option<String>,

    /// Camera notes
    #[arg(long)]
    pub camera: Option<String>,

    /// Lighting description
    #[arg(long)]
    pub lighting: Option<String>,

    /// Run the base model without a LoRA
    #[arg(long)]
    pub base_model_only: bool,

    /// Force persona action injection on for this run
    #[arg(long, overrides_with = "no_persona_action")]
    pub persona_action: bool,

    /// Turn persona action injection off for this run
    #[arg(long, overrides_with = "persona_action")]
    pub no_persona_action: bool,

    /// Fail instead of prompting for missing values
    #[arg(long)]
    pub no_interactive: bool,

    /// Seed for the persona action draw
    #[arg(long)]
    pub seed: Option<u64>,
}

#[derive(Subcommand, Debug)]
pub enum PromptCommands {
    /// Render a prompt, optionally from a saved profile
    Render {
        /// Profile to start from
        #[arg(long)]
        profile: Option<String>,
        #[command(flatten)]
        run: RunArgs,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum PersonaCommands {
    /// List catalog actions, optionally filtered by token
    List {
        /// Persona token filter (repeatable or comma separated)
        #[arg(long = "token", value_delimiter = ',')]
        tokens: Vec<String>,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Draw one action for the given tokens
    Pick {
        /// Persona tokens (repeatable or comma separated)
        #[arg(long = "token", value_delimiter = ',')]
        tokens: Vec<String>,
        /// Seed for a reproducible draw
        #[arg(long)]
        seed: Option<u64>,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Print the effective runner settings as TOML
    Show,
}
