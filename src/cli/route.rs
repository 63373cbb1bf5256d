//! CLI route: single route table and run context. Dispatches to domain services and presentation.

use crate::cli::parse::{
    Commands, ConfigCommands, PersonaCommands, ProfileCommands, ProfileSaveArgs, PromptCommands,
    RunArgs,
};
use crate::cli::presentation::{
    format_delete_result, format_effective_config_json, format_effective_config_text,
    format_persona_list_json, format_persona_list_text, format_profile_list_json,
    format_profile_list_text, format_profile_show_json, format_profile_show_text,
    format_save_result,
};
use crate::config::{ConfigLoader, ResolvedPaths, RunnerConfig};
use crate::error::ProfileError;
use crate::params::parse_params;
use crate::persona::{PersonaActionCatalog, RandomChooser};
use crate::profile::merge::deep_merge;
use crate::profile::{
    assignments_to_mapping, ProfileCommandService, ProfileScope, ProfileStore, ProfileUpdate,
};
use crate::resolver::{EffectiveRunConfig, OverrideSet, ProfileResolver};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Runtime context for CLI execution: workspace, settings, and resolved
/// file locations. Built from workspace path and optional settings path
/// using ConfigLoader only.
pub struct RunContext {
    workspace_root: PathBuf,
    config: RunnerConfig,
    paths: ResolvedPaths,
}

impl RunContext {
    /// Create run context from workspace root and optional settings file.
    pub fn new(workspace_root: PathBuf, config_path: Option<PathBuf>) -> Result<Self, ProfileError> {
        let config = ConfigLoader::load_with(&workspace_root, config_path.as_deref())?;
        Ok(Self::with_config(workspace_root, config))
    }

    pub fn with_config(workspace_root: PathBuf, config: RunnerConfig) -> Self {
        let paths = config.resolve_paths(&workspace_root);
        debug!(
            workspace = %workspace_root.display(),
            sources = paths.profile_sources().len(),
            "CLI context ready"
        );
        Self {
            workspace_root,
            config,
            paths,
        }
    }

    pub fn workspace_root(&self) -> &Path {
        &self.workspace_root
    }

    pub fn paths(&self) -> &ResolvedPaths {
        &self.paths
    }

    fn store(&self) -> Result<ProfileStore, ProfileError> {
        ProfileStore::load(self.paths.profile_sources())
    }

    fn catalog(&self) -> Result<PersonaActionCatalog, ProfileError> {
        match &self.paths.persona_catalog {
            Some(path) => PersonaActionCatalog::load(path),
            None => Ok(PersonaActionCatalog::builtin()),
        }
    }

    /// Execute a CLI command via the single route table.
    pub fn execute(&self, command: &Commands) -> Result<String, ProfileError> {
        match command {
            Commands::Profile { command } => self.handle_profile_command(command),
            Commands::Prompt { command } => self.handle_prompt_command(command),
            Commands::Persona { command } => self.handle_persona_command(command),
            Commands::Config { command } => self.handle_config_command(command),
        }
    }

    fn handle_profile_command(&self, command: &ProfileCommands) -> Result<String, ProfileError> {
        match command {
            ProfileCommands::List { format } => {
                let result = ProfileCommandService::list(&self.store()?)?;
                match format.as_str() {
                    "json" => format_profile_list_json(&result),
                    _ => Ok(format_profile_list_text(&result)),
                }
            }
            ProfileCommands::Show { name, format } => {
                let record = ProfileCommandService::show(&self.store()?, name)?;
                match format.as_str() {
                    "json" => format_profile_show_json(&record),
                    _ => Ok(format_profile_show_text(&record)),
                }
            }
            ProfileCommands::Save(args) => self.handle_profile_save(args),
            ProfileCommands::Delete { name, scope, yes } => {
                self.handle_profile_delete(name, scope, *yes)
            }
            ProfileCommands::Resolve { name, run, format } => {
                let config = self.resolve_run(Some(name.as_str()), run)?;
                format_run(&config, format)
            }
        }
    }

    fn handle_profile_save(&self, args: &ProfileSaveArgs) -> Result<String, ProfileError> {
        let scope: ProfileScope = args.scope.parse()?;
        let update = ProfileUpdate {
            description: args.description.clone(),
            model: args.model.clone(),
            version: args.version.clone(),
            lora: args.lora.clone(),
            trigger: args.trigger.clone(),
            prompt_template: args.prompt_template.clone(),
            subject: args.subject.clone(),
            persona_tokens: Some(args.persona_tokens.clone()).filter(|t| !t.is_empty()),
            persona_enabled: args.persona_enabled,
            params: parse_params(&args.params)?,
        };

        // Flags first, then positional assignments on top
        let mut updates = update.to_mapping();
        deep_merge(&mut updates, &assignments_to_mapping(&args.assignments)?);

        let mut store = self.store()?;
        let result =
            ProfileCommandService::save(&mut store, scope, &args.name, &updates, &args.unset)?;
        Ok(format_save_result(&result))
    }

    fn handle_profile_delete(&self, name: &str, scope: &str, yes: bool) -> Result<String, ProfileError> {
        let scope: ProfileScope = scope.parse()?;
        if !yes {
            use dialoguer::Confirm;
            let confirmed = Confirm::new()
                .with_prompt(format!("Delete profile '{}' from {} scope?", name, scope))
                .default(false)
                .interact()?;
            if !confirmed {
                return Ok("Deletion cancelled".to_string());
            }
        }

        let mut store = self.store()?;
        let result = ProfileCommandService::delete(&mut store, scope, name)?;
        Ok(format_delete_result(&result))
    }

    fn handle_prompt_command(&self, command: &PromptCommands) -> Result<String, ProfileError> {
        match command {
            PromptCommands::Render {
                profile,
                run,
                format,
            } => {
                let config = self.resolve_run(profile.as_deref(), run)?;
                match format.as_str() {
                    "json" => format_run(&config, format),
                    _ => Ok(config.rendered_prompt),
                }
            }
        }
    }

    fn handle_persona_command(&self, command: &PersonaCommands) -> Result<String, ProfileError> {
        let catalog = self.catalog()?;
        match command {
            PersonaCommands::List { tokens, format } => {
                let tokens: BTreeSet<String> = tokens.iter().cloned().collect();
                let actions = if tokens.is_empty() {
                    catalog.actions().iter().collect()
                } else {
                    catalog.candidates(&tokens)
                };
                match format.as_str() {
                    "json" => format_persona_list_json(&actions),
                    _ => Ok(format_persona_list_text(&actions)),
                }
            }
            PersonaCommands::Pick { tokens, seed } => {
                let tokens: BTreeSet<String> = tokens.iter().cloned().collect();
                let mut chooser = chooser_for(*seed);
                catalog.select(&tokens, None, &mut chooser)
            }
        }
    }

    fn handle_config_command(&self, command: &ConfigCommands) -> Result<String, ProfileError> {
        match command {
            ConfigCommands::Show => self.config.to_toml(),
        }
    }

    /// Resolve a run, asking for a subject interactively when the template
    /// needs one and `--no-interactive` is not set.
    fn resolve_run(
        &self,
        profile: Option<&str>,
        run: &RunArgs,
    ) -> Result<EffectiveRunConfig, ProfileError> {
        let store = self.store()?;
        let catalog = self.catalog()?;
        let resolver =
            ProfileResolver::new(&catalog).with_default_model(&self.config.defaults.base_model);
        let mut overrides = run.to_overrides()?;
        let mut chooser = chooser_for(run.seed);

        match ProfileCommandService::resolve(&store, &resolver, profile, &overrides, &mut chooser) {
            Err(ProfileError::MissingSubject { .. })
            | Err(ProfileError::MissingSubjectOrTrigger { .. })
                if !run.no_interactive =>
            {
                overrides.subject = Some(prompt_for_subject()?);
                ProfileCommandService::resolve(&store, &resolver, profile, &overrides, &mut chooser)
            }
            other => other,
        }
    }
}

impl RunArgs {
    /// `None` when neither persona flag was given.
    pub fn persona_flag(&self) -> Option<bool> {
        match (self.persona_action, self.no_persona_action) {
            (_, true) => Some(false),
            (true, false) => Some(true),
            (false, false) => None,
        }
    }

    pub fn to_overrides(&self) -> Result<OverrideSet, ProfileError> {
        Ok(OverrideSet {
            params: parse_params(&self.params)?,
            prompt: self.prompt.clone(),
            model: self.model.clone(),
            version: self.version.clone(),
            lora: self.lora.clone(),
            subject: self.subject.clone(),
            mood: self.mood.clone(),
            action: self.action.clone(),
            camera: self.camera.clone(),
            lighting: self.lighting.clone(),
            base_model_only: self.base_model_only,
            persona_action: self.persona_flag(),
        })
    }
}

fn chooser_for(seed: Option<u64>) -> RandomChooser {
    seed.map(RandomChooser::seeded).unwrap_or_default()
}

fn prompt_for_subject() -> Result<String, ProfileError> {
    use dialoguer::Input;
    let subject: String = Input::new()
        .with_prompt("Subject (required by the prompt template)")
        .interact_text()?;
    Ok(subject)
}

fn format_run(config: &EffectiveRunConfig, format: &str) -> Result<String, ProfileError> {
    match format {
        "json" => format_effective_config_json(config),
        _ => Ok(format_effective_config_text(config)),
    }
}
