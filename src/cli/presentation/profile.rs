//! Profile command presentation: list, show, save, delete, and resolved
//! run configuration as text or JSON.

use crate::cli::presentation::shared::{format_section_heading, or_dash, to_pretty_json};
use crate::error::ProfileError;
use crate::profile::{ProfileDeleteResult, ProfileListResult, ProfileRecord, ProfileSaveResult};
use crate::resolver::EffectiveRunConfig;
use comfy_table::Table;
use serde_json::json;

pub fn format_profile_list_text(result: &ProfileListResult) -> String {
    if result.profiles.is_empty() {
        return "No profiles found.\n\nCreate one with `replicate-runner profile save <name> --model ... --lora ...`.".to_string();
    }
    let mut table = Table::new();
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.set_header(vec!["Name", "Model", "LoRA", "Scopes", "Description"]);
    for item in &result.profiles {
        let scopes: Vec<&str> = item.scopes.iter().map(|s| s.as_str()).collect();
        table.add_row(vec![
            item.name.clone(),
            or_dash(item.model.as_deref()),
            or_dash(item.lora.as_deref()),
            scopes.join(" -> "),
            or_dash(item.description.as_deref()),
        ]);
    }
    format!("{}\n\nTotal: {} profile(s)", table, result.profiles.len())
}

pub fn format_profile_list_json(result: &ProfileListResult) -> Result<String, ProfileError> {
    to_pretty_json(&json!({ "profiles": result.profiles, "total": result.profiles.len() }))
}

pub fn format_profile_show_text(record: &ProfileRecord) -> String {
    let field = |label: &str, path: &str, value: Option<&str>| -> String {
        let origin = record
            .provenance_of(path)
            .map(|scope| format!("  [{}]", scope))
            .unwrap_or_default();
        format!("  {:<16} {}{}\n", label, or_dash(value), origin)
    };

    let mut out = format!("{}\n\n", format_section_heading(&format!("Profile: {}", record.name)));
    out.push_str(&field("Description", "description", record.description.as_deref()));
    out.push_str(&field("Model", "model", record.model.as_deref()));
    out.push_str(&field("Version", "version", record.version.as_deref()));
    out.push_str(&field("LoRA", "lora", record.lora.as_deref()));
    out.push_str(&field("Trigger", "trigger", record.trigger.as_deref()));
    out.push_str(&field(
        "Template",
        "prompt_template",
        record.prompt_template.as_deref(),
    ));

    out.push_str(&format!("\n{}\n", format_section_heading("Defaults")));
    let defaults = &record.defaults;
    out.push_str(&field("Subject", "defaults.subject", defaults.subject.as_deref()));
    let tokens: Vec<&str> = defaults.persona_tokens.iter().map(String::as_str).collect();
    out.push_str(&field(
        "Persona tokens",
        "defaults.persona_tokens",
        Some(tokens.join(", ").as_str()),
    ));
    let enabled = defaults.persona_enabled.map(|b| b.to_string());
    out.push_str(&field(
        "Persona enabled",
        "defaults.persona_enabled",
        enabled.as_deref().or(Some("true (default)")),
    ));
    if !defaults.params.is_empty() {
        out.push_str("  Params:\n");
        for (key, value) in &defaults.params {
            let origin = record
                .provenance_of(&format!("defaults.params.{}", key))
                .map(|scope| format!("  [{}]", scope))
                .unwrap_or_default();
            out.push_str(&format!("    {:<14} {}{}\n", key, value, origin));
        }
    }

    out.push_str(&format!("\n{}\n", format_section_heading("Sources")));
    for source in &record.sources {
        out.push_str(&format!("  {:<10} {}\n", source.scope.as_str(), source.path.display()));
    }
    out
}

pub fn format_profile_show_json(record: &ProfileRecord) -> Result<String, ProfileError> {
    to_pretty_json(record)
}

pub fn format_save_result(result: &ProfileSaveResult) -> String {
    let mut out = format!(
        "Saved profile '{}' to {} scope: {}",
        result.name,
        result.scope,
        result.path.display()
    );
    for path in &result.unset {
        out.push_str(&format!("\n  Unset {}", path));
    }
    out
}

pub fn format_delete_result(result: &ProfileDeleteResult) -> String {
    if result.removed {
        let location = result
            .path
            .as_ref()
            .map(|p| format!(" ({})", p.display()))
            .unwrap_or_default();
        format!(
            "Deleted profile '{}' from {} scope{}",
            result.name, result.scope, location
        )
    } else {
        format!(
            "Profile '{}' is not defined in {} scope; nothing deleted",
            result.name, result.scope
        )
    }
}

pub fn format_effective_config_text(config: &EffectiveRunConfig) -> String {
    let mut out = String::new();
    if let Some(name) = &config.profile {
        out.push_str(&format!("{}\n", format_section_heading(&format!("Profile: {}", name))));
        if !config.sources.is_empty() {
            let chain: Vec<String> = config
                .sources
                .iter()
                .map(|s| format!("{} ({})", s.scope, s.path.display()))
                .collect();
            out.push_str(&format!("Sources: {}\n", chain.join(" -> ")));
        }
    }
    out.push_str(&format!("Model: {}\n", config.model_ref));
    out.push_str(&format!(
        "LoRA: {}\n",
        config.lora.as_deref().unwrap_or("<base model>")
    ));
    if let Some(action) = &config.persona_action {
        out.push_str(&format!("Persona action: {}\n", action));
    }
    out.push_str(&format!("Prompt: {}\n", config.rendered_prompt));
    out.push_str("Params:\n");
    for (key, value) in &config.params {
        out.push_str(&format!("  {}: {}\n", key, value));
    }
    out.push_str(&format!("\nCommand: {}", config.to_command_line()));
    out
}

pub fn format_effective_config_json(config: &EffectiveRunConfig) -> Result<String, ProfileError> {
    let mut value = serde_json::to_value(config)
        .map_err(|e| ProfileError::ConfigError(format!("Failed to render JSON: {}", e)))?;
    value["command"] = json!(config.to_command_line());
    to_pretty_json(&value)
}
