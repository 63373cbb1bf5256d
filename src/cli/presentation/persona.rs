//! Persona catalog presentation: list text/json.

use crate::cli::presentation::shared::to_pretty_json;
use crate::error::ProfileError;
use crate::persona::PersonaAction;
use comfy_table::Table;
use serde_json::json;

pub fn format_persona_list_text(actions: &[&PersonaAction]) -> String {
    if actions.is_empty() {
        return "Persona catalog is empty.".to_string();
    }
    let mut table = Table::new();
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.set_header(vec!["Tokens", "Action"]);
    for action in actions {
        let tokens: Vec<&str> = action.tokens.iter().map(String::as_str).collect();
        table.add_row(vec![tokens.join(", "), action.text.clone()]);
    }
    format!("{}\n\nTotal: {} action(s)", table, actions.len())
}

pub fn format_persona_list_json(actions: &[&PersonaAction]) -> Result<String, ProfileError> {
    to_pretty_json(&json!({ "actions": actions, "total": actions.len() }))
}
