//! End-to-end resolution of stored profiles with per-run overrides

use replicate_runner::error::ProfileError;
use replicate_runner::params::ParamValue;
use replicate_runner::persona::{PersonaAction, PersonaActionCatalog, RandomChooser};
use replicate_runner::profile::{ProfileCommandService, ProfileScope, ProfileSource, ProfileStore};
use replicate_runner::resolver::{OverrideSet, ProfileResolver, LORA_PARAM, PROMPT_PARAM};
use tempfile::TempDir;

use crate::integration::write_layer;

const PROFILES: &str = r#"
profiles:
  andie:
    model: owner/flux:abc123
    lora: hf/andie
    trigger: andie
    prompt_template: "{trigger}, {mood}, {persona_action}"
    defaults:
      persona_tokens: [andie]
      params:
        lora_scale: 0.8
        num_outputs: 1
  plain:
    lora: hf/plain
    prompt_template: "{subject} in {lighting} light"
    defaults:
      persona_enabled: false
"#;

fn store(temp: &TempDir) -> ProfileStore {
    let path = write_layer(temp.path(), "profiles.yaml", PROFILES);
    ProfileStore::load(vec![ProfileSource::new(ProfileScope::Workspace, path)]).unwrap()
}

fn catalog() -> PersonaActionCatalog {
    PersonaActionCatalog::from_actions(vec![
        PersonaAction::new(["andie"], "painting a mural"),
        PersonaAction::new(["stevie"], "tuning a guitar"),
    ])
}

fn first(_: usize) -> usize {
    0
}

#[test]
fn test_profile_run_with_persona_draw() {
    let temp = TempDir::new().unwrap();
    let store = store(&temp);
    let catalog = catalog();
    let resolver = ProfileResolver::new(&catalog);

    let overrides = OverrideSet {
        mood: Some("golden hour".into()),
        ..OverrideSet::default()
    };
    let mut chooser = first;
    let config =
        ProfileCommandService::resolve(&store, &resolver, Some("andie"), &overrides, &mut chooser)
            .unwrap();

    assert_eq!(
        config.rendered_prompt,
        "andie, golden hour, painting a mural(persona_action)"
    );
    assert_eq!(config.persona_action.as_deref(), Some("painting a mural"));
    assert_eq!(config.model, "owner/flux");
    assert_eq!(config.version.as_deref(), Some("abc123"));
    assert_eq!(config.model_ref, "owner/flux:abc123");
    assert_eq!(
        config.params.get(LORA_PARAM),
        Some(&ParamValue::Text("hf/andie".into()))
    );
    assert_eq!(config.params.get("lora_scale"), Some(&ParamValue::Float(0.8)));
    assert_eq!(
        config.params.get(PROMPT_PARAM).and_then(ParamValue::as_str),
        Some(config.rendered_prompt.as_str())
    );
}

#[test]
fn test_overrides_beat_profile_values() {
    let temp = TempDir::new().unwrap();
    let store = store(&temp);
    let catalog = catalog();
    let resolver = ProfileResolver::new(&catalog);

    let mut params = replicate_runner::params::Params::new();
    params.insert("num_outputs".into(), ParamValue::Integer(4));
    let overrides = OverrideSet {
        params,
        lora: Some("hf/andie-v2".into()),
        persona_action: Some(false),
        action: Some("waving".into()),
        ..OverrideSet::default()
    };
    let mut chooser = first;
    let config =
        ProfileCommandService::resolve(&store, &resolver, Some("andie"), &overrides, &mut chooser)
            .unwrap();

    assert_eq!(config.rendered_prompt, "andie, {mood}, waving");
    assert_eq!(config.lora.as_deref(), Some("hf/andie-v2"));
    assert_eq!(config.params.get("num_outputs"), Some(&ParamValue::Integer(4)));
}

#[test]
fn test_base_model_only_drops_lora_inputs() {
    let temp = TempDir::new().unwrap();
    let store = store(&temp);
    let catalog = catalog();
    let resolver = ProfileResolver::new(&catalog);

    let overrides = OverrideSet {
        base_model_only: true,
        ..OverrideSet::default()
    };
    let mut chooser = first;
    let config =
        ProfileCommandService::resolve(&store, &resolver, Some("andie"), &overrides, &mut chooser)
            .unwrap();
    assert!(config.lora.is_none());
    assert!(!config.params.contains_key(LORA_PARAM));

    let conflicting = OverrideSet {
        base_model_only: true,
        lora: Some("hf/other".into()),
        ..OverrideSet::default()
    };
    let err =
        ProfileCommandService::resolve(&store, &resolver, Some("andie"), &conflicting, &mut chooser)
            .unwrap_err();
    assert!(matches!(err, ProfileError::ConflictingOptions { .. }));
}

#[test]
fn test_profile_without_persona_uses_default_model() {
    let temp = TempDir::new().unwrap();
    let store = store(&temp);
    let catalog = catalog();
    let resolver = ProfileResolver::new(&catalog).with_default_model("owner/base");

    let overrides = OverrideSet {
        subject: Some("a lighthouse".into()),
        lighting: Some("blue".into()),
        ..OverrideSet::default()
    };
    let mut chooser = first;
    let config =
        ProfileCommandService::resolve(&store, &resolver, Some("plain"), &overrides, &mut chooser)
            .unwrap();
    assert_eq!(config.rendered_prompt, "a lighthouse in blue light");
    assert_eq!(config.model_ref, "owner/base");
    assert!(config.persona_action.is_none());

    let err = ProfileCommandService::resolve(
        &store,
        &resolver,
        Some("plain"),
        &OverrideSet::default(),
        &mut chooser,
    )
    .unwrap_err();
    assert!(matches!(err, ProfileError::MissingSubject { .. }));
}

#[test]
fn test_literal_prompt_skips_template() {
    let temp = TempDir::new().unwrap();
    let store = store(&temp);
    let catalog = catalog();
    let resolver = ProfileResolver::new(&catalog);

    let overrides = OverrideSet {
        prompt: Some("exactly this".into()),
        ..OverrideSet::default()
    };
    let mut chooser = first;
    let config =
        ProfileCommandService::resolve(&store, &resolver, Some("andie"), &overrides, &mut chooser)
            .unwrap();
    assert_eq!(config.rendered_prompt, "exactly this");
    assert!(config.template.is_none());
    assert!(config.persona_action.is_none());
}

#[test]
fn test_seeded_draws_repeat() {
    let temp = TempDir::new().unwrap();
    let store = store(&temp);
    let catalog = PersonaActionCatalog::builtin();
    let resolver = ProfileResolver::new(&catalog);
    let overrides = OverrideSet::default();

    let render = |seed| {
        let mut chooser = RandomChooser::seeded(seed);
        ProfileCommandService::resolve(&store, &resolver, Some("andie"), &overrides, &mut chooser)
            .unwrap()
            .rendered_prompt
    };
    assert_eq!(render(11), render(11));
}

#[test]
fn test_unknown_profile() {
    let temp = TempDir::new().unwrap();
    let store = store(&temp);
    let catalog = catalog();
    let resolver = ProfileResolver::new(&catalog);
    let mut chooser = first;
    let err = ProfileCommandService::resolve(
        &store,
        &resolver,
        Some("nobody"),
        &OverrideSet::default(),
        &mut chooser,
    )
    .unwrap_err();
    assert!(matches!(err, ProfileError::ProfileNotFound(_)));
}
