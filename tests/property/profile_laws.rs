//! Property-based tests for layer merging and prompt rendering

use proptest::prelude::*;
use replicate_runner::persona::{PersonaAction, PersonaActionCatalog};
use replicate_runner::profile::merge::{merge_layer, Provenance};
use replicate_runner::profile::ProfileScope;
use replicate_runner::prompt::{
    PromptBindings, PromptEngine, RenderRequest, PERSONA_ACTION_MARKER,
};
use serde_yaml::{Mapping, Value};
use std::collections::BTreeSet;

fn scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<bool>().prop_map(Value::Bool),
        any::<i32>().prop_map(|n| Value::Number(n.into())),
        "[a-z ]{0,8}".prop_map(Value::String),
    ]
}

fn layer() -> impl Strategy<Value = Mapping> {
    let params = prop::collection::btree_map("[a-c]", scalar(), 0..3);
    (
        prop::option::of("[a-z]{1,6}"),
        prop::option::of("[a-z]{1,6}"),
        params,
    )
        .prop_map(|(model, lora, params)| {
            let mut entry = Mapping::new();
            if let Some(model) = model {
                entry.insert("model".into(), Value::String(model));
            }
            if let Some(lora) = lora {
                entry.insert("lora".into(), Value::String(lora));
            }
            if !params.is_empty() {
                let params: Mapping = params
                    .into_iter()
                    .map(|(k, v)| (Value::String(k), v))
                    .collect();
                let mut defaults = Mapping::new();
                defaults.insert("params".into(), Value::Mapping(params));
                entry.insert("defaults".into(), Value::Mapping(defaults));
            }
            entry
        })
}

proptest! {
    /// Merging the same layer twice changes nothing.
    #[test]
    fn merge_is_idempotent(entry in layer()) {
        let mut once = Mapping::new();
        let mut provenance = Provenance::new();
        merge_layer(&mut once, &entry, ProfileScope::User, &mut provenance);

        let mut twice = once.clone();
        let mut provenance_twice = provenance.clone();
        merge_layer(&mut twice, &entry, ProfileScope::User, &mut provenance_twice);

        prop_assert_eq!(once, twice);
        prop_assert_eq!(provenance, provenance_twice);
    }

    /// A field set by the higher layer always wins and is attributed to it.
    #[test]
    fn higher_layer_wins(low in layer(), high in layer()) {
        let mut merged = Mapping::new();
        let mut provenance = Provenance::new();
        merge_layer(&mut merged, &low, ProfileScope::Package, &mut provenance);
        merge_layer(&mut merged, &high, ProfileScope::User, &mut provenance);

        for field in ["model", "lora"] {
            match high.get(field) {
                Some(value) => {
                    prop_assert_eq!(merged.get(field), Some(value));
                    prop_assert_eq!(provenance.get(field), Some(&ProfileScope::User));
                }
                None => {
                    prop_assert_eq!(merged.get(field), low.get(field));
                }
            }
        }
    }

    /// Rendering a template that already carries the marker never adds one.
    #[test]
    fn marker_is_not_repeated(prefix in "[a-z ]{0,10}", action in "[a-z]{1,10}") {
        let catalog = PersonaActionCatalog::from_actions(vec![PersonaAction::new(["x"], action)]);
        let engine = PromptEngine::new(&catalog);
        let template = format!("{}{{persona_action}}{}", prefix, PERSONA_ACTION_MARKER);
        let tokens: BTreeSet<String> = ["x".to_string()].into_iter().collect();
        let bindings = PromptBindings::default();
        let mut chooser = |_: usize| 0usize;

        let rendered = engine
            .render(
                &RenderRequest {
                    template: &template,
                    bindings: &bindings,
                    persona_enabled: true,
                    persona_tokens: &tokens,
                },
                &mut chooser,
            )
            .unwrap();
        prop_assert_eq!(rendered.text.matches(PERSONA_ACTION_MARKER).count(), 1);
    }
}
