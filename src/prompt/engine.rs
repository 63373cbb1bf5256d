//! Template rendering against a binding table.

use crate::error::ProfileError;
use crate::persona::{ActionChooser, PersonaActionCatalog};
use crate::prompt::template::{extract_tokens, substitute};
use crate::prompt::{
    PERSONA_ACTION_MARKER, TOKEN_ACTION, TOKEN_CAMERA, TOKEN_LIGHTING, TOKEN_MOOD,
    TOKEN_PERSONA_ACTION, TOKEN_SUBJECT, TOKEN_SUBJECT_OR_TRIGGER, TOKEN_TRIGGER,
};
use std::collections::BTreeSet;
use tracing::debug;

/// Values for the recognized tokens. `None` leaves `{token}` in the output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PromptBindings {
    pub trigger: Option<String>,
    pub subject: Option<String>,
    pub mood: Option<String>,
    /// Explicit action text; also feeds `{persona_action}` as described on
    /// [`PromptEngine::render`]
    pub action: Option<String>,
    pub camera: Option<String>,
    pub lighting: Option<String>,
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

impl PromptBindings {
    /// Binding for a plain token (not `persona_action` or
    /// `subject_or_trigger`).
    pub fn get(&self, token: &str) -> Option<&str> {
        match token {
            TOKEN_TRIGGER => self.trigger.as_deref(),
            TOKEN_SUBJECT => self.subject.as_deref(),
            TOKEN_MOOD => self.mood.as_deref(),
            TOKEN_ACTION => self.action.as_deref(),
            TOKEN_CAMERA => self.camera.as_deref(),
            TOKEN_LIGHTING => self.lighting.as_deref(),
            _ => None,
        }
    }

    /// Trigger when non-empty, else subject when non-empty.
    pub fn subject_or_trigger(&self) -> Option<&str> {
        non_empty(&self.trigger).or_else(|| non_empty(&self.subject))
    }
}

/// Inputs for one render.
#[derive(Debug, Clone)]
pub struct RenderRequest<'a> {
    pub template: &'a str,
    pub bindings: &'a PromptBindings,
    pub persona_enabled: bool,
    pub persona_tokens: &'a BTreeSet<String>,
}

/// Rendered text plus the persona action that went into it, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPrompt {
    pub text: String,
    pub persona_action: Option<String>,
}

/// Renders templates. The catalog draw through the supplied chooser is the
/// only source of nondeterminism.
pub struct PromptEngine<'a> {
    catalog: &'a PersonaActionCatalog,
}

impl<'a> PromptEngine<'a> {
    pub fn new(catalog: &'a PersonaActionCatalog) -> Self {
        Self { catalog }
    }

    /// Render `request.template`.
    ///
    /// `{persona_action}`:
    /// - persona disabled: the explicit action if given, else empty; no marker
    /// - persona enabled: the explicit action if the template has no
    ///   `{action}` of its own, else a catalog draw; followed by
    ///   `(persona_action)` unless the template already contains that marker
    ///
    /// The persona text is computed once. When the token repeats, only the
    /// first occurrence carries the marker.
    pub fn render(
        &self,
        request: &RenderRequest<'_>,
        chooser: &mut dyn ActionChooser,
    ) -> Result<RenderedPrompt, ProfileError> {
        let tokens = extract_tokens(request.template);
        let bindings = request.bindings;

        let persona = if tokens.contains(TOKEN_PERSONA_ACTION) {
            Some(self.persona_action(request, &tokens, chooser)?)
        } else {
            None
        };

        let mut marker_pending = persona.as_ref().map(|(_, marker)| *marker).unwrap_or(false);
        let text = substitute(request.template, |token| match token {
            TOKEN_PERSONA_ACTION => {
                let (action, _) = persona.as_ref()?;
                if marker_pending {
                    marker_pending = false;
                    Some(format!("{}{}", action, PERSONA_ACTION_MARKER))
                } else {
                    Some(action.clone())
                }
            }
            TOKEN_SUBJECT_OR_TRIGGER => bindings.subject_or_trigger().map(str::to_string),
            other => bindings.get(other).map(str::to_string),
        });

        Ok(RenderedPrompt {
            text,
            persona_action: persona
                .map(|(action, _)| action)
                .filter(|action| !action.is_empty()),
        })
    }

    /// Persona text and whether the marker should follow it.
    fn persona_action(
        &self,
        request: &RenderRequest<'_>,
        tokens: &BTreeSet<String>,
        chooser: &mut dyn ActionChooser,
    ) -> Result<(String, bool), ProfileError> {
        let explicit = request.bindings.action.as_deref();

        if !request.persona_enabled {
            debug!("Persona injection disabled");
            return Ok((explicit.unwrap_or_default().to_string(), false));
        }

        let explicit_for_persona = if tokens.contains(TOKEN_ACTION) {
            None
        } else {
            explicit
        };
        let action = self
            .catalog
            .select(request.persona_tokens, explicit_for_persona, chooser)?;
        let marker = !request.template.contains(PERSONA_ACTION_MARKER);
        Ok((action, marker))
    }
}
