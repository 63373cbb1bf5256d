//! Profile resolution: precedence, option validation, prompt rendering, and
//! final parameter assembly.
//!
//! Every resolvable field follows the same order: override, then profile,
//! then the built-in default.

pub mod effective;
pub mod model_ref;
pub mod overrides;

pub use effective::{EffectiveRunConfig, LORA_PARAM, LORA_PARAMS, PROMPT_PARAM};
pub use model_ref::{format_model_reference, split_model_reference};
pub use overrides::OverrideSet;

use crate::error::ProfileError;
use crate::params::Params;
use crate::persona::{ActionChooser, PersonaActionCatalog};
use crate::profile::ProfileRecord;
use crate::prompt::{
    extract_tokens, PromptBindings, PromptEngine, RenderRequest, RenderedPrompt,
    FALLBACK_PROMPT_TEMPLATE, TOKEN_SUBJECT, TOKEN_SUBJECT_OR_TRIGGER,
};
use overrides::present;
use std::collections::BTreeSet;
use tracing::debug;

/// Model used when neither the caller nor the profile names one.
pub const DEFAULT_BASE_MODEL: &str = "black-forest-labs/flux-dev-lora";

pub struct ProfileResolver<'a> {
    catalog: &'a PersonaActionCatalog,
    default_model: String,
}

impl<'a> ProfileResolver<'a> {
    pub fn new(catalog: &'a PersonaActionCatalog) -> Self {
        Self {
            catalog,
            default_model: DEFAULT_BASE_MODEL.to_string(),
        }
    }

    pub fn with_default_model(mut self, model: impl Into<String>) -> Self {
        self.default_model = model.into();
        self
    }

    /// Combine `profile` with `overrides` into an [`EffectiveRunConfig`].
    ///
    /// `chooser` is consulted only when the template needs a persona action
    /// drawn from the catalog.
    pub fn resolve(
        &self,
        profile: Option<&ProfileRecord>,
        overrides: &OverrideSet,
        chooser: &mut dyn ActionChooser,
    ) -> Result<EffectiveRunConfig, ProfileError> {
        let label = profile
            .map(|p| format!("profile '{}'", p.name))
            .unwrap_or_else(|| "ad-hoc run".to_string());

        let lora = self.resolve_lora(profile, overrides, &label)?;
        let (model, version) = self.resolve_model(profile, overrides)?;

        let persona_enabled = overrides
            .persona_action
            .or_else(|| profile.and_then(|p| p.defaults.persona_enabled))
            .unwrap_or(true);

        let subject = overrides
            .subject()
            .or_else(|| profile.and_then(|p| present(&p.defaults.subject)))
            .map(str::to_string);
        let trigger = profile.and_then(|p| p.trigger()).map(str::to_string);
        let persona_tokens = profile
            .map(ProfileRecord::persona_tokens)
            .unwrap_or_default();

        let (rendered_prompt, persona_action, template) = match overrides.prompt() {
            Some(literal) => {
                debug!("Literal prompt supplied; skipping template");
                (literal.to_string(), None, None)
            }
            None => {
                let template = profile
                    .and_then(|p| present(&p.prompt_template))
                    .unwrap_or(FALLBACK_PROMPT_TEMPLATE)
                    .to_string();
                check_required_tokens(&template, subject.as_deref(), trigger.as_deref(), &label)?;

                let bindings = PromptBindings {
                    trigger,
                    subject,
                    mood: present(&overrides.mood).map(str::to_string),
                    action: present(&overrides.action).map(str::to_string),
                    camera: present(&overrides.camera).map(str::to_string),
                    lighting: present(&overrides.lighting).map(str::to_string),
                };
                let rendered =
                    self.render(&template, &bindings, persona_enabled, &persona_tokens, chooser)?;
                (rendered.text, rendered.persona_action, Some(template))
            }
        };

        let params = assemble_params(
            profile.map(|p| p.defaults.params.clone()).unwrap_or_default(),
            &overrides.params,
            &rendered_prompt,
            lora.as_deref(),
            overrides.base_model_only,
        );

        let model_ref = format_model_reference(&model, version.as_deref());
        debug!(model = %model_ref, lora = ?lora, persona_enabled, "Resolved run configuration");

        Ok(EffectiveRunConfig {
            profile: profile.map(|p| p.name.clone()),
            model,
            version,
            model_ref,
            lora,
            base_model_only: overrides.base_model_only,
            rendered_prompt,
            persona_action,
            template,
            params,
            sources: profile.map(|p| p.sources.clone()).unwrap_or_default(),
        })
    }

    fn resolve_lora(
        &self,
        profile: Option<&ProfileRecord>,
        overrides: &OverrideSet,
        label: &str,
    ) -> Result<Option<String>, ProfileError> {
        if overrides.base_model_only {
            if overrides.lora().is_some() {
                return Err(ProfileError::ConflictingOptions {
                    first: "--lora",
                    second: "--base-model-only",
                });
            }
            debug!("Running base model without LoRA");
            return Ok(None);
        }

        overrides
            .lora()
            .or_else(|| profile.and_then(|p| present(&p.lora)))
            .map(|lora| Some(lora.to_string()))
            .ok_or_else(|| ProfileError::MissingLora {
                profile: label.to_string(),
            })
    }

    /// Model name and version. Version order: override, profile, then a
    /// version embedded in the model reference.
    fn resolve_model(
        &self,
        profile: Option<&ProfileRecord>,
        overrides: &OverrideSet,
    ) -> Result<(String, Option<String>), ProfileError> {
        let model_input = overrides
            .model()
            .or_else(|| profile.and_then(|p| present(&p.model)))
            .unwrap_or(self.default_model.as_str());
        let (model, embedded) = split_model_reference(model_input);

        if let (Some(requested), Some(embedded)) = (overrides.version(), embedded.as_deref()) {
            if requested != embedded {
                return Err(ProfileError::ConflictingOptions {
                    first: "--version",
                    second: "a version embedded in the model reference",
                });
            }
        }

        let version = overrides
            .version()
            .or_else(|| profile.and_then(|p| present(&p.version)))
            .map(str::to_string)
            .or(embedded);
        Ok((model, version))
    }

    fn render(
        &self,
        template: &str,
        bindings: &PromptBindings,
        persona_enabled: bool,
        persona_tokens: &BTreeSet<String>,
        chooser: &mut dyn ActionChooser,
    ) -> Result<RenderedPrompt, ProfileError> {
        PromptEngine::new(self.catalog).render(
            &RenderRequest {
                template,
                bindings,
                persona_enabled,
                persona_tokens,
            },
            chooser,
        )
    }
}

fn check_required_tokens(
    template: &str,
    subject: Option<&str>,
    trigger: Option<&str>,
    label: &str,
) -> Result<(), ProfileError> {
    let tokens = extract_tokens(template);
    if tokens.contains(TOKEN_SUBJECT) && subject.is_none() {
        return Err(ProfileError::MissingSubject {
            profile: label.to_string(),
        });
    }
    if tokens.contains(TOKEN_SUBJECT_OR_TRIGGER) && subject.is_none() && trigger.is_none() {
        return Err(ProfileError::MissingSubjectOrTrigger {
            profile: label.to_string(),
        });
    }
    Ok(())
}

/// Profile params, then the prompt and LoRA entries, then caller params.
fn assemble_params(
    mut params: Params,
    overrides: &Params,
    prompt: &str,
    lora: Option<&str>,
    base_model_only: bool,
) -> Params {
    params.insert(PROMPT_PARAM.to_string(), prompt.into());
    if base_model_only {
        for key in LORA_PARAMS {
            params.remove(key);
        }
    } else if let Some(lora) = lora {
        params.insert(LORA_PARAM.to_string(), lora.into());
    }
    params.extend(overrides.iter().map(|(k, v)| (k.clone(), v.clone())));
    params
}
