//! Persona action catalog file and selection.
//!
//! The catalog file is YAML, either a bare list or wrapped in `actions`:
//!
//! ```yaml
//! actions:
//!   - tokens: [andie, audra]
//!     text: twirling a transparent umbrella in the rain
//! ```

use crate::error::ProfileError;
use crate::persona::ActionChooser;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;
use tracing::{debug, warn};

/// One tagged action phrase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PersonaAction {
    pub tokens: BTreeSet<String>,
    pub text: String,
}

impl PersonaAction {
    pub fn new<I, S>(tokens: I, text: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tokens: tokens.into_iter().map(Into::into).collect(),
            text: text.into(),
        }
    }

    /// Whole-token match against any of `persona_tokens`, ignoring case.
    pub fn matches_any(&self, persona_tokens: &BTreeSet<String>) -> bool {
        self.tokens
            .iter()
            .any(|tag| persona_tokens.iter().any(|t| t.eq_ignore_ascii_case(tag)))
    }
}

#[derive(Debug, Deserialize)]
struct RawAction {
    #[serde(default)]
    tokens: Option<Vec<String>>,
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CatalogFile {
    Bare(Vec<RawAction>),
    Wrapped { actions: Vec<RawAction> },
}

const BUILTIN_ACTIONS: &[(&[&str], &str)] = &[
    (&["andie", "audra", "ariel"], "twirling a transparent umbrella in the rain"),
    (&["andie", "audra"], "balancing on subway stairs while tying her shoe"),
    (&["andie", "audra", "stevie"], "sketching neon fashion concepts on a tablet"),
    (&["audra"], "checking vintage film on a retro camera"),
    (&["ariel", "audra"], "sipping espresso outside a Parisian cafe"),
    (&["andie", "stevie"], "reading choreography notes beside a boombox"),
    (&["audra", "stevie"], "adjusting a silk scarf caught in the wind"),
    (&["audra", "ariel"], "stepping off a tram with a bouquet of flowers"),
    (&["audra"], "spinning through a splash of fountain mist"),
    (&["andie", "audra", "stevie"], "tossing her hair as she steps into a spotlight"),
];

/// Read-only library of persona actions, loaded once per process.
#[derive(Debug, Clone, Default)]
pub struct PersonaActionCatalog {
    actions: Vec<PersonaAction>,
}

impl PersonaActionCatalog {
    pub fn from_actions(actions: Vec<PersonaAction>) -> Self {
        Self { actions }
    }

    /// Actions shipped with the binary.
    pub fn builtin() -> Self {
        Self::from_actions(
            BUILTIN_ACTIONS
                .iter()
                .map(|(tokens, text)| PersonaAction::new(tokens.iter().copied(), *text))
                .collect(),
        )
    }

    /// Load a catalog file. A missing file yields the built-in catalog; a
    /// present file that does not parse is an error. Entries without text
    /// are skipped.
    pub fn load(path: &Path) -> Result<Self, ProfileError> {
        if !path.exists() {
            debug!(path = %path.display(), "Persona catalog not found; using built-in actions");
            return Ok(Self::builtin());
        }

        let parse_error = |message: String| ProfileError::SourceParse {
            scope: "persona catalog".to_string(),
            path: path.to_path_buf(),
            message,
        };

        let content = std::fs::read_to_string(path).map_err(|e| parse_error(e.to_string()))?;
        let value: serde_yaml::Value =
            serde_yaml::from_str(&content).map_err(|e| parse_error(e.to_string()))?;
        if value.is_null() {
            warn!(path = %path.display(), "Persona catalog file is empty");
            return Ok(Self::default());
        }

        let raw = match serde_yaml::from_value::<CatalogFile>(value)
            .map_err(|e| parse_error(e.to_string()))?
        {
            CatalogFile::Bare(actions) | CatalogFile::Wrapped { actions } => actions,
        };

        let actions: Vec<PersonaAction> = raw
            .into_iter()
            .filter_map(|entry| {
                let text = entry.text.filter(|t| !t.trim().is_empty())?;
                let tokens = entry
                    .tokens
                    .unwrap_or_default()
                    .into_iter()
                    .filter(|t| !t.is_empty());
                Some(PersonaAction::new(tokens, text))
            })
            .collect();

        debug!(path = %path.display(), actions = actions.len(), "Loaded persona catalog");
        Ok(Self::from_actions(actions))
    }

    pub fn actions(&self) -> &[PersonaAction] {
        &self.actions
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Actions tagged with any of `persona_tokens`, or the whole catalog when
    /// none match.
    pub fn candidates(&self, persona_tokens: &BTreeSet<String>) -> Vec<&PersonaAction> {
        let filtered: Vec<&PersonaAction> = self
            .actions
            .iter()
            .filter(|action| action.matches_any(persona_tokens))
            .collect();
        if filtered.is_empty() {
            if !persona_tokens.is_empty() {
                debug!(
                    tokens = ?persona_tokens,
                    "No persona action matches tokens; drawing from full catalog"
                );
            }
            return self.actions.iter().collect();
        }
        filtered
    }

    /// Pick the action text for a run.
    ///
    /// An explicit action is returned as given without touching the catalog.
    /// Otherwise one candidate is drawn through `chooser`.
    pub fn select(
        &self,
        persona_tokens: &BTreeSet<String>,
        explicit_action: Option<&str>,
        chooser: &mut dyn ActionChooser,
    ) -> Result<String, ProfileError> {
        if let Some(action) = explicit_action {
            return Ok(action.to_string());
        }
        let candidates = self.candidates(persona_tokens);
        if candidates.is_empty() {
            return Err(ProfileError::EmptyCatalog);
        }
        let index = chooser.choose(candidates.len()).min(candidates.len() - 1);
        let text = candidates[index].text.clone();
        debug!(candidates = candidates.len(), action = %text, "Selected persona action");
        Ok(text)
    }
}
