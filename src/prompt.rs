//! Prompt template engine: token scanning, substitution, persona marker
//! handling, and quoting for composed command lines.

pub mod engine;
pub mod quoting;
pub mod template;

pub use engine::{PromptBindings, PromptEngine, RenderRequest, RenderedPrompt};
pub use quoting::{escape_prompt_literal, quote_argument};
pub use template::{extract_tokens, substitute};

/// Template used when a profile declares none.
pub const FALLBACK_PROMPT_TEMPLATE: &str =
    "{subject_or_trigger}, {mood}, while she is {persona_action} with {camera} lighting";

/// Appended after an injected persona action so later renders can tell the
/// injection already happened.
pub const PERSONA_ACTION_MARKER: &str = "(persona_action)";

pub const TOKEN_TRIGGER: &str = "trigger";
pub const TOKEN_SUBJECT: &str = "subject";
pub const TOKEN_SUBJECT_OR_TRIGGER: &str = "subject_or_trigger";
pub const TOKEN_MOOD: &str = "mood";
pub const TOKEN_ACTION: &str = "action";
pub const TOKEN_PERSONA_ACTION: &str = "persona_action";
pub const TOKEN_CAMERA: &str = "camera";
pub const TOKEN_LIGHTING: &str = "lighting";

/// Tokens the engine substitutes. Anything else passes through untouched.
pub const RECOGNIZED_TOKENS: [&str; 8] = [
    TOKEN_TRIGGER,
    TOKEN_PERSONA_ACTION,
    TOKEN_SUBJECT,
    TOKEN_MOOD,
    TOKEN_ACTION,
    TOKEN_SUBJECT_OR_TRIGGER,
    TOKEN_CAMERA,
    TOKEN_LIGHTING,
];
