//! CLI output: error mapping from domain errors to stable CLI surface.

use crate::error::ProfileError;

/// Map domain/service errors to a string for CLI output.
pub fn map_error(e: &ProfileError) -> String {
    match e {
        ProfileError::MissingSubject { .. } | ProfileError::MissingSubjectOrTrigger { .. } => {
            format!("{}\nPass --subject or set defaults.subject on the profile.", e)
        }
        ProfileError::ProfileNotFound(_) => {
            format!("{}\nRun `replicate-runner profile list` to see available profiles.", e)
        }
        _ => e.to_string(),
    }
}
