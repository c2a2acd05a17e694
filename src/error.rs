//! Generator errors.

use crate::validation::ValidationError;

/// Errors surfaced by the assignment generator.
///
/// Only configuration problems are errors. A guest who ends a timeslot
/// without a room is normal output, not a failure.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GeneratorError {
    /// Inputs or an override referenced unknown, duplicate or
    /// out-of-bounds entities. The step was aborted.
    #[error("invalid configuration: {}", join_messages(.0))]
    Configuration(Vec<ValidationError>),

    /// A previous step failed with a configuration error. The generator
    /// must be discarded and rebuilt.
    #[error("generator faulted by an earlier configuration error")]
    Faulted,
}

impl GeneratorError {
    /// Validation errors carried by a configuration error.
    pub fn validation_errors(&self) -> &[ValidationError] {
        match self {
            Self::Configuration(errors) => errors,
            Self::Faulted => &[],
        }
    }
}

impl From<Vec<ValidationError>> for GeneratorError {
    fn from(errors: Vec<ValidationError>) -> Self {
        Self::Configuration(errors)
    }
}

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}
