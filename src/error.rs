use thiserror::Error;

use crate::model::ClassKind;

/// Structural failures while generating a builder for one target. Each
/// variant names the offending target so the host can report and move on to
/// the next one.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("`{target}` has no primary constructor")]
    MissingConstructor { target: String },

    #[error("builder generation is not supported for {kind} `{target}`")]
    UnsupportedKind { target: String, kind: ClassKind },

    #[error("parameter `{parameter}` of `{target}` has no resolvable type name")]
    UnresolvedType { target: String, parameter: String },

    #[error("`{target}` has a constructor parameter without a usable name")]
    MissingParameterName { target: String },

    #[error("`{target}` declares constructor parameter `{parameter}` more than once")]
    DuplicateParameter { target: String, parameter: String },
}
