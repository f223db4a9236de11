use miette::Diagnostic;
use thiserror::Error;

/// Malformed text for one of the core value types.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum ParseError {
    #[error("invalid version '{input}'")]
    #[diagnostic(help("versions are written as N, N.N or N.N.N"))]
    InvalidVersion { input: String },

    #[error("invalid version requirement '{input}': {reason}")]
    #[diagnostic(help("use *, 1.2.3, =1.2.3, [1.0.0, 2.0.0], >=1.0.0, <=1.0.0 or 1.0.0-2.0.0"))]
    InvalidRequirement { input: String, reason: String },

    #[error("invalid identifier '{input}': {reason}")]
    InvalidIdentifier { input: String, reason: String },

    #[error("invalid recipe identifier '{input}'")]
    #[diagnostic(help("recipe identifiers are written as org/recipe or source+org/recipe"))]
    InvalidRecipeIdentifier { input: String },
}
