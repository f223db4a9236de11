//! Resolution failures and conflict reporting.

use miette::Diagnostic;
use thiserror::Error;

use pantry_core::dependency::Dependency;
use pantry_core::identifier::RecipeIdentifier;
use pantry_core::version::{SemanticVersion, VersionRequirement};

use crate::source::FetchError;

/// A recipe already chosen at one version was required at an incompatible one.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
#[error(
    "{project} {existing} (required as {existing_requirement}) does not satisfy {requirement}"
)]
#[diagnostic(help("relax one of the requirements on {project} so both accept a common version"))]
pub struct ConflictError {
    pub project: RecipeIdentifier,
    /// Version chosen by an earlier step.
    pub existing: SemanticVersion,
    /// Requirement the existing version was chosen under.
    pub existing_requirement: VersionRequirement,
    /// The newly encountered requirement.
    pub requirement: VersionRequirement,
}

/// No candidate version of a dependency led to a complete resolution.
///
/// `causes` holds the failure of every candidate that was tried. It is empty
/// when no published version satisfies the requirement at all.
#[derive(Debug, Error, Diagnostic)]
#[error("no version of {} matching {} could be resolved", dependency.project, dependency.requirement)]
#[diagnostic(help("each candidate's failure is listed below"))]
pub struct ResolutionExhaustedError {
    pub dependency: Dependency,
    #[related]
    pub causes: Vec<ResolveError>,
}

/// Two resolution states disagree on the version of a shared recipe.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
#[error("cannot merge resolutions: {project} is {left} on one side and {right} on the other")]
pub struct MergeConflictError {
    pub project: RecipeIdentifier,
    pub left: SemanticVersion,
    pub right: SemanticVersion,
}

/// Any failure of the resolution engine.
#[derive(Debug, Error, Diagnostic)]
pub enum ResolveError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Conflict(#[from] ConflictError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Exhausted(#[from] ResolutionExhaustedError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Merge(#[from] MergeConflictError),
}

impl ResolveError {
    /// Every conflict found in this error and, recursively, in its causes.
    pub fn conflicts(&self) -> Vec<&ConflictError> {
        let mut found = Vec::new();
        self.collect_conflicts(&mut found);
        found
    }

    fn collect_conflicts<'a>(&'a self, found: &mut Vec<&'a ConflictError>) {
        match self {
            Self::Conflict(conflict) => found.push(conflict),
            Self::Exhausted(exhausted) => {
                for cause in &exhausted.causes {
                    cause.collect_conflicts(found);
                }
            }
            Self::Fetch(_) | Self::Merge(_) => {}
        }
    }
}
