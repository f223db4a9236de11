use std::fmt;
use std::path::PathBuf;

use pantry_core::identifier::RecipeIdentifier;

use crate::resolved::ResolvedDependencies;

/// Progress reported while recipes are fetched and dependencies resolved.
///
/// The engine forwards events from recipe sources untouched and adds
/// [`Event::Resolved`] whenever a step commits to a state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A recipe fetch started.
    Fetching { recipe: RecipeIdentifier },
    /// A recipe was served from the fetch cache.
    CacheHit { recipe: RecipeIdentifier },
    FileRead { path: PathBuf, bytes: u64 },
    FileHashed { path: PathBuf, sha256: String },
    /// The resolution state after a completed step.
    Resolved(ResolvedDependencies),
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fetching { recipe } => write!(f, "fetching {recipe}"),
            Self::CacheHit { recipe } => write!(f, "cached {recipe}"),
            Self::FileRead { path, bytes } => write!(f, "read {} ({bytes} bytes)", path.display()),
            Self::FileHashed { path, sha256 } => {
                let short = sha256.get(..12).unwrap_or(sha256);
                write!(f, "hashed {} ({short})", path.display())
            }
            Self::Resolved(resolved) => write!(f, "resolved {} recipe(s)", resolved.len()),
        }
    }
}
