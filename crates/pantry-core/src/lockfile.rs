use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use pantry_util::errors::PantryError;

use crate::identifier::RecipeIdentifier;
use crate::recipe::SourceLocation;
use crate::version::SemanticVersion;

/// File name of the lock file in a project root.
pub const LOCKFILE_NAME: &str = "pantry.lock";

/// Snapshot of a resolution, recorded so builds can be reproduced exactly.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lockfile {
    #[serde(default, deserialize_with = "crate::keyed::deserialize")]
    pub packages: BTreeMap<RecipeIdentifier, LockedPackage>,
}

/// A single locked recipe with its pinned source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockedPackage {
    pub version: SemanticVersion,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    /// Recipes this entry depends on, in identifier order.
    #[serde(default)]
    pub dependencies: Vec<RecipeIdentifier>,
    pub location: SourceLocation,
}

impl Lockfile {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse lock file text.
    pub fn parse(content: &str) -> miette::Result<Self> {
        toml::from_str(content).map_err(|e| {
            PantryError::Lockfile {
                message: format!("Failed to parse lock file: {e}"),
            }
            .into()
        })
    }

    /// Load and parse a `pantry.lock` file from the given path.
    pub fn from_path(path: &Path) -> miette::Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| PantryError::Lockfile {
            message: format!("Failed to read {}: {e}", path.display()),
        })?;
        Self::parse(&content)
    }

    /// Serialize the lock file to a pretty-printed TOML string.
    pub fn to_string_pretty(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Write the lock file to `path`, replacing any existing file.
    pub fn write_to(&self, path: &Path) -> miette::Result<()> {
        let content = self.to_string_pretty().map_err(|e| PantryError::Lockfile {
            message: format!("Failed to serialize lock file: {e}"),
        })?;
        std::fs::write(path, content).map_err(|e| PantryError::Io(e).into())
    }

    /// The version locked for `project`, if any.
    pub fn locked_version(&self, project: &RecipeIdentifier) -> Option<SemanticVersion> {
        self.packages.get(project).map(|p| p.version)
    }
}
