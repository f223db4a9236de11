use serde::{Deserialize, Serialize};
use std::path::Path;

use pantry_util::errors::PantryError;

use crate::dependency::{Dependency, DependencyGroup};

/// File name of the project manifest.
pub const MANIFEST_NAME: &str = "pantry.toml";

/// The parsed representation of a `pantry.toml` file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default)]
    pub dependencies: DependencyGroup,
}

impl Manifest {
    /// Load and parse a `pantry.toml` file from the given path.
    pub fn from_path(path: &Path) -> miette::Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| PantryError::Manifest {
            message: format!("Failed to read {}: {e}", path.display()),
        })?;
        Self::parse_toml(&content)
    }

    /// Parse a `pantry.toml` from a string.
    pub fn parse_toml(content: &str) -> miette::Result<Self> {
        toml::from_str(content).map_err(|e| {
            PantryError::Manifest {
                message: format!("Failed to parse pantry.toml: {e}"),
            }
            .into()
        })
    }

    /// The direct dependencies in the order resolution visits them.
    pub fn direct_dependencies(&self) -> Vec<Dependency> {
        self.dependencies.to_dependencies()
    }
}
