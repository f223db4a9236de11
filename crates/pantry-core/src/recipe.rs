//! Recipes: fetched package descriptions and their buildable versions.
//!
//! A recipe file is TOML:
//!
//! ```toml
//! name = "Boost Config"
//! url = "https://github.com/boostorg/config"
//!
//! [versions."1.70.0"]
//! target = "config"
//! location = { git = { url = "https://github.com/boostorg/config.git", commit = "4f3e0d1" } }
//!
//! [versions."1.70.0".dependencies]
//! "github+boostorg/core" = ">=1.70"
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::dependency::DependencyGroup;
use crate::version::SemanticVersion;

/// A package description with every version it can be built at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    pub name: String,
    pub url: String,
    #[serde(default, deserialize_with = "crate::keyed::deserialize")]
    pub versions: BTreeMap<SemanticVersion, RecipeVersion>,
}

impl Recipe {
    /// Parse a recipe document.
    pub fn parse_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn to_string_pretty(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

/// One buildable version of a recipe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeVersion {
    /// Build target name when it differs from the recipe name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    pub location: SourceLocation,
    #[serde(default, skip_serializing_if = "DependencyGroup::is_empty")]
    pub dependencies: DependencyGroup,
    /// Build file to drop into the sources when upstream ships none.
    #[serde(default, rename = "build-file", skip_serializing_if = "Option::is_none")]
    pub build_file: Option<RemoteFile>,
}

impl RecipeVersion {
    pub fn new(location: SourceLocation) -> Self {
        Self {
            location,
            target: None,
            dependencies: DependencyGroup::new(),
            build_file: None,
        }
    }

    /// Every SHA-256 this version pins, from its archive and build file.
    pub fn pinned_hashes(&self) -> Vec<&str> {
        let mut hashes = Vec::new();
        if let SourceLocation::Archive(ref archive) = self.location {
            hashes.push(archive.sha256.as_str());
        }
        if let Some(ref file) = self.build_file {
            hashes.push(file.sha256.as_str());
        }
        hashes
    }
}

/// Where the sources of a recipe version come from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceLocation {
    Git(GitCommit),
    Archive(RemoteArchive),
}

/// A pinned commit in a source-control repository.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GitCommit {
    pub url: String,
    pub commit: String,
}

/// A downloadable source archive and its expected SHA-256.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RemoteArchive {
    pub url: String,
    pub sha256: String,
    /// Leading directory to strip when extracting.
    #[serde(default, rename = "strip-prefix", skip_serializing_if = "Option::is_none")]
    pub strip_prefix: Option<String>,
}

/// A single downloadable file and its expected SHA-256.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RemoteFile {
    pub url: String,
    pub sha256: String,
}
