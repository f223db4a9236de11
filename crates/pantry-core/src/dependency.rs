use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use crate::identifier::RecipeIdentifier;
use crate::version::VersionRequirement;

/// A request for some version of a recipe.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Dependency {
    pub project: RecipeIdentifier,
    pub requirement: VersionRequirement,
}

impl Dependency {
    pub fn new(project: RecipeIdentifier, requirement: VersionRequirement) -> Self {
        Self {
            project,
            requirement,
        }
    }
}

impl fmt::Display for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.project, self.requirement)
    }
}

/// The dependencies of a project or recipe version, one requirement per recipe.
///
/// Serialized as a table of `"org/recipe" = "requirement"`. Iteration follows
/// identifier order, which makes [`DependencyGroup::to_dependencies`]
/// deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DependencyGroup(BTreeMap<RecipeIdentifier, VersionRequirement>);

impl DependencyGroup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the requirement for `project`, returning the old one.
    pub fn insert(
        &mut self,
        project: RecipeIdentifier,
        requirement: VersionRequirement,
    ) -> Option<VersionRequirement> {
        self.0.insert(project, requirement)
    }

    pub fn get(&self, project: &RecipeIdentifier) -> Option<&VersionRequirement> {
        self.0.get(project)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&RecipeIdentifier, &VersionRequirement)> {
        self.0.iter()
    }

    /// The group as an ordered list of dependencies.
    pub fn to_dependencies(&self) -> Vec<Dependency> {
        self.0
            .iter()
            .map(|(project, requirement)| Dependency::new(project.clone(), requirement.clone()))
            .collect()
    }
}

impl<'de> Deserialize<'de> for DependencyGroup {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        crate::keyed::deserialize(deserializer).map(Self)
    }
}

impl FromIterator<Dependency> for DependencyGroup {
    fn from_iter<I: IntoIterator<Item = Dependency>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|d| (d.project, d.requirement))
                .collect(),
        )
    }
}
