use std::collections::BTreeMap;
use std::fmt;

use pantry_core::identifier::RecipeIdentifier;
use pantry_core::lockfile::{LockedPackage, Lockfile};
use pantry_core::recipe::RecipeVersion;
use pantry_core::version::{SemanticVersion, VersionRequirement};

use crate::conflict::MergeConflictError;

/// The version chosen for one recipe, with the metadata it was chosen from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedDependency {
    pub version: SemanticVersion,
    /// The requirement this version was selected to satisfy.
    pub requirement: VersionRequirement,
    pub recipe_version: RecipeVersion,
}

/// An immutable resolution state: at most one chosen version per recipe.
///
/// Every update returns a new value, so a state handed to one candidate
/// branch is never changed by another.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedDependencies {
    entries: BTreeMap<RecipeIdentifier, ResolvedDependency>,
}

impl ResolvedDependencies {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, project: &RecipeIdentifier) -> Option<&ResolvedDependency> {
        self.entries.get(project)
    }

    pub fn contains(&self, project: &RecipeIdentifier) -> bool {
        self.entries.contains_key(project)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in identifier order.
    pub fn iter(&self) -> impl Iterator<Item = (&RecipeIdentifier, &ResolvedDependency)> {
        self.entries.iter()
    }

    /// A copy of this state with `project` set to `entry`.
    pub fn with(&self, project: RecipeIdentifier, entry: ResolvedDependency) -> Self {
        let mut entries = self.entries.clone();
        entries.insert(project, entry);
        Self { entries }
    }

    /// Key-wise union of two states.
    ///
    /// Fails if a recipe present in both was chosen at different versions.
    /// Where both agree, the entry from `self` is kept.
    pub fn merge(&self, other: &Self) -> Result<Self, MergeConflictError> {
        let mut entries = self.entries.clone();
        for (project, entry) in &other.entries {
            match entries.get(project) {
                Some(existing) if existing.version != entry.version => {
                    return Err(MergeConflictError {
                        project: project.clone(),
                        left: existing.version,
                        right: entry.version,
                    });
                }
                Some(_) => {}
                None => {
                    entries.insert(project.clone(), entry.clone());
                }
            }
        }
        Ok(Self { entries })
    }

    /// Snapshot this state as a lock file.
    pub fn to_lockfile(&self) -> Lockfile {
        let packages = self
            .entries
            .iter()
            .map(|(project, entry)| {
                let recipe_version = &entry.recipe_version;
                let locked = LockedPackage {
                    version: entry.version,
                    target: recipe_version.target.clone(),
                    dependencies: recipe_version
                        .dependencies
                        .iter()
                        .map(|(dependency, _)| dependency.clone())
                        .collect(),
                    location: recipe_version.location.clone(),
                };
                (project.clone(), locked)
            })
            .collect();
        Lockfile { packages }
    }
}

impl fmt::Display for ResolvedDependencies {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (project, entry) in &self.entries {
            writeln!(f, "{project} {}", entry.version)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pantry_core::recipe::{GitCommit, SourceLocation};

    fn id(s: &str) -> RecipeIdentifier {
        RecipeIdentifier::parse(s).unwrap()
    }

    fn entry(major: u32) -> ResolvedDependency {
        ResolvedDependency {
            version: SemanticVersion::new(major, 0, 0),
            requirement: VersionRequirement::Any,
            recipe_version: RecipeVersion::new(SourceLocation::Git(GitCommit {
                url: "https://example.com/repo.git".to_string(),
                commit: format!("c{major}"),
            })),
        }
    }

    #[test]
    fn with_leaves_original_untouched() {
        let empty = ResolvedDependencies::new();
        let one = empty.with(id("acme/a"), entry(1));
        assert!(empty.is_empty());
        assert_eq!(one.len(), 1);
        assert!(one.contains(&id("acme/a")));
    }

    #[test]
    fn merge_of_disjoint_states_is_union() {
        let a = ResolvedDependencies::new().with(id("acme/a"), entry(1));
        let b = ResolvedDependencies::new().with(id("acme/b"), entry(2));
        let merged = a.merge(&b).unwrap();
        assert_eq!(merged.len(), 2);
        assert_eq!(merged.get(&id("acme/a")), Some(&entry(1)));
        assert_eq!(merged.get(&id("acme/b")), Some(&entry(2)));
        assert_eq!(merged, b.merge(&a).unwrap());
    }

    #[test]
    fn merge_with_itself_is_idempotent() {
        let a = ResolvedDependencies::new()
            .with(id("acme/a"), entry(1))
            .with(id("acme/b"), entry(3));
        assert_eq!(a.merge(&a).unwrap(), a);
    }

    #[test]
    fn merge_rejects_disagreeing_versions() {
        let a = ResolvedDependencies::new().with(id("acme/a"), entry(1));
        let b = ResolvedDependencies::new().with(id("acme/a"), entry(2));
        let err = a.merge(&b).unwrap_err();
        assert_eq!(err.project, id("acme/a"));
        assert_eq!(err.left, SemanticVersion::new(1, 0, 0));
        assert_eq!(err.right, SemanticVersion::new(2, 0, 0));
    }

    #[test]
    fn lockfile_records_dependencies_in_order() {
        let mut with_deps = entry(1);
        with_deps
            .recipe_version
            .dependencies
            .insert(id("acme/z"), VersionRequirement::Any);
        with_deps
            .recipe_version
            .dependencies
            .insert(id("acme/b"), VersionRequirement::Any);
        let resolved = ResolvedDependencies::new().with(id("acme/a"), with_deps);

        let lockfile = resolved.to_lockfile();
        let locked = &lockfile.packages[&id("acme/a")];
        assert_eq!(locked.version, SemanticVersion::new(1, 0, 0));
        assert_eq!(locked.dependencies, vec![id("acme/b"), id("acme/z")]);
    }

    #[test]
    fn display_lists_one_recipe_per_line() {
        let resolved = ResolvedDependencies::new()
            .with(id("acme/b"), entry(2))
            .with(id("acme/a"), entry(1));
        assert_eq!(resolved.to_string(), "acme/a 1.0.0\nacme/b 2.0.0\n");
    }
}
