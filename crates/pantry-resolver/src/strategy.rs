//! Scoring functions that rank complete resolutions.

use std::sync::Arc;

use pantry_core::config::StrategyName;
use pantry_core::version::SemanticVersion;

use crate::resolved::ResolvedDependencies;

/// Ranks otherwise valid resolutions; the highest score wins.
///
/// Implementations must be deterministic and free of side effects.
pub trait ResolutionStrategy: Send + Sync {
    fn score(&self, resolved: &ResolvedDependencies) -> u64;
}

/// Prefer the resolution with the highest summed version weight.
#[derive(Debug, Clone, Copy, Default)]
pub struct PreferNewest;

/// Prefer the resolution with the fewest recipes.
#[derive(Debug, Clone, Copy, Default)]
pub struct PreferFewest;

fn version_weight(version: &SemanticVersion) -> u64 {
    u64::from(version.major)
        .saturating_mul(10_000)
        .saturating_add(u64::from(version.minor).saturating_mul(100))
        .saturating_add(u64::from(version.patch))
}

impl ResolutionStrategy for PreferNewest {
    fn score(&self, resolved: &ResolvedDependencies) -> u64 {
        resolved
            .iter()
            .map(|(_, entry)| version_weight(&entry.version))
            .fold(0, u64::saturating_add)
    }
}

impl ResolutionStrategy for PreferFewest {
    fn score(&self, resolved: &ResolvedDependencies) -> u64 {
        u64::MAX - resolved.len() as u64
    }
}

impl<F> ResolutionStrategy for F
where
    F: Fn(&ResolvedDependencies) -> u64 + Send + Sync,
{
    fn score(&self, resolved: &ResolvedDependencies) -> u64 {
        self(resolved)
    }
}

/// The strategy selected by a configuration name.
pub fn strategy_for(name: StrategyName) -> Arc<dyn ResolutionStrategy> {
    match name {
        StrategyName::Newest => Arc::new(PreferNewest),
        StrategyName::Fewest => Arc::new(PreferFewest),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolved::ResolvedDependency;
    use pantry_core::identifier::RecipeIdentifier;
    use pantry_core::recipe::{GitCommit, RecipeVersion, SourceLocation};
    use pantry_core::version::VersionRequirement;

    fn state(versions: &[(&str, SemanticVersion)]) -> ResolvedDependencies {
        versions
            .iter()
            .fold(ResolvedDependencies::new(), |acc, (name, version)| {
                acc.with(
                    RecipeIdentifier::parse(name).unwrap(),
                    ResolvedDependency {
                        version: *version,
                        requirement: VersionRequirement::Any,
                        recipe_version: RecipeVersion::new(SourceLocation::Git(GitCommit {
                            url: "u".to_string(),
                            commit: "c".to_string(),
                        })),
                    },
                )
            })
    }

    #[test]
    fn newest_sums_weighted_versions() {
        let resolved = state(&[
            ("acme/a", SemanticVersion::new(1, 2, 3)),
            ("acme/b", SemanticVersion::new(0, 1, 0)),
        ]);
        assert_eq!(PreferNewest.score(&resolved), 10_203 + 100);
        assert_eq!(PreferNewest.score(&ResolvedDependencies::new()), 0);
    }

    #[test]
    fn newest_handles_maximal_versions() {
        let huge = SemanticVersion::new(u32::MAX, u32::MAX, u32::MAX);
        let resolved = state(&[
            ("acme/a", huge),
            ("acme/b", huge),
            ("acme/c", huge),
        ]);
        let single = PreferNewest.score(&state(&[("acme/a", huge)]));
        assert_eq!(single, 4_294_967_295 * 10_101);
        assert_eq!(PreferNewest.score(&resolved), single * 3);
    }

    #[test]
    fn fewest_prefers_smaller_resolutions() {
        let small = state(&[("acme/a", SemanticVersion::new(1, 0, 0))]);
        let large = state(&[
            ("acme/a", SemanticVersion::new(9, 0, 0)),
            ("acme/b", SemanticVersion::new(9, 0, 0)),
        ]);
        assert!(PreferFewest.score(&small) > PreferFewest.score(&large));
    }

    #[test]
    fn closures_are_strategies() {
        let constant = |_: &ResolvedDependencies| -> u64 { 42 };
        assert_eq!(constant.score(&ResolvedDependencies::new()), 42);
    }

    #[test]
    fn strategy_names_map_to_strategies() {
        let small = state(&[("acme/a", SemanticVersion::new(1, 0, 0))]);
        assert_eq!(strategy_for(StrategyName::Newest).score(&small), 10_000);
        assert_eq!(strategy_for(StrategyName::Fewest).score(&small), u64::MAX - 1);
    }
}
