//! Core resolution algorithm: sequential steps over a dependency list, each
//! fanning out concurrently over the candidate versions of one recipe.
//!
//! A step either confirms an already chosen version, or fetches the recipe
//! and explores every version satisfying the requirement. Each candidate is
//! inserted into a private copy of the state before its own dependencies are
//! resolved, which also makes dependency cycles terminate. Candidates that
//! fail are dropped; the strategy picks among the survivors.

use std::sync::Arc;

use tracing::{debug, trace};

use pantry_core::dependency::Dependency;
use pantry_core::recipe::Recipe;
use pantry_core::version::SemanticVersion;
use pantry_process::Process;

use crate::conflict::{ConflictError, ResolutionExhaustedError, ResolveError};
use crate::event::Event;
use crate::resolved::{ResolvedDependencies, ResolvedDependency};
use crate::source::RecipeSource;
use crate::strategy::{PreferNewest, ResolutionStrategy};

/// A running or pending resolution.
pub type Resolution = Process<Event, ResolvedDependencies, ResolveError>;

/// Resolves dependency lists against a recipe source.
#[derive(Clone)]
pub struct Resolver {
    source: Arc<dyn RecipeSource>,
    strategy: Arc<dyn ResolutionStrategy>,
}

impl Resolver {
    /// A resolver using the default [`PreferNewest`] strategy.
    pub fn new(source: impl RecipeSource + 'static) -> Self {
        Self::from_shared(Arc::new(source))
    }

    pub fn from_shared(source: Arc<dyn RecipeSource>) -> Self {
        Self {
            source,
            strategy: Arc::new(PreferNewest),
        }
    }

    pub fn with_strategy(self, strategy: impl ResolutionStrategy + 'static) -> Self {
        self.with_shared_strategy(Arc::new(strategy))
    }

    pub fn with_shared_strategy(mut self, strategy: Arc<dyn ResolutionStrategy>) -> Self {
        self.strategy = strategy;
        self
    }

    /// Resolve `dependencies` from scratch.
    pub fn resolve(&self, dependencies: impl IntoIterator<Item = Dependency>) -> Resolution {
        self.resolve_from(ResolvedDependencies::new(), dependencies)
    }

    /// Resolve `dependencies` in order on top of `resolved`. Each step sees
    /// the state produced by the one before it.
    pub fn resolve_from(
        &self,
        resolved: ResolvedDependencies,
        dependencies: impl IntoIterator<Item = Dependency>,
    ) -> Resolution {
        let steps: Vec<_> = dependencies
            .into_iter()
            .map(|dependency| {
                let this = self.clone();
                move |resolved| this.step(resolved, dependency)
            })
            .collect();
        Process::just(resolved).chain_n(steps)
    }

    /// Satisfy a single dependency on top of `resolved`.
    pub fn step(&self, resolved: ResolvedDependencies, dependency: Dependency) -> Resolution {
        let existing = resolved
            .get(&dependency.project)
            .map(|entry| (entry.version, entry.requirement.clone()));
        if let Some((version, existing_requirement)) = existing {
            if dependency.requirement.is_satisfied_by(&version) {
                trace!("{dependency} already satisfied by {version}");
                return Process::just_with(vec![Event::Resolved(resolved.clone())], resolved);
            }
            debug!("{dependency} conflicts with chosen {version}");
            return Process::error(ResolveError::from(ConflictError {
                project: dependency.project,
                existing: version,
                existing_requirement,
                requirement: dependency.requirement,
            }));
        }

        let this = self.clone();
        let failed = dependency.clone();
        self.source
            .fetch(&dependency.project)
            .map_err(move |err| {
                ResolveError::from(ResolutionExhaustedError {
                    dependency: failed,
                    causes: vec![err.into()],
                })
            })
            .chain(move |recipe| this.explore(resolved, dependency, recipe))
    }

    /// Fan out over every version of `recipe` that satisfies `dependency`.
    fn explore(
        &self,
        resolved: ResolvedDependencies,
        dependency: Dependency,
        recipe: Recipe,
    ) -> Resolution {
        let candidates: Vec<_> = recipe
            .versions
            .into_iter()
            .filter(|(version, _)| dependency.requirement.is_satisfied_by(version))
            .collect();
        if candidates.is_empty() {
            debug!("No version of {} satisfies {}", dependency.project, dependency.requirement);
            return Process::error(ResolveError::from(ResolutionExhaustedError {
                dependency,
                causes: Vec::new(),
            }));
        }
        debug!("Exploring {} candidate(s) for {dependency}", candidates.len());

        let versions: Vec<SemanticVersion> = candidates.iter().map(|(v, _)| *v).collect();
        let branches: Vec<Resolution> = candidates
            .into_iter()
            .map(|(version, recipe_version)| {
                let nested = recipe_version.dependencies.to_dependencies();
                let speculative = resolved.with(
                    dependency.project.clone(),
                    ResolvedDependency {
                        version,
                        requirement: dependency.requirement.clone(),
                        recipe_version,
                    },
                );
                self.resolve_from(speculative, nested)
            })
            .collect();

        let this = self.clone();
        Process::join_all(branches)
            .chain(move |outcomes| this.select(resolved, dependency, versions, outcomes))
    }

    /// Pick the best surviving branch. Outcomes arrive in ascending version
    /// order, so on equal scores the highest version wins.
    fn select(
        &self,
        resolved: ResolvedDependencies,
        dependency: Dependency,
        versions: Vec<SemanticVersion>,
        outcomes: Vec<Result<ResolvedDependencies, ResolveError>>,
    ) -> Resolution {
        let mut survivors = Vec::new();
        let mut causes = Vec::new();
        for (version, outcome) in versions.into_iter().zip(outcomes) {
            match outcome {
                Ok(candidate) => survivors.push(candidate),
                Err(err) => {
                    debug!("{} {version} eliminated: {err}", dependency.project);
                    causes.push(err);
                }
            }
        }

        let Some(best) = survivors
            .into_iter()
            .max_by_key(|candidate| self.strategy.score(candidate))
        else {
            return Process::error(ResolveError::from(ResolutionExhaustedError {
                dependency,
                causes,
            }));
        };

        match resolved.merge(&best) {
            Ok(merged) => Process::just_with(vec![Event::Resolved(merged.clone())], merged),
            Err(err) => Process::error(err.into()),
        }
    }
}

/// Resolve `dependencies` against `source` with the default strategy.
pub fn resolve(
    source: impl RecipeSource + 'static,
    dependencies: impl IntoIterator<Item = Dependency>,
) -> Resolution {
    Resolver::new(source).resolve(dependencies)
}
