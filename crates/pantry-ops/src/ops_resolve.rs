//! Operation: resolve the dependencies declared in pantry.toml.

use std::path::Path;
use std::sync::Arc;

use pantry_core::config::GlobalConfig;
use pantry_core::identifier::RecipeIdentifier;
use pantry_core::lockfile::Lockfile;
use pantry_core::manifest::{Manifest, MANIFEST_NAME};
use pantry_core::version::SemanticVersion;
use pantry_resolver::cache::CachedSource;
use pantry_resolver::source::DirectorySource;
use pantry_resolver::strategy::strategy_for;
use pantry_resolver::{Event, RecipeSource, ResolvedDependencies, Resolver};

/// A resolver over the configured recipe directories and strategy.
pub fn build_resolver(config: &GlobalConfig) -> Resolver {
    let directories = DirectorySource::with_roots(config.recipe_paths());
    let source: Arc<dyn RecipeSource> = if config.resolve.cache {
        Arc::new(CachedSource::new(directories))
    } else {
        Arc::new(directories)
    };
    Resolver::from_shared(source).with_shared_strategy(strategy_for(config.resolve.strategy))
}

/// Resolve the project at `project_root`, handing every progress event to
/// `on_event`.
pub async fn resolve<F>(
    project_root: &Path,
    config: &GlobalConfig,
    on_event: F,
) -> miette::Result<ResolvedDependencies>
where
    F: FnMut(Event),
{
    let manifest = Manifest::from_path(&project_root.join(MANIFEST_NAME))?;
    let dependencies = manifest.direct_dependencies();
    tracing::debug!(
        "Resolving {} direct dependencies with the {:?} strategy",
        dependencies.len(),
        config.resolve.strategy
    );

    let resolved = build_resolver(config)
        .resolve(dependencies)
        .observe(on_event)
        .await?;
    Ok(resolved)
}

/// A recipe whose resolved version differs from the lock file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Drift {
    pub recipe: RecipeIdentifier,
    /// `None` when the recipe is not in the lock file yet.
    pub locked: Option<SemanticVersion>,
    pub resolved: SemanticVersion,
}

/// Recipes in `resolved` that `lockfile` pins differently or not at all.
pub fn lock_drift(resolved: &ResolvedDependencies, lockfile: &Lockfile) -> Vec<Drift> {
    resolved
        .iter()
        .filter_map(|(recipe, entry)| {
            let locked = lockfile.locked_version(recipe);
            (locked != Some(entry.version)).then(|| Drift {
                recipe: recipe.clone(),
                locked,
                resolved: entry.version,
            })
        })
        .collect()
}
