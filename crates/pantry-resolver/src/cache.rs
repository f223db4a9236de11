//! Recipe fetch memoization for a resolution session.
//!
//! Resolution revisits the same recipes from many candidate branches. The
//! cache keeps every successfully fetched recipe keyed by identifier so each
//! one is read from its source at most once per session, give or take races.

use std::sync::Arc;

use dashmap::DashMap;
use tracing::trace;

use pantry_core::identifier::RecipeIdentifier;
use pantry_core::recipe::Recipe;
use pantry_process::Process;

use crate::event::Event;
use crate::source::{FetchError, RecipeSource};

/// Wraps another source and remembers its successful fetches.
///
/// Concurrent misses for the same identifier may both reach the inner source.
/// The later insert replaces the earlier one with an equal recipe. Failures
/// are not cached.
pub struct CachedSource {
    inner: Box<dyn RecipeSource>,
    recipes: Arc<DashMap<RecipeIdentifier, Recipe>>,
}

impl CachedSource {
    pub fn new(inner: impl RecipeSource + 'static) -> Self {
        Self {
            inner: Box::new(inner),
            recipes: Arc::new(DashMap::new()),
        }
    }

    /// Number of recipes currently cached.
    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    pub fn contains(&self, recipe: &RecipeIdentifier) -> bool {
        self.recipes.contains_key(recipe)
    }
}

impl RecipeSource for CachedSource {
    fn fetch(&self, recipe: &RecipeIdentifier) -> Process<Event, Recipe, FetchError> {
        let cached = self.recipes.get(recipe).map(|entry| entry.value().clone());
        if let Some(found) = cached {
            trace!("Cache hit for {recipe}");
            let hit = Event::CacheHit {
                recipe: recipe.clone(),
            };
            return Process::just_with(vec![hit], found);
        }

        let recipes = Arc::clone(&self.recipes);
        let key = recipe.clone();
        self.inner.fetch(recipe).map(move |fetched| {
            recipes.insert(key, fetched.clone());
            fetched
        })
    }
}
